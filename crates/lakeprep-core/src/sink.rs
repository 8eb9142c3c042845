//! Destinations for rendered input files.
//!
//! Every generator renders its file completely in memory and hands the
//! finished [`TextFile`] to an [`OutputSink`]. Production code writes into
//! an explicit directory with [`DirectorySink`]; tests capture output with
//! [`MemorySink`].

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::error::PrepError;
use crate::record::TextFile;

/// Receives finished files.
pub trait OutputSink {
    /// Persist `file`. A failed call must not leave a truncated file
    /// behind under the final name.
    fn write_file(&mut self, file: &TextFile) -> Result<(), PrepError>;
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn write_file(&mut self, file: &TextFile) -> Result<(), PrepError> {
        (**self).write_file(file)
    }
}

/// Writes files into a fixed output directory.
///
/// Each file is first written to `<name>.partial` and renamed into place
/// once fully flushed. If anything fails the partial file is removed.
#[derive(Clone, Debug)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Target `dir`, creating it if missing.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self, PrepError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// The output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Final path for a file called `name`.
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

impl OutputSink for DirectorySink {
    fn write_file(&mut self, file: &TextFile) -> Result<(), PrepError> {
        let target = self.path_of(file.name());
        let guard = PartialFile::create(&target)?;
        guard.finish(file.body().as_bytes())?;
        log::info!("wrote {} ({} lines)", target.display(), file.line_count());
        Ok(())
    }
}

/// Scoped handle on a `.partial` file that is deleted unless committed.
struct PartialFile {
    partial: PathBuf,
    target: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl PartialFile {
    fn create(target: &Path) -> Result<Self, PrepError> {
        let mut name = target.as_os_str().to_owned();
        name.push(".partial");
        let partial = PathBuf::from(name);
        let writer = BufWriter::new(File::create(&partial)?);
        Ok(Self {
            partial,
            target: target.to_path_buf(),
            writer: Some(writer),
        })
    }

    fn finish(mut self, bytes: &[u8]) -> Result<(), PrepError> {
        if let Some(mut writer) = self.writer.take() {
            writer.write_all(bytes)?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        fs::rename(&self.partial, &self.target)?;
        Ok(())
    }
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        // Close the handle before unlinking.
        self.writer.take();
        if self.partial.exists() {
            if let Err(e) = fs::remove_file(&self.partial) {
                log::warn!("could not remove {}: {e}", self.partial.display());
            }
        }
    }
}

/// Keeps every written file in memory, in write order.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    files: IndexMap<String, String>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents of the file called `name`, if it was written.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.files.get(name).map(String::as_str)
    }

    /// File names in the order they were first written.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Number of distinct files written.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl OutputSink for MemorySink {
    fn write_file(&mut self, file: &TextFile) -> Result<(), PrepError> {
        self.files
            .insert(file.name().to_string(), file.body().to_string());
        Ok(())
    }
}
