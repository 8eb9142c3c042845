//! Test fixtures and mock sinks for lakeprep development.
//!
//! Provides deterministic input data (profiles, forcing series) and mock
//! implementations of the output traits ([`OutputSink`],
//! [`DiagnosticSink`]) for tests and benchmarks.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use lakeprep_core::{OutputSink, PrepError, TextFile};
use lakeprep_forcing::{DiagnosticSeries, DiagnosticSink};

pub use fixtures::*;

/// Output sink that rejects every write with an I/O error.
///
/// Useful for checking that a failed write surfaces as
/// [`PrepError::Io`] instead of being swallowed.
#[derive(Debug, Default)]
pub struct FailingSink {
    pub attempts: usize,
}

impl OutputSink for FailingSink {
    fn write_file(&mut self, file: &TextFile) -> Result<(), PrepError> {
        self.attempts += 1;
        Err(std::io::Error::other(format!("refusing to write {}", file.name())).into())
    }
}

/// A published diagnostic series, copied out of the borrow.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedSeries {
    pub name: &'static str,
    pub unit: &'static str,
    pub values: Vec<f64>,
}

/// Diagnostic sink that keeps every series it receives.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    pub series: Vec<RecordedSeries>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded series with the given name.
    pub fn get(&self, name: &str) -> Option<&RecordedSeries> {
        self.series.iter().find(|s| s.name == name)
    }
}

impl DiagnosticSink for RecordingDiagnostics {
    fn publish(&mut self, series: &DiagnosticSeries<'_>) {
        self.series.push(RecordedSeries {
            name: series.name,
            unit: series.unit,
            values: series.values.to_vec(),
        });
    }
}
