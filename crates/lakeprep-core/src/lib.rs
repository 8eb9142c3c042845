//! Core types for the lakeprep SI3D input preparation toolkit.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! pieces shared by the vertical-grid and surface-forcing pipelines:
//! validated input types, the error taxonomy, fixed-width record
//! formatting, and output sinks.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod depth;
pub mod error;
pub mod profile;
pub mod record;
pub mod sink;

pub use depth::BasinDepth;
pub use error::{ConfigError, DomainError, PrepError};
pub use profile::Profile;
pub use record::{Cell, Column, Record, TextFile};
pub use sink::{DirectorySink, MemorySink, OutputSink};

/// Depth marker for grid rows above the water surface.
pub const SENTINEL_DEPTH: f64 = -100.0;
