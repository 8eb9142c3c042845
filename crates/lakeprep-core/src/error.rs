//! Error taxonomy shared by every lakeprep pipeline.
//!
//! Errors are grouped by cause: malformed configuration (unknown tags,
//! header lengths), physically invalid input (depths, profiles, series
//! shapes), and methods that exist as tags but have no implementation.
//! All of them abort the current file-generation call.

use std::io;

use thiserror::Error;

/// Top-level error returned by every file-producing operation.
#[derive(Debug, Error)]
pub enum PrepError {
    /// The request names something this build does not recognize.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    /// An input value lies outside its physical domain.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),
    /// The selected method is declared but not implemented.
    #[error("{feature} is not implemented")]
    NotImplemented {
        /// Name of the unimplemented method.
        feature: &'static str,
    },
    /// Writing an output file failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl PrepError {
    /// Returns `true` for [`PrepError::Config`].
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns `true` for [`PrepError::Domain`].
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain(_))
    }
}

/// Malformed or unrecognized configuration.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A string tag did not match any known variant.
    #[error("unknown {kind} '{tag}' (expected one of: {expected})")]
    UnknownTag {
        /// What the tag selects, e.g. "spacing method".
        kind: &'static str,
        /// The rejected tag.
        tag: String,
        /// Comma-separated list of accepted tags.
        expected: &'static str,
    },
    /// The bathymetry header must have a fixed length.
    #[error("bathymetry header '{header}' is {found} characters, expected {expected}")]
    HeaderLength {
        /// The rendered header.
        header: String,
        /// Its length in characters.
        found: usize,
        /// The required length.
        expected: usize,
    },
    /// A free-form configuration field is unusable.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// Name of the field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// Physically or structurally invalid input data.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DomainError {
    /// Depths must be finite and strictly positive.
    #[error("{name} must be finite and positive, got {value}")]
    NonPositive {
        /// Name of the quantity.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A parameter is outside its admissible range.
    #[error("{name} = {value} is out of range: {reason}")]
    OutOfRange {
        /// Name of the parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// Description of the admissible range.
        reason: String,
    },
    /// A layer series did not reach its target within the term budget.
    #[error("layer series reached {reached} after {terms} terms without reaching {target}")]
    SeriesExhausted {
        /// Depth the series had to reach.
        target: f64,
        /// Cumulative depth after the last term.
        reached: f64,
        /// Number of terms evaluated.
        terms: usize,
    },
    /// A sequence that must strictly increase does not.
    #[error("{name} must be strictly increasing (violated at index {index})")]
    NotIncreasing {
        /// Name of the sequence.
        name: &'static str,
        /// First index whose value does not exceed its predecessor.
        index: usize,
    },
    /// Parallel columns have different lengths.
    #[error("{name} has {found} entries, expected {expected}")]
    LengthMismatch {
        /// Name of the offending column.
        name: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        found: usize,
    },
    /// A sequence that needs at least one entry is empty.
    #[error("{name} is empty")]
    Empty {
        /// Name of the sequence.
        name: &'static str,
    },
    /// A value is NaN or infinite.
    #[error("{name} contains a non-finite value at index {index}")]
    NonFinite {
        /// Name of the sequence.
        name: &'static str,
        /// Index of the first non-finite value.
        index: usize,
    },
    /// A profile stops short of the depth it must cover.
    #[error("{name} ends at {deepest} m but must reach {required} m")]
    ProfileTooShallow {
        /// Name of the profile.
        name: &'static str,
        /// Deepest sample in the profile.
        deepest: f64,
        /// Depth the profile must reach.
        required: f64,
    },
    /// Declared tracer count disagrees with the supplied columns.
    #[error(
        "{declared} tracers declared but {depth_columns} depth columns and \
         {concentration_columns} concentration columns supplied"
    )]
    TracerShape {
        /// Number of tracers declared in the configuration.
        declared: usize,
        /// Number of tracer depth columns supplied.
        depth_columns: usize,
        /// Number of tracer concentration columns supplied.
        concentration_columns: usize,
    },
}
