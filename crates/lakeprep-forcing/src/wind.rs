//! Wind-only surface boundary file (`surfbcW.txt`).

use chrono::NaiveDate;
use lakeprep_core::{Column, ConfigError, DomainError, OutputSink, PrepError, Record, TextFile};

use crate::series::check_column;

/// Name of the wind-only boundary file.
pub const WIND_FILE_NAME: &str = "surfbcW.txt";

/// Header metadata for `surfbcW.txt`.
#[derive(Clone, Debug, PartialEq)]
pub struct WindConfig {
    /// Case study name written in the header.
    pub case_study: String,
    /// Sampling interval in minutes.
    pub interval_minutes: u32,
    /// Date stamped in the header.
    pub prepared_on: NaiveDate,
}

impl WindConfig {
    /// Configuration stamped with today's date.
    pub fn new(case_study: impl Into<String>, interval_minutes: u32) -> Self {
        Self {
            case_study: case_study.into(),
            interval_minutes,
            prepared_on: chrono::Local::now().date_naive(),
        }
    }

    /// Check that the header fields are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.case_study.trim().is_empty() || self.case_study.contains('\n') {
            return Err(ConfigError::InvalidField {
                field: "case_study",
                reason: "must be a non-empty single line".into(),
            });
        }
        if self.interval_minutes == 0 {
            return Err(ConfigError::InvalidField {
                field: "interval_minutes",
                reason: "must be positive".into(),
            });
        }
        Ok(())
    }
}

/// Wind drag and components, sampled at hourly-resolution time stamps.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WindSeries {
    /// Sample times in hours, strictly increasing.
    pub time_hours: Vec<f64>,
    /// Wind drag coefficient.
    pub wind_drag: Vec<f64>,
    /// Eastward wind (m/s).
    pub wind_u: Vec<f64>,
    /// Northward wind (m/s).
    pub wind_v: Vec<f64>,
}

impl WindSeries {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.time_hours.len()
    }

    /// Returns `true` if there are no samples.
    pub fn is_empty(&self) -> bool {
        self.time_hours.is_empty()
    }

    /// Check column lengths, finiteness, and time ordering.
    pub fn validate(&self) -> Result<(), DomainError> {
        let n = self.time_hours.len();
        if n == 0 {
            return Err(DomainError::Empty { name: "wind time" });
        }
        check_column("wind time", &self.time_hours, n)?;
        if let Some(index) = (1..n).find(|&i| self.time_hours[i] <= self.time_hours[i - 1]) {
            return Err(DomainError::NotIncreasing {
                name: "wind time",
                index,
            });
        }
        check_column("wind drag", &self.wind_drag, n)?;
        check_column("wind u", &self.wind_u, n)?;
        check_column("wind v", &self.wind_v, n)
    }
}

/// Render `surfbcW.txt`. Time is written as hours since the first sample.
///
/// Fails on a ragged or unordered series instead of writing a short file.
pub fn render_wind_forcing(
    config: &WindConfig,
    series: &WindSeries,
) -> Result<TextFile, DomainError> {
    series.validate()?;
    let name = &config.case_study;
    let mut file = TextFile::new(WIND_FILE_NAME);
    file.line("Surface boundary condition file for si3d model")
        .line(&format!("{name} simulations "))
        .line("Time is given in hours from the start date used within the input.txt ")
        .line("   Time in   // Data format is (10X,G11.2,...) Time cw ua va")
        .line(&format!(
            "   {}-min    // SOURCE = {name} Met Data ",
            config.interval_minutes
        ))
        .line(&format!(
            " intervals  (Note : file prepared on {}",
            config.prepared_on
        ))
        .line(&format!("   npts = {}", series.len()));

    let start = series.time_hours.first().copied().unwrap_or(0.0);
    for i in 0..series.len() {
        file.record(&Record::spaced(
            Column::F10_4,
            &[
                series.time_hours[i] - start,
                series.wind_drag[i],
                series.wind_u[i],
                series.wind_v[i],
            ],
        ));
    }
    Ok(file)
}

/// Validate and write `surfbcW.txt` through `sink`.
pub fn write_wind_forcing(
    config: &WindConfig,
    series: &WindSeries,
    sink: &mut dyn OutputSink,
) -> Result<(), PrepError> {
    config.validate()?;
    series.validate()?;
    sink.write_file(&render_wind_forcing(config, series)?)
}
