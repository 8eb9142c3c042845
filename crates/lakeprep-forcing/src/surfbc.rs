//! Surface boundary condition file (`surfbc.txt`).
//!
//! Three layouts exist, selected by the driver block of the
//! [`ForcingSeries`]:
//!
//! | mode | columns |
//! |------|---------|
//! | `Preprocess` | `Time attc Hsw Hn cw ua va` |
//! | `RunTime1` | `Time attc Hsw Ta Pa hr cc cw ua va` |
//! | `RunTime2` | `Time attc Hsw Ta Pa hr Hlw cw ua va` |
//!
//! All columns are `%10.4f` except pressure, which narrows to `%10.3f` for
//! rows whose value is at least [`PASCAL_THRESHOLD`].

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use lakeprep_core::{
    Cell, Column, ConfigError, DomainError, OutputSink, PrepError, Record, TextFile,
};
use smallvec::SmallVec;

use crate::diagnostics::{DiagnosticSeries, DiagnosticSink};
use crate::heat_flux::{compute_heat_flux, HeatFluxResult};
use crate::series::{AtmosphereDrivers, Drivers, ForcingSeries};

/// Name of the surface boundary condition file.
pub const SURFBC_FILE_NAME: &str = "surfbc.txt";

/// Pressures at or above this value are written with three decimals.
pub const PASCAL_THRESHOLD: f64 = 100_000.0;

/// Layout of `surfbc.txt`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfbcMode {
    /// Net heat flux computed during preparation.
    Preprocessed,
    /// SI3D computes the heat budget from cloud cover.
    RuntimeCloudCover,
    /// SI3D computes the heat budget from measured incoming longwave.
    RuntimeLongwaveIn,
}

impl SurfbcMode {
    /// Legacy tag.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Preprocessed => "Preprocess",
            Self::RuntimeCloudCover => "RunTime1",
            Self::RuntimeLongwaveIn => "RunTime2",
        }
    }

    /// Column names as listed in the file header.
    pub fn columns(self) -> &'static str {
        match self {
            Self::Preprocessed => "Time attc Hsw Hn cw ua va",
            Self::RuntimeCloudCover => "Time attc Hsw Ta Pa hr cc cw ua va",
            Self::RuntimeLongwaveIn => "Time attc Hsw Ta Pa hr Hlw cw ua va",
        }
    }

    /// Values per row.
    pub fn column_count(self) -> usize {
        match self {
            Self::Preprocessed => 7,
            Self::RuntimeCloudCover | Self::RuntimeLongwaveIn => 10,
        }
    }

    /// Whether SI3D runs its own heat budget from the written drivers.
    pub fn is_runtime(self) -> bool {
        !matches!(self, Self::Preprocessed)
    }
}

impl FromStr for SurfbcMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Preprocess" | "Preprocessed" => Ok(Self::Preprocessed),
            "RunTime1" => Ok(Self::RuntimeCloudCover),
            "RunTime2" => Ok(Self::RuntimeLongwaveIn),
            other => Err(ConfigError::UnknownTag {
                kind: "surfbc mode",
                tag: other.to_string(),
                expected: "Preprocess, RunTime1, RunTime2",
            }),
        }
    }
}

impl fmt::Display for SurfbcMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Header metadata for `surfbc.txt`.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfbcConfig {
    /// Lake name written in the header.
    pub lake_name: String,
    /// Year of the first sample.
    pub year: i32,
    /// Hour of day of the first sample.
    pub start_hour: u32,
    /// Minute of the first sample.
    pub start_minute: u32,
    /// Sampling interval in minutes.
    pub interval_minutes: u32,
    /// Date stamped in the header.
    pub prepared_on: NaiveDate,
}

impl Default for SurfbcConfig {
    fn default() -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            lake_name: "Lake".into(),
            year: today.year(),
            start_hour: 0,
            start_minute: 0,
            interval_minutes: 60,
            prepared_on: today,
        }
    }
}

impl SurfbcConfig {
    /// Check that the header fields are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lake_name.trim().is_empty() || self.lake_name.contains('\n') {
            return Err(ConfigError::InvalidField {
                field: "lake_name",
                reason: "must be a non-empty single line".into(),
            });
        }
        if self.start_hour > 23 || self.start_minute > 59 {
            return Err(ConfigError::InvalidField {
                field: "start time",
                reason: format!("{}:{} is not a time of day", self.start_hour, self.start_minute),
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

/// Outcome of a successful assembly.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceForcing {
    /// Layout that was written.
    pub mode: SurfbcMode,
    /// Number of data rows.
    pub rows: usize,
    /// Per-timestep heat budget. Empty for runtime modes.
    pub heat_flux: Vec<HeatFluxResult>,
}

/// Column format for an atmospheric pressure value.
pub fn pressure_column(pressure: f64) -> Column {
    if pressure >= PASCAL_THRESHOLD {
        Column::F10_3
    } else {
        Column::F10_4
    }
}

/// Heat budget per timestep for [`Drivers::HeatBudget`]; empty otherwise.
pub fn surface_heat_budget(series: &ForcingSeries) -> Result<Vec<HeatFluxResult>, PrepError> {
    let Drivers::HeatBudget(drivers) = &series.drivers else {
        return Ok(Vec::new());
    };
    drivers.method.ensure_implemented()?;
    (0..series.len())
        .map(|i| -> Result<HeatFluxResult, PrepError> {
            let met = series.met_sample(i).ok_or(DomainError::LengthMismatch {
                name: "heat budget drivers",
                expected: series.len(),
                found: i,
            })?;
            compute_heat_flux(&drivers.method, &met)
        })
        .collect()
}

/// Render `surfbc.txt`.
///
/// `heat_flux` must hold one entry per timestep for the preprocessed
/// layout and is ignored otherwise. The series is validated first, so a
/// ragged series is an error rather than a short file.
pub fn render_surface_forcing(
    config: &SurfbcConfig,
    series: &ForcingSeries,
    heat_flux: &[HeatFluxResult],
) -> Result<TextFile, DomainError> {
    series.validate()?;
    if matches!(series.drivers, Drivers::HeatBudget(_)) && heat_flux.len() != series.len() {
        return Err(DomainError::LengthMismatch {
            name: "heat flux",
            expected: series.len(),
            found: heat_flux.len(),
        });
    }
    let mode = series.mode();
    let lake = &config.lake_name;
    let year = config.year;
    let first_day = series.time.first().copied().unwrap_or(0.0);

    let mut file = TextFile::new(SURFBC_FILE_NAME);
    file.line("Surface boundary condition file for si3d model")
        .line(&format!("{lake} simulations "))
        .line(&format!(
            "Time is given in hours from {}:{} hrs on julian day {first_day:?},{year}",
            config.start_hour, config.start_minute
        ))
        .line(&format!(
            "   Time in   // Data format is (10X,G11.2,...) {}",
            mode.columns()
        ))
        .line(&format!(
            "   {}-min    // SOURCE = {lake} Met Data {year}",
            config.interval_minutes
        ));
    match &series.drivers {
        Drivers::HeatBudget(d) => file.line(&format!(
            " intervals  (Note : file prepared on {}HeatBudget = {}",
            config.prepared_on, d.method
        )),
        _ => file.line(&format!(
            " intervals  (Note : file prepared on {}",
            config.prepared_on
        )),
    };
    file.line(&format!("   npts = {}", series.len()));

    let hours = series.elapsed_hours();
    for i in 0..series.len() {
        let mut row: Record = [hours[i], series.attenuation[i], series.shortwave_net[i]]
            .into_iter()
            .map(|v| Cell::spaced(Column::F10_4, v))
            .collect();
        match &series.drivers {
            Drivers::HeatBudget(_) => {
                row.push(Cell::spaced(Column::F10_4, heat_flux[i].net));
            }
            Drivers::CloudCover(a) | Drivers::LongwaveIn(a) => push_atmosphere(&mut row, a, i),
        }
        for v in [series.wind_drag[i], series.wind_u[i], series.wind_v[i]] {
            row.push(Cell::spaced(Column::F10_4, v));
        }
        file.record(&row);
    }
    Ok(file)
}

fn push_atmosphere(row: &mut Record, a: &AtmosphereDrivers, i: usize) {
    let pressure = a.pressure[i];
    row.push(Cell::spaced(Column::F10_4, a.air_temperature[i]))
        .push(Cell::spaced(pressure_column(pressure), pressure))
        .push(Cell::spaced(Column::F10_4, a.humidity[i].fraction()))
        .push(Cell::spaced(Column::F10_4, a.radiation[i]));
}

/// Validate, compute the heat budget if needed, and write `surfbc.txt`.
///
/// Runtime modes then publish their driver series to `diagnostics`.
/// Nothing is written when validation or the heat budget fails.
pub fn assemble_surface_forcing(
    config: &SurfbcConfig,
    series: &ForcingSeries,
    sink: &mut dyn OutputSink,
    diagnostics: &mut dyn DiagnosticSink,
) -> Result<SurfaceForcing, PrepError> {
    config.validate()?;
    series.validate()?;
    let heat_flux = surface_heat_budget(series)?;
    let file = render_surface_forcing(config, series, &heat_flux)?;
    sink.write_file(&file)?;

    let mode = series.mode();
    if let Some(atmosphere) = series.drivers.atmosphere() {
        if diagnostics.enabled() {
            publish_drivers(series, atmosphere, mode, diagnostics);
        }
    }
    log::debug!("{mode} surface forcing: {} rows for {}", series.len(), config.lake_name);
    Ok(SurfaceForcing {
        mode,
        rows: series.len(),
        heat_flux,
    })
}

fn publish_drivers(
    series: &ForcingSeries,
    a: &AtmosphereDrivers,
    mode: SurfbcMode,
    diagnostics: &mut dyn DiagnosticSink,
) {
    let wind_speed = series.wind_speed();
    let humidity: Vec<f64> = a.humidity.iter().map(|h| h.fraction()).collect();
    let (radiation_name, radiation_unit) = match mode {
        SurfbcMode::RuntimeLongwaveIn => ("longwave in", "W/m2"),
        _ => ("cloud cover", ""),
    };
    let time = series.time.as_slice();
    let all: SmallVec<[DiagnosticSeries<'_>; 8]> = SmallVec::from_buf([
        entry("attenuation", "1/m", time, &series.attenuation),
        entry("net shortwave", "W/m2", time, &series.shortwave_net),
        entry(radiation_name, radiation_unit, time, &a.radiation),
        entry("wind speed", "m/s", time, &wind_speed),
        entry("air temperature", "degC", time, &a.air_temperature),
        entry("pressure", "", time, &a.pressure),
        entry("relative humidity", "", time, &humidity),
        entry("wind drag", "", time, &series.wind_drag),
    ]);
    for s in &all {
        diagnostics.publish(s);
    }
}

fn entry<'a>(
    name: &'static str,
    unit: &'static str,
    time: &'a [f64],
    values: &'a [f64],
) -> DiagnosticSeries<'a> {
    DiagnosticSeries {
        name,
        unit,
        time,
        values,
    }
}
