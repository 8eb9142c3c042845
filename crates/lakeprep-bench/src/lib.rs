//! Benchmark profiles for lakeprep.
//!
//! - [`deep_lake_policies`]: one spacing policy per method for a 500 m basin
//! - [`hourly_year`]: a year of hourly heat budget inputs

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use lakeprep_core::{BasinDepth, DomainError};
use lakeprep_forcing::{MetSample, RelativeHumidity};
use lakeprep_grid::{GeometricGrowth, SpacingPolicy};

/// Depth of the benchmark basin in meters.
pub const DEEP_LAKE_DEPTH: f64 = 500.0;

/// Hours in a non-leap year.
pub const HOURS_PER_YEAR: usize = 8760;

/// The benchmark basin.
pub fn deep_lake() -> Result<BasinDepth, DomainError> {
    BasinDepth::new(DEEP_LAKE_DEPTH)
}

/// One policy per spacing method, each giving a few hundred layers over
/// [`DEEP_LAKE_DEPTH`].
pub fn deep_lake_policies() -> Vec<(&'static str, SpacingPolicy)> {
    vec![
        ("uniform", SpacingPolicy::Uniform { thickness: 1.0 }),
        (
            "exp",
            SpacingPolicy::ExponentialFromSurface(GeometricGrowth::new(0.1, 1.015)),
        ),
        (
            "sbconc",
            SpacingPolicy::SurfaceExpBottomExp {
                surface: GeometricGrowth::new(0.1, 1.02),
                bottom: GeometricGrowth::new(0.5, 1.02),
                divisor: 2.0,
            },
        ),
        (
            "surfvarBotconsta",
            SpacingPolicy::SurfaceExpBottomUniform {
                surface: GeometricGrowth::new(0.1, 1.03),
                reference_depth: 50.0,
                thickness: 2.0,
            },
        ),
    ]
}

/// A year of hourly heat budget inputs with diurnal and seasonal cycles.
pub fn hourly_year() -> Result<Vec<MetSample>, DomainError> {
    (0..HOURS_PER_YEAR)
        .map(|i| -> Result<MetSample, DomainError> {
            let hour = i as f64;
            let day = (hour / 24.0 / 365.0 * std::f64::consts::TAU).sin();
            let diurnal = ((hour % 24.0 - 6.0) / 12.0 * std::f64::consts::PI).sin();
            Ok(MetSample {
                shortwave_net: (800.0 * diurnal).max(0.0),
                longwave_in: 300.0 + 30.0 * day,
                longwave_out: 360.0 + 25.0 * day,
                air_temperature: 10.0 + 10.0 * day + 4.0 * diurnal,
                water_temperature: 12.0 + 8.0 * day,
                humidity: RelativeHumidity::from_percent(65.0 - 15.0 * diurnal)?,
                wind_u: 3.0 * (hour / 5.0).sin(),
                wind_v: 2.0 * (hour / 9.0).cos(),
            })
        })
        .collect()
}
