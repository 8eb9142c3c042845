//! Deterministic input data.
//!
//! - [`summer_ctd`]: a stratified temperature profile down to 60 m
//! - [`tracer_columns`]: linear tracer profiles
//! - [`cloud_cover_series`], [`longwave_series`], [`heat_budget_series`]:
//!   hourly forcing for each `surfbc.txt` layout

use chrono::NaiveDate;
use lakeprep_core::{BasinDepth, Profile};
use lakeprep_forcing::{
    AtmosphereDrivers, Drivers, ForcingSeries, HeatBudgetDrivers, HeatBudgetMethod,
    RelativeHumidity, SurfbcConfig, WindConfig,
};
use lakeprep_grid::{InitialConditionConfig, TracerColumns};

/// Date stamped into headers so rendered files are reproducible.
pub fn fixed_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).expect("fixture date is valid")
}

pub fn basin(depth: f64) -> BasinDepth {
    BasinDepth::new(depth).expect("fixture depth must be positive")
}

/// Epilimnion at 20 degC, thermocline between 8 and 20 m, 6 degC below.
pub fn summer_ctd() -> Profile {
    Profile::from_pairs(&[
        (0.5, 20.0),
        (4.0, 19.8),
        (8.0, 19.0),
        (12.0, 14.0),
        (16.0, 9.0),
        (20.0, 7.0),
        (40.0, 6.2),
        (60.0, 6.0),
    ])
    .expect("fixture profile is valid")
}

/// `count` tracers sampled every 10 m down to `depth`, tracer `t` rising
/// linearly from `t + 1` g/L at the surface.
pub fn tracer_columns(count: usize, depth: f64) -> TracerColumns {
    let samples: Vec<f64> = (0u32..)
        .map(|i| f64::from(i) * 10.0)
        .take_while(|z| *z < depth)
        .chain(std::iter::once(depth))
        .collect();
    TracerColumns {
        depths: vec![samples.clone(); count],
        concentrations: (0..count)
            .map(|t| samples.iter().map(|z| (t + 1) as f64 + z / 100.0).collect())
            .collect(),
    }
}

pub fn init_config(tracer_count: usize) -> InitialConditionConfig {
    InitialConditionConfig {
        lake_name: "Tahoe".into(),
        start_date: "2018-06-01 00:00".into(),
        tracer_count,
    }
}

pub fn surfbc_config() -> SurfbcConfig {
    SurfbcConfig {
        lake_name: "Tahoe".into(),
        year: 2018,
        start_hour: 0,
        start_minute: 0,
        interval_minutes: 60,
        prepared_on: fixed_date(),
    }
}

pub fn wind_config() -> WindConfig {
    WindConfig {
        case_study: "Tahoe".into(),
        interval_minutes: 60,
        prepared_on: fixed_date(),
    }
}

fn hourly(n: usize, drivers: Drivers) -> ForcingSeries {
    let hour = |i: usize| i as f64;
    ForcingSeries {
        time: (0..n).map(|i| 152.0 + hour(i) / 24.0).collect(),
        attenuation: vec![0.25; n],
        shortwave_net: (0..n)
            .map(|i| {
                let phase = std::f64::consts::PI * (hour(i) % 24.0 - 6.0) / 12.0;
                (600.0 * phase.sin()).max(0.0)
            })
            .collect(),
        wind_drag: vec![0.0013; n],
        wind_u: (0..n).map(|i| 2.0 + (hour(i) * 0.3).sin()).collect(),
        wind_v: (0..n).map(|i| -1.0 + (hour(i) * 0.2).cos()).collect(),
        drivers,
    }
}

fn atmosphere(n: usize, pressure: f64, radiation: f64) -> AtmosphereDrivers {
    AtmosphereDrivers {
        air_temperature: (0..n).map(|i| 15.0 + (i % 24) as f64 * 0.25).collect(),
        pressure: vec![pressure; n],
        humidity: vec![humidity(); n],
        radiation: vec![radiation; n],
    }
}

/// `RunTime1` forcing with pressure in `pressure`'s unit.
pub fn cloud_cover_series(n: usize, pressure: f64) -> ForcingSeries {
    hourly(n, Drivers::CloudCover(atmosphere(n, pressure, 0.3)))
}

/// `RunTime2` forcing with pressure in `pressure`'s unit.
pub fn longwave_series(n: usize, pressure: f64) -> ForcingSeries {
    hourly(n, Drivers::LongwaveIn(atmosphere(n, pressure, 320.0)))
}

/// `Preprocess` forcing for `method`.
pub fn heat_budget_series(n: usize, method: HeatBudgetMethod) -> ForcingSeries {
    hourly(
        n,
        Drivers::HeatBudget(HeatBudgetDrivers {
            method,
            longwave_in: vec![315.0; n],
            longwave_out: vec![395.0; n],
            air_temperature: (0..n).map(|i| 15.0 + (i % 24) as f64 * 0.25).collect(),
            water_temperature: vec![19.0; n],
            humidity: vec![humidity(); n],
        }),
    )
}

fn humidity() -> RelativeHumidity {
    RelativeHumidity::from_percent(55.0).expect("fixture humidity is valid")
}
