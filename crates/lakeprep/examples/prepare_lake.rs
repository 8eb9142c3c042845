//! Prepare a full set of SI3D input files for a synthetic 50 m lake.
//!
//! ```text
//! RUST_LOG=info cargo run -p lakeprep --example prepare_lake -- out/
//! ```
//!
//! Writes `si3d_layer.txt`, `si3d_init.txt`, `h50m_lake`, `surfbc.txt` and
//! `surfbcW.txt` into the given directory (default `si3d_inputs`).

use std::env;
use std::f64::consts::{PI, TAU};
use std::process::ExitCode;

use lakeprep::prelude::*;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let dir = env::args().nth(1).unwrap_or_else(|| "si3d_inputs".into());
    match run(&dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("preparation failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(dir: &str) -> Result<(), PrepError> {
    let mut sink = DirectorySink::create(dir)?;
    let depth = BasinDepth::new(50.0)?;

    // Fine layers near the surface, 2 m layers below 20 m.
    let policy = SpacingPolicy::SurfaceExpBottomUniform {
        surface: GeometricGrowth::new(0.25, 1.08),
        reference_depth: 20.0,
        thickness: 2.0,
    };
    let grid = build_layer_grid(depth, &policy, &mut sink)?;
    log::info!("{} layers, bottom at {} m", grid.layer_count(), grid.bottom());

    let ctd = Profile::from_pairs(&[
        (0.5, 21.0),
        (5.0, 20.5),
        (10.0, 17.0),
        (15.0, 11.0),
        (25.0, 7.5),
        (50.0, 6.0),
    ])?;
    let init = InitialConditionConfig {
        lake_name: "Synthetic Lake".into(),
        start_date: "2018-06-01 00:00".into(),
        tracer_count: 0,
    };
    write_initial_condition(&init, &grid, &TemperatureSource::Profile(ctd), None, &mut sink)?;

    // The header label must be exactly 27 characters.
    let bathy = BathymetryConfig {
        sim_name: "Synthetic sim 001".into(),
        dx: 50.0,
    };
    write_bathymetry(&bathy, &bowl(24, 16, depth.value())?, &mut sink)?;

    let forcing = hourly_forcing(72)?;
    let config = SurfbcConfig {
        lake_name: "Synthetic Lake".into(),
        year: 2018,
        ..SurfbcConfig::default()
    };
    assemble_surface_forcing(&config, &forcing, &mut sink, &mut LogDiagnostics)?;

    let wind = WindConfig::new("Synthetic Lake", 60);
    write_wind_forcing(&wind, &forcing.wind_series(), &mut sink)?;

    log::info!("inputs written to {}", sink.dir().display());
    Ok(())
}

/// Elliptical basin, land outside the ellipse.
fn bowl(rows: usize, cols: usize, max_depth: f64) -> Result<DepthGrid, DomainError> {
    let mut elevations = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            let y = (r as f64 + 0.5) / rows as f64 * 2.0 - 1.0;
            let x = (c as f64 + 0.5) / cols as f64 * 2.0 - 1.0;
            let d = 1.0 - (x * x + y * y);
            elevations.push(if d > 0.0 { -max_depth * d } else { f64::NAN });
        }
    }
    DepthGrid::new(rows, cols, elevations)
}

fn hourly_forcing(n: usize) -> Result<ForcingSeries, DomainError> {
    let hours: Vec<f64> = (0..n).map(|i| i as f64).collect();
    let daily = |h: &f64| (h / 24.0 * TAU).sin();
    let humidity = hours
        .iter()
        .map(|h| RelativeHumidity::from_percent(60.0 - 20.0 * daily(h)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ForcingSeries {
        time: hours.iter().map(|h| 152.0 + h / 24.0).collect(),
        attenuation: vec![0.2; n],
        shortwave_net: hours
            .iter()
            .map(|h| (700.0 * ((h % 24.0 - 6.0) / 12.0 * PI).sin()).max(0.0))
            .collect(),
        wind_drag: vec![0.0013; n],
        wind_u: hours.iter().map(|h| 3.0 * (h / 7.0).sin()).collect(),
        wind_v: hours.iter().map(|h| 1.5 * (h / 11.0).cos()).collect(),
        drivers: Drivers::CloudCover(AtmosphereDrivers {
            air_temperature: hours.iter().map(|h| 16.0 + 5.0 * daily(h)).collect(),
            pressure: vec![81_200.0; n],
            humidity,
            radiation: vec![0.2; n],
        }),
    })
}
