//! Initial-condition file (`si3d_init.txt`) assembly.
//!
//! Temperature (and optional tracer concentrations) are evaluated at every
//! layer midpoint of a [`LayerGrid`] and written one layer per row. The
//! first and last rows are written twice: SI3D indexes the file with one
//! ghost row above and below the water column.

use lakeprep_core::{
    Cell, Column, ConfigError, DomainError, OutputSink, PrepError, Profile, Record, TextFile,
};

use crate::interpolate::interpolate_profile;
use crate::layers::LayerGrid;
use crate::spacing::SpacingMethod;

/// Name of the initial-condition file.
pub const INIT_FILE_NAME: &str = "si3d_init.txt";

/// Where the initial temperature comes from.
#[derive(Clone, Debug, PartialEq)]
pub enum TemperatureSource {
    /// The same temperature in every layer (degrees Celsius).
    Constant(f64),
    /// A measured profile, interpolated onto the layer midpoints.
    Profile(Profile),
}

/// Tracer profiles given as parallel columns, one column per tracer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TracerColumns {
    /// Sample depths (positive down) for each tracer.
    pub depths: Vec<Vec<f64>>,
    /// Concentrations (g/L) for each tracer, parallel to `depths`.
    pub concentrations: Vec<Vec<f64>>,
}

/// Header metadata and declared tracer count.
#[derive(Clone, Debug, PartialEq)]
pub struct InitialConditionConfig {
    /// Lake name written on the second header line.
    pub lake_name: String,
    /// Simulation start, written verbatim before "UTC".
    pub start_date: String,
    /// Number of tracers the simulation is configured for.
    pub tracer_count: usize,
}

impl InitialConditionConfig {
    /// Check that the header fields are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lake_name.trim().is_empty() {
            return Err(ConfigError::InvalidField {
                field: "lake_name",
                reason: "must not be empty".into(),
            });
        }
        if self.lake_name.contains('\n') || self.start_date.contains('\n') {
            return Err(ConfigError::InvalidField {
                field: "header",
                reason: "lake name and start date must fit on one line".into(),
            });
        }
        Ok(())
    }
}

/// Values evaluated on the grid, one entry per physical layer.
#[derive(Clone, Debug, PartialEq)]
pub struct InitialCondition {
    /// Layer midpoints, negative down.
    pub depths: Vec<f64>,
    /// Temperature per layer.
    pub temperature: Vec<f64>,
    /// Concentration per layer for each tracer (`tracers[t][layer]`).
    pub tracers: Vec<Vec<f64>>,
}

/// Evaluate temperature and tracers on `grid` without writing anything.
///
/// Measured profiles must reach the basin depth. Targets shallower than the
/// first sample take its value and are reported as a warning.
pub fn assemble_initial_condition(
    config: &InitialConditionConfig,
    grid: &LayerGrid,
    temperature: &TemperatureSource,
    tracers: Option<&TracerColumns>,
) -> Result<InitialCondition, PrepError> {
    config.validate()?;
    let tracer_profiles = tracer_profiles(config.tracer_count, tracers, grid)?;

    let targets: Vec<f64> = grid.midpoints().iter().map(|z| -z).collect();
    let temperature = match temperature {
        TemperatureSource::Constant(t) => {
            if !t.is_finite() {
                return Err(DomainError::NonFinite {
                    name: "constant temperature",
                    index: 0,
                }
                .into());
            }
            vec![*t; targets.len()]
        }
        TemperatureSource::Profile(profile) => {
            profile.require_reaches("temperature profile", grid.depth().value())?;
            interpolate_profile(&targets, profile)
        }
    };
    let tracers = tracer_profiles
        .iter()
        .map(|p| interpolate_profile(&targets, p))
        .collect();

    Ok(InitialCondition {
        depths: grid.midpoints().to_vec(),
        temperature,
        tracers,
    })
}

fn tracer_profiles(
    declared: usize,
    tracers: Option<&TracerColumns>,
    grid: &LayerGrid,
) -> Result<Vec<Profile>, PrepError> {
    let (depth_columns, concentration_columns) =
        tracers.map_or((0, 0), |t| (t.depths.len(), t.concentrations.len()));
    if depth_columns != declared || concentration_columns != declared {
        return Err(DomainError::TracerShape {
            declared,
            depth_columns,
            concentration_columns,
        }
        .into());
    }
    let Some(tracers) = tracers else {
        return Ok(Vec::new());
    };
    tracers
        .depths
        .iter()
        .zip(&tracers.concentrations)
        .map(|(z, c)| -> Result<Profile, PrepError> {
            let profile = Profile::new(z.clone(), c.clone())?;
            profile.require_reaches("tracer profile", grid.depth().value())?;
            Ok(profile)
        })
        .collect()
}

/// Render `si3d_init.txt` for an assembled initial condition.
pub fn render_initial_condition(
    config: &InitialConditionConfig,
    grid: &LayerGrid,
    temperature: &TemperatureSource,
    ic: &InitialCondition,
) -> TextFile {
    let has_tracers = !ic.tracers.is_empty();
    let columns = match (grid.method(), has_tracers) {
        (_, true) => "Depths (m)   Temp (oC)   Tracers (g/L) -->       - ",
        (SpacingMethod::Uniform, false) => "Depths (m) not used   Temp (oC)                  - ",
        (_, false) => "Depths (m)   Temp (oC)                           - ",
    };
    let source = match temperature {
        TemperatureSource::Constant(_) => "Source: From constant values                     - ",
        TemperatureSource::Profile(_) => "Source: From CTD_Profile                         - ",
    };

    let mut file = TextFile::new(INIT_FILE_NAME);
    file.line("Initial condition file for si3d model            - ")
        .line(&format!("{}             - ", config.lake_name))
        .line(&format!(
            "Simulation starting on {} UTC    - ",
            config.start_date
        ))
        .line(columns)
        .line(source)
        .line("-------------------------------------------------- ");

    let n = ic.depths.len();
    if n == 0 {
        return file;
    }
    let row = |i: usize| -> Record {
        if has_tracers {
            let mut r = Record::new()
                .with(Cell::spaced(Column::F10_2, ic.depths[i]))
                .with(Cell::packed(Column::F10_4, ic.temperature[i]));
            for tracer in &ic.tracers {
                r.push(Cell::packed(Column::F11_4, tracer[i]));
            }
            r
        } else {
            Record::new()
                .with(Cell::spaced(Column::F10_2, ic.depths[i]))
                .with(Cell::spaced(Column::F10_4, ic.temperature[i]))
        }
    };

    file.record(&row(0));
    for i in 0..n {
        file.record(&row(i));
    }
    file.record(&row(n - 1));
    file
}

/// Validate, evaluate, and write `si3d_init.txt` through `sink`.
///
/// All validation (including the tracer shape check) happens before the
/// sink is touched.
pub fn write_initial_condition(
    config: &InitialConditionConfig,
    grid: &LayerGrid,
    temperature: &TemperatureSource,
    tracers: Option<&TracerColumns>,
    sink: &mut dyn OutputSink,
) -> Result<InitialCondition, PrepError> {
    let ic = assemble_initial_condition(config, grid, temperature, tracers)?;
    sink.write_file(&render_initial_condition(config, grid, temperature, &ic))?;
    Ok(ic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spacing::{GeometricGrowth, SpacingPolicy};
    use lakeprep_core::{BasinDepth, MemorySink};

    fn config(tracer_count: usize) -> InitialConditionConfig {
        InitialConditionConfig {
            lake_name: "Tahoe".into(),
            start_date: "2018-06-01 00:00".into(),
            tracer_count,
        }
    }

    fn uniform(h: f64, dz: f64) -> LayerGrid {
        LayerGrid::from_policy(
            BasinDepth::new(h).unwrap(),
            &SpacingPolicy::Uniform { thickness: dz },
        )
        .unwrap()
    }

    fn data_rows(body: &str) -> Vec<&str> {
        body.lines().skip(6).collect()
    }

    #[test]
    fn constant_temperature_every_row_fifteen() {
        let grid = uniform(10.0, 1.0);
        let mut sink = MemorySink::new();
        write_initial_condition(
            &config(0),
            &grid,
            &TemperatureSource::Constant(15.0),
            None,
            &mut sink,
        )
        .unwrap();
        let body = sink.get(INIT_FILE_NAME).unwrap();
        let rows = data_rows(body);
        assert_eq!(rows.len(), 12);
        for row in &rows {
            assert_eq!(&row[11..21], "   15.0000");
        }
        assert_eq!(rows[0], rows[1]);
        assert_eq!(rows[10], rows[11]);
        assert_eq!(rows[0], "     -0.50    15.0000 ");
        assert_eq!(rows[11], "     -9.50    15.0000 ");
    }

    #[test]
    fn header_block() {
        let grid = uniform(2.0, 1.0);
        let mut sink = MemorySink::new();
        write_initial_condition(
            &config(0),
            &grid,
            &TemperatureSource::Constant(4.0),
            None,
            &mut sink,
        )
        .unwrap();
        let lines: Vec<&str> = sink.get(INIT_FILE_NAME).unwrap().lines().collect();
        assert_eq!(lines[0], "Initial condition file for si3d model            - ");
        assert_eq!(lines[1], "Tahoe             - ");
        assert_eq!(lines[2], "Simulation starting on 2018-06-01 00:00 UTC    - ");
        assert_eq!(lines[3], "Depths (m) not used   Temp (oC)                  - ");
        assert_eq!(lines[4], "Source: From constant values                     - ");
        assert_eq!(lines[5], "-------------------------------------------------- ");
    }

    #[test]
    fn profile_header_on_variable_grid() {
        let grid = LayerGrid::from_policy(
            BasinDepth::new(10.0).unwrap(),
            &SpacingPolicy::ExponentialFromSurface(GeometricGrowth::new(0.5, 1.1)),
        )
        .unwrap();
        let profile = Profile::from_pairs(&[(0.0, 20.0), (20.0, 5.0)]).unwrap();
        let mut sink = MemorySink::new();
        write_initial_condition(
            &config(0),
            &grid,
            &TemperatureSource::Profile(profile),
            None,
            &mut sink,
        )
        .unwrap();
        let lines: Vec<&str> = sink.get(INIT_FILE_NAME).unwrap().lines().collect();
        assert_eq!(lines[3], "Depths (m)   Temp (oC)                           - ");
        assert_eq!(lines[4], "Source: From CTD_Profile                         - ");
    }

    #[test]
    fn profile_is_interpolated_at_midpoints() {
        let grid = uniform(4.0, 2.0);
        let profile = Profile::from_pairs(&[(0.0, 20.0), (4.0, 12.0)]).unwrap();
        let ic = assemble_initial_condition(
            &config(0),
            &grid,
            &TemperatureSource::Profile(profile),
            None,
        )
        .unwrap();
        assert_eq!(ic.depths, vec![-1.0, -3.0]);
        assert_eq!(ic.temperature, vec![18.0, 14.0]);
    }

    #[test]
    fn shallow_profile_rejected() {
        let grid = uniform(10.0, 1.0);
        let profile = Profile::from_pairs(&[(0.0, 20.0), (6.0, 12.0)]).unwrap();
        let err = assemble_initial_condition(
            &config(0),
            &grid,
            &TemperatureSource::Profile(profile),
            None,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PrepError::Domain(DomainError::ProfileTooShallow { .. })
        ));
    }

    #[test]
    fn tracer_count_mismatch_fails_before_write() {
        let grid = uniform(10.0, 1.0);
        let column = vec![0.0, 10.0];
        let tracers = TracerColumns {
            depths: vec![column.clone(), column.clone()],
            concentrations: vec![column.clone(), column],
        };
        let mut sink = MemorySink::new();
        let err = write_initial_condition(
            &config(3),
            &grid,
            &TemperatureSource::Constant(15.0),
            Some(&tracers),
            &mut sink,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PrepError::Domain(DomainError::TracerShape {
                declared: 3,
                depth_columns: 2,
                concentration_columns: 2,
            })
        ));
        assert!(sink.is_empty());
    }

    #[test]
    fn tracer_rows_use_packed_columns() {
        let grid = uniform(2.0, 1.0);
        let tracers = TracerColumns {
            depths: vec![vec![0.0, 2.0], vec![0.0, 2.0]],
            concentrations: vec![vec![1.0, 1.0], vec![0.0, 2.0]],
        };
        let mut sink = MemorySink::new();
        let ic = write_initial_condition(
            &config(2),
            &grid,
            &TemperatureSource::Constant(10.0),
            Some(&tracers),
            &mut sink,
        )
        .unwrap();
        assert_eq!(ic.tracers[1], vec![0.5, 1.5]);
        let body = sink.get(INIT_FILE_NAME).unwrap();
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines[3], "Depths (m)   Temp (oC)   Tracers (g/L) -->       - ");
        assert_eq!(lines[6], "     -0.50    10.0000     1.0000     0.5000");
        assert_eq!(lines.len(), 6 + 4);
    }

    #[test]
    fn declared_tracers_without_columns_fail() {
        let grid = uniform(2.0, 1.0);
        let err = assemble_initial_condition(
            &config(1),
            &grid,
            &TemperatureSource::Constant(10.0),
            None,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PrepError::Domain(DomainError::TracerShape {
                declared: 1,
                depth_columns: 0,
                concentration_columns: 0,
            })
        ));
    }

    #[test]
    fn empty_lake_name_is_config_error() {
        let grid = uniform(2.0, 1.0);
        let mut cfg = config(0);
        cfg.lake_name = "  ".into();
        let err = assemble_initial_condition(&cfg, &grid, &TemperatureSource::Constant(1.0), None)
            .unwrap_err();
        assert!(err.is_config());
    }
}
