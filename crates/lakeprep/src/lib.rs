//! lakeprep: input file preparation for the SI3D hydrodynamic model.
//!
//! This is the facade crate that re-exports the public API of the lakeprep
//! sub-crates. Two pipelines share one fixed-width record idiom:
//!
//! - the vertical grid builder writes `si3d_layer.txt`, `si3d_init.txt`
//!   and the bathymetry file;
//! - the surface forcing assembler writes `surfbc.txt` and `surfbcW.txt`.
//!
//! # Quick start
//!
//! ```rust
//! use lakeprep::prelude::*;
//!
//! let mut sink = MemorySink::new();
//! let depth = BasinDepth::new(10.0).unwrap();
//! let grid = build_layer_grid(depth, &SpacingPolicy::Uniform { thickness: 1.0 }, &mut sink).unwrap();
//!
//! let config = InitialConditionConfig {
//!     lake_name: "Tahoe".into(),
//!     start_date: "2018-06-01".into(),
//!     tracer_count: 0,
//! };
//! write_initial_condition(&config, &grid, &TemperatureSource::Constant(15.0), None, &mut sink)
//!     .unwrap();
//!
//! assert!(sink.get("si3d_layer.txt").is_some());
//! assert!(sink.get("si3d_init.txt").unwrap().contains("15.0000"));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `lakeprep-core` | errors, validated inputs, records, output sinks |
//! | [`grid`] | `lakeprep-grid` | spacing policies, layer grid, interpolation, initial conditions, bathymetry |
//! | [`forcing`] | `lakeprep-forcing` | vapor pressure, heat flux, surface boundary files, diagnostics |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Errors, validated inputs, fixed-width records, and output sinks
/// (`lakeprep-core`).
pub use lakeprep_core as types;

/// Vertical grid, profile interpolation, initial conditions, and
/// bathymetry (`lakeprep-grid`).
pub use lakeprep_grid as grid;

/// Heat budget and surface boundary condition files (`lakeprep-forcing`).
///
/// Runtime layouts report their driver series through
/// [`forcing::DiagnosticSink`].
pub use lakeprep_forcing as forcing;

/// Common imports for preparing a simulation.
///
/// ```rust
/// use lakeprep::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use lakeprep_core::{
        BasinDepth, ConfigError, DirectorySink, DomainError, MemorySink, OutputSink, PrepError,
        Profile,
    };

    // Vertical grid
    pub use lakeprep_grid::{
        build_layer_grid, interpolate_profile, write_bathymetry, write_initial_condition,
        BathymetryConfig, DepthGrid, GeometricGrowth, InitialConditionConfig, LayerGrid,
        SpacingMethod, SpacingPolicy, TemperatureSource, TracerColumns,
    };

    // Surface forcing
    pub use lakeprep_forcing::{
        assemble_surface_forcing, compute_heat_flux, write_wind_forcing, AtmosphereDrivers,
        ChapraParams, DiagnosticSink, Drivers, ForcingSeries, HeatBudgetDrivers, HeatBudgetMethod,
        HeatFluxResult, LogDiagnostics, MetSample, NoDiagnostics, RelativeHumidity, SurfbcConfig,
        SurfbcMode, VaporPressureMethod, WindConfig, WindSeries,
    };
}
