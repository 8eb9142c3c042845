//! Vertical grid builder for SI3D input preparation.
//!
//! Turns a basin depth and a [`SpacingPolicy`] into a [`LayerGrid`], writes
//! the layer file, maps measured profiles onto the grid, and writes the
//! initial-condition file. The bathymetry serializer for measured basins
//! lives here as well since it shares the fixed-width record idiom.
//!
//! # Architecture
//!
//! - [`spacing`]: spacing policies and the bounded geometric series
//! - [`layers`]: [`LayerGrid`] and `si3d_layer.txt`
//! - [`interpolate`]: piecewise-linear profile interpolation
//! - [`init`]: `si3d_init.txt` assembly
//! - [`bathymetry`]: the `h` bathymetry file

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bathymetry;
pub mod init;
pub mod interpolate;
pub mod layers;
pub mod spacing;

pub use bathymetry::{
    encode_bathymetry, render_bathymetry, write_bathymetry, Bathymetry, BathymetryConfig,
    DepthGrid,
};
pub use init::{
    assemble_initial_condition, render_initial_condition, write_initial_condition,
    InitialCondition, InitialConditionConfig, TemperatureSource, TracerColumns, INIT_FILE_NAME,
};
pub use interpolate::{interpolate_profile, interpolate_profile_report, Interpolation};
pub use layers::{build_layer_grid, LayerGrid, LAYER_FILE_NAME};
pub use spacing::{GeometricGrowth, SpacingMethod, SpacingPolicy, MAX_SERIES_TERMS};
