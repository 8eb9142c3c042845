//! Surface forcing for SI3D input preparation.
//!
//! Computes the Chapra (1995) bulk heat budget from meteorological series
//! and writes the surface boundary condition files:
//!
//! - `surfbc.txt` in one of three layouts ([`SurfbcMode`])
//! - `surfbcW.txt`, wind only
//!
//! Runtime layouts publish their driver series to a [`DiagnosticSink`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod diagnostics;
pub mod heat_flux;
pub mod humidity;
pub mod series;
pub mod surfbc;
pub mod vapor;
pub mod wind;

pub use diagnostics::{DiagnosticSeries, DiagnosticSink, LogDiagnostics, NoDiagnostics, Summary};
pub use heat_flux::{
    compute_heat_flux, ChapraParams, HeatBudgetKind, HeatBudgetMethod, HeatFluxResult, MetSample,
};
pub use humidity::RelativeHumidity;
pub use series::{AtmosphereDrivers, Drivers, ForcingSeries, HeatBudgetDrivers};
pub use surfbc::{
    assemble_surface_forcing, pressure_column, render_surface_forcing, surface_heat_budget,
    SurfaceForcing, SurfbcConfig, SurfbcMode, SURFBC_FILE_NAME,
};
pub use vapor::VaporPressureMethod;
pub use wind::{render_wind_forcing, write_wind_forcing, WindConfig, WindSeries, WIND_FILE_NAME};
