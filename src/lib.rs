//! # oiplot
//!
//! Batch renderer for optimal-interpolation reconstruction comparison figures.
//!
//! The upstream OI pipeline writes one NetCDF triplet per sampling
//! configuration (temperature, salinity and derived variables). For a chosen
//! (region, model) pair this crate discovers every configuration, derives the
//! surface diagnostics and renders three multi-panel comparison figures:
//!
//! - dynamic height anomaly
//! - geostrophic velocity magnitude
//! - geostrophic Rossby number
//!
//! ## Architecture
//!
//! - **Discovery**: glob the configuration triplets and parse their stems
//! - **Loading**: read every field of a triplet into memory, masks as NaN
//! - **Diagnostics**: derive the plotted quantities at the shallowest level
//! - **Rendering**: compose fixed-layout panel grids with shared colorbars

pub mod colormaps;
pub mod config;
pub mod diagnostics;
pub mod discovery;
pub mod driver;
pub mod error;
pub mod levels;
pub mod loader;
pub mod logging;
pub mod mapdecor;
pub mod panels;

pub use config::{Config, Model, Region};
pub use error::{OiplotError, Result};
pub use logging::{init_tracing, log_error, log_operation_end, log_operation_start};
