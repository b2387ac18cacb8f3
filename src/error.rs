//! Error types for the oiplot application.
//!
//! This module defines a single error enum covering all failure modes of a
//! run. Every failure is fatal: the tool either writes all three figures or
//! none of them.

use thiserror::Error;

/// The main error type for oiplot operations.
#[derive(Error, Debug)]
pub enum OiplotError {
    /// NetCDF file operation errors
    #[error("NetCDF error: {0}")]
    NetCdf(#[from] netcdf::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Array shape errors
    #[error("Array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors (bad CLI values, unmapped region/model pairs)
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Expected data missing from an input file
    #[error("Data not found: {message}")]
    DataNotFound { message: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// Figure rendering errors
    #[error("Render error: {message}")]
    Render { message: String },
}

impl OiplotError {
    /// Wrap a plotters drawing error. The plotters error types are generic
    /// over the backend, so they are carried as text rather than as a source.
    pub fn render<E: std::fmt::Display>(err: E) -> Self {
        OiplotError::Render {
            message: err.to_string(),
        }
    }
}

/// Convenience type alias for Results with OiplotError
pub type Result<T> = std::result::Result<T, OiplotError>;
