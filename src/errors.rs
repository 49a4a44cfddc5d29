//! Centralized error handling for SeaVis
//!
//! Every fallible operation in the crate returns [`Result`], so callers can
//! tell a missing dataset apart from a bad region or a failed image write and
//! log each with the year and path that caused it.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for SeaVis operations
#[derive(Debug, Error)]
pub enum SeaVisError {
    /// NetCDF library errors
    #[error("NetCDF error: {0}")]
    NetCDFError(#[from] netcdf::Error),

    /// I/O operation errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// No dataset file exists for the requested year
    #[error("Dataset for year {year} not found at {}", path.display())]
    DatasetNotFound { year: String, path: PathBuf },

    /// Variable not found in NetCDF file
    #[error("Variable '{var}' not found in file")]
    VariableNotFound { var: String },

    /// A field variable does not line up with the coordinate arrays
    #[error("Variable '{var}' has shape {found:?}, expected (time, {lat_len}, {lon_len})")]
    ShapeMismatch {
        var: String,
        found: Vec<usize>,
        lat_len: usize,
        lon_len: usize,
    },

    /// The bounding box selects nothing along one axis
    #[error("Region bounds [{lower}, {upper}] select no {axis} values")]
    EmptyRegion {
        axis: &'static str,
        lower: f64,
        upper: f64,
    },

    /// Season definitions that cannot be applied
    #[error("Invalid season definition: {0}")]
    InvalidSeason(String),

    /// Statistics requested before anything was recorded
    #[error("No seasonal statistics were collected; nothing to summarize")]
    EmptyStatistics,

    /// Image encoding or drawing failure, with the output path for context
    #[error("Failed to render {}: {source}", path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Run configuration could not be parsed
    #[error("Configuration error: {0}")]
    ConfigError(#[from] serde_json::Error),

    /// Run configuration or render style parsed but holds unusable values
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Thread pool configuration error
    #[error("Thread pool error: {0}")]
    ThreadPoolError(String),

    /// Array shape or dimension error
    #[error("Array error: {0}")]
    ArrayError(#[from] ndarray::ShapeError),

    /// Catch-all for messages without a dedicated variant
    #[error("{0}")]
    Generic(String),
}

/// Result type alias for SeaVis operations
pub type Result<T> = std::result::Result<T, SeaVisError>;
