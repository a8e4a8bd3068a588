//! Error types for riverbed

use thiserror::Error;

/// Main error type for riverbed operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    #[error("No samples left to interpolate from")]
    EmptySampleSet,

    #[error("Index out of bounds: ({row}, {col}) in grid of size ({rows}, {cols})")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("CRS mismatch: {0} vs {1}")]
    CrsMismatch(String, String),

    #[error("Unsupported geometry: {0}")]
    UnsupportedGeometry(String),

    #[error("Feature {feature} has no numeric property '{name}'")]
    MissingProperty { feature: usize, name: String },

    #[error("Invalid GeoJSON: {0}")]
    InvalidGeoJson(String),

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

/// Result type alias for riverbed operations
pub type Result<T> = std::result::Result<T, Error>;
