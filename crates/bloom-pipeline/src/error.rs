//! Error types for the extraction pipeline.

use thiserror::Error;

/// Errors that abort the pipeline.
///
/// Per-sample conditions (fill values, out-of-interest or out-of-region
/// cells) are not errors; they are skipped inside the sampler and never
/// surface here.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Raster(#[from] raster_source::RasterError),

    #[error("Failed to serialize feature collection: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read observation CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, ExtractError>;
