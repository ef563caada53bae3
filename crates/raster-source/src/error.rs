//! Error types for raster container access.

use thiserror::Error;

/// Result type for raster source operations.
pub type RasterResult<T> = Result<T, RasterError>;

/// Errors raised while opening containers and reading bands.
///
/// All of these are fatal to the extraction pipeline; per-sample validity is
/// handled downstream and never surfaces here.
#[derive(Error, Debug)]
pub enum RasterError {
    /// Source path missing, unreadable, or not a recognized container format.
    #[error("Failed to open raster container: {0}")]
    Open(String),

    /// The container enumerated zero sub-datasets.
    #[error("Container has no sub-datasets")]
    NoSubdatasets,

    /// The configured sub-dataset index does not exist.
    #[error("Sub-dataset index {index} out of range ({count} available)")]
    SubdatasetIndex { index: usize, count: usize },

    /// The selected band could not be read.
    #[error("Failed to read band {index}: {message}")]
    BandRead { index: usize, message: String },

    /// The sub-dataset carries no usable geotransform.
    #[error("No usable geotransform: {0}")]
    MissingGeotransform(String),

    /// Error surfaced by the GDAL driver layer.
    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),
}
