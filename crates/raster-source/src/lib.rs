//! Raster container access for the extraction pipeline.
//!
//! Satellite vegetation-index products ship as multi-layer container files
//! (HDF and friends): one file, several independently-openable sub-datasets.
//! This crate exposes that platform raster-access layer behind two small
//! traits so the pipeline can be driven by a real GDAL-backed container or a
//! synthetic in-memory one in tests.
//!
//! # Implementation Notes
//!
//! The GDAL backend requires libgdal at build and run time. Everything else
//! in the workspace stays independent of it by programming against
//! [`RasterContainer`] / [`RasterDataset`].

pub mod error;
pub mod gdal_driver;
pub mod memory;

pub use error::{RasterError, RasterResult};
pub use gdal_driver::{GdalContainer, GdalDataset};
pub use memory::{MemoryContainer, MemoryDataset};

use bloom_common::{GeoTransform, SampleGrid};

/// One named, independently-openable logical layer inside a container file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubdatasetInfo {
    /// Opaque name understood by the backing driver (passed back to open it).
    pub name: String,
    /// Human-readable description, empty when the driver provides none.
    pub description: String,
}

/// An opened multi-layer raster container.
///
/// Implementations own the underlying file handle; dropping the container
/// releases it on every exit path.
pub trait RasterContainer {
    type Dataset: RasterDataset;

    /// The sub-datasets this container exposes, in enumeration order.
    fn subdatasets(&self) -> &[SubdatasetInfo];

    /// Open the sub-dataset at `index` (position in enumeration order).
    fn open_subdataset(&self, index: usize) -> RasterResult<Self::Dataset>;
}

/// One opened sub-dataset: grid dimensions, geotransform, and band data.
pub trait RasterDataset {
    /// Grid dimensions as (rows, cols).
    fn dimensions(&self) -> (usize, usize);

    /// The affine geotransform mapping grid indices to (lon, lat).
    fn geotransform(&self) -> RasterResult<GeoTransform>;

    /// Read the band at `index` (1-based) into a raw sample grid.
    fn read_band(&self, index: usize) -> RasterResult<SampleGrid>;
}
