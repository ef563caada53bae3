//! In-memory raster source.
//!
//! Mirrors the container/sub-dataset shape of the GDAL backend with plain
//! vectors so the pipeline can be exercised against synthetic grids without
//! raster files or the GDAL runtime.

use bloom_common::{GeoTransform, SampleGrid};

use crate::error::{RasterError, RasterResult};
use crate::{RasterContainer, RasterDataset, SubdatasetInfo};

/// A synthetic container holding zero or more in-memory sub-datasets.
#[derive(Debug, Clone, Default)]
pub struct MemoryContainer {
    subdatasets: Vec<SubdatasetInfo>,
    datasets: Vec<MemoryDataset>,
}

impl MemoryContainer {
    /// Create an empty container (zero sub-datasets).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named sub-dataset.
    pub fn with_dataset(mut self, name: impl Into<String>, dataset: MemoryDataset) -> Self {
        self.subdatasets.push(SubdatasetInfo {
            name: name.into(),
            description: String::new(),
        });
        self.datasets.push(dataset);
        self
    }

    /// Container with a single unnamed sub-dataset, the common test case.
    pub fn single(grid: SampleGrid, transform: GeoTransform) -> Self {
        Self::new().with_dataset("memory:0", MemoryDataset::new(grid, transform))
    }
}

impl RasterContainer for MemoryContainer {
    type Dataset = MemoryDataset;

    fn subdatasets(&self) -> &[SubdatasetInfo] {
        &self.subdatasets
    }

    fn open_subdataset(&self, index: usize) -> RasterResult<MemoryDataset> {
        self.datasets
            .get(index)
            .cloned()
            .ok_or(RasterError::SubdatasetIndex {
                index,
                count: self.datasets.len(),
            })
    }
}

/// A single-band in-memory sub-dataset.
#[derive(Debug, Clone)]
pub struct MemoryDataset {
    grid: SampleGrid,
    transform: GeoTransform,
}

impl MemoryDataset {
    pub fn new(grid: SampleGrid, transform: GeoTransform) -> Self {
        Self { grid, transform }
    }
}

impl RasterDataset for MemoryDataset {
    fn dimensions(&self) -> (usize, usize) {
        self.grid.dimensions()
    }

    fn geotransform(&self) -> RasterResult<GeoTransform> {
        Ok(self.transform)
    }

    fn read_band(&self, index: usize) -> RasterResult<SampleGrid> {
        // Single band only, 1-based like the GDAL backend.
        if index != 1 {
            return Err(RasterError::BandRead {
                index,
                message: "memory dataset has exactly one band".to_string(),
            });
        }
        Ok(self.grid.clone())
    }
}
