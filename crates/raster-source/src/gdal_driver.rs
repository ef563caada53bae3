//! GDAL-backed raster container access.

use std::collections::BTreeMap;
use std::path::Path;

use gdal::{Dataset, Metadata};
use tracing::debug;

use bloom_common::{GeoTransform, SampleGrid};

use crate::error::{RasterError, RasterResult};
use crate::{RasterContainer, RasterDataset, SubdatasetInfo};

/// A multi-layer container file opened through GDAL.
///
/// The container handle stays open for the lifetime of this value so the
/// sub-dataset reads below it remain valid; dropping the container releases
/// the handle deterministically.
pub struct GdalContainer {
    // Held open for the duration of the read, released on drop.
    _dataset: Dataset,
    subdatasets: Vec<SubdatasetInfo>,
}

impl GdalContainer {
    /// Open a container file and enumerate its sub-datasets.
    ///
    /// Fails when the path does not exist, the format is unrecognized, or
    /// the container exposes zero sub-datasets.
    pub fn open<P: AsRef<Path>>(path: P) -> RasterResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RasterError::Open(format!(
                "no such file: {}",
                path.display()
            )));
        }

        let dataset =
            Dataset::open(path).map_err(|e| RasterError::Open(e.to_string()))?;

        let entries = dataset
            .metadata_domain("SUBDATASETS")
            .unwrap_or_default();
        let subdatasets = parse_subdataset_entries(&entries);

        if subdatasets.is_empty() {
            return Err(RasterError::NoSubdatasets);
        }

        debug!(
            path = %path.display(),
            count = subdatasets.len(),
            "Enumerated sub-datasets"
        );

        Ok(Self {
            _dataset: dataset,
            subdatasets,
        })
    }
}

impl RasterContainer for GdalContainer {
    type Dataset = GdalDataset;

    fn subdatasets(&self) -> &[SubdatasetInfo] {
        &self.subdatasets
    }

    fn open_subdataset(&self, index: usize) -> RasterResult<GdalDataset> {
        let info = self
            .subdatasets
            .get(index)
            .ok_or(RasterError::SubdatasetIndex {
                index,
                count: self.subdatasets.len(),
            })?;

        // Sub-dataset names are opened like paths; the driver routes them
        // back into the container.
        let dataset = Dataset::open(Path::new(&info.name))
            .map_err(|e| RasterError::BandRead {
                index,
                message: format!("could not open sub-dataset: {}", e),
            })?;

        Ok(GdalDataset { dataset })
    }
}

/// One opened sub-dataset.
pub struct GdalDataset {
    dataset: Dataset,
}

impl RasterDataset for GdalDataset {
    fn dimensions(&self) -> (usize, usize) {
        let (cols, rows) = self.dataset.raster_size();
        (rows, cols)
    }

    fn geotransform(&self) -> RasterResult<GeoTransform> {
        let coefficients = self
            .dataset
            .geo_transform()
            .map_err(|e| RasterError::MissingGeotransform(e.to_string()))?;
        Ok(GeoTransform::new(coefficients))
    }

    fn read_band(&self, index: usize) -> RasterResult<SampleGrid> {
        let (cols, rows) = self.dataset.raster_size();
        let band = self
            .dataset
            .rasterband(index as isize)
            .map_err(|e| RasterError::BandRead {
                index,
                message: e.to_string(),
            })?;

        // Read the full band; GDAL converts the native encoding to i32.
        let buffer = band
            .read_as::<i32>((0, 0), (cols, rows), (cols, rows), None)
            .map_err(|e| RasterError::BandRead {
                index,
                message: e.to_string(),
            })?;

        Ok(SampleGrid::new(rows, cols, buffer.data))
    }
}

/// Parse the `SUBDATASETS` metadata domain into ordered sub-dataset infos.
///
/// Entries come as `SUBDATASET_<n>_NAME=...` / `SUBDATASET_<n>_DESC=...`
/// pairs; enumeration order follows `<n>`.
fn parse_subdataset_entries(entries: &[String]) -> Vec<SubdatasetInfo> {
    let mut names: BTreeMap<usize, String> = BTreeMap::new();
    let mut descriptions: BTreeMap<usize, String> = BTreeMap::new();

    for entry in entries {
        let (key, value) = match entry.split_once('=') {
            Some(pair) => pair,
            None => continue,
        };
        let rest = match key.strip_prefix("SUBDATASET_") {
            Some(rest) => rest,
            None => continue,
        };

        if let Some(n) = rest.strip_suffix("_NAME") {
            if let Ok(n) = n.parse::<usize>() {
                names.insert(n, value.to_string());
            }
        } else if let Some(n) = rest.strip_suffix("_DESC") {
            if let Ok(n) = n.parse::<usize>() {
                descriptions.insert(n, value.to_string());
            }
        }
    }

    names
        .into_iter()
        .map(|(n, name)| SubdatasetInfo {
            name,
            description: descriptions.remove(&n).unwrap_or_default(),
        })
        .collect()
}
