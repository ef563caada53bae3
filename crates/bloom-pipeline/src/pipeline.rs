//! Pipeline driver: Loader -> Decoder -> Sampler -> Emitter.

use std::path::Path;

use tracing::{debug, info};

use bloom_protocol::BloomFeatureCollection;
use raster_source::{GdalContainer, RasterContainer, RasterDataset, RasterError};

use crate::config::ExtractConfig;
use crate::emitter::{build_collection, write_atomic};
use crate::error::{ExtractError, Result};
use crate::metadata::parse_granule_filename;
use crate::sampler::sample;

/// Outcome of one extraction run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractionSummary {
    /// Number of sub-datasets the container exposed.
    pub subdatasets: usize,
    /// Grid rows of the selected sub-dataset.
    pub rows: usize,
    /// Grid columns of the selected sub-dataset.
    pub cols: usize,
    /// Number of features emitted.
    pub features: usize,
    /// Min/max NDVI over the emitted features, `None` when none survived.
    pub ndvi_range: Option<(f64, f64)>,
}

/// Run the extraction stages against an already-opened container.
///
/// The stages run strictly in sequence with no retry: any failure aborts the
/// whole run. Per-sample skips are handled inside the sampler and do not
/// abort anything.
pub fn extract_from_container<C: RasterContainer>(
    container: &C,
    config: &ExtractConfig,
) -> Result<(BloomFeatureCollection, ExtractionSummary)> {
    config.validate().map_err(ExtractError::InvalidConfig)?;

    let subdatasets = container.subdatasets();
    if subdatasets.is_empty() {
        return Err(RasterError::NoSubdatasets.into());
    }
    for (index, info) in subdatasets.iter().enumerate() {
        debug!(index, name = %info.name, description = %info.description, "Sub-dataset");
    }

    let dataset = container.open_subdataset(config.subdataset)?;
    let (rows, cols) = dataset.dimensions();
    let transform = dataset.geotransform()?;
    let grid = dataset.read_band(config.band)?;

    info!(
        subdataset = config.subdataset,
        rows,
        cols,
        stride = config.stride,
        "Read index band"
    );

    let (collection, stats) = build_collection(sample(&grid, transform, config), config.precision);

    // Sampling is complete; the sub-dataset handle is released here on every
    // path, the container handle when the caller's scope ends.
    drop(dataset);

    match stats.ndvi_range {
        Some((lo, hi)) => info!(
            features = stats.count,
            ndvi_min = lo,
            ndvi_max = hi,
            "Sampling complete"
        ),
        None => info!(features = 0usize, "Sampling complete; no cells survived"),
    }

    let summary = ExtractionSummary {
        subdatasets: subdatasets.len(),
        rows,
        cols,
        features: stats.count,
        ndvi_range: stats.ndvi_range,
    };

    Ok((collection, summary))
}

/// Open `input` with the GDAL backend, run the pipeline, and atomically
/// write the feature collection to `output`.
///
/// Nothing is written unless every stage succeeds.
pub fn run_extraction<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    config: &ExtractConfig,
) -> Result<ExtractionSummary> {
    let input = input.as_ref();
    let output = output.as_ref();

    info!(input = %input.display(), "Processing raster container");

    if let Some(granule) = parse_granule_filename(input) {
        info!(
            product = %granule.product,
            acquired = %granule.acquisition,
            tile_h = granule.tile_h,
            tile_v = granule.tile_v,
            collection = %granule.collection,
            "Recognized granule"
        );
    }

    let (collection, summary) = {
        let container = GdalContainer::open(input)?;
        extract_from_container(&container, config)?
        // Container handle released here, before the output write.
    };

    write_atomic(&collection, output)?;

    info!(
        features = summary.features,
        output = %output.display(),
        "Wrote feature collection"
    );

    Ok(summary)
}
