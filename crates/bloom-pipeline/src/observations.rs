//! Ground-observation CSV conversion.
//!
//! Converts observation CSV (`latitude, longitude, ndvi[, date]`, with a
//! header row) into the same frozen GeoJSON schema the raster pipeline
//! emits, with the per-row date carried into the `date` property. Rows that
//! fail to parse or fall outside the plausible NDVI range or the configured
//! region are skipped silently.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, info};

use bloom_common::BoundingBox;
use bloom_protocol::{BloomFeature, BloomFeatureCollection};

use crate::emitter::{round_to, write_atomic, EmitStats};
use crate::error::Result;

/// NDVI values outside this range are measurement noise, not data.
const NDVI_PLAUSIBLE_MIN: f64 = -0.2;
const NDVI_PLAUSIBLE_MAX: f64 = 1.0;

/// Convert observation CSV into a feature collection.
pub fn convert_observations<R: Read>(
    reader: R,
    region: &BoundingBox,
    precision: u32,
) -> Result<(BloomFeatureCollection, EmitStats)> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut features = Vec::new();
    let mut ndvi_range: Option<(f64, f64)> = None;
    let mut skipped = 0usize;

    for record in csv_reader.records() {
        let record = record?;

        let parsed = (
            record.get(0).and_then(|v| v.parse::<f64>().ok()),
            record.get(1).and_then(|v| v.parse::<f64>().ok()),
            record.get(2).and_then(|v| v.parse::<f64>().ok()),
        );
        let (lat, lon, ndvi) = match parsed {
            (Some(lat), Some(lon), Some(ndvi)) => (lat, lon, ndvi),
            _ => {
                skipped += 1;
                continue;
            }
        };

        if !lat.is_finite() || !lon.is_finite() || !ndvi.is_finite() {
            skipped += 1;
            continue;
        }

        if !region.contains(lon, lat) {
            skipped += 1;
            continue;
        }

        if !(NDVI_PLAUSIBLE_MIN..=NDVI_PLAUSIBLE_MAX).contains(&ndvi) {
            skipped += 1;
            continue;
        }

        let rounded_ndvi = round_to(ndvi, precision);
        let intensity = round_to(ndvi.clamp(0.0, 1.0), precision);

        let mut feature = BloomFeature::point(
            round_to(lon, precision),
            round_to(lat, precision),
            rounded_ndvi,
            intensity,
        );
        if let Some(date) = record.get(3).filter(|d| !d.is_empty()) {
            feature = feature.with_date(date);
        }
        features.push(feature);

        ndvi_range = Some(match ndvi_range {
            None => (rounded_ndvi, rounded_ndvi),
            Some((lo, hi)) => (lo.min(rounded_ndvi), hi.max(rounded_ndvi)),
        });

        if features.len() % 10_000 == 0 {
            debug!(count = features.len(), "Conversion progress");
        }
    }

    let stats = EmitStats {
        count: features.len(),
        ndvi_range,
    };

    debug!(kept = stats.count, skipped, "Converted observation rows");

    Ok((BloomFeatureCollection::new().with_features(features), stats))
}

/// Convert an observation CSV file and atomically write the collection.
pub fn convert_observations_file(
    input: &Path,
    output: &Path,
    region: &BoundingBox,
    precision: u32,
) -> Result<EmitStats> {
    info!(input = %input.display(), "Converting observation CSV");

    let file = File::open(input)?;
    let (collection, stats) = convert_observations(BufReader::new(file), region, precision)?;

    write_atomic(&collection, output)?;

    info!(
        features = stats.count,
        output = %output.display(),
        "Wrote feature collection"
    );

    Ok(stats)
}
