//! Feature assembly and atomic output writing.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use bloom_protocol::{BloomFeature, BloomFeatureCollection};

use crate::error::Result;
use crate::sampler::Sample;

/// Summary statistics reported as a diagnostic side effect of emission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmitStats {
    /// Number of features emitted.
    pub count: usize,
    /// Min/max NDVI over the emitted features; `None` when nothing was
    /// emitted (no reduction over an empty sequence).
    pub ndvi_range: Option<(f64, f64)>,
}

/// Round `value` to `precision` decimal places.
pub fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}

/// Assemble the feature collection from the sample sequence.
///
/// Coordinates and property values are rounded to `precision` decimals;
/// `intensity` is the index value clamped to [0, 1]. Feature order equals
/// sample order.
pub fn build_collection(
    samples: impl Iterator<Item = Sample>,
    precision: u32,
) -> (BloomFeatureCollection, EmitStats) {
    let mut features = Vec::new();
    let mut ndvi_range: Option<(f64, f64)> = None;

    for sample in samples {
        let ndvi = round_to(sample.value, precision);
        let intensity = round_to(sample.value.clamp(0.0, 1.0), precision);
        let lon = round_to(sample.lon, precision);
        let lat = round_to(sample.lat, precision);

        features.push(BloomFeature::point(lon, lat, ndvi, intensity));

        ndvi_range = Some(match ndvi_range {
            None => (ndvi, ndvi),
            Some((lo, hi)) => (lo.min(ndvi), hi.max(ndvi)),
        });

        if features.len() % 10_000 == 0 {
            debug!(count = features.len(), "Extraction progress");
        }
    }

    let stats = EmitStats {
        count: features.len(),
        ndvi_range,
    };

    (BloomFeatureCollection::new().with_features(features), stats)
}

/// Serialize the collection to `path` in one atomic step.
///
/// The JSON is written to a named temporary file in the destination
/// directory and renamed over the target, so a failure at any point leaves
/// no partial output behind.
pub fn write_atomic(collection: &BloomFeatureCollection, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    serde_json::to_writer(&mut tmp, collection)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_at(lon: f64, lat: f64, value: f64) -> Sample {
        Sample {
            row: 0,
            col: 0,
            raw: (value / 0.0001) as i32,
            value,
            lon,
            lat,
        }
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.65432, 3), 0.654);
        assert_eq!(round_to(0.65456, 3), 0.655);
        assert_eq!(round_to(-1.29215, 3), -1.292);
        assert_eq!(round_to(42.0, 3), 42.0);
    }

    #[test]
    fn test_build_collection_rounds_and_clamps() {
        let samples = vec![sample_at(36.82194, -1.29218, 0.65437)];
        let (fc, stats) = build_collection(samples.into_iter(), 3);

        assert_eq!(stats.count, 1);
        let feature = &fc.features[0];
        assert_eq!(feature.geometry.coordinates, [36.822, -1.292]);
        assert_eq!(feature.properties.ndvi, 0.654);
        assert_eq!(feature.properties.intensity, 0.654);
    }

    #[test]
    fn test_intensity_clamped_to_unit_interval() {
        // Scale factors above the reference can push values past 1.0.
        let samples = vec![sample_at(0.0, 0.0, 1.25)];
        let (fc, _) = build_collection(samples.into_iter(), 3);
        assert_eq!(fc.features[0].properties.ndvi, 1.25);
        assert_eq!(fc.features[0].properties.intensity, 1.0);
    }

    #[test]
    fn test_stats_track_range() {
        let samples = vec![
            sample_at(0.0, 0.0, 0.2),
            sample_at(1.0, 0.0, 0.9),
            sample_at(2.0, 0.0, 0.5),
        ];
        let (_, stats) = build_collection(samples.into_iter(), 3);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.ndvi_range, Some((0.2, 0.9)));
    }

    #[test]
    fn test_empty_input_has_no_range() {
        let (fc, stats) = build_collection(std::iter::empty(), 3);
        assert!(fc.is_empty());
        assert_eq!(stats.count, 0);
        assert_eq!(stats.ndvi_range, None);
    }

    #[test]
    fn test_write_atomic_creates_valid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        let (fc, _) = build_collection(vec![sample_at(36.8, -1.3, 0.5)].into_iter(), 3);
        write_atomic(&fc, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: BloomFeatureCollection = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, fc);
    }

    #[test]
    fn test_write_atomic_replaces_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        std::fs::write(&path, "stale content that is much longer than the new file").unwrap();

        let (fc, _) = build_collection(std::iter::empty(), 3);
        write_atomic(&fc, &path).unwrap();

        let parsed: BloomFeatureCollection =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_write_atomic_unwritable_destination_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.json");

        let (fc, _) = build_collection(std::iter::empty(), 3);
        assert!(write_atomic(&fc, &path).is_err());
        assert!(!path.exists());
    }
}
