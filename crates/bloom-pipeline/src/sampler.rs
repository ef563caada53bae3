//! Grid sampling and geolocation.

use bloom_common::{BoundingBox, GeoTransform, SampleGrid};

use crate::config::ExtractConfig;
use crate::decoder::Decoder;

/// One surviving grid cell: indices, raw and decoded value, coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub row: usize,
    pub col: usize,
    pub raw: i32,
    pub value: f64,
    pub lon: f64,
    pub lat: f64,
}

/// Walk `grid` at the configured stride and yield surviving samples lazily.
///
/// Visitation is row-major (row ascending, then column ascending), which
/// fixes the output order: emitted features are reproducible across runs for
/// a given input and configuration.
pub fn sample<'a>(
    grid: &'a SampleGrid,
    transform: GeoTransform,
    config: &ExtractConfig,
) -> SampleIter<'a> {
    SampleIter {
        grid,
        transform,
        decoder: Decoder::from_config(config),
        region: config.region,
        // A zero stride would never advance; validation rejects it upstream.
        stride: config.stride.max(1),
        row: 0,
        col: 0,
    }
}

/// Lazy, finite, single-pass iterator over surviving samples.
pub struct SampleIter<'a> {
    grid: &'a SampleGrid,
    transform: GeoTransform,
    decoder: Decoder,
    region: BoundingBox,
    stride: usize,
    row: usize,
    col: usize,
}

impl SampleIter<'_> {
    fn advance(&mut self) {
        self.col += self.stride;
        if self.col >= self.grid.cols() {
            self.col = 0;
            self.row += self.stride;
        }
    }
}

impl Iterator for SampleIter<'_> {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        while self.row < self.grid.rows() {
            let (row, col) = (self.row, self.col);
            self.advance();

            let raw = match self.grid.get(row, col) {
                Some(raw) => raw,
                None => continue,
            };

            // Fill/no-data encodings never leave the decoder.
            let value = match self.decoder.decode(raw) {
                Some(value) => value,
                None => continue,
            };

            // Negative index marks water/cloud/non-vegetation signal:
            // out of interest, not invalid data.
            if value < 0.0 {
                continue;
            }

            let (lon, lat) = self.transform.apply(row, col);
            if !self.region.contains(lon, lat) {
                continue;
            }

            return Some(Sample {
                row,
                col,
                raw,
                value,
                lon,
                lat,
            });
        }

        None
    }
}
