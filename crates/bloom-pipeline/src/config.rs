//! Configuration for the extraction pipeline.

use bloom_common::BoundingBox;
use serde::{Deserialize, Serialize};

/// Configuration for one extraction run.
///
/// The defaults reproduce the reference MODIS NDVI product: scaled-integer
/// encoding with factor 0.0001, fill envelope outside [-2000, 10000], and a
/// Kenya region of interest. Every field is overridable, none is read
/// implicitly anywhere else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Multiplier converting raw integer cell values to physical index
    /// values.
    pub scale_factor: f64,

    /// Smallest raw value considered measured (inclusive). Anything below is
    /// a fill/no-data encoding.
    pub valid_min: i32,

    /// Largest raw value considered measured (inclusive).
    pub valid_max: i32,

    /// Region of interest; samples outside are discarded.
    pub region: BoundingBox,

    /// Sampling step in rows and columns. 1 visits every cell.
    pub stride: usize,

    /// Which sub-dataset carries the index band (enumeration order).
    pub subdataset: usize,

    /// Band number within the sub-dataset (1-based).
    pub band: usize,

    /// Decimal places for emitted coordinates and property values.
    pub precision: u32,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            scale_factor: 0.0001,
            valid_min: -2000,
            valid_max: 10000,
            region: BoundingBox::new(34.0, -5.0, 42.0, 5.0),
            stride: 10,
            subdataset: 0,
            band: 1,
            precision: 3,
        }
    }
}

impl ExtractConfig {
    /// Load configuration from environment variables, falling back to the
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("EXTRACT_SCALE_FACTOR") {
            if let Ok(factor) = val.parse() {
                config.scale_factor = factor;
            }
        }

        if let Ok(val) = std::env::var("EXTRACT_VALID_MIN") {
            if let Ok(min) = val.parse() {
                config.valid_min = min;
            }
        }

        if let Ok(val) = std::env::var("EXTRACT_VALID_MAX") {
            if let Ok(max) = val.parse() {
                config.valid_max = max;
            }
        }

        if let Ok(val) = std::env::var("EXTRACT_REGION") {
            if let Ok(region) = BoundingBox::from_csv_string(&val) {
                config.region = region;
            }
        }

        if let Ok(val) = std::env::var("EXTRACT_STRIDE") {
            if let Ok(stride) = val.parse() {
                config.stride = stride;
            }
        }

        if let Ok(val) = std::env::var("EXTRACT_SUBDATASET") {
            if let Ok(index) = val.parse() {
                config.subdataset = index;
            }
        }

        if let Ok(val) = std::env::var("EXTRACT_BAND") {
            if let Ok(band) = val.parse() {
                config.band = band;
            }
        }

        if let Ok(val) = std::env::var("EXTRACT_PRECISION") {
            if let Ok(precision) = val.parse() {
                config.precision = precision;
            }
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.stride == 0 {
            return Err("stride must be >= 1".to_string());
        }

        if self.band == 0 {
            return Err("band is 1-based and must be >= 1".to_string());
        }

        if !self.scale_factor.is_finite() || self.scale_factor <= 0.0 {
            return Err("scale_factor must be a positive finite number".to_string());
        }

        if self.valid_min > self.valid_max {
            return Err("valid_min must not exceed valid_max".to_string());
        }

        if !self.region.is_valid() {
            return Err("region min corner must not exceed max corner".to_string());
        }

        if self.precision > 12 {
            return Err("precision must be <= 12 decimal places".to_string());
        }

        Ok(())
    }
}
