//! Raw value decoding.

use crate::config::ExtractConfig;

/// Converts raw scaled-integer cell values to physical index values.
///
/// The fill/no-data envelope is defined in raw encoding space, so the range
/// check happens before scaling: a raw value outside `[valid_min, valid_max]`
/// decodes to `None` and never reaches downstream stages.
#[derive(Debug, Clone, Copy)]
pub struct Decoder {
    scale_factor: f64,
    valid_min: i32,
    valid_max: i32,
}

impl Decoder {
    /// Create a decoder with an explicit scale factor and valid envelope.
    pub fn new(scale_factor: f64, valid_min: i32, valid_max: i32) -> Self {
        Self {
            scale_factor,
            valid_min,
            valid_max,
        }
    }

    /// Decoder for the given pipeline configuration.
    pub fn from_config(config: &ExtractConfig) -> Self {
        Self::new(config.scale_factor, config.valid_min, config.valid_max)
    }

    /// Decode one raw cell value, or `None` for fill/no-data encodings.
    pub fn decode(&self, raw: i32) -> Option<f64> {
        if raw < self.valid_min || raw > self.valid_max {
            return None;
        }
        Some(raw as f64 * self.scale_factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_decoder() -> Decoder {
        Decoder::from_config(&ExtractConfig::default())
    }

    #[test]
    fn test_decode_scales_valid_values() {
        let decoder = reference_decoder();
        assert_eq!(decoder.decode(0), Some(0.0));
        assert!((decoder.decode(5000).unwrap() - 0.5).abs() < 1e-9);
        assert!((decoder.decode(9999).unwrap() - 0.9999).abs() < 1e-9);
        assert!((decoder.decode(-1500).unwrap() + 0.15).abs() < 1e-9);
    }

    #[test]
    fn test_envelope_is_inclusive() {
        let decoder = reference_decoder();
        assert!(decoder.decode(-2000).is_some());
        assert!(decoder.decode(10000).is_some());
    }

    #[test]
    fn test_fill_values_rejected_before_scaling() {
        let decoder = reference_decoder();
        assert_eq!(decoder.decode(-2001), None);
        assert_eq!(decoder.decode(-3000), None);
        assert_eq!(decoder.decode(10001), None);
        assert_eq!(decoder.decode(12000), None);
        assert_eq!(decoder.decode(i32::MIN), None);
        assert_eq!(decoder.decode(i32::MAX), None);
    }

    #[test]
    fn test_custom_envelope_and_scale() {
        let decoder = Decoder::new(0.01, 0, 100);
        assert_eq!(decoder.decode(-1), None);
        assert_eq!(decoder.decode(101), None);
        assert!((decoder.decode(50).unwrap() - 0.5).abs() < 1e-9);
    }
}
