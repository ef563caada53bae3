//! Common test fixtures for bloomwatch tests.
//!
//! Pre-defined regions, transforms, and granule names representing the
//! scenarios the extraction pipeline is exercised against.

use bloom_common::{BoundingBox, GeoTransform};

/// Common region definitions for testing.
pub mod regions {
    use super::*;

    /// Global coverage (-180 to 180, -90 to 90); the permissive filter.
    pub fn global() -> BoundingBox {
        BoundingBox::new(-180.0, -90.0, 180.0, 90.0)
    }

    /// The reference region of interest (Kenya: lon 34..42, lat -5..5).
    pub fn kenya() -> BoundingBox {
        BoundingBox::new(34.0, -5.0, 42.0, 5.0)
    }

    /// A region far away from the unit-transform grids used in tests.
    pub fn far_away() -> BoundingBox {
        BoundingBox::new(100.0, 40.0, 110.0, 50.0)
    }

    /// Invalid region (min > max); must fail validation.
    pub fn inverted() -> BoundingBox {
        BoundingBox::new(10.0, 10.0, 5.0, 5.0)
    }
}

/// Common geotransforms for testing.
pub mod transforms {
    use super::*;

    /// One degree per cell, origin at (0, 0), rows advancing south.
    pub fn unit() -> GeoTransform {
        GeoTransform::north_up(0.0, 0.0, 1.0, -1.0)
    }

    /// A Kenya-area transform: 0.05 degrees per cell starting at the
    /// reference region's northwest corner.
    pub fn kenya() -> GeoTransform {
        GeoTransform::north_up(34.0, 5.0, 0.05, -0.05)
    }
}

/// Granule filenames used across tests.
pub mod granules {
    /// The reference Terra 16-day NDVI granule name.
    pub const REFERENCE: &str = "MOD13Q1.A2024001.h21v08.061.hdf";

    /// An Aqua granule with a different tile and date.
    pub const AQUA: &str = "MYD13Q1.A2023305.h20v09.061.hdf";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kenya_region_contains_nairobi() {
        assert!(regions::kenya().contains(36.8219, -1.2921));
    }

    #[test]
    fn test_unit_transform_origin() {
        assert_eq!(transforms::unit().apply(0, 0), (0.0, 0.0));
    }

    #[test]
    fn test_kenya_transform_stays_in_region() {
        let region = regions::kenya();
        let transform = transforms::kenya();
        let (lon, lat) = transform.apply(10, 10);
        assert!(region.contains(lon, lat));
    }
}
