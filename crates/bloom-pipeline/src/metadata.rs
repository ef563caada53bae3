//! Metadata extraction from granule filenames.
//!
//! MODIS-style distribution names encode the product, acquisition date, tile
//! and collection, e.g. `MOD13Q1.A2024001.h21v08.061.hdf`. Parsing is best
//! effort: an unrecognized name is not an error, the pipeline just logs less.

use std::path::Path;

use chrono::NaiveDate;

/// Information extracted from a granule filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GranuleInfo {
    /// Product short name (e.g., "MOD13Q1").
    pub product: String,
    /// Acquisition date decoded from the `AYYYYDDD` day-of-year field.
    pub acquisition: NaiveDate,
    /// Horizontal tile index.
    pub tile_h: u8,
    /// Vertical tile index.
    pub tile_v: u8,
    /// Collection number (e.g., "061").
    pub collection: String,
}

/// Parse a MODIS-style granule filename.
///
/// Expected shape: `<PRODUCT>.A<YYYYDDD>.h<HH>v<VV>.<COLLECTION>.<ext>`.
pub fn parse_granule_filename<P: AsRef<Path>>(path: P) -> Option<GranuleInfo> {
    let filename = path.as_ref().file_name().and_then(|s| s.to_str())?;

    let mut parts = filename.split('.');
    let product = parts.next()?;
    let date_field = parts.next()?;
    let tile_field = parts.next()?;
    let collection = parts.next()?;

    if product.is_empty() {
        return None;
    }

    // AYYYYDDD: year plus day-of-year.
    let date_digits = date_field.strip_prefix('A')?;
    if date_digits.len() != 7 {
        return None;
    }
    let year: i32 = date_digits[0..4].parse().ok()?;
    let day_of_year: u32 = date_digits[4..7].parse().ok()?;
    let acquisition = NaiveDate::from_yo_opt(year, day_of_year)?;

    // h21v08: sinusoidal grid tile indices.
    let tile = tile_field.strip_prefix('h')?;
    let (h, v) = tile.split_once('v')?;
    let tile_h: u8 = h.parse().ok()?;
    let tile_v: u8 = v.parse().ok()?;

    Some(GranuleInfo {
        product: product.to_string(),
        acquisition,
        tile_h,
        tile_v,
        collection: collection.to_string(),
    })
}
