//! Affine mapping from grid indices to geographic coordinates.

use serde::{Deserialize, Serialize};

/// Six-coefficient affine geotransform, GDAL coefficient order:
/// `[origin_lon, pixel_width, row_rotation, origin_lat, col_rotation, pixel_height]`.
///
/// For a north-up raster the rotation terms are zero and `pixel_height` is
/// negative (rows advance southward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform([f64; 6]);

impl GeoTransform {
    /// Create a geotransform from raw coefficients.
    pub fn new(coefficients: [f64; 6]) -> Self {
        Self(coefficients)
    }

    /// North-up transform without rotation terms.
    pub fn north_up(origin_lon: f64, origin_lat: f64, pixel_width: f64, pixel_height: f64) -> Self {
        Self([origin_lon, pixel_width, 0.0, origin_lat, 0.0, pixel_height])
    }

    /// Geographic coordinates of the grid cell at (row, col).
    pub fn apply(&self, row: usize, col: usize) -> (f64, f64) {
        let c = &self.0;
        let (row, col) = (row as f64, col as f64);
        let lon = c[0] + col * c[1] + row * c[2];
        let lat = c[3] + col * c[4] + row * c[5];
        (lon, lat)
    }

    /// The raw coefficient array.
    pub fn coefficients(&self) -> [f64; 6] {
        self.0
    }
}
