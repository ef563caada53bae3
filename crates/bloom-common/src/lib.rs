//! Common types shared across the bloomwatch extraction crates.

pub mod bbox;
pub mod geotransform;
pub mod grid;

pub use bbox::{BboxParseError, BoundingBox};
pub use geotransform::GeoTransform;
pub use grid::SampleGrid;
