//! Exchange types for the bloom point-collection format.
//!
//! The companion file-serving layer reads the serialized collection from disk
//! and serves it unmodified, so the shape produced here is a frozen contract:
//!
//! ```json
//! {
//!   "type": "FeatureCollection",
//!   "features": [
//!     {
//!       "type": "Feature",
//!       "geometry": {"type": "Point", "coordinates": [lon, lat]},
//!       "properties": {"ndvi": 0.654, "intensity": 0.654}
//!     }
//!   ]
//! }
//! ```
//!
//! Any change to the serialized field names or nesting is a breaking change
//! for that collaborator.

pub mod geojson;

pub use geojson::{BloomFeature, BloomFeatureCollection, BloomProperties, PointGeometry};
