//! GeoJSON FeatureCollection types for extracted bloom points.

use serde::{Deserialize, Serialize};

/// A GeoJSON FeatureCollection of extracted points.
///
/// Feature order is meaningful: it preserves the row-major scan order of the
/// source grid so repeated runs produce byte-identical output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BloomFeatureCollection {
    /// Type identifier (always "FeatureCollection").
    #[serde(rename = "type")]
    pub type_: String,

    /// Array of point features in scan order.
    pub features: Vec<BloomFeature>,
}

impl BloomFeatureCollection {
    /// Create a new empty FeatureCollection.
    pub fn new() -> Self {
        Self {
            type_: "FeatureCollection".to_string(),
            features: Vec::new(),
        }
    }

    /// Add a feature to the collection.
    pub fn with_feature(mut self, feature: BloomFeature) -> Self {
        self.features.push(feature);
        self
    }

    /// Add multiple features to the collection.
    pub fn with_features(mut self, features: Vec<BloomFeature>) -> Self {
        self.features.extend(features);
        self
    }

    /// Number of features in the collection.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl Default for BloomFeatureCollection {
    fn default() -> Self {
        Self::new()
    }
}

/// A single extracted point feature.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BloomFeature {
    /// Type identifier (always "Feature").
    #[serde(rename = "type")]
    pub type_: String,

    /// The point geometry of this feature.
    pub geometry: PointGeometry,

    /// Scalar attributes of this feature.
    pub properties: BloomProperties,
}

impl BloomFeature {
    /// Create a point feature with the given index value and intensity.
    pub fn point(lon: f64, lat: f64, ndvi: f64, intensity: f64) -> Self {
        Self {
            type_: "Feature".to_string(),
            geometry: PointGeometry::new(lon, lat),
            properties: BloomProperties {
                ndvi,
                intensity,
                date: None,
            },
        }
    }

    /// Set the observation date property.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.properties.date = Some(date.into());
        self
    }
}

/// A GeoJSON Point geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PointGeometry {
    /// Type identifier (always "Point").
    #[serde(rename = "type")]
    pub type_: String,

    /// Coordinates as [longitude, latitude].
    pub coordinates: [f64; 2],
}

impl PointGeometry {
    /// Create a point geometry.
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            type_: "Point".to_string(),
            coordinates: [lon, lat],
        }
    }

    /// Longitude of the point.
    pub fn lon(&self) -> f64 {
        self.coordinates[0]
    }

    /// Latitude of the point.
    pub fn lat(&self) -> f64 {
        self.coordinates[1]
    }
}

/// Per-point scalar attributes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BloomProperties {
    /// Vegetation index value, rounded to the emitter precision.
    pub ndvi: f64,

    /// Index value clamped to [0, 1], rounded to the emitter precision.
    pub intensity: f64,

    /// Observation date (ISO 8601 day). Only present for converted ground
    /// observations; raster-extracted points omit it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}
