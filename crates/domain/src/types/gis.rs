//! GIS endpoint payloads
//!
//! Layers, locations, and the GeoJSON feature collections handed to the map
//! widget. Geometry and properties are kept as raw JSON; the client layer never
//! interprets them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Viewport bounds sent as query parameters to `/map-data`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    /// Northern latitude
    pub north: f64,
    /// Southern latitude
    pub south: f64,
    /// Eastern longitude
    pub east: f64,
    /// Western longitude
    pub west: f64,
}

/// A search result from `/search`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Location identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// WGS84 latitude
    pub latitude: f64,
    /// WGS84 longitude
    pub longitude: f64,
}

/// A map layer as stored by the GIS endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Layer identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Render type (`circle`, `line`, `fill`, ...)
    #[serde(rename = "type")]
    pub layer_type: String,
    /// Raw layer records
    #[serde(default)]
    pub data: Vec<Value>,
}

/// Layer payload for `POST /layers`; the server assigns the id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLayer {
    /// Display name
    pub name: String,
    /// Render type
    #[serde(rename = "type")]
    pub layer_type: String,
    /// Raw layer records
    #[serde(default)]
    pub data: Vec<Value>,
}

/// Partial layer update; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerUpdate {
    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New render type
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub layer_type: Option<String>,
    /// Replacement layer records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Value>>,
}

/// GeoJSON `FeatureCollection`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    /// Always `FeatureCollection` for well-formed input
    #[serde(rename = "type")]
    pub kind: String,
    /// Features in document order
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// GeoJSON `Feature`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Always `Feature` for well-formed input
    #[serde(rename = "type")]
    pub kind: String,
    /// Optional string or numeric identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// Raw GeoJSON geometry object
    #[serde(default)]
    pub geometry: Option<Value>,
    /// Free-form feature properties
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

impl Feature {
    /// String property lookup, e.g. the `status` used for layer styling
    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.properties.as_ref()?.get(key)?.as_str()
    }
}
