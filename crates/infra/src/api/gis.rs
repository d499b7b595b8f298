//! GIS API on the gis channel
//!
//! Includes [`GisApi::fetch_geojson`], which the map widget uses to load
//! feature collections; it goes through the same pipeline as every other
//! call, so it gets the bearer token, the cache buster, and normalized
//! errors.

use geoview_domain::{
    ApiError, FeatureCollection, Layer, LayerUpdate, Location, MapBounds, NewLayer,
};
use serde::de::IgnoredAny;
use serde_json::Value;
use tracing::info;

use crate::http::{RequestOptions, Service};

/// Map data, layer, and location search endpoints
#[derive(Debug, Clone)]
pub struct GisApi {
    service: Service,
}

impl GisApi {
    /// Bind the API to the GIS channel's service.
    pub const fn new(service: Service) -> Self {
        Self { service }
    }

    /// Fetch map data, optionally restricted to `bounds`
    /// (`north`/`south`/`east`/`west` query parameters).
    ///
    /// # Errors
    ///
    /// Returns the normalized error of the call.
    pub async fn get_map_data(&self, bounds: Option<MapBounds>) -> Result<Value, ApiError> {
        self.service.get_with("/map-data", RequestOptions::new().query(&bounds)).await
    }

    /// Fetch one layer with its data.
    ///
    /// # Errors
    ///
    /// Returns the normalized error of the call.
    pub async fn get_layer_data(&self, layer_id: &str) -> Result<Layer, ApiError> {
        self.service.get(&format!("/layers/{layer_id}")).await
    }

    /// Search locations by free text (`q` query parameter).
    ///
    /// # Errors
    ///
    /// Returns the normalized error of the call.
    pub async fn search_location(&self, query: &str) -> Result<Vec<Location>, ApiError> {
        self.service.get_with("/search", RequestOptions::new().query_param("q", query)).await
    }

    /// Create a layer and return it as stored.
    ///
    /// # Errors
    ///
    /// Returns the normalized error of the call.
    pub async fn create_layer(&self, layer: &NewLayer) -> Result<Layer, ApiError> {
        self.service.post("/layers", layer).await
    }

    /// Update the fields present in `update` on a layer.
    ///
    /// # Errors
    ///
    /// Returns the normalized error of the call.
    pub async fn update_layer(&self, layer_id: &str, update: &LayerUpdate) -> Result<Layer, ApiError> {
        self.service.put(&format!("/layers/{layer_id}"), update).await
    }

    /// Delete a layer; any response body is discarded.
    ///
    /// # Errors
    ///
    /// Returns the normalized error of the call.
    pub async fn delete_layer(&self, layer_id: &str) -> Result<(), ApiError> {
        self.service.delete::<IgnoredAny>(&format!("/layers/{layer_id}")).await.map(|_| ())
    }

    /// Fetch a GeoJSON feature collection from an absolute URL or a path on
    /// the GIS endpoint.
    ///
    /// # Errors
    ///
    /// Returns the normalized error of the call; a body that is not a
    /// feature collection is an unsendable error.
    pub async fn fetch_geojson(&self, url: &str) -> Result<FeatureCollection, ApiError> {
        let collection: FeatureCollection = self.service.get(url).await?;
        info!(features = collection.features.len(), "GeoJSON data loaded");
        Ok(collection)
    }
}
