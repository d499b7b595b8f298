//! File uploads on the upload channel

use geoview_domain::ApiError;
use serde::de::DeserializeOwned;

use crate::http::{ProgressCallback, Service, UploadPayload};

/// Upload endpoint with the extended upload timeout
#[derive(Debug, Clone)]
pub struct UploadApi {
    service: Service,
}

impl UploadApi {
    /// Bind the API to the upload channel's service.
    pub const fn new(service: Service) -> Self {
        Self { service }
    }

    /// Upload a file or a pre-built form to `path`.
    ///
    /// `progress`, when given, receives an event per chunk handed to the
    /// transport and a final event with `loaded == total`.
    ///
    /// # Errors
    ///
    /// Returns the normalized error of the call, or an unsendable error if
    /// a part cannot be encoded.
    pub async fn upload_file<T: DeserializeOwned>(
        &self,
        path: &str,
        payload: impl Into<UploadPayload>,
        progress: Option<ProgressCallback>,
    ) -> Result<T, ApiError> {
        self.service.upload(path, payload, progress).await
    }
}
