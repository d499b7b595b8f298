//! Endpoint APIs for GeoView
//!
//! Thin wrappers binding the remote auth, user, GIS, and upload endpoints to
//! their channels. They add no error handling of their own beyond the session
//! bookkeeping in [`AuthApi`].

pub mod auth;
pub mod gis;
pub mod uploads;
pub mod users;

use geoview_domain::{ApiError, ClientConfig};

pub use auth::AuthApi;
pub use gis::GisApi;
pub use uploads::UploadApi;
pub use users::UserApi;

use crate::http::ChannelSet;

/// Entry point bundling every endpoint API over one channel set
#[derive(Debug, Clone)]
pub struct GeoViewApi {
    channels: ChannelSet,
}

impl GeoViewApi {
    /// Build every channel from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the channel set cannot be created.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        Ok(Self { channels: ChannelSet::new(config)? })
    }

    /// Build from environment-resolved endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if the channel set cannot be created.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(&crate::config::load())
    }

    /// Wrap an existing channel set, sharing its token.
    pub const fn from_channels(channels: ChannelSet) -> Self {
        Self { channels }
    }

    /// Underlying channels, for base URL and token management
    pub const fn channels(&self) -> &ChannelSet {
        &self.channels
    }

    /// Session endpoints
    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.channels.clone())
    }

    /// User endpoints on the main channel
    pub fn users(&self) -> UserApi {
        UserApi::new(self.channels.main())
    }

    /// GIS endpoints on the gis channel
    pub fn gis(&self) -> GisApi {
        GisApi::new(self.channels.gis())
    }

    /// Upload endpoint on the upload channel
    pub fn uploads(&self) -> UploadApi {
        UploadApi::new(self.channels.upload())
    }
}
