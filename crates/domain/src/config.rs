//! Channel identities and endpoint configuration

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    AUTH_API_FALLBACK_URL, DEFAULT_TIMEOUT_MS, GIS_API_FALLBACK_URL, MAIN_API_FALLBACK_URL,
    UPLOAD_API_FALLBACK_URL, UPLOAD_TIMEOUT_MS,
};
use crate::errors::ConfigError;

/// Logical request channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    /// General application API (profiles, users)
    Main,
    /// Login, logout, and token refresh
    Auth,
    /// Map data, layers, and location search
    Gis,
    /// Multipart uploads, with the extended timeout
    Upload,
}

impl ChannelKind {
    /// Every channel, in [`ChannelKind::index`] order
    pub const ALL: [Self; 4] = [Self::Main, Self::Auth, Self::Gis, Self::Upload];

    /// Lowercase name used in logs and config keys
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Auth => "auth",
            Self::Gis => "gis",
            Self::Upload => "upload",
        }
    }

    /// Environment variable overriding this channel's base URL
    pub const fn env_var(self) -> &'static str {
        match self {
            Self::Main => "GEOVIEW_API_BASE_URL",
            Self::Auth => "GEOVIEW_AUTH_API_URL",
            Self::Gis => "GEOVIEW_GIS_API_URL",
            Self::Upload => "GEOVIEW_UPLOAD_API_URL",
        }
    }

    /// Base URL used when the environment variable is unset or empty
    pub const fn fallback_url(self) -> &'static str {
        match self {
            Self::Main => MAIN_API_FALLBACK_URL,
            Self::Auth => AUTH_API_FALLBACK_URL,
            Self::Gis => GIS_API_FALLBACK_URL,
            Self::Upload => UPLOAD_API_FALLBACK_URL,
        }
    }

    /// Stable position of this channel in per-channel arrays
    pub const fn index(self) -> usize {
        match self {
            Self::Main => 0,
            Self::Auth => 1,
            Self::Gis => 2,
            Self::Upload => 3,
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChannelKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownChannel(s.to_string()))
    }
}

/// Base URL per logical channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Main API base URL
    pub main: String,
    /// Auth API base URL
    pub auth: String,
    /// GIS API base URL
    pub gis: String,
    /// Upload API base URL
    pub upload: String,
}

impl EndpointConfig {
    /// Base URL configured for `kind`
    pub fn get(&self, kind: ChannelKind) -> &str {
        match kind {
            ChannelKind::Main => &self.main,
            ChannelKind::Auth => &self.auth,
            ChannelKind::Gis => &self.gis,
            ChannelKind::Upload => &self.upload,
        }
    }

    /// Replace the base URL configured for `kind`.
    pub fn set(&mut self, kind: ChannelKind, url: impl Into<String>) {
        let slot = match kind {
            ChannelKind::Main => &mut self.main,
            ChannelKind::Auth => &mut self.auth,
            ChannelKind::Gis => &mut self.gis,
            ChannelKind::Upload => &mut self.upload,
        };
        *slot = url.into();
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            main: MAIN_API_FALLBACK_URL.to_string(),
            auth: AUTH_API_FALLBACK_URL.to_string(),
            gis: GIS_API_FALLBACK_URL.to_string(),
            upload: UPLOAD_API_FALLBACK_URL.to_string(),
        }
    }
}

/// Full configuration for the channel set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL per channel
    pub endpoints: EndpointConfig,
    /// Timeout for main/auth/gis channels
    pub timeout_ms: u64,
    /// Timeout for the upload channel
    pub upload_timeout_ms: u64,
    /// `User-Agent` sent on every request
    pub user_agent: String,
}

impl ClientConfig {
    /// Default timeouts and user agent with the given endpoints.
    pub fn with_endpoints(endpoints: EndpointConfig) -> Self {
        Self { endpoints, ..Self::default() }
    }

    /// Timeout a channel is created with
    pub const fn timeout_for(&self, kind: ChannelKind) -> Duration {
        match kind {
            ChannelKind::Upload => Duration::from_millis(self.upload_timeout_ms),
            _ => Duration::from_millis(self.timeout_ms),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoints: EndpointConfig::default(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            upload_timeout_ms: UPLOAD_TIMEOUT_MS,
            user_agent: concat!("geoview/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
