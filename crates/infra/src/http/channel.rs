//! Independently configured request channels

use std::time::Duration;

use geoview_domain::ChannelKind;
use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};

use super::client::HttpClient;

/// Mutable settings of one channel
#[derive(Debug, Clone)]
pub struct ChannelSettings {
    /// Prefix for relative request paths
    pub base_url: String,
    /// Applied to every request unless overridden per call
    pub timeout: Duration,
    /// Headers sent on every request, including the bearer token when set
    pub default_headers: HeaderMap,
}

/// One logical endpoint: its own base URL, timeout, and default headers.
///
/// Settings changes are visible to every later request on this channel and
/// to no other channel. The `Authorization` default is owned by the
/// [`TokenStore`](super::token_store::TokenStore) and can only be changed
/// through it.
#[derive(Debug)]
pub struct Channel {
    kind: ChannelKind,
    http: HttpClient,
    settings: RwLock<ChannelSettings>,
}

impl Channel {
    /// Create a channel with JSON defaults plus `extra_defaults`.
    pub fn new(
        kind: ChannelKind,
        http: HttpClient,
        base_url: impl Into<String>,
        timeout: Duration,
        extra_defaults: HeaderMap,
    ) -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        for (name, value) in &extra_defaults {
            if name != AUTHORIZATION {
                default_headers.insert(name.clone(), value.clone());
            }
        }

        let settings = ChannelSettings { base_url: base_url.into(), timeout, default_headers };
        Self { kind, http, settings: RwLock::new(settings) }
    }

    /// Which logical endpoint this channel serves
    pub const fn kind(&self) -> ChannelKind {
        self.kind
    }

    pub(crate) const fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Copy of the current settings
    pub fn settings(&self) -> ChannelSettings {
        self.settings.read().clone()
    }

    /// Current base URL
    pub fn base_url(&self) -> String {
        self.settings.read().base_url.clone()
    }

    /// Current default timeout
    pub fn timeout(&self) -> Duration {
        self.settings.read().timeout
    }

    /// Current default `Authorization` header, if a token is set
    pub fn authorization(&self) -> Option<HeaderValue> {
        self.settings.read().default_headers.get(AUTHORIZATION).cloned()
    }

    /// Point later requests at a new base URL.
    pub fn set_base_url(&self, url: impl Into<String>) {
        self.settings.write().base_url = url.into();
    }

    /// Change the default timeout for later requests.
    pub fn set_timeout(&self, timeout: Duration) {
        self.settings.write().timeout = timeout;
    }

    /// Caller must hold the token store's write lock.
    pub(crate) fn write_authorization(&self, value: Option<&HeaderValue>) {
        let headers = &mut self.settings.write().default_headers;
        match value {
            Some(value) => {
                headers.insert(AUTHORIZATION, value.clone());
            }
            None => {
                headers.remove(AUTHORIZATION);
            }
        }
    }
}

/// Join a request path onto a base URL.
///
/// Absolute `http(s)://` paths are used unchanged.
pub fn resolve_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = base_url.trim_end_matches('/');
    if path.is_empty() {
        base.to_string()
    } else if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}
