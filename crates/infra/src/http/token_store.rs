//! Shared bearer-token lifecycle
//!
//! The store owns the only copy of the current token and the `Authorization`
//! default of every channel. Lock order is always token → channel settings:
//! `set_token`/`clear_token` hold the token write lock while rewriting every
//! channel, and the request phase reads channel settings under the token
//! read lock, so no request can observe a partially propagated token.

use std::sync::Arc;

use geoview_domain::{ApiError, BEARER_PREFIX};
use parking_lot::RwLock;
use reqwest::header::HeaderValue;
use tracing::info;

use super::channel::{Channel, ChannelSettings};

#[derive(Debug, Clone)]
struct StoredToken {
    raw: String,
    header: HeaderValue,
}

/// Process-wide holder of the current bearer token
#[derive(Debug)]
pub struct TokenStore {
    current: RwLock<Option<StoredToken>>,
    channels: Vec<Arc<Channel>>,
}

impl TokenStore {
    /// Create an empty store that keeps `channels` in sync.
    pub fn new(channels: Vec<Arc<Channel>>) -> Self {
        Self { current: RwLock::new(None), channels }
    }

    /// Store `token` and set `Authorization: Bearer <token>` on every channel.
    ///
    /// # Errors
    ///
    /// Returns an unsendable error if the token is not a valid header value;
    /// the previous state is left untouched.
    pub fn set_token(&self, token: impl Into<String>) -> Result<(), ApiError> {
        let raw = token.into();
        let mut header = HeaderValue::try_from(format!("{BEARER_PREFIX}{raw}"))
            .map_err(|err| ApiError::unsendable(format!("invalid bearer token: {err}")))?;
        header.set_sensitive(true);

        let mut current = self.current.write();
        for channel in &self.channels {
            channel.write_authorization(Some(&header));
        }
        *current = Some(StoredToken { raw, header });
        drop(current);

        info!(channels = self.channels.len(), "session token set");
        Ok(())
    }

    /// Forget the token and remove `Authorization` from every channel.
    pub fn clear_token(&self) {
        let mut current = self.current.write();
        for channel in &self.channels {
            channel.write_authorization(None);
        }
        let had_token = current.take().is_some();
        drop(current);

        if had_token {
            info!(channels = self.channels.len(), "session token cleared");
        }
    }

    /// Currently stored token, if any
    pub fn token(&self) -> Option<String> {
        self.current.read().as_ref().map(|stored| stored.raw.clone())
    }

    /// Whether a token is stored
    pub fn has_token(&self) -> bool {
        self.current.read().is_some()
    }

    /// Consistent view of a channel's settings and the bearer header.
    pub(crate) fn snapshot(&self, channel: &Channel) -> (ChannelSettings, Option<HeaderValue>) {
        let current = self.current.read();
        let settings = channel.settings();
        let header = current.as_ref().map(|stored| stored.header.clone());
        (settings, header)
    }
}
