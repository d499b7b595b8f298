//! The four logical channels sharing one token store and one pipeline

use std::sync::Arc;

use geoview_domain::{ApiError, ChannelKind, ClientConfig, EndpointConfig};
use reqwest::header::HeaderMap;
use tracing::info;

use super::channel::Channel;
use super::client::HttpClient;
use super::interceptors::Interceptors;
use super::service::Service;
use super::token_store::TokenStore;

/// Owner of the main/auth/gis/upload channels.
///
/// Cloning is cheap and every clone shares the same channels and token.
#[derive(Debug, Clone)]
pub struct ChannelSet {
    channels: [Arc<Channel>; 4],
    tokens: Arc<TokenStore>,
    pipeline: Arc<Interceptors>,
}

impl ChannelSet {
    /// Build all channels from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be created.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = HttpClient::builder().user_agent(config.user_agent.clone()).build()?;

        let channels = ChannelKind::ALL.map(|kind| {
            Arc::new(Channel::new(
                kind,
                http.clone(),
                config.endpoints.get(kind),
                config.timeout_for(kind),
                HeaderMap::new(),
            ))
        });
        let tokens = Arc::new(TokenStore::new(channels.to_vec()));
        let pipeline = Arc::new(Interceptors::new(tokens.clone()));

        info!(
            main = %config.endpoints.main,
            auth = %config.endpoints.auth,
            gis = %config.endpoints.gis,
            upload = %config.endpoints.upload,
            "channel set created"
        );

        Ok(Self { channels, tokens, pipeline })
    }

    /// Build all channels with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be created.
    pub fn from_endpoints(endpoints: EndpointConfig) -> Result<Self, ApiError> {
        Self::new(&ClientConfig::with_endpoints(endpoints))
    }

    /// The channel serving `kind`
    pub fn channel(&self, kind: ChannelKind) -> &Arc<Channel> {
        &self.channels[kind.index()]
    }

    /// Typed façade over the channel serving `kind`
    pub fn service(&self, kind: ChannelKind) -> Service {
        Service::new(
            self.channel(kind).clone(),
            self.channel(ChannelKind::Upload).clone(),
            self.pipeline.clone(),
        )
    }

    /// Façade over the main channel
    pub fn main(&self) -> Service {
        self.service(ChannelKind::Main)
    }

    /// Façade over the auth channel
    pub fn auth(&self) -> Service {
        self.service(ChannelKind::Auth)
    }

    /// Façade over the gis channel
    pub fn gis(&self) -> Service {
        self.service(ChannelKind::Gis)
    }

    /// Façade over the upload channel
    pub fn upload(&self) -> Service {
        self.service(ChannelKind::Upload)
    }

    /// Point one channel at a new base URL; the others are unaffected.
    pub fn set_base_url(&self, kind: ChannelKind, url: impl Into<String>) {
        let url = url.into();
        info!(channel = %kind, url = %url, "base URL changed");
        self.channel(kind).set_base_url(url);
    }

    /// Current base URL of one channel
    pub fn base_url(&self, kind: ChannelKind) -> String {
        self.channel(kind).base_url()
    }

    /// See [`TokenStore::set_token`].
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a valid header value.
    pub fn set_token(&self, token: impl Into<String>) -> Result<(), ApiError> {
        self.tokens.set_token(token)
    }

    /// See [`TokenStore::clear_token`].
    pub fn clear_token(&self) {
        self.tokens.clear_token();
    }

    /// Currently stored token, if any
    pub fn token(&self) -> Option<String> {
        self.tokens.token()
    }

    /// The store shared by every channel
    pub const fn token_store(&self) -> &Arc<TokenStore> {
        &self.tokens
    }
}
