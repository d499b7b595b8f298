//! Session management against the auth endpoint
//!
//! Login and refresh store the returned token in the shared token store, so
//! every channel starts sending it at once. Logout always clears the local
//! token, even when the remote call fails.

use geoview_domain::{ApiError, LoginRequest, LoginResponse, TokenResponse};
use serde::de::IgnoredAny;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::http::ChannelSet;

/// Session endpoints on the auth channel
///
/// Holds the whole channel set because login, refresh, and logout change the
/// token every channel sends.
#[derive(Debug, Clone)]
pub struct AuthApi {
    channels: ChannelSet,
}

impl AuthApi {
    /// Bind the API to a channel set.
    pub const fn new(channels: ChannelSet) -> Self {
        Self { channels }
    }

    /// Log in and store the returned token.
    ///
    /// # Errors
    ///
    /// Returns the normalized error of the login call, or an unsendable
    /// error if the returned token is not a valid header value.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        debug!("Starting login");

        let response: LoginResponse = self.channels.auth().post("/auth/login", credentials).await?;
        if !response.token.is_empty() {
            self.channels.set_token(response.token.clone())?;
        }

        info!(user_id = response.user.id, "Login successful");
        Ok(response)
    }

    /// Log out remotely and clear the local token.
    ///
    /// # Errors
    ///
    /// Returns the remote failure after the local token has been cleared.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = self.channels.auth().post::<_, IgnoredAny>("/auth/logout", &json!({})).await;
        self.channels.clear_token();

        match result {
            Ok(_) => {
                info!("Logout successful");
                Ok(())
            }
            Err(err) => {
                warn!(status = err.status, error = %err.message, "Remote logout failed; local session cleared");
                Err(err)
            }
        }
    }

    /// Exchange the current session for a fresh token and store it.
    ///
    /// # Errors
    ///
    /// Returns the normalized error of the refresh call.
    pub async fn refresh_token(&self) -> Result<TokenResponse, ApiError> {
        let response: TokenResponse = self.channels.auth().post("/auth/refresh", &json!({})).await?;
        self.channels.set_token(response.token.clone())?;
        debug!("Session token refreshed");
        Ok(response)
    }

    /// Whether a session token is currently stored
    pub fn is_authenticated(&self) -> bool {
        self.channels.token_store().has_token()
    }
}
