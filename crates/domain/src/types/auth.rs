//! Auth endpoint payloads

use serde::{Deserialize, Serialize};

use super::user::User;

/// Credentials posted to `/auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account email
    pub email: String,
    /// Plain-text password, sent only over the auth channel
    pub password: String,
}

/// Body returned by `/auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for the new session
    pub token: String,
    /// The logged-in user
    pub user: User,
}

/// Body returned by `/auth/refresh`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Replacement bearer token
    pub token: String,
}
