//! User profile API on the main channel

use geoview_domain::{ApiError, Pagination, User, UserPage, UserUpdate};
use serde::de::IgnoredAny;

use crate::http::{RequestOptions, Service};

/// Profile and user administration endpoints
#[derive(Debug, Clone)]
pub struct UserApi {
    service: Service,
}

impl UserApi {
    /// Bind the API to the main channel's service.
    pub const fn new(service: Service) -> Self {
        Self { service }
    }

    /// Fetch the profile of the logged-in user.
    ///
    /// # Errors
    ///
    /// Returns the normalized error of the call.
    pub async fn get_profile(&self) -> Result<User, ApiError> {
        self.service.get("/user/profile").await
    }

    /// Replace the fields present in `update` on the logged-in user's profile.
    ///
    /// # Errors
    ///
    /// Returns the normalized error of the call.
    pub async fn update_profile(&self, update: &UserUpdate) -> Result<User, ApiError> {
        self.service.put("/user/profile", update).await
    }

    /// List users, one page at a time (`page`/`limit` query parameters).
    ///
    /// # Errors
    ///
    /// Returns the normalized error of the call.
    pub async fn get_users(&self, pagination: Pagination) -> Result<UserPage, ApiError> {
        self.service.get_with("/users", RequestOptions::new().query(&pagination)).await
    }

    /// Delete a user; any response body is discarded.
    ///
    /// # Errors
    ///
    /// Returns the normalized error of the call.
    pub async fn delete_user(&self, id: i64) -> Result<(), ApiError> {
        self.service.delete::<IgnoredAny>(&format!("/users/{id}")).await.map(|_| ())
    }
}
