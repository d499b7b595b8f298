//! Typed request façade over a channel

use std::sync::Arc;

use geoview_domain::{ApiError, ChannelKind};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::instrument;

use super::channel::Channel;
use super::interceptors::Interceptors;
use super::options::{RequestBody, RequestDraft, RequestOptions};
use super::upload::{self, ProgressCallback, UploadPayload};

/// Per-channel convenience methods returning decoded payloads.
///
/// Failures are the normalized errors produced by the interception
/// pipeline; the façade adds no classification of its own.
#[derive(Debug, Clone)]
pub struct Service {
    channel: Arc<Channel>,
    upload_channel: Arc<Channel>,
    pipeline: Arc<Interceptors>,
}

impl Service {
    pub(crate) const fn new(
        channel: Arc<Channel>,
        upload_channel: Arc<Channel>,
        pipeline: Arc<Interceptors>,
    ) -> Self {
        Self { channel, upload_channel, pipeline }
    }

    /// Channel this façade sends on (uploads excepted)
    pub fn kind(&self) -> ChannelKind {
        self.channel.kind()
    }

    /// The underlying channel
    pub const fn channel(&self) -> &Arc<Channel> {
        &self.channel
    }

    /// Issue an arbitrary call on this channel.
    ///
    /// # Errors
    ///
    /// Returns the normalized error of the call. Every method below fails
    /// the same way.
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let draft = RequestDraft::new(method, path, body, options);
        self.pipeline.dispatch(&self.channel, draft).await
    }

    /// `GET path`, decoding the body into `T`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.get_with(path, RequestOptions::default()).await
    }

    #[instrument(skip(self, options), fields(channel = %self.kind()))]
    pub async fn get_with<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        self.send(Method::GET, path, RequestBody::Empty, options).await
    }

    /// `POST path` with a JSON body.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.post_with(path, body, RequestOptions::default()).await
    }

    #[instrument(skip(self, body, options), fields(channel = %self.kind()))]
    pub async fn post_with<B, T>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::POST, path, RequestBody::json(body), options).await
    }

    /// `PUT path` with a JSON body.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.put_with(path, body, RequestOptions::default()).await
    }

    #[instrument(skip(self, body, options), fields(channel = %self.kind()))]
    pub async fn put_with<B, T>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::PUT, path, RequestBody::json(body), options).await
    }

    /// `PATCH path` with a JSON body.
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.patch_with(path, body, RequestOptions::default()).await
    }

    #[instrument(skip(self, body, options), fields(channel = %self.kind()))]
    pub async fn patch_with<B, T>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::PATCH, path, RequestBody::json(body), options).await
    }

    /// `DELETE path`.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.delete_with(path, RequestOptions::default()).await
    }

    #[instrument(skip(self, options), fields(channel = %self.kind()))]
    pub async fn delete_with<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        self.send(Method::DELETE, path, RequestBody::Empty, options).await
    }

    /// Upload a file or a pre-built multipart form.
    ///
    /// Always dispatched on the upload channel, whichever service it is
    /// called through.
    #[instrument(skip(self, payload, progress), fields(channel = %ChannelKind::Upload))]
    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        payload: impl Into<UploadPayload>,
        progress: Option<ProgressCallback>,
    ) -> Result<T, ApiError> {
        let body = match upload::encode(payload.into().into_form(), progress) {
            Ok(form) => RequestBody::Multipart(form),
            Err(err) => RequestBody::Invalid(err.message),
        };
        let draft = RequestDraft::new(Method::POST, path, body, RequestOptions::default());
        self.pipeline.dispatch(&self.upload_channel, draft).await
    }
}
