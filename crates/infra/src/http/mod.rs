//! Multi-endpoint HTTP client layer
//!
//! Four independently configured channels (main/auth/gis/upload) share one
//! [`TokenStore`] and one [`Interceptors`] pipeline. Callers use the
//! [`Service`] façade and receive either the decoded payload or a normalized
//! [`ApiError`](geoview_domain::ApiError).

pub mod channel;
pub mod channel_set;
pub mod client;
pub mod interceptors;
pub mod options;
pub mod service;
pub mod token_store;
pub mod upload;

pub use channel::{resolve_url, Channel, ChannelSettings};
pub use channel_set::ChannelSet;
pub use client::{HttpClient, HttpClientBuilder};
pub use interceptors::Interceptors;
pub use options::{RequestBody, RequestDraft, RequestOptions};
pub use service::Service;
pub use token_store::TokenStore;
pub use upload::{FileInput, FormPart, MultipartForm, ProgressCallback, UploadPayload, UploadProgress};
