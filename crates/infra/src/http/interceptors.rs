//! Request/response/error interception shared by every channel
//!
//! One [`Interceptors`] value is created per channel set and attached to all
//! channels by reference. It is the only component that classifies failures:
//! every outcome leaving [`Interceptors::dispatch`] is either the decoded
//! payload or a normalized [`ApiError`].

use std::sync::Arc;

use chrono::Utc;
use geoview_domain::ApiError;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Request, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, warn};

use super::channel::{resolve_url, Channel};
use super::options::{strip_cache_buster, RequestBody, RequestDraft};
use super::token_store::TokenStore;
use crate::errors::conversions::{self, TransportFailure};

/// Interception pipeline bound to a token store
#[derive(Debug)]
pub struct Interceptors {
    tokens: Arc<TokenStore>,
}

impl Interceptors {
    /// Pipeline that injects and invalidates tokens held by `tokens`.
    pub const fn new(tokens: Arc<TokenStore>) -> Self {
        Self { tokens }
    }

    /// Run one call through the request phase, the transport, and the
    /// response phase.
    pub async fn dispatch<T: DeserializeOwned>(
        &self,
        channel: &Channel,
        draft: RequestDraft,
    ) -> Result<T, ApiError> {
        let path = draft.path.clone();

        let request = match self.on_request(channel, draft) {
            Ok(request) => request,
            Err(err) => {
                error!(channel = %channel.kind(), path = %path, error = %err.message, "request error");
                return Err(err);
            }
        };

        match channel.http().execute(request).await {
            Ok(response) if response.status().is_success() => {
                self.on_success(channel, &path, response).await
            }
            Ok(response) => Err(self.on_rejected(channel, &path, response).await),
            Err(err) => Err(self.on_transport_error(channel, &path, &err)),
        }
    }

    /// Request phase: cache buster, bearer injection, logging.
    pub(crate) fn on_request(
        &self,
        channel: &Channel,
        draft: RequestDraft,
    ) -> Result<Request, ApiError> {
        let RequestDraft { method, path, body, options } = draft;

        let (settings, bearer) = self.tokens.snapshot(channel);
        let timeout = options.timeout_override().unwrap_or(settings.timeout);
        let (overrides, query) = options.into_parts(Utc::now().timestamp_millis())?;

        let mut headers = settings.default_headers;
        for (name, value) in &overrides {
            headers.insert(name.clone(), value.clone());
        }
        if let Some(bearer) = bearer {
            headers.insert(AUTHORIZATION, bearer);
        }
        if body.is_multipart() {
            headers.remove(CONTENT_TYPE);
        }

        debug!(channel = %channel.kind(), %method, path = %path, "outgoing request");

        let url = strip_cache_buster(&resolve_url(&settings.base_url, &path));
        let builder =
            channel.http().request(method, url).headers(headers).query(&query).timeout(timeout);
        let builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(form),
            RequestBody::Invalid(message) => return Err(ApiError::unsendable(message)),
        };

        builder.build().map_err(|err| conversions::normalize(&err))
    }

    /// Success path: hand back the decoded body, not an envelope.
    async fn on_success<T: DeserializeOwned>(
        &self,
        channel: &Channel,
        path: &str,
        response: Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(err) => return Err(self.on_transport_error(channel, path, &err)),
        };

        debug!(channel = %channel.kind(), status = status.as_u16(), path = %path, "response received");

        decode_payload(status, &body).inspect_err(|err| {
            error!(channel = %channel.kind(), path = %path, error = %err.message, "response decode failed");
        })
    }

    /// Error path, response received with a non-2xx status.
    async fn on_rejected(&self, channel: &Channel, path: &str, response: Response) -> ApiError {
        let status = response.status();
        let body = response.bytes().await.unwrap_or_default();
        let data = parse_error_body(&body);
        let message = extract_message(data.as_ref())
            .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));

        let kind = channel.kind();
        match status {
            StatusCode::UNAUTHORIZED => {
                warn!(channel = %kind, status = 401, path = %path, "unauthorized, clearing session token");
                self.tokens.clear_token();
            }
            StatusCode::FORBIDDEN => {
                warn!(channel = %kind, status = 403, path = %path, "access forbidden");
            }
            StatusCode::NOT_FOUND => {
                warn!(channel = %kind, status = 404, path = %path, "resource not found");
            }
            StatusCode::INTERNAL_SERVER_ERROR => {
                error!(channel = %kind, status = 500, path = %path, "internal server error");
            }
            other => {
                warn!(channel = %kind, status = other.as_u16(), path = %path, message = %message, "request rejected");
            }
        }

        ApiError::server_rejected(status.as_u16(), message, data)
    }

    /// Error path, no response received or request never sent.
    fn on_transport_error(&self, channel: &Channel, path: &str, err: &reqwest::Error) -> ApiError {
        match conversions::classify(err) {
            TransportFailure::NoResponse => {
                error!(
                    channel = %channel.kind(),
                    path = %path,
                    timeout = err.is_timeout(),
                    error = %err,
                    "network error"
                );
            }
            TransportFailure::NotSent => {
                error!(channel = %channel.kind(), path = %path, error = %err, "request error");
            }
        }
        conversions::normalize(err)
    }
}

/// Decode a 2xx body; empty bodies and 204/205 decode from JSON `null`.
fn decode_payload<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T, ApiError> {
    if body.is_empty() || status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
        return serde_json::from_value(Value::Null).map_err(|_| {
            ApiError::unsendable(format!(
                "No content response ({}), but response type cannot be deserialized from empty body",
                status.as_u16()
            ))
        });
    }
    serde_json::from_slice(body)
        .map_err(|err| ApiError::unsendable(format!("Failed to parse response: {err}")))
}

fn parse_error_body(body: &[u8]) -> Option<Value> {
    if body.is_empty() {
        return None;
    }
    Some(
        serde_json::from_slice(body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned())),
    )
}

fn extract_message(data: Option<&Value>) -> Option<String> {
    data?
        .get("message")?
        .as_str()
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Debug, serde::Deserialize, PartialEq)]
    struct Layer {
        id: String,
    }

    #[test]
    fn test_decode_payload_unwraps_body() {
        let layer: Layer = decode_payload(StatusCode::OK, br#"{"id":"layer-42"}"#).unwrap();
        assert_eq!(layer, Layer { id: "layer-42".into() });
    }

    #[test]
    fn test_decode_payload_empty_bodies() {
        decode_payload::<()>(StatusCode::NO_CONTENT, b"").unwrap();
        let maybe: Option<Layer> = decode_payload(StatusCode::OK, b"").unwrap();
        assert!(maybe.is_none());

        let err = decode_payload::<Layer>(StatusCode::NO_CONTENT, b"").unwrap_err();
        assert_eq!(err.status, 0);
        assert!(err.message.contains("204"));
    }

    #[test]
    fn test_decode_payload_malformed_body() {
        let err = decode_payload::<Layer>(StatusCode::OK, b"<html>").unwrap_err();
        assert_eq!(err.status, 0);
        assert!(err.message.starts_with("Failed to parse response"));
    }

    #[test]
    fn test_error_body_parsing() {
        assert_eq!(parse_error_body(b""), None);
        assert_eq!(parse_error_body(br#"{"message":"nope"}"#), Some(json!({"message": "nope"})));
        assert_eq!(parse_error_body(b"Not found"), Some(json!("Not found")));
    }

    #[test]
    fn test_message_extraction() {
        assert_eq!(extract_message(Some(&json!({"message": "Layer locked"}))).as_deref(), Some("Layer locked"));
        assert_eq!(extract_message(Some(&json!({"message": ""}))), None);
        assert_eq!(extract_message(Some(&json!({"error": "x"}))), None);
        assert_eq!(extract_message(Some(&json!("plain text"))), None);
        assert_eq!(extract_message(None), None);
    }
}
