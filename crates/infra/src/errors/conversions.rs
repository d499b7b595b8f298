//! Conversion from transport failures into the normalized [`ApiError`].
//!
//! This is the only place a `reqwest::Error` is inspected. Everything above
//! the transport works with `ApiError` values and never re-classifies them.

use geoview_domain::ApiError;
use reqwest::Error as HttpError;

/// How a transport failure maps onto the normalized taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportFailure {
    /// The request left the process but no response came back
    NoResponse,
    /// The request was never dispatched, or its result could not be decoded
    NotSent,
}

/// Decide whether a reqwest failure happened before or after dispatch.
pub fn classify(err: &HttpError) -> TransportFailure {
    if err.is_builder() || err.is_decode() {
        return TransportFailure::NotSent;
    }
    if err.is_timeout() || err.is_request() || err.is_body() || err.is_redirect() {
        return TransportFailure::NoResponse;
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        if err.is_connect() {
            return TransportFailure::NoResponse;
        }
    }
    TransportFailure::NotSent
}

/// Normalize a reqwest failure.
pub fn normalize(err: &HttpError) -> ApiError {
    match classify(err) {
        TransportFailure::NoResponse => ApiError::unreachable(),
        TransportFailure::NotSent => ApiError::unsendable(err.to_string()),
    }
}
