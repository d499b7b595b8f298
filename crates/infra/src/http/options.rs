//! Per-request overrides and request bodies

use std::time::Duration;

use geoview_domain::{ApiError, CACHE_BUSTER_PARAM};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::Form;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

/// Optional query, header, and timeout overrides for a single call.
///
/// Invalid values are not rejected here; the first one recorded is surfaced
/// as an unsendable error when the request is built.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    query: Vec<(String, String)>,
    headers: HeaderMap,
    timeout: Option<Duration>,
    invalid: Option<String>,
}

impl RequestOptions {
    /// No overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge query parameters from a serializable value.
    ///
    /// Accepts a flat object (keys sorted), `None`/unit for no parameters,
    /// or a list of `(key, value)` pairs. Array values repeat the key.
    pub fn query<Q: Serialize + ?Sized>(mut self, query: &Q) -> Self {
        match query_pairs(query) {
            Ok(pairs) => self.query.extend(pairs),
            Err(message) => self.record_invalid(message),
        }
        self
    }

    /// Append one query parameter.
    pub fn query_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Set a header for this call; the stored bearer token still wins for
    /// `Authorization`.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        match (HeaderName::try_from(name), HeaderValue::try_from(value)) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            (Err(err), _) => self.record_invalid(format!("invalid header name '{name}': {err}")),
            (_, Err(err)) => self.record_invalid(format!("invalid value for header '{name}': {err}")),
        }
        self
    }

    /// Override the channel timeout for this call only.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub(crate) fn timeout_override(&self) -> Option<Duration> {
        self.timeout
    }

    /// Validated headers and query pairs, with the cache buster appended.
    pub(crate) fn into_parts(
        self,
        now_millis: i64,
    ) -> Result<(HeaderMap, Vec<(String, String)>), ApiError> {
        if let Some(message) = self.invalid {
            return Err(ApiError::unsendable(message));
        }
        Ok((self.headers, with_cache_buster(self.query, now_millis)))
    }

    fn record_invalid(&mut self, message: String) {
        self.invalid.get_or_insert(message);
    }
}

/// Replace any caller-supplied cache buster and append a fresh one.
pub(crate) fn with_cache_buster(
    mut query: Vec<(String, String)>,
    now_millis: i64,
) -> Vec<(String, String)> {
    query.retain(|(key, _)| key != CACHE_BUSTER_PARAM);
    query.push((CACHE_BUSTER_PARAM.to_string(), now_millis.to_string()));
    query
}

/// Drop cache busters already written into a URL's query string.
pub(crate) fn strip_cache_buster(url: &str) -> String {
    let (rest, fragment) = url.split_once('#').map_or((url, None), |(rest, f)| (rest, Some(f)));
    let Some((base, query)) = rest.split_once('?') else {
        return url.to_string();
    };

    let kept: Vec<&str> = query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| pair.split('=').next() != Some(CACHE_BUSTER_PARAM))
        .collect();

    let mut stripped = base.to_string();
    if !kept.is_empty() {
        stripped.push('?');
        stripped.push_str(&kept.join("&"));
    }
    if let Some(fragment) = fragment {
        stripped.push('#');
        stripped.push_str(fragment);
    }
    stripped
}

fn query_pairs<Q: Serialize + ?Sized>(query: &Q) -> Result<Vec<(String, String)>, String> {
    let value = serde_json::to_value(query)
        .map_err(|err| format!("failed to serialize query parameters: {err}"))?;

    let mut pairs = Vec::new();
    match value {
        Value::Null => {}
        Value::Object(map) => {
            for (key, value) in map {
                push_query_value(&mut pairs, &key, value)?;
            }
        }
        Value::Array(items) => {
            for item in items {
                match item {
                    Value::Array(pair) if pair.len() == 2 => {
                        let key = match &pair[0] {
                            Value::String(key) => key.clone(),
                            other => other.to_string(),
                        };
                        push_query_value(&mut pairs, &key, pair[1].clone())?;
                    }
                    other => return Err(format!("query pair must be [key, value], got {other}")),
                }
            }
        }
        other => return Err(format!("query parameters must serialize to an object, got {other}")),
    }
    Ok(pairs)
}

fn push_query_value(
    pairs: &mut Vec<(String, String)>,
    key: &str,
    value: Value,
) -> Result<(), String> {
    match value {
        Value::Null => Ok(()),
        Value::String(s) => {
            pairs.push((key.to_string(), s));
            Ok(())
        }
        Value::Bool(_) | Value::Number(_) => {
            pairs.push((key.to_string(), value.to_string()));
            Ok(())
        }
        Value::Array(items) => {
            for item in items {
                if matches!(item, Value::Array(_) | Value::Object(_)) {
                    return Err(format!("nested query parameter '{key}' is not supported"));
                }
                push_query_value(pairs, key, item)?;
            }
            Ok(())
        }
        Value::Object(_) => Err(format!("nested query parameter '{key}' is not supported")),
    }
}

/// Body of an outgoing request
pub enum RequestBody {
    /// No body
    Empty,
    /// JSON body sent with the channel's `application/json` content type
    Json(Value),
    /// Multipart body; the form sets its own boundary content type
    Multipart(Form),
    /// The body could not be encoded; reported when the request is built
    Invalid(String),
}

impl RequestBody {
    /// Serialize `body` to JSON, recording a failure instead of returning it.
    pub fn json<T: Serialize + ?Sized>(body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => Self::Json(value),
            Err(err) => Self::Invalid(format!("failed to serialize request body: {err}")),
        }
    }

    pub(crate) const fn is_multipart(&self) -> bool {
        matches!(self, Self::Multipart(_))
    }
}

/// A call as issued by the façade, before the request phase runs
pub struct RequestDraft {
    /// HTTP method
    pub method: Method,
    /// Relative path or absolute URL
    pub path: String,
    /// Request body
    pub body: RequestBody,
    /// Per-call overrides
    pub options: RequestOptions,
}

impl RequestDraft {
    /// Bundle a call for [`Interceptors::dispatch`](super::Interceptors::dispatch).
    pub fn new(
        method: Method,
        path: impl Into<String>,
        body: RequestBody,
        options: RequestOptions,
    ) -> Self {
        Self { method, path: path.into(), body, options }
    }
}
