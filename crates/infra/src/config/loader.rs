//! Configuration loader
//!
//! ## Environment Variables
//! One optional override per channel; unset or empty values fall back to the
//! documented default host.
//! - `GEOVIEW_API_BASE_URL`: main channel (`https://api.example.com`)
//! - `GEOVIEW_AUTH_API_URL`: auth channel (`https://auth.example.com`)
//! - `GEOVIEW_GIS_API_URL`: GIS channel (`https://gis.example.com`)
//! - `GEOVIEW_UPLOAD_API_URL`: upload channel (`https://upload.example.com`)
//!
//! ## Files
//! [`load_from_file`] reads a full [`ClientConfig`] from `.json` or `.toml`.
//! Missing keys take their defaults.

use std::path::Path;

use geoview_domain::{ChannelKind, ClientConfig, ConfigError, EndpointConfig};

/// Resolve endpoints from the process environment.
pub fn resolve_endpoints() -> EndpointConfig {
    resolve_endpoints_with(|name| std::env::var(name).ok())
}

/// Resolve endpoints through an arbitrary variable lookup.
pub fn resolve_endpoints_with<F>(lookup: F) -> EndpointConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut endpoints = EndpointConfig::default();
    for kind in ChannelKind::ALL {
        let value = lookup(kind.env_var()).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        match value {
            Some(url) => {
                tracing::debug!(channel = %kind, url = %url, "endpoint override applied");
                endpoints.set(kind, url);
            }
            None => {
                tracing::debug!(channel = %kind, url = kind.fallback_url(), "using fallback endpoint");
            }
        }
    }
    endpoints
}

/// Default configuration with endpoints resolved from the environment.
pub fn load() -> ClientConfig {
    let config = ClientConfig::with_endpoints(resolve_endpoints());
    tracing::info!("Configuration loaded from environment variables");
    config
}

/// Load configuration from a `.json` or `.toml` file.
///
/// # Errors
/// Returns [`ConfigError`] if the file is missing, unreadable, malformed, or
/// has an unsupported extension.
pub fn load_from_file(path: impl AsRef<Path>) -> Result<ClientConfig, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }

    tracing::info!(path = %path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

    parse_config(&contents, path)
}

/// Parse configuration, detecting the format from the file extension.
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig, ConfigError> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ConfigError::Parse { format: "TOML", message: e.to_string() }),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ConfigError::Parse { format: "JSON", message: e.to_string() }),
        _ => Err(ConfigError::UnsupportedFormat(extension.to_string())),
    }
}
