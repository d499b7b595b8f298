//! Domain constants
//!
//! Centralized location for the client layer's fixed values.

// Channel timeouts
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;
pub const UPLOAD_TIMEOUT_MS: u64 = 60_000;

// Request phase
pub const CACHE_BUSTER_PARAM: &str = "_t";
pub const BEARER_PREFIX: &str = "Bearer ";

// Upload
pub const UPLOAD_FIELD_NAME: &str = "file";
pub const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

// Normalized error messages
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

// Endpoint fallbacks
pub const MAIN_API_FALLBACK_URL: &str = "https://api.example.com";
pub const AUTH_API_FALLBACK_URL: &str = "https://auth.example.com";
pub const GIS_API_FALLBACK_URL: &str = "https://gis.example.com";
pub const UPLOAD_API_FALLBACK_URL: &str = "https://upload.example.com";
