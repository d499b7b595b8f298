//! # GeoView Infrastructure
//!
//! HTTP client layer for the GeoView map front-end.
//!
//! This crate contains:
//! - Endpoint resolution from environment and config files
//! - Four independently configured request channels
//! - The shared bearer-token store and interception pipeline
//! - The typed request façade and upload helper
//! - Auth, user, GIS, and upload endpoint APIs
//!
//! ## Architecture
//! - Depends on `geoview-domain` for the normalized error and payload types
//! - Contains all I/O (network, environment, files)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;

// Re-export commonly used items
pub use api::*;
pub use http::*;
