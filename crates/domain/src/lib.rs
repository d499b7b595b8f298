//! # GeoView Domain
//!
//! Domain types shared by the GeoView HTTP client layer.
//!
//! This crate contains:
//! - The normalized [`ApiError`] every failed call resolves to
//! - Channel identities and endpoint configuration
//! - Request/response payloads for the auth, user, and GIS endpoints
//! - Domain constants (timeouts, fixed messages)
//!
//! ## Architecture
//! - No dependencies on other GeoView crates
//! - No I/O; environment and network access live in `geoview-infra`

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use constants::*;
pub use errors::*;
pub use types::*;
