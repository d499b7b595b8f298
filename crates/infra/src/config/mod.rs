//! Configuration loading
//!
//! Resolves channel endpoints from environment variables and loads full
//! client configuration from files.

pub mod loader;

// Re-export commonly used items
pub use loader::{load, load_from_file, resolve_endpoints, resolve_endpoints_with};
