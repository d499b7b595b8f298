//! Error conversions at the transport boundary

pub mod conversions;
