//! Request and response payloads for the remote endpoints

pub mod auth;
pub mod gis;
pub mod user;

pub use auth::{LoginRequest, LoginResponse, TokenResponse};
pub use gis::{
    Feature, FeatureCollection, Layer, LayerUpdate, Location, MapBounds, NewLayer,
};
pub use user::{Pagination, User, UserPage, UserUpdate};
