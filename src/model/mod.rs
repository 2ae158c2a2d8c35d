//! Sample resource kinds, each declared as a [`ResourceConfig`](crate::framework::ResourceConfig).

pub mod product;
pub mod user;

/// Scheme used by the sample kinds.
pub const SCHEME: &str = "http";
