//! The `users` resource kind.

use crate::framework::{ModelError, ResourceConfig};

/// Collection path of users.
pub const PATH: &str = "users";

/// Properties a user may hold.
pub const PROPERTIES: [&str; 3] = ["id", "name", "email"];

/// Configuration of users served from `host`.
pub fn config(host: &str) -> Result<ResourceConfig, ModelError> {
    ResourceConfig::builder()
        .scheme(super::SCHEME)
        .host(host)
        .path(PATH)
        .properties(PROPERTIES)
        .build()
}
