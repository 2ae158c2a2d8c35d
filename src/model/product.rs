//! The `products` resource kind.

use crate::framework::{ModelError, ResourceConfig};

/// Collection path of products.
pub const PATH: &str = "v1/products";

/// Properties a product may hold.
pub const PROPERTIES: [&str; 4] = ["id", "name", "price", "stock"];

/// Configuration of products served from `host`.
pub fn config(host: &str) -> Result<ResourceConfig, ModelError> {
    ResourceConfig::builder()
        .scheme(super::SCHEME)
        .host(host)
        .path(PATH)
        .properties(PROPERTIES)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_config_is_valid() {
        let config = config("api.local").unwrap();
        assert_eq!(config.identity, "id");
        assert_eq!(
            config.url(None).unwrap().as_str(),
            "http://api.local/v1/products"
        );
    }
}
