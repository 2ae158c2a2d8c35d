//! # Resource Configuration
//!
//! Every resource kind (users, products, ...) is described once by a [`ResourceConfig`]:
//! where it lives (`scheme://host/path`) and which properties it may hold. Entities receive
//! the configuration at construction time, so there is no per-type static state.
//!
//! A configuration can be assembled in code with [`ResourceConfig::builder`] or loaded from
//! JSON with [`ResourceConfig::from_json`]. Either way it must pass [`ResourceConfig::validate`]
//! before an [`Entity`](super::Entity) accepts it.
//!
//! ```rust
//! use resource_recipe::framework::ResourceConfig;
//!
//! let config = ResourceConfig::builder()
//!     .scheme("https")
//!     .host("api.example.com")
//!     .path("users")
//!     .properties(["id", "name"])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.url(None).unwrap().as_str(), "https://api.example.com/users");
//! assert_eq!(
//!     config.url(Some(&42.into())).unwrap().as_str(),
//!     "https://api.example.com/users/42"
//! );
//! ```

use crate::framework::error::ModelError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// Name of the identity property unless a configuration says otherwise.
pub const DEFAULT_IDENTITY: &str = "id";

fn default_identity() -> String {
    DEFAULT_IDENTITY.to_string()
}

/// Static configuration of one resource kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceConfig {
    pub scheme: String,
    pub host: String,
    pub path: String,
    /// The allow-list of attribute names. Must include [`ResourceConfig::identity`].
    pub properties: Vec<String>,
    #[serde(default = "default_identity")]
    pub identity: String,
}

impl ResourceConfig {
    pub fn builder() -> ResourceConfigBuilder {
        ResourceConfigBuilder::default()
    }

    /// Parses and validates a configuration from JSON.
    pub fn from_json(raw: &str) -> Result<Self, ModelError> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|e| ModelError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every required field is present and usable.
    pub fn validate(&self) -> Result<(), ModelError> {
        let missing = [
            ("scheme", &self.scheme),
            ("host", &self.host),
            ("path", &self.path),
            ("identity", &self.identity),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().trim_matches('/').is_empty());
        if let Some((field, _)) = missing {
            return Err(ModelError::Configuration(format!("missing {field}")));
        }
        if self.properties.is_empty() {
            return Err(ModelError::Configuration("missing properties".into()));
        }
        if !self.properties.contains(&self.identity) {
            return Err(ModelError::Configuration(format!(
                "properties must include identity '{}'",
                self.identity
            )));
        }
        self.base_url().map(|_| ())
    }

    fn base_url(&self) -> Result<Url, ModelError> {
        let raw = format!("{}://{}/", self.scheme, self.host);
        let mut url = Url::parse(&raw).map_err(|e| ModelError::Configuration(e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(ModelError::Configuration(format!("'{raw}' is not a base url")));
        }
        url.set_path(self.path.trim_matches('/'));
        Ok(url)
    }

    /// Builds `scheme://host/path`, appending `id` as the last segment when given.
    pub fn url(&self, id: Option<&Value>) -> Result<Url, ModelError> {
        let mut url = self.base_url()?;
        if let Some(id) = id {
            let segment = match id {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            url.path_segments_mut()
                .map_err(|_| ModelError::Configuration("url cannot take an id segment".into()))?
                .push(&segment);
        }
        Ok(url)
    }
}

/// Fluent builder for [`ResourceConfig`].
#[derive(Debug, Default)]
pub struct ResourceConfigBuilder {
    scheme: Option<String>,
    host: Option<String>,
    path: Option<String>,
    properties: Vec<String>,
    identity: Option<String>,
}

impl ResourceConfigBuilder {
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn properties<I, S>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.properties = properties.into_iter().map(Into::into).collect();
        self
    }

    /// Overrides the identity property (defaults to `"id"`).
    pub fn identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    pub fn build(self) -> Result<ResourceConfig, ModelError> {
        let config = ResourceConfig {
            scheme: self.scheme.unwrap_or_default(),
            host: self.host.unwrap_or_default(),
            path: self.path.unwrap_or_default(),
            properties: self.properties,
            identity: self.identity.unwrap_or_else(default_identity),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn builder() -> ResourceConfigBuilder {
        ResourceConfig::builder()
            .scheme("http")
            .host("localhost:8080")
            .path("/v1/users/")
            .properties(["id", "name"])
    }

    #[test]
    fn test_build_valid_config() {
        let config = builder().build().unwrap();
        assert_eq!(config.identity, "id");
        assert_eq!(config.url(None).unwrap().as_str(), "http://localhost:8080/v1/users");
    }

    #[test]
    fn test_url_appends_id_only_when_given() {
        let config = builder().build().unwrap();
        assert_eq!(
            config.url(Some(&json!(42))).unwrap().as_str(),
            "http://localhost:8080/v1/users/42"
        );
        assert_eq!(
            config.url(Some(&json!("user 1"))).unwrap().as_str(),
            "http://localhost:8080/v1/users/user%201"
        );
    }

    #[test]
    fn test_missing_fields_are_configuration_errors() {
        let cases = [
            ResourceConfig::builder()
                .host("h")
                .path("p")
                .properties(["id"])
                .build(),
            ResourceConfig::builder()
                .scheme("http")
                .path("p")
                .properties(["id"])
                .build(),
            ResourceConfig::builder()
                .scheme("http")
                .host("h")
                .properties(["id"])
                .build(),
            ResourceConfig::builder().scheme("http").host("h").path("p").build(),
        ];
        for result in cases {
            assert!(matches!(result, Err(ModelError::Configuration(_))));
        }
    }

    #[test]
    fn test_slash_only_path_is_missing() {
        for path in ["/", "//", " / "] {
            let result = builder().path(path).build();
            assert_eq!(result, Err(ModelError::Configuration("missing path".into())));
        }
    }

    #[test]
    fn test_properties_must_include_identity() {
        let result = builder().properties(["name"]).build();
        assert!(matches!(result, Err(ModelError::Configuration(msg)) if msg.contains("identity")));

        let custom = builder().properties(["uuid", "name"]).identity("uuid").build();
        assert!(custom.is_ok());
    }

    #[test]
    fn test_from_json() {
        let config = ResourceConfig::from_json(
            r#"{"scheme": "https", "host": "api.example.com", "path": "products", "properties": ["id", "stock"]}"#,
        )
        .unwrap();
        assert_eq!(config.properties, vec!["id", "stock"]);
        assert_eq!(config.identity, DEFAULT_IDENTITY);

        let broken = ResourceConfig::from_json(r#"{"scheme": "https"}"#);
        assert!(matches!(broken, Err(ModelError::Configuration(_))));
    }
}
