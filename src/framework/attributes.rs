//! # Attribute Store
//!
//! The attribute store holds an entity's data, keyed by property name and restricted to the
//! allow-list declared for its resource kind.
//!
//! Two entry points write into the store, and they are deliberately asymmetric:
//!
//! - [`AttributeStore::set`] is **strict**: an undeclared name is a programming error and fails
//!   with [`ModelError::OutOfBounds`].
//! - [`AttributeStore::hydrate`] is **permissive**: it accepts a raw payload (e.g. a server
//!   response) and silently drops every key that is not declared.
//!
//! Existence and value are orthogonal. Every declared property always has a slot; an unset
//! property holds `null` and [`AttributeStore::get`] returns it without error.

use crate::framework::error::ModelError;
use serde_json::{Map, Value};
use std::sync::Arc;

/// A raw attribute mapping as exchanged with a client.
pub type Attributes = Map<String, Value>;

/// Attribute storage restricted to a fixed set of property names.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeStore {
    properties: Arc<[String]>,
    values: Attributes,
}

impl AttributeStore {
    /// Creates a store where every declared property is `null`.
    pub fn new<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let properties: Arc<[String]> = properties.into_iter().map(Into::into).collect();
        Self::with_properties(properties)
    }

    fn with_properties(properties: Arc<[String]>) -> Self {
        let values = properties
            .iter()
            .map(|name| (name.clone(), Value::Null))
            .collect();
        Self { properties, values }
    }

    /// Creates an empty store sharing this store's allow-list.
    pub fn empty_like(&self) -> Self {
        Self::with_properties(Arc::clone(&self.properties))
    }

    /// The declared property names, in declaration order.
    pub fn properties(&self) -> &[String] {
        &self.properties
    }

    /// Returns `true` if `name` is on the allow-list.
    pub fn allows(&self, name: &str) -> bool {
        self.properties.iter().any(|p| p == name)
    }

    fn check(&self, name: &str) -> Result<(), ModelError> {
        if self.allows(name) {
            Ok(())
        } else {
            Err(ModelError::out_of_bounds(name))
        }
    }

    /// Returns the value of `name`, which is `null` when the property is unset.
    pub fn get(&self, name: &str) -> Result<&Value, ModelError> {
        self.check(name)?;
        Ok(self.values.get(name).unwrap_or(&Value::Null))
    }

    /// Stores `value` under `name`. No type checking is performed.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), ModelError> {
        self.check(name)?;
        self.values.insert(name.to_string(), value.into());
        Ok(())
    }

    /// Returns `true` only if `name` is declared and holds a non-null value.
    pub fn has(&self, name: &str) -> bool {
        self.values.get(name).is_some_and(|v| !v.is_null())
    }

    /// Resets `name` to `null`. The slot itself is kept.
    pub fn clear(&mut self, name: &str) -> Result<(), ModelError> {
        self.check(name)?;
        self.values.insert(name.to_string(), Value::Null);
        Ok(())
    }

    /// Replaces every attribute with the declared subset of `data`.
    ///
    /// Declared properties missing from `data` become `null`; undeclared keys are dropped.
    pub fn hydrate(&mut self, mut data: Attributes) {
        for name in self.properties.iter() {
            let value = data.remove(name).unwrap_or(Value::Null);
            self.values.insert(name.clone(), value);
        }
    }

    /// Iterates over `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.properties
            .iter()
            .map(|name| (name.as_str(), self.values.get(name).unwrap_or(&Value::Null)))
    }

    /// Copies the attributes into a raw mapping.
    pub fn to_map(&self) -> Attributes {
        self.iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn foo_store() -> AttributeStore {
        AttributeStore::new(["foo"])
    }

    #[test]
    fn test_get_fails_for_undeclared_property() {
        let store = foo_store();
        assert_eq!(store.get("bar"), Err(ModelError::out_of_bounds("bar")));
    }

    #[test]
    fn test_get_returns_null_for_unset_property() {
        let store = foo_store();
        assert_eq!(store.get("foo"), Ok(&Value::Null));
    }

    #[test]
    fn test_set_then_get() {
        let mut store = foo_store();
        store.set("foo", "bar").unwrap();
        assert_eq!(store.get("foo").unwrap(), &json!("bar"));

        store.set("foo", json!({"nested": [1, 2]})).unwrap();
        assert_eq!(store.get("foo").unwrap(), &json!({"nested": [1, 2]}));
    }

    #[test]
    fn test_set_fails_for_undeclared_property() {
        let mut store = foo_store();
        let result = store.set("bar", "baz");
        assert!(matches!(result, Err(ModelError::OutOfBounds { property }) if property == "bar"));
    }

    #[test]
    fn test_has_tracks_null_values() {
        let mut store = foo_store();
        assert!(!store.has("foo"));
        assert!(!store.has("bar"));

        store.set("foo", "bar").unwrap();
        assert!(store.has("foo"));

        store.set("foo", Value::Null).unwrap();
        assert!(!store.has("foo"));
    }

    #[test]
    fn test_clear() {
        let mut store = foo_store();
        store.set("foo", "bar").unwrap();
        store.clear("foo").unwrap();

        assert!(!store.has("foo"));
        assert_eq!(store.get("foo"), Ok(&Value::Null));
        assert!(matches!(
            store.clear("bar"),
            Err(ModelError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_hydrate_drops_undeclared_keys() {
        let mut store = foo_store();
        let data = json!({"foo": "bar", "baz": "qux"});
        store.hydrate(data.as_object().cloned().unwrap());

        assert_eq!(store.get("foo").unwrap(), &json!("bar"));
        assert!(!store.has("baz"));
        assert_eq!(store.to_map(), json!({"foo": "bar"}).as_object().cloned().unwrap());
    }

    #[test]
    fn test_hydrate_resets_missing_properties() {
        let mut store = AttributeStore::new(["id", "name"]);
        store.set("id", 7).unwrap();
        store.set("name", "old").unwrap();

        store.hydrate(json!({"name": "new"}).as_object().cloned().unwrap());

        assert!(!store.has("id"));
        assert_eq!(store.get("name").unwrap(), &json!("new"));
    }

    #[test]
    fn test_empty_like_shares_allow_list() {
        let mut store = AttributeStore::new(["id", "name"]);
        store.set("name", "Alice").unwrap();

        let sibling = store.empty_like();
        assert_eq!(sibling.properties(), store.properties());
        assert!(!sibling.has("name"));
    }
}
