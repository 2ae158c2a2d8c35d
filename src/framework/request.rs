//! # Requests & Capabilities
//!
//! A [`Request`] is the outgoing half of a client call. Instead of one request type per
//! operation, a request carries a set of [`Operation`] markers describing which CRUD calls it
//! can serve. An [`Entity`](super::Entity) checks the marker before using the request, so a
//! single client can serve several operations by swapping its current request between calls.

use crate::framework::attributes::Attributes;
use serde_json::Value;
use std::fmt;
use url::Url;

/// The CRUD operations an entity can perform through a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
    Index,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Create,
        Operation::Read,
        Operation::Update,
        Operation::Delete,
        Operation::Index,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Index => "index",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outgoing request, tagged with the operations it supports.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Request {
    capabilities: Vec<Operation>,
    data: Attributes,
    target: Option<Url>,
    id: Option<Value>,
}

impl Request {
    /// Creates a request that supports a single operation.
    pub fn new(operation: Operation) -> Self {
        Self::supporting([operation])
    }

    /// Creates a request that supports every given operation.
    pub fn supporting(operations: impl IntoIterator<Item = Operation>) -> Self {
        let mut capabilities = Vec::new();
        for op in operations {
            if !capabilities.contains(&op) {
                capabilities.push(op);
            }
        }
        Self {
            capabilities,
            ..Self::default()
        }
    }

    /// Creates a request that supports all five operations.
    pub fn any() -> Self {
        Self::supporting(Operation::ALL)
    }

    pub fn supports(&self, operation: Operation) -> bool {
        self.capabilities.contains(&operation)
    }

    pub fn capabilities(&self) -> &[Operation] {
        &self.capabilities
    }

    /// Replaces the attribute data to send.
    pub fn set_data(&mut self, data: Attributes) -> &mut Self {
        self.data = data;
        self
    }

    pub fn data(&self) -> &Attributes {
        &self.data
    }

    /// Sets the URL the request is addressed to.
    pub fn set_target(&mut self, target: Url) -> &mut Self {
        self.target = Some(target);
        self
    }

    pub fn target(&self) -> Option<&Url> {
        self.target.as_ref()
    }

    /// Binds the identity of the resource the request refers to.
    pub fn set_id(&mut self, id: Option<Value>) -> &mut Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> Option<&Value> {
        self.id.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_capabilities() {
        let request = Request::new(Operation::Create);
        assert!(request.supports(Operation::Create));
        assert!(!request.supports(Operation::Read));

        let request = Request::supporting([Operation::Update, Operation::Delete, Operation::Update]);
        assert_eq!(request.capabilities(), &[Operation::Update, Operation::Delete]);

        let request = Request::any();
        assert!(Operation::ALL.iter().all(|op| request.supports(*op)));
    }

    #[test]
    fn test_set_data_chains() {
        let mut request = Request::new(Operation::Update);
        request
            .set_data(json!({"name": "Alice"}).as_object().cloned().unwrap())
            .set_id(Some(json!(3)));

        assert_eq!(request.data().get("name"), Some(&json!("Alice")));
        assert_eq!(request.id(), Some(&json!(3)));
        assert!(request.target().is_none());
    }
}
