//! # Responses
//!
//! A [`Response`] is the incoming half of a client call. It is a closed sum type with one
//! variant per operation; each variant exposes only the payload that operation yields:
//!
//! | Variant | Payload |
//! |---------|---------|
//! | `Create` | the new identity ([`CreateResponse::id`]) |
//! | `Read` | the resource's attributes ([`ReadResponse::attributes`]) |
//! | `Update` / `Delete` | nothing beyond the success already signalled by `execute` |
//! | `Index` | one attribute set per resource ([`IndexResponse::entities`]) |
//!
//! Every variant also keeps the raw payload it was decoded from ([`Response::data`]).

use crate::framework::attributes::Attributes;
use crate::framework::request::Operation;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateResponse {
    pub id: Value,
    pub data: Attributes,
}

impl CreateResponse {
    pub fn id(&self) -> &Value {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReadResponse {
    pub attributes: Attributes,
    pub data: Attributes,
}

impl ReadResponse {
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct IndexResponse {
    pub entities: Vec<Attributes>,
    pub data: Attributes,
}

impl IndexResponse {
    pub fn entities(&self) -> &[Attributes] {
        &self.entities
    }
}

/// Update and Delete responses carry no payload of their own.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatusResponse {
    pub data: Attributes,
}

/// The response currently held by a client.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Create(CreateResponse),
    Read(ReadResponse),
    Update(StatusResponse),
    Delete(StatusResponse),
    Index(IndexResponse),
}

impl Response {
    /// An empty response of the given kind, ready to be filled by `execute`.
    pub fn empty(operation: Operation) -> Self {
        match operation {
            Operation::Create => Response::Create(CreateResponse::default()),
            Operation::Read => Response::Read(ReadResponse::default()),
            Operation::Update => Response::Update(StatusResponse::default()),
            Operation::Delete => Response::Delete(StatusResponse::default()),
            Operation::Index => Response::Index(IndexResponse::default()),
        }
    }

    pub fn created(id: impl Into<Value>) -> Self {
        Response::Create(CreateResponse {
            id: id.into(),
            data: Attributes::new(),
        })
    }

    pub fn read(attributes: Attributes) -> Self {
        Response::Read(ReadResponse {
            data: attributes.clone(),
            attributes,
        })
    }

    pub fn updated() -> Self {
        Response::Update(StatusResponse::default())
    }

    pub fn deleted() -> Self {
        Response::Delete(StatusResponse::default())
    }

    pub fn index(entities: Vec<Attributes>) -> Self {
        Response::Index(IndexResponse {
            entities,
            data: Attributes::new(),
        })
    }

    /// Which operation this response serves.
    pub fn operation(&self) -> Operation {
        match self {
            Response::Create(_) => Operation::Create,
            Response::Read(_) => Operation::Read,
            Response::Update(_) => Operation::Update,
            Response::Delete(_) => Operation::Delete,
            Response::Index(_) => Operation::Index,
        }
    }

    pub fn supports(&self, operation: Operation) -> bool {
        self.operation() == operation
    }

    /// The raw payload the response was built from.
    pub fn data(&self) -> &Attributes {
        match self {
            Response::Create(r) => &r.data,
            Response::Read(r) => &r.data,
            Response::Update(r) | Response::Delete(r) => &r.data,
            Response::Index(r) => &r.data,
        }
    }

    /// Replaces the raw payload, keeping the variant.
    pub fn with_data(mut self, raw: Attributes) -> Self {
        match &mut self {
            Response::Create(r) => r.data = raw,
            Response::Read(r) => r.data = raw,
            Response::Update(r) | Response::Delete(r) => r.data = raw,
            Response::Index(r) => r.data = raw,
        }
        self
    }

    pub fn as_create(&self) -> Option<&CreateResponse> {
        match self {
            Response::Create(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_read(&self) -> Option<&ReadResponse> {
        match self {
            Response::Read(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_index(&self) -> Option<&IndexResponse> {
        match self {
            Response::Index(r) => Some(r),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_variant_accessors() {
        let created = Response::created(42);
        assert_eq!(created.operation(), Operation::Create);
        assert_eq!(created.as_create().map(|r| r.id()), Some(&json!(42)));
        assert!(created.as_read().is_none());

        let attrs = json!({"id": 1, "name": "Alice"}).as_object().cloned().unwrap();
        let read = Response::read(attrs.clone());
        assert_eq!(read.as_read().unwrap().attributes(), &attrs);
        assert_eq!(read.data(), &attrs);

        let index = Response::index(vec![attrs.clone(), attrs]);
        assert_eq!(index.as_index().unwrap().entities().len(), 2);
    }

    #[test]
    fn test_empty_matches_operation() {
        for op in Operation::ALL {
            let response = Response::empty(op);
            assert!(response.supports(op));
            assert!(response.data().is_empty());
        }
        assert!(!Response::deleted().supports(Operation::Update));
    }

    #[test]
    fn test_with_data_keeps_variant() {
        let raw = json!({"status": 204}).as_object().cloned().unwrap();
        let response = Response::updated().with_data(raw.clone());
        assert_eq!(response.operation(), Operation::Update);
        assert_eq!(response.data(), &raw);
    }
}
