//! # Framework Errors
//!
//! This module defines the error types shared by every entity and client.
//! By centralizing error definitions, callers can match on one taxonomy no matter
//! which resource kind or transport they use.
//!
//! | Variant | Raised by | Meaning |
//! |---------|-----------|---------|
//! | [`ModelError::OutOfBounds`] | attribute store | Property is not on the allow-list |
//! | [`ModelError::Configuration`] | [`ResourceConfig`](super::ResourceConfig) | Resource kind is missing scheme, host, path or properties |
//! | [`ModelError::State`] | [`Entity`](super::Entity) | CRUD call made in the wrong lifecycle state |
//! | [`ModelError::Contract`] | [`Entity`](super::Entity) | Client holds a request/response of the wrong operation |
//! | [`ModelError::Remote`] | [`ApiClient::execute`](super::ApiClient::execute) | Transport or server failure, passed through untouched |
//!
//! None of these are retried by the framework. Retry policy, if any, belongs to the client.

use crate::framework::request::Operation;

/// Errors raised by the transport behind an [`ApiClient`](super::ApiClient).
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum RemoteError {
    #[error("Remote closed")]
    Closed,
    #[error("Remote dropped response channel")]
    Dropped,
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Request rejected: {0}")]
    Rejected(String),
    #[error("Malformed response: {0}")]
    Decode(String),
}

/// Errors that can occur while working with an [`Entity`](super::Entity).
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ModelError {
    /// The property name is not declared for this resource kind.
    #[error("Property '{property}' does not exist")]
    OutOfBounds { property: String },

    /// The resource kind is missing required static configuration.
    #[error("Invalid resource configuration: {0}")]
    Configuration(String),

    /// The CRUD method was called in a state that violates its precondition.
    #[error("Invalid entity state: {0}")]
    State(String),

    /// The client's current request or response does not support the operation.
    #[error("Client {slot} does not support {expected}")]
    Contract {
        slot: &'static str,
        expected: Operation,
    },

    /// The remote call failed.
    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),
}

impl ModelError {
    pub(crate) fn out_of_bounds(property: impl Into<String>) -> Self {
        ModelError::OutOfBounds {
            property: property.into(),
        }
    }
}
