//! Generic active-resource framework.
//!
//! This module provides the building blocks for mapping in-memory attribute sets onto
//! CRUD calls performed through a pluggable API client.
//!
//! # Main Components
//!
//! - [`Entity`] - Attribute store plus the create/read/update/delete/index state machine
//! - [`AttributeStore`] - Allow-listed attribute storage
//! - [`ResourceConfig`] - Static description of one resource kind
//! - [`ApiClient`] - The transport contract (one current [`Request`], one current [`Response`])
//! - [`ModelError`] - Common error taxonomy
//!
//! # Testing
//!
//! See [`mock`] module for a client that answers from queued expectations.

pub mod attributes;
pub mod client;
pub mod config;
pub mod entity;
pub mod error;
pub mod mock;
pub mod request;
pub mod response;

// Re-export core types for convenience
pub use attributes::{AttributeStore, Attributes};
pub use client::{ApiClient, SharedClient};
pub use config::{ResourceConfig, ResourceConfigBuilder, DEFAULT_IDENTITY};
pub use entity::Entity;
pub use error::{ModelError, RemoteError};
pub use request::{Operation, Request};
pub use response::{CreateResponse, IndexResponse, ReadResponse, Response, StatusResponse};
