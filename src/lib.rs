#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Active Resource Recipe
//!
//! > **A Recipe for Active-Resource Entities in Rust.**
//!
//! This crate demonstrates a pattern for mapping in-memory attribute sets onto remote
//! CRUD calls (create, read, update, delete, index) through a pluggable API client.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Why separate the Entity from the Client?
//!
//! - **Entity**: Attribute bookkeeping and a small lifecycle state machine. It knows *what* to
//!   send and *when* a call is legal, never *how* to reach the server.
//! - **Client**: Request construction, execution and response parsing. It knows nothing about
//!   attribute allow-lists or lifecycle.
//!
//! This combination provides:
//! - **Swappable Transports**: Mocks in unit tests, an in-memory store in integration tests.
//! - **Early Failure**: Wrong state and wrong client setup are caught before any remote call.
//! - **Type Safety**: Capabilities are a closed [`Operation`](framework::Operation) enum and
//!   responses a closed [`Response`](framework::Response) sum type.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Strict vs Permissive Attribute Writes
//! [`set`](framework::Entity::set) rejects undeclared properties with
//! [`ModelError::OutOfBounds`](framework::ModelError::OutOfBounds), while
//! [`hydrate`](framework::Entity::hydrate) silently drops them so raw payloads can be fed in.
//!
//! ### 2. Capability Checks
//! An entity inspects the *kind* of the client's current request and response before using
//! them. One client can serve every operation by swapping its pair between calls
//! ([`ApiClient::prepare`](framework::ApiClient::prepare)).
//!
//! ### 3. Shared Clients
//! Entities produced by [`index`](framework::Entity::index) share their parent's client
//! handle (`Arc<Mutex<_>>`), not a copy.
//!
//! ### 4. Observability
//! We use `tracing` everywhere with structured logging. See the [`lifecycle::tracing`] module.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! - **Role**: Entity, attribute store, configuration, client contract, errors.
//! - **Key items**: [`Entity`](framework::Entity), [`ApiClient`](framework::ApiClient).
//!
//! ### 2. The Remote ([`server`])
//! - **Role**: An in-memory resource store running as a Tokio actor.
//!
//! ### 3. The Transport ([`clients`])
//! - **Role**: [`MemoryClient`](clients::MemoryClient), a blocking client for the store.
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! - **Role**: Owns the runtime and store, hands out clients, shuts down cleanly.
//! - **Key items**: [`ResourceSystem`](lifecycle::ResourceSystem).
//!
//! ### 5. The Resource Kinds ([`model`])
//! - **Role**: Sample `users` and `products` configurations.
//!
//! ## 🚀 Quick Start
//!
//! ### Running the Demo
//!
//! ```bash
//! # Run with info logs
//! RUST_LOG=info cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod clients;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod server;
