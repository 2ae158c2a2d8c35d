//! # Observability & Tracing
//!
//! This module provides the tracing infrastructure for the demo and any application built on
//! the framework.
//!
//! ## Overview
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//! Every CRUD call on an [`Entity`](crate::framework::Entity) opens a span named after the
//! operation, carrying the resource path, so transport and store events nest under it.
//!
//! ## Configuration
//!
//! The compact format hides the crate/module prefix (`with_target(false)`) and the level is
//! read from the `RUST_LOG` environment variable.
//!
//! ```bash
//! # Store events only
//! RUST_LOG=info cargo run
//!
//! # Entity and client request traces as well
//! RUST_LOG=debug cargo run
//!
//! # Filter to the entity layer
//! RUST_LOG=resource_recipe::framework=debug cargo run
//! ```
//!
//! ## Workflow Trace Example
//!
//! **With `RUST_LOG=debug`**:
//!
//! ```text
//! DEBUG create: Executing create resource="users"
//! DEBUG create:execute: Sending request resource="users" id=None operation=create
//! INFO  Created resource="users" id=1 size=1
//! DEBUG create: Created resource="users" id=1
//! ```
//!
//! Errors are never logged by the entity layer; they are returned to the caller, who decides
//! whether they are worth a log line.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Module paths are noise; spans carry the resource instead
        .compact()
        .init();
}
