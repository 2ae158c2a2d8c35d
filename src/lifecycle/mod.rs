//! # System Lifecycle & Orchestration
//!
//! This module manages the runtime around the synchronous entity layer: the Tokio runtime
//! hosting the in-memory store, the clients handed to entities, and logging setup.
//!
//! **Key Responsibilities:**
//! 1. **Runtime Creation** - Build a multi-threaded Tokio runtime owned by the system
//! 2. **Store Startup** - Spawn the [`ResourceStore`](crate::server::ResourceStore) actor
//! 3. **Client Wiring** - Hand out [`MemoryClient`](crate::clients::MemoryClient)s on demand
//! 4. **Graceful Shutdown** - Signal the store, wait for it, then drop the runtime
//! 5. **Observability Setup** - Initialize tracing and logging infrastructure
//!
//! ## Why a Dedicated Runtime?
//!
//! Entities block on every call, so they must run on a thread that is *not* driving Tokio.
//! [`ResourceSystem`] keeps the store on its own worker threads; the caller's thread stays
//! free to block.

pub mod resource_system;
pub mod tracing;

pub use resource_system::*;
pub use tracing::*;
