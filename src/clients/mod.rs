//! Concrete [`ApiClient`](crate::framework::ApiClient) transports.

pub mod memory;

pub use memory::*;
