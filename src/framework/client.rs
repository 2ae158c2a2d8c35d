//! # ApiClient Trait
//!
//! The contract every transport implements so entities can talk to a remote resource.
//!
//! A client holds exactly **one** current [`Request`] and **one** current [`Response`].
//! Entities never build network calls themselves; they fill the request, call
//! [`ApiClient::execute`], and read the response. Swapping the request/response pair between
//! calls is how one client serves create, read, update, delete and index.
//!
//! # Sharing
//!
//! Entities hold their client through a [`SharedClient`] (`Arc<Mutex<C>>`). Entities returned by
//! [`Entity::index`](super::Entity::index) all point at the *same* client, not at clones.
//! An entity locks the client for the whole prepare → execute → read sequence of one
//! operation, so siblings never interleave inside a single call. Code that swaps the
//! request/response pair itself must hold the lock across the swap and the entity call.

use crate::framework::error::RemoteError;
use crate::framework::request::{Operation, Request};
use crate::framework::response::Response;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A client that performs one request/response exchange at a time.
pub trait ApiClient: Send {
    fn request(&self) -> &Request;

    fn request_mut(&mut self) -> &mut Request;

    fn set_request(&mut self, request: Request);

    fn response(&self) -> &Response;

    fn set_response(&mut self, response: Response);

    /// Performs the call described by the current request and fills the current response.
    fn execute(&mut self) -> Result<(), RemoteError>;

    /// Attaches a fresh request/response pair for `operation`.
    fn prepare(&mut self, operation: Operation) {
        self.set_request(Request::new(operation));
        self.set_response(Response::empty(operation));
    }
}

/// A client handle shared between an entity and its index siblings.
pub type SharedClient<C> = Arc<Mutex<C>>;

/// Wraps a client into a [`SharedClient`].
pub fn shared<C: ApiClient>(client: C) -> SharedClient<C> {
    Arc::new(Mutex::new(client))
}

/// Locks a shared client.
///
/// A panic in another holder leaves only plain request/response data behind, so a poisoned
/// lock is recovered rather than reported.
pub fn lock<C: ApiClient>(client: &SharedClient<C>) -> MutexGuard<'_, C> {
    client.lock().unwrap_or_else(PoisonError::into_inner)
}
