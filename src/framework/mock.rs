//! # Mock Client & Testing Guide
//!
//! [`MockClient`] hands out [`MockApiClient`]s that implement [`ApiClient`] entirely in memory.
//! You queue the responses the "remote" should produce, run entity code against the client,
//! then inspect what was actually sent.
//!
//! ## When to use Mocks vs the In-Memory Store
//!
//! | Feature | MockClient | [`ResourceSystem`](crate::lifecycle::ResourceSystem) |
//! |---------|------------|------------|
//! | **Speed** | Instant, no runtime | Spawns a tokio runtime |
//! | **Determinism** | 100% deterministic | Real sequential id allocation |
//! | **State** | No real state (expectations) | Real stored resources |
//! | **Use Case** | Entity state machine and contract checks | End-to-end flows |
//! | **Error Injection** | Easy (`return_err`) | Only what the store can produce |
//!
//! ## Example
//!
//! ```rust
//! use resource_recipe::framework::mock::MockClient;
//! use resource_recipe::framework::{client, Entity, ModelError, Operation, RemoteError, ResourceConfig};
//!
//! let config = ResourceConfig::builder()
//!     .scheme("https")
//!     .host("api.example.com")
//!     .path("users")
//!     .properties(["id", "name"])
//!     .build()
//!     .unwrap();
//!
//! let mock = MockClient::new();
//! mock.expect_create().return_err(RemoteError::Closed);
//!
//! let client = client::shared(mock.client_for(Operation::Create));
//! let mut user = Entity::new(config, client).unwrap();
//!
//! // Simulate a downstream failure and verify the entity is untouched
//! assert_eq!(user.create(), Err(ModelError::Remote(RemoteError::Closed)));
//! assert!(!user.is_persisted());
//! assert_eq!(mock.execute_count(), 1);
//! ```

use crate::framework::attributes::Attributes;
use crate::framework::client::ApiClient;
use crate::framework::error::RemoteError;
use crate::framework::request::{Operation, Request};
use crate::framework::response::Response;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected `execute` call and the outcome to produce.
struct Expectation {
    operation: Operation,
    response: Result<Response, RemoteError>,
}

#[derive(Default)]
struct MockState {
    expectations: VecDeque<Expectation>,
    executed: Vec<Request>,
}

type SharedState = Arc<Mutex<MockState>>;

fn lock_state(state: &SharedState) -> MutexGuard<'_, MockState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn push(state: &SharedState, operation: Operation, response: Result<Response, RemoteError>) {
    lock_state(state).expectations.push_back(Expectation {
        operation,
        response,
    });
}

/// A mock remote with expectation tracking for fluent testing.
///
/// # Example
/// ```ignore
/// let mock = MockClient::new();
/// mock.expect_create().return_ok(42);
/// mock.expect_delete().return_ok();
///
/// let client = client::shared(mock.client());
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
#[derive(Clone, Default)]
pub struct MockClient {
    state: SharedState,
}

impl MockClient {
    /// Creates a new mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a client with no capabilities attached yet.
    pub fn client(&self) -> MockApiClient {
        MockApiClient {
            state: Arc::clone(&self.state),
            request: Request::default(),
            response: Response::empty(Operation::Read),
        }
    }

    /// Returns a client already prepared for `operation`.
    pub fn client_for(&self, operation: Operation) -> MockApiClient {
        let mut client = self.client();
        client.prepare(operation);
        client
    }

    /// Expects a `create` call.
    pub fn expect_create(&self) -> CreateExpectationBuilder {
        CreateExpectationBuilder {
            state: Arc::clone(&self.state),
        }
    }

    /// Expects a `read` call.
    pub fn expect_read(&self) -> ReadExpectationBuilder {
        ReadExpectationBuilder {
            state: Arc::clone(&self.state),
        }
    }

    /// Expects an `update` call.
    pub fn expect_update(&self) -> StatusExpectationBuilder {
        StatusExpectationBuilder {
            operation: Operation::Update,
            state: Arc::clone(&self.state),
        }
    }

    /// Expects a `delete` call.
    pub fn expect_delete(&self) -> StatusExpectationBuilder {
        StatusExpectationBuilder {
            operation: Operation::Delete,
            state: Arc::clone(&self.state),
        }
    }

    /// Expects an `index` call.
    pub fn expect_index(&self) -> IndexExpectationBuilder {
        IndexExpectationBuilder {
            state: Arc::clone(&self.state),
        }
    }

    /// Number of `execute` calls made through any client of this mock.
    pub fn execute_count(&self) -> usize {
        lock_state(&self.state).executed.len()
    }

    /// Every request that reached `execute`, in order.
    pub fn executed(&self) -> Vec<Request> {
        lock_state(&self.state).executed.clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let state = lock_state(&self.state);
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }
}

/// Builder for `create` expectations.
pub struct CreateExpectationBuilder {
    state: SharedState,
}

impl CreateExpectationBuilder {
    /// The remote assigns `id` to the new resource.
    pub fn return_ok(self, id: impl Into<Value>) {
        push(&self.state, Operation::Create, Ok(Response::created(id)));
    }

    pub fn return_err(self, error: RemoteError) {
        push(&self.state, Operation::Create, Err(error));
    }
}

/// Builder for `read` expectations.
pub struct ReadExpectationBuilder {
    state: SharedState,
}

impl ReadExpectationBuilder {
    /// The remote returns `attributes` for the resource.
    pub fn return_ok(self, attributes: Attributes) {
        push(&self.state, Operation::Read, Ok(Response::read(attributes)));
    }

    pub fn return_err(self, error: RemoteError) {
        push(&self.state, Operation::Read, Err(error));
    }
}

/// Builder for `update` and `delete` expectations.
pub struct StatusExpectationBuilder {
    operation: Operation,
    state: SharedState,
}

impl StatusExpectationBuilder {
    pub fn return_ok(self) {
        let response = Response::empty(self.operation);
        push(&self.state, self.operation, Ok(response));
    }

    pub fn return_err(self, error: RemoteError) {
        push(&self.state, self.operation, Err(error));
    }
}

/// Builder for `index` expectations.
pub struct IndexExpectationBuilder {
    state: SharedState,
}

impl IndexExpectationBuilder {
    /// The remote lists `entities`, in this order.
    pub fn return_ok(self, entities: Vec<Attributes>) {
        push(&self.state, Operation::Index, Ok(Response::index(entities)));
    }

    pub fn return_err(self, error: RemoteError) {
        push(&self.state, Operation::Index, Err(error));
    }
}

// =============================================================================
// MOCK API CLIENT
// =============================================================================

/// An [`ApiClient`] answering from a [`MockClient`]'s expectation queue.
///
/// `execute` records the current request, pops the next expectation and installs its
/// response. An unexpected call, or one whose request cannot serve the queued operation,
/// fails with [`RemoteError::Rejected`].
pub struct MockApiClient {
    state: SharedState,
    request: Request,
    response: Response,
}

impl ApiClient for MockApiClient {
    fn request(&self) -> &Request {
        &self.request
    }

    fn request_mut(&mut self) -> &mut Request {
        &mut self.request
    }

    fn set_request(&mut self, request: Request) {
        self.request = request;
    }

    fn response(&self) -> &Response {
        &self.response
    }

    fn set_response(&mut self, response: Response) {
        self.response = response;
    }

    fn execute(&mut self) -> Result<(), RemoteError> {
        let expectation = {
            let mut state = lock_state(&self.state);
            state.executed.push(self.request.clone());
            state.expectations.pop_front()
        };

        let expectation = expectation
            .ok_or_else(|| RemoteError::Rejected("unexpected execute".to_string()))?;
        if !self.request.supports(expectation.operation) {
            return Err(RemoteError::Rejected(format!(
                "expected a {} request",
                expectation.operation
            )));
        }
        self.response = expectation.response?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mock_client_with_expectations() {
        let mock = MockClient::new();
        mock.expect_create().return_ok(1);
        mock.expect_delete().return_ok();

        let mut client = mock.client_for(Operation::Create);
        client.execute().unwrap();
        assert_eq!(client.response(), &Response::created(1));

        client.prepare(Operation::Delete);
        client.execute().unwrap();
        assert_eq!(client.response().operation(), Operation::Delete);

        assert_eq!(mock.execute_count(), 2);
        mock.verify();
    }

    #[test]
    fn test_unexpected_execute_is_rejected() {
        let mock = MockClient::new();
        let mut client = mock.client_for(Operation::Read);

        let result = client.execute();
        assert!(matches!(result, Err(RemoteError::Rejected(_))));
    }

    #[test]
    fn test_operation_mismatch_is_rejected() {
        let mock = MockClient::new();
        mock.expect_index().return_ok(vec![]);

        let mut client = mock.client_for(Operation::Read);
        let result = client.execute();
        assert!(matches!(result, Err(RemoteError::Rejected(msg)) if msg.contains("index")));
    }

    #[test]
    fn test_error_injection() {
        let mock = MockClient::new();
        mock.expect_read()
            .return_err(RemoteError::NotFound("users/9".to_string()));
        mock.expect_read()
            .return_ok(json!({"id": 9}).as_object().cloned().unwrap());

        let mut client = mock.client_for(Operation::Read);
        assert_eq!(
            client.execute(),
            Err(RemoteError::NotFound("users/9".to_string()))
        );
        client.execute().unwrap();
        assert_eq!(
            client.response().as_read().unwrap().attributes().get("id"),
            Some(&json!(9))
        );
        mock.verify();
    }

    #[test]
    #[should_panic(expected = "Not all expectations were met")]
    fn test_verify_panics_on_leftover_expectations() {
        let mock = MockClient::new();
        mock.expect_update().return_ok();
        mock.verify();
    }
}
