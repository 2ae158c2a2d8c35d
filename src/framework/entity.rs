//! # Entity
//!
//! [`Entity`] is the active-resource object: an attribute store bound to one remote resource
//! through an [`ApiClient`]. It owns the lifecycle state machine and coordinates every CRUD
//! call with the client.
//!
//! # Lifecycle
//!
//! The state is implicit in the identity attribute (`id` unless configured otherwise):
//!
//! ```text
//!              create() / read(id)              delete()
//!  Transient ─────────────────────► Persisted ──────────► Transient (deleted)
//!  (id = null)                      (id set)               (id = null again)
//! ```
//!
//! | Method | Requires | Client must hold | On success |
//! |--------|----------|------------------|------------|
//! | [`create`](Entity::create) | id unset | Create request + response | id := response id |
//! | [`read`](Entity::read) | - | Read request + response | attributes := response attributes |
//! | [`update`](Entity::update) | id set | Update request + response | nothing local |
//! | [`delete`](Entity::delete) | id set | Delete request + response | id := null |
//! | [`index`](Entity::index) | - | Index request + response | returns sibling entities |
//!
//! # Ordering Guarantees
//!
//! Every method checks state first, then the client's capabilities, and only then touches the
//! request. `execute` runs before any attribute is mutated, so a failed call leaves the
//! entity exactly as it was.
//!
//! # Example
//!
//! ```rust
//! use resource_recipe::framework::mock::MockClient;
//! use resource_recipe::framework::{client, ApiClient, Entity, Operation, ResourceConfig};
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
//! mock.expect_create().return_ok(42);
//!
//! let client = client::shared(mock.client());
//! client::lock(&client).prepare(Operation::Create);
//!
//! let mut user = Entity::new(config, client).unwrap();
//! user.set("name", "Alice").unwrap();
//! user.create().unwrap();
//!
//! assert_eq!(user.get("id").unwrap(), 42);
//! mock.verify();
//! ```

use crate::framework::attributes::{AttributeStore, Attributes};
use crate::framework::client::{self, ApiClient, SharedClient};
use crate::framework::config::ResourceConfig;
use crate::framework::error::ModelError;
use crate::framework::request::Operation;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument};

/// An attribute-bearing object mapped onto a remote resource.
pub struct Entity<C: ApiClient> {
    config: Arc<ResourceConfig>,
    attributes: AttributeStore,
    client: SharedClient<C>,
}

impl<C: ApiClient> Entity<C> {
    /// Creates a transient entity with every attribute set to `null`.
    ///
    /// The configuration is validated before the client is accepted.
    pub fn new(
        config: impl Into<Arc<ResourceConfig>>,
        client: SharedClient<C>,
    ) -> Result<Self, ModelError> {
        let config = config.into();
        config.validate()?;
        let attributes = AttributeStore::new(config.properties.iter().cloned());
        Ok(Self {
            config,
            attributes,
            client,
        })
    }

    pub fn config(&self) -> &ResourceConfig {
        &self.config
    }

    /// The client handle this entity talks through.
    pub fn client(&self) -> &SharedClient<C> {
        &self.client
    }

    pub fn attributes(&self) -> &AttributeStore {
        &self.attributes
    }

    // --- Attribute access ---

    /// See [`AttributeStore::get`].
    pub fn get(&self, name: &str) -> Result<&Value, ModelError> {
        self.attributes.get(name)
    }

    /// See [`AttributeStore::set`].
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<&mut Self, ModelError> {
        self.attributes.set(name, value)?;
        Ok(self)
    }

    /// See [`AttributeStore::has`].
    pub fn has(&self, name: &str) -> bool {
        self.attributes.has(name)
    }

    /// See [`AttributeStore::clear`].
    pub fn clear(&mut self, name: &str) -> Result<&mut Self, ModelError> {
        self.attributes.clear(name)?;
        Ok(self)
    }

    /// See [`AttributeStore::hydrate`].
    pub fn hydrate(&mut self, data: Attributes) -> &mut Self {
        self.attributes.hydrate(data);
        self
    }

    /// The identity value, `null` while the entity is transient.
    pub fn id(&self) -> &Value {
        self.attributes
            .get(&self.config.identity)
            .unwrap_or(&Value::Null)
    }

    pub fn is_persisted(&self) -> bool {
        self.attributes.has(&self.config.identity)
    }

    fn require_persisted(&self, operation: Operation) -> Result<Value, ModelError> {
        if self.is_persisted() {
            Ok(self.id().clone())
        } else {
            Err(ModelError::State(format!(
                "cannot {operation} {}: {} is not set",
                self.config.path, self.config.identity
            )))
        }
    }

    fn check_contract(client: &C, operation: Operation) -> Result<(), ModelError> {
        if !client.request().supports(operation) {
            return Err(ModelError::Contract {
                slot: "request",
                expected: operation,
            });
        }
        if !client.response().supports(operation) {
            return Err(ModelError::Contract {
                slot: "response",
                expected: operation,
            });
        }
        Ok(())
    }

    fn single(&self, value: Value) -> Attributes {
        let mut data = Attributes::new();
        data.insert(self.config.identity.clone(), value);
        data
    }

    // --- CRUD ---

    /// Creates the remote resource from the current attributes and stores its new identity.
    ///
    /// A response that comes back without an id is a contract error and leaves the entity
    /// transient.
    #[instrument(skip_all, fields(resource = %self.config.path))]
    pub fn create(&mut self) -> Result<Value, ModelError> {
        if self.is_persisted() {
            return Err(ModelError::State(format!(
                "cannot create {}: {} is already {}",
                self.config.path,
                self.config.identity,
                self.id()
            )));
        }

        let mut data = self.attributes.to_map();
        data.remove(&self.config.identity);
        let target = self.config.url(None)?;

        let id = {
            let mut client = client::lock(&self.client);
            Self::check_contract(&client, Operation::Create)?;
            client
                .request_mut()
                .set_data(data)
                .set_target(target)
                .set_id(None);
            debug!("Executing create");
            client.execute()?;
            client
                .response()
                .as_create()
                .map(|r| r.id().clone())
                .filter(|id| !id.is_null())
                .ok_or(ModelError::Contract {
                    slot: "response",
                    expected: Operation::Create,
                })?
        };

        self.attributes.set(&self.config.identity, id.clone())?;
        debug!(%id, "Created");
        Ok(id)
    }

    /// Fetches the resource identified by `id` and replaces every attribute with the result.
    ///
    /// If the returned attribute set omits the identity, `id` is kept, so a successful read
    /// always leaves the entity persisted.
    #[instrument(skip_all, fields(resource = %self.config.path))]
    pub fn read(&mut self, id: impl Into<Value>) -> Result<&mut Self, ModelError> {
        let id = id.into();
        if id.is_null() {
            return Err(ModelError::State(format!(
                "cannot read {}: no {} given",
                self.config.path, self.config.identity
            )));
        }

        let data = self.single(id.clone());
        let target = self.config.url(Some(&id))?;

        let attributes = {
            let mut client = client::lock(&self.client);
            Self::check_contract(&client, Operation::Read)?;
            client
                .request_mut()
                .set_data(data)
                .set_target(target)
                .set_id(Some(id.clone()));
            debug!(%id, "Executing read");
            client.execute()?;
            client
                .response()
                .as_read()
                .map(|r| r.attributes().clone())
                .ok_or(ModelError::Contract {
                    slot: "response",
                    expected: Operation::Read,
                })?
        };

        self.attributes.hydrate(attributes);
        if !self.is_persisted() {
            self.attributes.set(&self.config.identity, id)?;
        }
        Ok(self)
    }

    /// Sends the current attributes to the remote resource.
    #[instrument(skip_all, fields(resource = %self.config.path))]
    pub fn update(&mut self) -> Result<&mut Self, ModelError> {
        let id = self.require_persisted(Operation::Update)?;
        let data = self.attributes.to_map();
        let target = self.config.url(Some(&id))?;

        let mut client = client::lock(&self.client);
        Self::check_contract(&client, Operation::Update)?;
        client
            .request_mut()
            .set_data(data)
            .set_target(target)
            .set_id(Some(id.clone()));
        debug!(%id, "Executing update");
        client.execute()?;
        drop(client);

        Ok(self)
    }

    /// Deletes the remote resource and returns the entity to the transient state.
    #[instrument(skip_all, fields(resource = %self.config.path))]
    pub fn delete(&mut self) -> Result<&mut Self, ModelError> {
        let id = self.require_persisted(Operation::Delete)?;
        let data = self.single(id.clone());
        let target = self.config.url(Some(&id))?;

        {
            let mut client = client::lock(&self.client);
            Self::check_contract(&client, Operation::Delete)?;
            client
                .request_mut()
                .set_data(data)
                .set_target(target)
                .set_id(Some(id.clone()));
            debug!(%id, "Executing delete");
            client.execute()?;
        }

        self.attributes.clear(&self.config.identity)?;
        Ok(self)
    }

    /// Lists the remote collection.
    ///
    /// Each returned entity is hydrated from one attribute set, in response order, and shares
    /// this entity's client handle.
    #[instrument(skip_all, fields(resource = %self.config.path))]
    pub fn index(&self) -> Result<Vec<Entity<C>>, ModelError> {
        let target = self.config.url(None)?;

        let entities = {
            let mut client = client::lock(&self.client);
            Self::check_contract(&client, Operation::Index)?;
            client
                .request_mut()
                .set_data(Attributes::new())
                .set_target(target)
                .set_id(None);
            debug!("Executing index");
            client.execute()?;
            client
                .response()
                .as_index()
                .map(|r| r.entities().to_vec())
                .ok_or(ModelError::Contract {
                    slot: "response",
                    expected: Operation::Index,
                })?
        };

        debug!(size = entities.len(), "Indexed");
        Ok(entities
            .into_iter()
            .map(|data| {
                let mut attributes = self.attributes.empty_like();
                attributes.hydrate(data);
                Entity {
                    config: Arc::clone(&self.config),
                    attributes,
                    client: Arc::clone(&self.client),
                }
            })
            .collect())
    }
}

impl<C: ApiClient> fmt::Debug for Entity<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("resource", &self.config.path)
            .field("attributes", &self.attributes.to_map())
            .finish_non_exhaustive()
    }
}
