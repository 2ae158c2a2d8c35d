//! # In-Memory Resource Store
//!
//! A stand-in for a remote REST service, used by the demo and the integration tests.
//!
//! [`ResourceStore`] is an actor: it owns every stored record and processes [`StoreRequest`]s
//! one at a time inside its own Tokio task, so no locking is needed around the records.
//! Callers talk to it through a cloneable [`StoreHandle`].
//!
//! Records are grouped into collections keyed by URL path (`users`, `v1/products`, ...).
//! Each collection hands out sequential numeric ids starting at 1.
//!
//! ## Blocking Handle
//!
//! The entity layer is synchronous, so [`StoreHandle`] uses `blocking_send` and
//! `blocking_recv`. Its methods must be called from outside the Tokio runtime, e.g. the
//! main thread while the store runs on a [`ResourceSystem`](crate::lifecycle::ResourceSystem)
//! worker.

use crate::framework::{Attributes, RemoteError};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// One-shot reply channel used by the store.
pub type Reply<T> = oneshot::Sender<Result<T, RemoteError>>;

/// Messages understood by the [`ResourceStore`].
#[derive(Debug)]
pub enum StoreRequest {
    Create {
        collection: String,
        identity: String,
        data: Attributes,
        respond_to: Reply<Attributes>,
    },
    Read {
        collection: String,
        id: u64,
        respond_to: Reply<Attributes>,
    },
    Update {
        collection: String,
        identity: String,
        id: u64,
        data: Attributes,
        respond_to: Reply<Attributes>,
    },
    Delete {
        collection: String,
        id: u64,
        respond_to: Reply<()>,
    },
    Index {
        collection: String,
        respond_to: Reply<Vec<Attributes>>,
    },
}

#[derive(Default)]
struct Collection {
    records: BTreeMap<u64, Attributes>,
    next_id: u64,
}

/// The actor owning all stored records.
pub struct ResourceStore {
    receiver: mpsc::Receiver<StoreRequest>,
    collections: HashMap<String, Collection>,
}

impl ResourceStore {
    /// Creates a store and the handle used to reach it.
    ///
    /// `buffer_size` is the capacity of the request channel.
    pub fn new(buffer_size: usize) -> (Self, StoreHandle) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let store = Self {
            receiver,
            collections: HashMap::new(),
        };
        (store, StoreHandle { sender })
    }

    /// Processes requests until every handle is dropped or `shutdown` fires.
    pub async fn run(mut self, mut shutdown: oneshot::Receiver<()>) {
        info!("Store started");
        loop {
            tokio::select! {
                msg = self.receiver.recv() => match msg {
                    Some(msg) => self.handle(msg),
                    None => break,
                },
                _ = &mut shutdown => break,
            }
        }
        let size: usize = self.collections.values().map(|c| c.records.len()).sum();
        info!(size, "Shutdown");
    }

    fn handle(&mut self, msg: StoreRequest) {
        match msg {
            StoreRequest::Create {
                collection,
                identity,
                mut data,
                respond_to,
            } => {
                let entry = self.collections.entry(collection.clone()).or_default();
                entry.next_id += 1;
                let id = entry.next_id;
                data.insert(identity, Value::from(id));
                entry.records.insert(id, data.clone());
                info!(resource = %collection, id, size = entry.records.len(), "Created");
                let _ = respond_to.send(Ok(data));
            }
            StoreRequest::Read {
                collection,
                id,
                respond_to,
            } => {
                let record = self
                    .collections
                    .get(&collection)
                    .and_then(|c| c.records.get(&id))
                    .cloned();
                debug!(resource = %collection, id, found = record.is_some(), "Read");
                let _ = respond_to.send(record.ok_or_else(|| not_found(&collection, id)));
            }
            StoreRequest::Update {
                collection,
                identity,
                id,
                mut data,
                respond_to,
            } => {
                let record = self
                    .collections
                    .get_mut(&collection)
                    .and_then(|c| c.records.get_mut(&id));
                match record {
                    Some(record) => {
                        data.insert(identity, Value::from(id));
                        *record = data.clone();
                        info!(resource = %collection, id, "Updated");
                        let _ = respond_to.send(Ok(data));
                    }
                    None => {
                        warn!(resource = %collection, id, "Not found");
                        let _ = respond_to.send(Err(not_found(&collection, id)));
                    }
                }
            }
            StoreRequest::Delete {
                collection,
                id,
                respond_to,
            } => {
                let entry = self.collections.get_mut(&collection);
                match entry.and_then(|c| c.records.remove(&id).map(|_| c.records.len())) {
                    Some(size) => {
                        info!(resource = %collection, id, size, "Deleted");
                        let _ = respond_to.send(Ok(()));
                    }
                    None => {
                        warn!(resource = %collection, id, "Not found");
                        let _ = respond_to.send(Err(not_found(&collection, id)));
                    }
                }
            }
            StoreRequest::Index {
                collection,
                respond_to,
            } => {
                let records: Vec<Attributes> = self
                    .collections
                    .get(&collection)
                    .map(|c| c.records.values().cloned().collect())
                    .unwrap_or_default();
                debug!(resource = %collection, size = records.len(), "Index");
                let _ = respond_to.send(Ok(records));
            }
        }
    }
}

fn not_found(collection: &str, id: u64) -> RemoteError {
    RemoteError::NotFound(format!("{collection}/{id}"))
}

/// A cloneable, blocking handle to a running [`ResourceStore`].
#[derive(Clone)]
pub struct StoreHandle {
    sender: mpsc::Sender<StoreRequest>,
}

impl StoreHandle {
    fn call<T>(&self, build: impl FnOnce(Reply<T>) -> StoreRequest) -> Result<T, RemoteError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .blocking_send(build(respond_to))
            .map_err(|_| RemoteError::Closed)?;
        response.blocking_recv().map_err(|_| RemoteError::Dropped)?
    }

    pub fn create(
        &self,
        collection: &str,
        identity: &str,
        data: Attributes,
    ) -> Result<Attributes, RemoteError> {
        self.call(|respond_to| StoreRequest::Create {
            collection: collection.to_string(),
            identity: identity.to_string(),
            data,
            respond_to,
        })
    }

    pub fn read(&self, collection: &str, id: u64) -> Result<Attributes, RemoteError> {
        self.call(|respond_to| StoreRequest::Read {
            collection: collection.to_string(),
            id,
            respond_to,
        })
    }

    pub fn update(
        &self,
        collection: &str,
        identity: &str,
        id: u64,
        data: Attributes,
    ) -> Result<Attributes, RemoteError> {
        self.call(|respond_to| StoreRequest::Update {
            collection: collection.to_string(),
            identity: identity.to_string(),
            id,
            data,
            respond_to,
        })
    }

    pub fn delete(&self, collection: &str, id: u64) -> Result<(), RemoteError> {
        self.call(|respond_to| StoreRequest::Delete {
            collection: collection.to_string(),
            id,
            respond_to,
        })
    }

    pub fn index(&self, collection: &str) -> Result<Vec<Attributes>, RemoteError> {
        self.call(|respond_to| StoreRequest::Index {
            collection: collection.to_string(),
            respond_to,
        })
    }
}
