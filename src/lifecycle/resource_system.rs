use crate::clients::MemoryClient;
use crate::framework::client::{self, SharedClient};
use crate::framework::{Entity, ModelError, ResourceConfig};
use crate::server::{ResourceStore, StoreHandle};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Channel capacity of the store actor.
const STORE_BUFFER: usize = 32;

/// Owns the runtime and the in-memory store, and hands out clients for it.
///
/// `ResourceSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the store actor
/// - **Client Wiring**: Creating [`MemoryClient`]s bound to the running store
///
/// # Example
///
/// ```ignore
/// let system = ResourceSystem::new()?;
///
/// let mut user = system.entity(model::user::config("api.local")?)?;
/// client::lock(user.client()).prepare(Operation::Create);
/// user.set("name", "Alice")?.create()?;
///
/// // Gracefully shut down when done
/// system.shutdown()?;
/// ```
pub struct ResourceSystem {
    runtime: Runtime,
    store: StoreHandle,
    stop: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl ResourceSystem {
    /// Builds the runtime and spawns the store actor.
    ///
    /// Must not be called from inside another Tokio runtime.
    pub fn new() -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("resource-store")
            .enable_all()
            .build()?;

        let (store_actor, store) = ResourceStore::new(STORE_BUFFER);
        let (stop, shutdown) = oneshot::channel();
        let handle = runtime.spawn(store_actor.run(shutdown));

        Ok(Self {
            runtime,
            store,
            stop,
            handle,
        })
    }

    /// A new client with its own request/response slot.
    pub fn client(&self) -> MemoryClient {
        MemoryClient::new(self.store.clone())
    }

    /// A new client wrapped for sharing between entities.
    pub fn shared_client(&self) -> SharedClient<MemoryClient> {
        client::shared(self.client())
    }

    /// A transient entity of the given kind with its own client.
    pub fn entity(
        &self,
        config: impl Into<Arc<ResourceConfig>>,
    ) -> Result<Entity<MemoryClient>, ModelError> {
        let config = config.into();
        config.validate()?;
        let client = self.client().with_identity(config.identity.clone());
        Entity::new(config, client::shared(client))
    }

    /// Stops the store and waits for it to finish.
    ///
    /// Clients still held elsewhere fail with
    /// [`RemoteError::Closed`](crate::framework::RemoteError::Closed) afterwards.
    pub fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        // The store may already be gone; either way the task is awaited below
        let _ = self.stop.send(());
        drop(self.store);

        if let Err(e) = self.runtime.block_on(self.handle) {
            error!("Store task failed: {:?}", e);
            return Err(format!("Store task failed: {:?}", e));
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
