//! # Active Resource Recipe
//!
//! Demo walking a `users` entity through its whole lifecycle against the in-memory store:
//! create, update, index, read and delete.

use resource_recipe::framework::client;
use resource_recipe::framework::{ApiClient, Entity, ModelError, Operation};
use resource_recipe::lifecycle::{setup_tracing, ResourceSystem};
use resource_recipe::model;
use resource_recipe::clients::MemoryClient;
use tracing::{error, info};

fn prepare(entity: &Entity<MemoryClient>, operation: Operation) {
    client::lock(entity.client()).prepare(operation);
}

fn run(system: &ResourceSystem) -> Result<(), ModelError> {
    let config = model::user::config("api.local")?;

    // Create two users
    let mut alice = system.entity(config.clone())?;
    alice.set("name", "Alice")?.set("email", "alice@example.com")?;
    prepare(&alice, Operation::Create);
    let alice_id = alice.create()?;
    info!(user_id = %alice_id, "User created successfully");

    let mut bob = system.entity(config.clone())?;
    bob.set("name", "Bob")?;
    prepare(&bob, Operation::Create);
    bob.create()?;

    // Update
    alice.set("email", "alice@example.org")?;
    prepare(&alice, Operation::Update);
    alice.update()?;

    // Index: every result shares alice's client
    prepare(&alice, Operation::Index);
    let users = alice.index()?;
    for user in &users {
        info!(user_id = %user.id(), name = %user.get("name")?, "Listed user");
    }

    // Read into a fresh entity
    let mut copy = system.entity(config)?;
    prepare(&copy, Operation::Read);
    copy.read(alice_id)?;
    info!(email = %copy.get("email")?, "Read user");

    // Delete, then show the state guard
    prepare(&copy, Operation::Delete);
    copy.delete()?;
    info!(persisted = copy.is_persisted(), "User deleted");

    prepare(&copy, Operation::Delete);
    if let Err(e) = copy.delete() {
        info!(error = %e, "Second delete rejected as expected");
    }
    Ok(())
}

fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting application with in-memory resource store");
    let system = ResourceSystem::new().map_err(|e| e.to_string())?;

    let result = run(&system);
    if let Err(e) = &result {
        error!(error = %e, "Demo failed");
    }

    // Shutdown system gracefully, then report the demo outcome
    system.shutdown()?;
    result.map_err(|e| e.to_string())?;

    info!("Application completed successfully");
    Ok(())
}
