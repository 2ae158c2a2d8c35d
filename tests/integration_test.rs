use resource_recipe::clients::MemoryClient;
use resource_recipe::framework::client;
use resource_recipe::framework::{ApiClient, Entity, ModelError, Operation, RemoteError};
use resource_recipe::lifecycle::ResourceSystem;
use resource_recipe::model;
use serde_json::{json, Value};
use std::sync::Arc;

fn prepare(entity: &Entity<MemoryClient>, operation: Operation) {
    client::lock(entity.client()).prepare(operation);
}

/// Full end-to-end test against the in-memory store.
#[test]
fn test_full_user_lifecycle() {
    let system = ResourceSystem::new().expect("Failed to start system");
    let config = Arc::new(model::user::config("api.local").expect("valid config"));

    // Create a user
    let mut alice = system.entity(Arc::clone(&config)).expect("entity");
    alice
        .set("name", "Alice")
        .unwrap()
        .set("email", "alice@example.com")
        .unwrap();
    prepare(&alice, Operation::Create);
    let id = alice.create().expect("Failed to create user");
    assert_eq!(id, json!(1));

    // Update it
    alice.set("email", "alice@example.org").unwrap();
    prepare(&alice, Operation::Update);
    alice.update().expect("Failed to update user");

    // Read it back through another entity
    let mut copy = system.entity(Arc::clone(&config)).expect("entity");
    prepare(&copy, Operation::Read);
    copy.read(id.clone()).expect("Failed to read user");
    assert_eq!(copy.get("name").unwrap(), &json!("Alice"));
    assert_eq!(copy.get("email").unwrap(), &json!("alice@example.org"));
    assert_eq!(copy.id(), &id);

    // Delete it
    prepare(&copy, Operation::Delete);
    copy.delete().expect("Failed to delete user");
    assert_eq!(copy.id(), &Value::Null);

    // The remote copy is gone
    prepare(&alice, Operation::Update);
    assert_eq!(
        alice.update().unwrap_err(),
        ModelError::Remote(RemoteError::NotFound("users/1".to_string()))
    );

    // Deleting again fails on state, before reaching the store
    assert!(matches!(copy.delete(), Err(ModelError::State(_))));

    system.shutdown().expect("Failed to shut down");
}

#[test]
fn test_index_returns_every_stored_resource_in_order() {
    let system = ResourceSystem::new().expect("Failed to start system");
    let config = Arc::new(model::product::config("api.local").expect("valid config"));

    for (name, stock) in [("Widget", 10), ("Gadget", 0), ("Doohickey", 3)] {
        let mut product = system.entity(Arc::clone(&config)).expect("entity");
        product
            .set("name", name)
            .unwrap()
            .set("stock", stock)
            .unwrap();
        prepare(&product, Operation::Create);
        product.create().expect("Failed to create product");
    }

    let listing = system.entity(Arc::clone(&config)).expect("entity");
    prepare(&listing, Operation::Index);
    let mut products = listing.index().expect("Failed to index products");

    let names: Vec<&Value> = products.iter().map(|p| p.get("name").unwrap()).collect();
    assert_eq!(names, vec![&json!("Widget"), &json!("Gadget"), &json!("Doohickey")]);
    assert!(products
        .iter()
        .all(|p| Arc::ptr_eq(p.client(), listing.client())));

    // A sibling can be deleted on its own through the shared client
    prepare(&listing, Operation::Delete);
    products[1].delete().expect("Failed to delete product");

    prepare(&listing, Operation::Index);
    let remaining = listing.index().expect("Failed to index products");
    let ids: Vec<&Value> = remaining.iter().map(|p| p.id()).collect();
    assert_eq!(ids, vec![&json!(1), &json!(3)]);

    system.shutdown().expect("Failed to shut down");
}

#[test]
fn test_read_unknown_id_is_remote_error() {
    let system = ResourceSystem::new().expect("Failed to start system");
    let mut user = system
        .entity(model::user::config("api.local").unwrap())
        .expect("entity");

    prepare(&user, Operation::Read);
    let result = user.read(99);
    assert_eq!(
        result.unwrap_err(),
        ModelError::Remote(RemoteError::NotFound("users/99".to_string()))
    );
    assert!(!user.is_persisted());

    system.shutdown().expect("Failed to shut down");
}

#[test]
fn test_client_after_shutdown_is_closed() {
    let system = ResourceSystem::new().expect("Failed to start system");
    let mut user = system
        .entity(model::user::config("api.local").unwrap())
        .expect("entity");
    system.shutdown().expect("Failed to shut down");

    prepare(&user, Operation::Create);
    assert_eq!(
        user.create(),
        Err(ModelError::Remote(RemoteError::Closed))
    );
}
