//! Integration tests for per-client registries and the registry pool.

use std::sync::Arc;

use hostswitch::config::model::HostElement;
use hostswitch::config::LoadedHosts;
use hostswitch::registry::{ClientHandle, ConfigStore, HostRegistry, RegistryPool};

fn configured() -> LoadedHosts {
    LoadedHosts::from_elements(
        vec![
            HostElement::new("Production", "prod", "api.example.com"),
            HostElement::new("Staging", "staging", "staging.example.com"),
        ],
        "test",
    )
}

#[test]
fn clients_share_config_but_not_selection() {
    let pool = RegistryPool::new(Arc::new(ConfigStore::with_hosts(configured())));
    let a = pool.obtain(ClientHandle::new());
    let b = pool.obtain(ClientHandle::new());

    a.select("staging");
    a.add_override(HostElement::new("Local", "local", "127.0.0.1:8080").with_scheme("http"));

    assert_eq!(a.selected_host().unwrap().tag(), "staging");
    assert!(b.selected_host().is_none());
    assert_eq!(a.host_elements().len(), 3);
    assert_eq!(b.host_elements().len(), 2);
    assert!(a.is_host_configured("127.0.0.1:8080"));
    assert!(!b.is_host_configured("127.0.0.1:8080"));
}

#[test]
fn same_handle_returns_same_registry() {
    let pool = RegistryPool::new(Arc::new(ConfigStore::with_hosts(configured())));
    let handle = ClientHandle::new();

    let first = pool.obtain(handle);
    first.select("prod");
    let second = pool.obtain(handle);

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.selected_tag(), "prod");
    assert_eq!(pool.len(), 1);
}

#[test]
fn release_disposes_and_forgets_registry() {
    let pool = RegistryPool::new(Arc::new(ConfigStore::with_hosts(configured())));
    let handle = ClientHandle::new();

    let registry = pool.obtain(handle);
    registry.add_override(HostElement::new("Local", "local", "localhost:3000"));
    registry.select("local");

    assert!(pool.release(handle));
    assert!(pool.is_empty());
    assert!(pool.get(handle).is_none());

    // A holder of the old registry sees an emptied client state.
    assert!(registry.selected_host().is_none());
    assert_eq!(registry.host_elements().len(), 2);

    // Release is idempotent.
    assert!(!pool.release(handle));

    // Obtaining again yields a fresh registry.
    let fresh = pool.obtain(handle);
    assert!(!Arc::ptr_eq(&registry, &fresh));
    assert_eq!(fresh.selected_tag(), "");
}

#[test]
fn selection_made_before_load_resolves_after_load() {
    let store = Arc::new(ConfigStore::new());
    let registry = HostRegistry::new(Arc::clone(&store));

    registry.select("staging");
    assert!(registry.selected_host().is_none());

    assert!(store.load(configured()));
    assert_eq!(registry.selected_host().unwrap().host(), "staging.example.com");
}

#[test]
fn empty_reload_keeps_previous_list() {
    let store = Arc::new(ConfigStore::with_hosts(configured()));
    let registry = HostRegistry::new(Arc::clone(&store));

    assert!(!store.load(LoadedHosts::empty()));
    assert_eq!(registry.host_elements().len(), 2);
}

#[test]
fn configured_host_wins_tag_lookup_over_override() {
    let registry = HostRegistry::new(Arc::new(ConfigStore::with_hosts(configured())));
    registry.add_override(HostElement::new("Shadow", "prod", "shadow.example.com"));
    registry.select("prod");

    assert_eq!(registry.selected_host().unwrap().host(), "api.example.com");
    assert_eq!(registry.host_elements().len(), 3);
}
