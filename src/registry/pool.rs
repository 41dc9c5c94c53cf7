//! Per-client registry instances keyed by an opaque handle.
//!
//! Each logical HTTP client gets a [`ClientHandle`] and asks the
//! [`RegistryPool`] for its [`HostRegistry`]. Asking again with the same
//! handle returns the same instance; releasing disposes it and removes it
//! from the pool.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use super::{ConfigStore, HostRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientHandle(Uuid);

impl ClientHandle {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClientHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ClientHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug)]
pub struct RegistryPool {
    store: Arc<ConfigStore>,
    registries: Mutex<HashMap<ClientHandle, Arc<HostRegistry>>>,
}

impl RegistryPool {
    #[must_use]
    pub fn new(store: Arc<ConfigStore>) -> Self {
        Self {
            store,
            registries: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn store(&self) -> &Arc<ConfigStore> {
        &self.store
    }

    /// The registry for `handle`, created on first use.
    pub fn obtain(&self, handle: ClientHandle) -> Arc<HostRegistry> {
        let mut registries = self.registries.lock();
        Arc::clone(registries.entry(handle).or_insert_with(|| {
            tracing::debug!(client = %handle, "creating host registry");
            Arc::new(HostRegistry::new(Arc::clone(&self.store)))
        }))
    }

    #[must_use]
    pub fn get(&self, handle: ClientHandle) -> Option<Arc<HostRegistry>> {
        self.registries.lock().get(&handle).cloned()
    }

    /// Dispose and forget the registry for `handle`.
    ///
    /// Returns `false` when there was nothing to release.
    pub fn release(&self, handle: ClientHandle) -> bool {
        let removed = self.registries.lock().remove(&handle);
        match removed {
            Some(registry) => {
                registry.dispose();
                tracing::debug!(client = %handle, "released host registry");
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.registries.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registries.lock().is_empty()
    }
}
