//! Host registry: configured hosts, per-client overrides, and selection.
//!
//! A [`HostRegistry`] belongs to one logical HTTP client. It reads the
//! shared [`ConfigStore`] snapshot and keeps its own override list and
//! selected tag behind a single lock. The [`pool`] module maps client
//! handles to registry instances.

pub mod pool;
pub mod store;

use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::model::HostElement;
pub use pool::{ClientHandle, RegistryPool};
pub use store::ConfigStore;

#[derive(Debug, Default)]
struct ClientState {
    overrides: Vec<HostElement>,
    selected_tag: String,
}

#[derive(Debug)]
pub struct HostRegistry {
    store: Arc<ConfigStore>,
    state: RwLock<ClientState>,
}

impl HostRegistry {
    #[must_use]
    pub fn new(store: Arc<ConfigStore>) -> Self {
        Self {
            store,
            state: RwLock::new(ClientState::default()),
        }
    }

    #[must_use]
    pub fn store(&self) -> &Arc<ConfigStore> {
        &self.store
    }

    /// Upsert an override by tag, keeping the position of a replaced element.
    pub fn add_override(&self, element: HostElement) {
        let mut state = self.state.write();
        upsert(&mut state.overrides, element);
    }

    pub fn add_overrides(&self, elements: impl IntoIterator<Item = HostElement>) {
        let mut state = self.state.write();
        for element in elements {
            upsert(&mut state.overrides, element);
        }
    }

    /// Configured hosts followed by this client's overrides.
    ///
    /// An override sharing a tag with a configured host is listed twice;
    /// lookups by tag still find the configured one first.
    #[must_use]
    pub fn host_elements(&self) -> Vec<HostElement> {
        let configured = self.store.snapshot();
        let state = self.state.read();
        configured
            .elements
            .iter()
            .chain(state.overrides.iter())
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn selected_host(&self) -> Option<HostElement> {
        let configured = self.store.snapshot();
        let state = self.state.read();
        if state.selected_tag.is_empty() {
            return None;
        }
        configured
            .elements
            .iter()
            .chain(state.overrides.iter())
            .find(|e| e.tag() == state.selected_tag)
            .cloned()
    }

    #[must_use]
    pub fn selected_tag(&self) -> String {
        self.state.read().selected_tag.clone()
    }

    /// Select by tag. Unknown tags are accepted: the selection resolves
    /// once an element with that tag is loaded or added.
    pub fn select(&self, tag: &str) {
        let mut state = self.state.write();
        if state.selected_tag != tag {
            tracing::info!(from = %state.selected_tag, to = %tag, "host selection changed");
            state.selected_tag = tag.to_string();
        }
    }

    /// Whether some known element's `host` equals `hostname` exactly.
    #[must_use]
    pub fn is_host_configured(&self, hostname: &str) -> bool {
        if hostname.is_empty() {
            return false;
        }
        let configured = self.store.snapshot();
        let state = self.state.read();
        configured
            .elements
            .iter()
            .chain(state.overrides.iter())
            .any(|e| e.host() == hostname)
    }

    /// Drop overrides and selection. The shared configured list is untouched.
    pub fn dispose(&self) {
        let mut state = self.state.write();
        state.overrides.clear();
        state.selected_tag.clear();
    }
}

fn upsert(list: &mut Vec<HostElement>, element: HostElement) {
    match list.iter().position(|e| *e == element) {
        Some(idx) => list[idx] = element,
        None => list.push(element),
    }
}
