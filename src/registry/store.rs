//! Process-wide configured host list.
//!
//! [`ConfigStore`] is created once, filled by the startup loader, and
//! shared as `Arc<ConfigStore>` by every [`HostRegistry`](super::HostRegistry).
//! Each load publishes a complete snapshot through an atomic pointer swap,
//! so readers never see a half-built list.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::LoadedHosts;

#[derive(Debug)]
pub struct ConfigStore {
    current: ArcSwap<LoadedHosts>,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(LoadedHosts::empty()),
        }
    }

    /// A store already holding `hosts`.
    #[must_use]
    pub fn with_hosts(hosts: LoadedHosts) -> Self {
        let store = Self::new();
        store.load(hosts);
        store
    }

    /// Replace the configured list.
    ///
    /// An empty list never clears an already loaded one; returns whether
    /// the snapshot was replaced.
    pub fn load(&self, hosts: LoadedHosts) -> bool {
        if hosts.is_empty() {
            tracing::debug!(source = %hosts.source_name, "ignoring empty host config");
            return false;
        }
        tracing::info!(
            source = %hosts.source_name,
            hosts = hosts.elements.len(),
            age_ms = u64::try_from(hosts.loaded_at.elapsed().as_millis()).unwrap_or(u64::MAX),
            "publishing host config"
        );
        self.current.store(Arc::new(hosts));
        true
    }

    #[must_use]
    pub fn snapshot(&self) -> Arc<LoadedHosts> {
        self.current.load_full()
    }
}
