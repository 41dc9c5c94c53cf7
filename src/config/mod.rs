//! Host config loading.
//!
//! Defines the [`ConfigSource`] trait for pluggable config formats, the
//! [`ConfigResolver`] for primary/fallback source resolution, and the
//! [`ConfigLoader`] that applies the bundled-resource fallback order:
//! structured JSON first, line-oriented text second, empty otherwise.
//! Submodules provide the data model, validation logic, and concrete
//! source implementations.

pub mod model;
pub mod sources;
pub mod validation;

use std::path::PathBuf;
use std::time::Instant;

use async_trait::async_trait;

use crate::error::HostswitchError;
use model::HostElement;

/// Structured config resource, tried first.
pub const JSON_RESOURCE: &str = "host_config.json";

/// Line-oriented config resource, tried when the structured one is unusable.
pub const TEXT_RESOURCE: &str = "host_config.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigVersion {
    Hash(String),
}

/// A host list together with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedHosts {
    pub elements: Vec<HostElement>,
    pub version: ConfigVersion,
    pub source_name: String,
    pub loaded_at: Instant,
}

impl LoadedHosts {
    #[must_use]
    pub fn new(
        elements: Vec<HostElement>,
        version: ConfigVersion,
        source_name: impl Into<String>,
    ) -> Self {
        Self {
            elements,
            version,
            source_name: source_name.into(),
            loaded_at: Instant::now(),
        }
    }

    /// Wrap elements built in code, hashing their fields for the version.
    #[must_use]
    pub fn from_elements(elements: Vec<HostElement>, source_name: impl Into<String>) -> Self {
        let fingerprint: String = elements
            .iter()
            .map(|e| {
                format!(
                    "{},{},{},{},{},{}\n",
                    e.label(),
                    e.tag(),
                    e.host(),
                    e.scheme(),
                    e.mode(),
                    e.address().unwrap_or_default()
                )
            })
            .collect();
        let version = ConfigVersion::Hash(sources::sha256_hex(fingerprint.as_bytes()));
        Self::new(elements, version, source_name)
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::new(
            Vec::new(),
            ConfigVersion::Hash(sources::sha256_hex(b"")),
            "none",
        )
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

// async_trait is required here because ConfigSource is used as Box<dyn ConfigSource>
// and native async fn in traits does not support dyn dispatch.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    fn name(&self) -> &'static str;
    async fn load(&self) -> Result<LoadedHosts, HostswitchError>;
}

pub struct ConfigResolver {
    primary: Box<dyn ConfigSource>,
    fallback: Option<Box<dyn ConfigSource>>,
}

impl ConfigResolver {
    #[must_use]
    pub fn new(primary: Box<dyn ConfigSource>, fallback: Option<Box<dyn ConfigSource>>) -> Self {
        Self { primary, fallback }
    }

    pub async fn load_with_fallback(&self) -> Result<LoadedHosts, HostswitchError> {
        match self.primary.load().await {
            Ok(result) => Ok(result),
            Err(primary_err) => match self.fallback {
                Some(ref fallback) if primary_err.triggers_fallback() => {
                    tracing::warn!(
                        primary = self.primary.name(),
                        fallback = fallback.name(),
                        error = %primary_err,
                        "primary host config unusable, using fallback"
                    );
                    fallback.load().await
                }
                _ => Err(primary_err),
            },
        }
    }
}

/// Loads the bundled host config from a resource directory.
///
/// Loading never fails: every read or parse problem is logged and turns
/// into fewer (possibly zero) hosts.
pub struct ConfigLoader {
    dir: PathBuf,
    resolver: ConfigResolver,
}

impl ConfigLoader {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let resolver = ConfigResolver::new(
            Box::new(sources::json::new(dir.join(JSON_RESOURCE))),
            Some(Box::new(sources::text::new(dir.join(TEXT_RESOURCE)))),
        );
        Self { dir, resolver }
    }

    pub async fn load(&self) -> LoadedHosts {
        match self.resolver.load_with_fallback().await {
            Ok(hosts) => {
                tracing::info!(
                    dir = %self.dir.display(),
                    source = %hosts.source_name,
                    hosts = hosts.elements.len(),
                    "host config loaded"
                );
                hosts
            }
            Err(e) => {
                tracing::warn!(
                    dir = %self.dir.display(),
                    error = %e,
                    "no usable host config, starting with an empty host list"
                );
                LoadedHosts::empty()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Result<Vec<HostElement>, fn() -> HostswitchError>);

    #[async_trait]
    impl ConfigSource for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn load(&self) -> Result<LoadedHosts, HostswitchError> {
            match &self.0 {
                Ok(elements) => Ok(LoadedHosts::from_elements(elements.clone(), "fixed")),
                Err(make) => Err(make()),
            }
        }
    }

    fn dev() -> Vec<HostElement> {
        vec![HostElement::new("Dev", "dev", "dev.example.com")]
    }

    #[tokio::test]
    async fn primary_wins_when_usable() {
        let resolver = ConfigResolver::new(
            Box::new(Fixed(Ok(dev()))),
            Some(Box::new(Fixed(Err(|| HostswitchError::InvalidHostname(String::new()))))),
        );
        let hosts = resolver.load_with_fallback().await.unwrap();
        assert_eq!(hosts.elements, dev());
    }

    #[tokio::test]
    async fn empty_primary_falls_back() {
        let resolver = ConfigResolver::new(
            Box::new(Fixed(Err(|| HostswitchError::EmptyConfig {
                path: "host_config.json".into(),
            }))),
            Some(Box::new(Fixed(Ok(dev())))),
        );
        let hosts = resolver.load_with_fallback().await.unwrap();
        assert_eq!(hosts.elements.len(), 1);
    }

    #[tokio::test]
    async fn non_config_errors_do_not_fall_back() {
        let resolver = ConfigResolver::new(
            Box::new(Fixed(Err(|| HostswitchError::UnsupportedFormat("ini".into())))),
            Some(Box::new(Fixed(Ok(dev())))),
        );
        assert!(resolver.load_with_fallback().await.is_err());
    }

    #[test]
    fn from_elements_version_tracks_content() {
        let a = LoadedHosts::from_elements(dev(), "code");
        let b = LoadedHosts::from_elements(dev(), "code");
        let c = LoadedHosts::from_elements(
            vec![HostElement::new("Dev", "dev", "dev.example.com").with_scheme("http")],
            "code",
        );
        assert_eq!(a.version, b.version);
        assert_ne!(a.version, c.version);
    }
}
