//! Generic async file-based host config source.
//!
//! [`FileSource`] implements [`ConfigSource`] for any file format by
//! accepting a parse function at construction time. It reads the file
//! asynchronously via Tokio, logs every rejected entry, and computes a
//! SHA-256 hash of the content for version tracking.

use std::path::PathBuf;

use async_trait::async_trait;

use super::{sha256_hex, ParsedHosts};
use crate::config::{ConfigSource, ConfigVersion, LoadedHosts};
use crate::error::HostswitchError;

type ParseFn = fn(&str) -> Result<ParsedHosts, Box<dyn std::error::Error + Send + Sync>>;

pub struct FileSource {
    path: PathBuf,
    name: &'static str,
    parse: ParseFn,
}

impl FileSource {
    #[must_use]
    pub fn new(path: PathBuf, name: &'static str, parse: ParseFn) -> Self {
        Self { path, name, parse }
    }

    async fn read_content(&self) -> Result<String, HostswitchError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| HostswitchError::ConfigRead {
                path: self.path.clone(),
                source,
            })
    }
}

#[async_trait]
impl ConfigSource for FileSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn load(&self) -> Result<LoadedHosts, HostswitchError> {
        let content = self.read_content().await?;
        let path_display = self.path.display().to_string();

        let parsed = (self.parse)(&content).map_err(|source| HostswitchError::ConfigParse {
            path: path_display.clone(),
            source,
        })?;

        for rejected in &parsed.rejected {
            tracing::warn!(
                path = %path_display,
                entry = %rejected.entry,
                field = %rejected.field,
                reason = %rejected.message,
                "dropping invalid host entry"
            );
        }

        if parsed.elements.is_empty() {
            return Err(HostswitchError::EmptyConfig { path: path_display });
        }

        tracing::debug!(
            path = %path_display,
            hosts = parsed.elements.len(),
            rejected = parsed.rejected.len(),
            "host config parsed"
        );

        let version = ConfigVersion::Hash(sha256_hex(content.as_bytes()));
        Ok(LoadedHosts::new(parsed.elements, version, self.name))
    }
}
