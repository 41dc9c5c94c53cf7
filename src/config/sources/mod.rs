//! Concrete [`ConfigSource`](super::ConfigSource) implementations.
//!
//! Provides the structured JSON source, the line-oriented text source,
//! both backed by [`file_source::FileSource`], and the
//! [`parse_config_str`] helper for format-specific parsing.

pub mod file_source;
pub mod json;
pub mod text;

use sha2::{Digest, Sha256};

use crate::config::model::HostElement;
use crate::error::{HostswitchError, ValidationError};

/// Output of a format parser: accepted elements in file order plus a
/// record for every entry that was dropped.
#[derive(Debug, Clone, Default)]
pub struct ParsedHosts {
    pub elements: Vec<HostElement>,
    pub rejected: Vec<ValidationError>,
}

/// Parse a config string based on file extension.
pub fn parse_config_str(
    ext: &str,
    content: &str,
    path_display: &str,
) -> Result<ParsedHosts, HostswitchError> {
    match ext {
        "json" => json::parse(content).map_err(|e| HostswitchError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        "txt" | "conf" => Ok(text::parse(content)),

        other => Err(HostswitchError::UnsupportedFormat(other.to_string())),
    }
}

/// Compute a lowercase hex-encoded SHA-256 digest.
#[must_use]
pub fn sha256_hex(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}
