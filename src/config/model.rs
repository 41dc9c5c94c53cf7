//! Host definitions and the serde shape of the structured config file.
//!
//! Contains [`HostElement`] (one selectable backend), [`HostMode`], and
//! [`RawHostEntry`], the lenient deserialization target for a single
//! object of the JSON config array.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::HostswitchError;

pub const SCHEME_HTTP: &str = "http";
pub const SCHEME_HTTPS: &str = "https";

const PORT_HTTP: u16 = 80;
const PORT_HTTPS: u16 = 443;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostMode {
    /// Connect to `host` normally.
    #[default]
    Url,
    /// Connections to `host` resolve to the element's fixed address.
    Dns,
}

impl std::fmt::Display for HostMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url => f.write_str("url"),
            Self::Dns => f.write_str("dns"),
        }
    }
}

/// One named, selectable backend target.
///
/// Identity is the `tag`: equality and hashing ignore every other field,
/// so two differently configured elements sharing a tag compare equal.
/// Lookups and replace-if-present upserts depend on this; do not rely on
/// `==` for field-by-field comparison.
#[derive(Debug, Clone, Serialize)]
pub struct HostElement {
    label: String,
    tag: String,
    host: String,
    scheme: String,
    mode: HostMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<String>,
}

impl HostElement {
    /// An `https` element in [`HostMode::Url`].
    #[must_use]
    pub fn new(label: impl Into<String>, tag: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            tag: tag.into(),
            host: host.into(),
            scheme: SCHEME_HTTPS.to_string(),
            mode: HostMode::Url,
            address: None,
        }
    }

    #[must_use]
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Switch to [`HostMode::Dns`] with a fixed address.
    #[must_use]
    pub fn with_dns_address(mut self, address: impl Into<String>) -> Self {
        self.mode = HostMode::Dns;
        self.address = Some(address.into());
        self
    }

    pub fn set_scheme(&mut self, scheme: impl Into<String>) {
        self.scheme = scheme.into();
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    #[must_use]
    pub const fn mode(&self) -> HostMode {
        self.mode
    }

    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Default TCP port for the element's scheme.
    pub fn port(&self) -> Result<u16, HostswitchError> {
        port_for_scheme(&self.scheme)
    }
}

impl PartialEq for HostElement {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
    }
}

impl Eq for HostElement {}

impl Hash for HostElement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag.hash(state);
    }
}

impl std::fmt::Display for HostElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}://{}",
            self.label, self.tag, self.scheme, self.host
        )?;
        if let (HostMode::Dns, Some(address)) = (self.mode, &self.address) {
            write!(f, " -> {address}")?;
        }
        Ok(())
    }
}

pub fn port_for_scheme(scheme: &str) -> Result<u16, HostswitchError> {
    if scheme.eq_ignore_ascii_case(SCHEME_HTTP) {
        Ok(PORT_HTTP)
    } else if scheme.eq_ignore_ascii_case(SCHEME_HTTPS) {
        Ok(PORT_HTTPS)
    } else {
        Err(HostswitchError::UnsupportedProtocol(scheme.to_string()))
    }
}

const JSON_MODE_DEFAULT: &str = "url";

/// One object of the structured config array, before validation.
///
/// Required fields are optional here so a missing field becomes a
/// rejection record instead of a deserialization failure. Optional
/// fields are kept as raw values: a wrong type falls back to the default
/// instead of dropping the entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RawHostEntry {
    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub tag: Option<String>,

    #[serde(default)]
    pub host: Option<String>,

    #[serde(default)]
    pub scheme: Option<serde_json::Value>,

    #[serde(default)]
    pub mode: Option<serde_json::Value>,

    #[serde(default)]
    pub inet: Option<serde_json::Value>,
}

impl RawHostEntry {
    /// `scheme` when it is a string, `http` otherwise.
    #[must_use]
    pub fn scheme(&self) -> &str {
        self.scheme
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .unwrap_or(SCHEME_HTTP)
    }

    /// `mode` when it is a string, `url` otherwise.
    #[must_use]
    pub fn mode(&self) -> &str {
        self.mode
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .unwrap_or(JSON_MODE_DEFAULT)
    }

    /// String members of the `inet` array. Anything but an array has none.
    pub fn inet_candidates(&self) -> impl Iterator<Item = &str> {
        self.inet
            .as_ref()
            .and_then(serde_json::Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(serde_json::Value::as_str)
    }
}
