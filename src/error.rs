//! Unified error types for hostswitch.
//!
//! Defines [`HostswitchError`] (the main crate error enum) and
//! [`ValidationError`], the record kept for every config entry the
//! loader drops. Both use `thiserror`-style `Display` output and carry
//! contextual hints where a fix is obvious.

use std::path::PathBuf;

/// A single config entry that was rejected while parsing.
///
/// Rejections never abort loading; they are logged and collected so the
/// `validate` command can show them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub entry: String,
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "  {}: {}: {}", self.entry, self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " ({suggestion})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum HostswitchError {
    #[error("Cannot read host config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Host config parse error in {path}:\n  {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Host config {path} has no valid entries")]
    EmptyConfig { path: String },

    #[error("Unsupported config format: '{0}' (expected json or txt)")]
    UnsupportedFormat(String),

    #[error("Invalid hostname: '{0}'")]
    InvalidHostname(String),

    #[error("Unsupported protocol: '{0}' (expected http or https)")]
    UnsupportedProtocol(String),

    #[error("Invalid URI: {source}")]
    UriParse {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("HTTP request failed: {source}")]
    HttpRequest {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl HostswitchError {
    /// Whether the loader should move on to its lower-precedence source.
    #[must_use]
    pub const fn triggers_fallback(&self) -> bool {
        matches!(
            self,
            Self::ConfigRead { .. } | Self::ConfigParse { .. } | Self::EmptyConfig { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_display_includes_suggestion() {
        let err = ValidationError {
            entry: "line 3".into(),
            field: "fields".into(),
            message: "expected 3 to 5 comma-separated fields, found 2".into(),
            suggestion: Some("label,tag,host[,scheme[,type]]".into()),
        };
        assert_eq!(
            err.to_string(),
            "  line 3: fields: expected 3 to 5 comma-separated fields, found 2 \
             (label,tag,host[,scheme[,type]])"
        );
    }

    #[test]
    fn read_parse_and_empty_errors_trigger_fallback() {
        let read = HostswitchError::ConfigRead {
            path: "host_config.json".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        let empty = HostswitchError::EmptyConfig {
            path: "host_config.json".into(),
        };
        assert!(read.triggers_fallback());
        assert!(empty.triggers_fallback());
        assert!(!HostswitchError::InvalidHostname(String::new()).triggers_fallback());
    }
}
