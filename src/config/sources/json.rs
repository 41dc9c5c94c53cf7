//! Structured JSON host config backed by [`FileSource`].
//!
//! The document is an array of objects. Each object is validated on its
//! own; a bad entry is rejected without affecting its neighbours, while a
//! document that is not an array fails as a whole.

use std::path::PathBuf;

use super::file_source::FileSource;
use super::ParsedHosts;
use crate::config::model::{HostElement, RawHostEntry};
use crate::config::validation::{parse_dotted_quad, require_field};
use crate::error::ValidationError;

#[must_use]
pub fn new(path: PathBuf) -> FileSource {
    FileSource::new(path, "json", |content| {
        parse(content).map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)
    })
}

pub fn parse(content: &str) -> Result<ParsedHosts, serde_json::Error> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(content)?;
    let mut parsed = ParsedHosts::default();

    for (i, value) in entries.into_iter().enumerate() {
        let entry_id = format!("entries[{i}]");
        match parse_entry(&entry_id, value) {
            Ok(element) => parsed.elements.push(element),
            Err(rejected) => parsed.rejected.push(rejected),
        }
    }

    Ok(parsed)
}

fn parse_entry(entry_id: &str, value: serde_json::Value) -> Result<HostElement, ValidationError> {
    let raw: RawHostEntry = serde_json::from_value(value).map_err(|e| ValidationError {
        entry: entry_id.to_string(),
        field: "(entry)".into(),
        message: e.to_string(),
        suggestion: Some(r#"expected {"label", "tag", "host", ...} with string values"#.into()),
    })?;

    let scheme = raw.scheme().to_string();
    let dns_mode = raw.mode().eq_ignore_ascii_case("dns");
    // Only the first valid candidate is used.
    let address = raw
        .inet_candidates()
        .find(|candidate| parse_dotted_quad(candidate).is_some())
        .map(str::to_string);

    let label = require_field(entry_id, "label", raw.label)?;
    let tag = require_field(entry_id, "tag", raw.tag)?;
    let host = require_field(entry_id, "host", raw.host)?;

    let element = HostElement::new(label, tag, host).with_scheme(scheme);

    if !dns_mode {
        return Ok(element);
    }

    match address {
        Some(address) => Ok(element.with_dns_address(address)),
        None => {
            tracing::warn!(
                entry = %entry_id,
                tag = %element.tag(),
                "dns mode without a valid inet address, using url mode"
            );
            Ok(element)
        }
    }
}
