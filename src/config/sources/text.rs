//! Line-oriented text host config backed by [`FileSource`].
//!
//! Each line is `label,tag,host[,scheme[,type]]`. The optional fifth
//! field is `url` or `dns:<ipv4>`; anything else there degrades the line
//! to url mode instead of dropping it. Empty lines and lines starting
//! with `#` or `//` are comments.

use std::path::PathBuf;

use super::file_source::FileSource;
use super::ParsedHosts;
use crate::config::model::HostElement;
use crate::config::validation::parse_dotted_quad;
use crate::error::ValidationError;

const LINE_FORMAT: &str = "label,tag,host[,scheme[,url|dns:<ipv4>]]";

#[must_use]
pub fn new(path: PathBuf) -> FileSource {
    FileSource::new(path, "txt", |content| Ok(parse(content)))
}

#[must_use]
pub fn parse(content: &str) -> ParsedHosts {
    let mut parsed = ParsedHosts::default();

    for (i, line) in content.lines().enumerate() {
        if is_comment(line) {
            continue;
        }
        match parse_line(line) {
            Ok(element) => parsed.elements.push(element),
            Err(mut rejected) => {
                rejected.entry = format!("line {}", i + 1);
                parsed.rejected.push(rejected);
            }
        }
    }

    parsed
}

fn is_comment(line: &str) -> bool {
    line.is_empty() || line.starts_with('#') || line.starts_with("//")
}

/// Parse one non-comment line.
pub fn parse_line(line: &str) -> Result<HostElement, ValidationError> {
    let fields: Vec<&str> = line.split(',').collect();

    match fields.as_slice() {
        [label, tag, host] => Ok(HostElement::new(*label, *tag, *host)),
        [label, tag, host, scheme] => Ok(HostElement::new(*label, *tag, *host).with_scheme(*scheme)),
        [label, tag, host, scheme, type_data] => {
            let element = HostElement::new(*label, *tag, *host).with_scheme(*scheme);
            Ok(match dns_address(type_data) {
                Some(address) => element.with_dns_address(address),
                None => element,
            })
        }
        _ => Err(ValidationError {
            entry: String::new(),
            field: "fields".into(),
            message: format!(
                "expected 3 to 5 comma-separated fields, found {}",
                fields.len()
            ),
            suggestion: Some(LINE_FORMAT.into()),
        }),
    }
}

/// The address of a `dns:<ipv4>` type field, `None` for every other value.
fn dns_address(type_data: &str) -> Option<String> {
    let lowered = type_data.to_lowercase();
    let (mode, data) = lowered.split_once(':')?;
    (mode == "dns" && parse_dotted_quad(data).is_some()).then(|| data.to_string())
}
