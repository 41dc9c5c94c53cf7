//! Entry-level validation for host config files.
//!
//! [`parse_dotted_quad`] is the strict IPv4 check shared by both config
//! formats: exactly four dot-separated decimal octets of one to three
//! digits, each at most 255. [`require_field`] produces the
//! [`ValidationError`] recorded when a required field is missing, and
//! [`format_validation_report`] renders a parse result for the
//! `validate` command.

use std::net::Ipv4Addr;

use super::sources::ParsedHosts;
use crate::error::ValidationError;

/// Parse a strict dotted-quad IPv4 literal.
///
/// Leading zeros are accepted (`010.000.000.001`), signs, whitespace,
/// empty octets and values above 255 are not.
#[must_use]
pub fn parse_dotted_quad(s: &str) -> Option<Ipv4Addr> {
    let mut octets = [0u8; 4];
    let mut parts = s.split('.');
    for octet in &mut octets {
        let part = parts.next()?;
        if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *octet = part.parse::<u16>().ok().and_then(|v| u8::try_from(v).ok())?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(Ipv4Addr::from(octets))
}

#[must_use]
pub fn is_dotted_quad(s: &str) -> bool {
    parse_dotted_quad(s).is_some()
}

/// Require a present, non-empty string field.
pub fn require_field(
    entry: &str,
    field: &str,
    value: Option<String>,
) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        Some(_) => Err(ValidationError {
            entry: entry.to_string(),
            field: field.to_string(),
            message: format!("'{field}' cannot be empty"),
            suggestion: None,
        }),
        None => Err(ValidationError {
            entry: entry.to_string(),
            field: field.to_string(),
            message: format!("'{field}' is required"),
            suggestion: None,
        }),
    }
}

#[must_use]
pub fn format_validation_report(path: &str, parsed: &ParsedHosts) -> String {
    let mut lines = vec![format!(
        "  {} hosts, {} rejected\n",
        parsed.elements.len(),
        parsed.rejected.len()
    )];

    for element in &parsed.elements {
        lines.push(format!("  {element}"));
    }

    if !parsed.rejected.is_empty() {
        lines.push(String::new());
        lines.push("  rejected:".to_string());
        for rejected in &parsed.rejected {
            lines.push(format!("  {rejected}"));
        }
    }

    format!("{} is valid\n{}", path, lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert_eq!(
            parse_dotted_quad("203.0.113.5"),
            Some(Ipv4Addr::new(203, 0, 113, 5))
        );
        assert!(is_dotted_quad("0.0.0.0"));
        assert!(is_dotted_quad("255.255.255.255"));
    }

    #[test]
    fn accepts_leading_zeros() {
        assert_eq!(
            parse_dotted_quad("010.000.000.001"),
            Some(Ipv4Addr::new(10, 0, 0, 1))
        );
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in [
            "",
            "256.0.0.1",
            "1.2.3",
            "1.2.3.4.5",
            "1..2.3",
            "1.2.3.4 ",
            "+1.2.3.4",
            "0001.2.3.4",
            "a.b.c.d",
            "::1",
            "example.com",
        ] {
            assert!(!is_dotted_quad(bad), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn require_field_rejects_missing_and_empty() {
        assert_eq!(
            require_field("entries[0]", "tag", Some("dev".into())).unwrap(),
            "dev"
        );

        let missing = require_field("entries[0]", "tag", None).unwrap_err();
        assert!(missing.message.contains("required"));

        let empty = require_field("entries[1]", "host", Some(String::new())).unwrap_err();
        assert_eq!(empty.entry, "entries[1]");
        assert!(empty.message.contains("cannot be empty"));
    }
}
