//! `hostswitch validate` — check a host config file for errors.
//!
//! Parses the file with the parser matching its extension and reports
//! accepted hosts and rejected entries, as text or JSON. A file with no
//! usable host at all is an error.

use crate::cli::{OutputFormat, ValidateArgs};
use crate::config::sources::parse_config_str;
use crate::config::validation;
use crate::error::HostswitchError;

pub fn execute(args: &ValidateArgs) -> Result<(), HostswitchError> {
    let path = &args.config;
    let path_display = path.display().to_string();

    let content =
        std::fs::read_to_string(path).map_err(|source| HostswitchError::ConfigRead {
            path: path.clone(),
            source,
        })?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let parsed = parse_config_str(ext, &content, &path_display)?;

    match args.format {
        OutputFormat::Text => {
            if parsed.elements.is_empty() {
                eprintln!("\u{2717} {path_display} has no valid hosts\n");
                for rejected in &parsed.rejected {
                    eprintln!("{rejected}");
                }
            } else {
                println!(
                    "\u{2713} {}",
                    validation::format_validation_report(&path_display, &parsed)
                );
            }
        }
        OutputFormat::Json => {
            let rejected: Vec<serde_json::Value> = parsed
                .rejected
                .iter()
                .map(|e| {
                    serde_json::json!({
                        "entry": e.entry,
                        "field": e.field,
                        "message": e.message,
                        "suggestion": e.suggestion,
                    })
                })
                .collect();
            println!(
                "{}",
                serde_json::json!({
                    "valid": !parsed.elements.is_empty(),
                    "hosts": parsed.elements,
                    "rejected": rejected,
                })
            );
        }
    }

    if parsed.elements.is_empty() {
        return Err(HostswitchError::EmptyConfig { path: path_display });
    }
    Ok(())
}
