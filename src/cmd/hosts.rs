//! `hostswitch hosts` — list the effective host list.
//!
//! Prints configured hosts followed by `--add` overrides, marking the
//! selected one, in human-readable text or JSON.

use crate::cli::{HostsArgs, OutputFormat};
use crate::config::ConfigVersion;
use crate::error::HostswitchError;

use super::Session;

pub async fn execute(args: &HostsArgs) -> Result<(), HostswitchError> {
    let session = Session::open(&args.selection).await?;
    let registry = &session.registry;

    let snapshot = registry.store().snapshot();
    let elements = registry.host_elements();
    let selected = registry.selected_host();
    let ConfigVersion::Hash(ref version) = snapshot.version;

    match args.format {
        OutputFormat::Text => {
            for element in &elements {
                let marker = if selected.as_ref() == Some(element) {
                    "*"
                } else {
                    " "
                };
                println!("{marker} {element}");
            }
            println!(
                "\n  {} hosts from {} (version {})",
                elements.len(),
                snapshot.source_name,
                version.get(..8).unwrap_or(version)
            );
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "source": snapshot.source_name,
                    "version": version,
                    "selected": selected.as_ref().map(|e| e.tag()),
                    "hosts": elements,
                })
            );
        }
    }

    session.close();
    Ok(())
}
