//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function installs logging and routes the parsed CLI
//! to the appropriate subcommand handler: [`hosts`], [`validate`],
//! [`resolve`], or [`fetch`]. Commands that need a registry open a
//! [`Session`], which plays the role of one client: it loads the host
//! config, obtains a registry from a pool, and applies `--add`/`--select`.

pub mod fetch;
pub mod hosts;
pub mod resolve;
pub mod validate;

use std::sync::Arc;

use crate::cli::{Cli, Commands, SelectionArgs};
use crate::config::sources::text;
use crate::config::ConfigLoader;
use crate::error::HostswitchError;
use crate::logging;
use crate::registry::{ClientHandle, ConfigStore, HostRegistry, RegistryPool};

pub async fn dispatch(cli: Cli) -> Result<(), HostswitchError> {
    let log_format = logging::resolve_format(cli.log.pretty, cli.log.json_logs);
    logging::init(&cli.log.log_level, log_format);

    match cli.command {
        Some(Commands::Hosts(ref args)) => hosts::execute(args).await,
        Some(Commands::Validate(ref args)) => validate::execute(args),
        Some(Commands::Resolve(ref args)) => resolve::execute(args).await,
        Some(Commands::Fetch(ref args)) => fetch::execute(args).await,
        None => {
            print_welcome();
            Ok(())
        }
    }
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "\n  hostswitch v{version} \u{2014} runtime backend host switching\n\n  \
         No command provided. To get started:\n\n    \
         hostswitch hosts -d DIR               List hosts from DIR/host_config.(json|txt)\n    \
         hostswitch validate FILE              Check a host config file\n    \
         hostswitch resolve HOST -s TAG        Show the address HOST resolves to\n    \
         hostswitch fetch URL -s TAG           Send a GET through the routed client\n    \
         hostswitch --help                     See all commands and options\n"
    );
}

/// One client's view of the host config for the duration of a command.
pub struct Session {
    pool: RegistryPool,
    handle: ClientHandle,
    pub registry: Arc<HostRegistry>,
}

impl Session {
    pub async fn open(args: &SelectionArgs) -> Result<Self, HostswitchError> {
        let store = Arc::new(ConfigStore::new());
        store.load(ConfigLoader::new(&args.config_dir).load().await);

        let pool = RegistryPool::new(store);
        let handle = ClientHandle::new();
        let registry = pool.obtain(handle);

        for line in &args.overrides {
            let element = text::parse_line(line).map_err(|e| HostswitchError::ConfigParse {
                path: "--add".into(),
                source: Box::new(e),
            })?;
            registry.add_override(element);
        }

        if let Some(tag) = args.select.as_deref().filter(|t| !t.is_empty()) {
            registry.select(tag);
            if registry.selected_host().is_none() {
                tracing::warn!(tag = %tag, "selected tag matches no known host");
            }
        }

        Ok(Self {
            pool,
            handle,
            registry,
        })
    }

    pub fn close(self) {
        self.pool.release(self.handle);
    }
}
