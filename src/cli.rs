//! Command-line interface definitions using clap derive macros.
//!
//! Contains the top-level [`Cli`] parser, the [`Commands`] enum for
//! subcommands (hosts, validate, resolve, fetch), and their argument
//! structs. Config directory and selection have environment variable
//! equivalents so a wrapper script can pin an environment.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "hostswitch",
    version,
    about = "Runtime backend host switching for HTTP clients",
    propagate_version = true,
    after_help = "\x1b[1mQuick start:\x1b[0m\n  \
        hostswitch hosts -d assets                  List configured hosts\n  \
        hostswitch validate assets/host_config.txt  Check a config file\n  \
        hostswitch fetch https://api.example.com/ping -s staging"
)]
pub struct Cli {
    #[command(flatten)]
    pub log: LogArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the effective host list and the current selection
    Hosts(HostsArgs),

    /// Validate a host config file without loading it
    Validate(ValidateArgs),

    /// Resolve a hostname the way the override resolver would
    Resolve(ResolveArgs),

    /// Send a GET request through the routed client
    Fetch(FetchArgs),
}

#[derive(Args)]
pub struct LogArgs {
    /// Log level
    #[arg(short, long, env = "LOG_LEVEL", default_value = "warn", global = true)]
    pub log_level: LogLevel,

    /// Force pretty (human-readable) log output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Force JSON log output (overrides TTY detection)
    #[arg(long, conflicts_with = "pretty", global = true)]
    pub json_logs: bool,
}

#[derive(Args)]
pub struct SelectionArgs {
    /// Directory holding host_config.json and/or host_config.txt
    #[arg(short = 'd', long, env = "HOSTSWITCH_CONFIG_DIR", default_value = ".")]
    pub config_dir: PathBuf,

    /// Tag of the host to select
    #[arg(short, long, env = "HOSTSWITCH_SELECT")]
    pub select: Option<String>,

    /// Extra host for this run, as a text config line (repeatable)
    #[arg(long = "add", value_name = "LINE")]
    pub overrides: Vec<String>,
}

#[derive(Args)]
pub struct HostsArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Config file to validate (.json or .txt)
    #[arg(default_value = "host_config.json")]
    pub config: PathBuf,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Hostname to resolve
    pub hostname: String,

    #[command(flatten)]
    pub selection: SelectionArgs,
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        hostswitch fetch https://api.example.com/ping -s prod\n  \
        hostswitch fetch http://api.example.com/ping --add 'Local,local,127.0.0.1:8080,http' -s local")]
pub struct FetchArgs {
    /// Request URL (http or https)
    pub url: String,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
