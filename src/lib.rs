//! Hostswitch lets an HTTP client switch its backend host at runtime.
//!
//! A list of named backend hosts is loaded from a host config file
//! (`host_config.json`, falling back to `host_config.txt`). Each client
//! gets its own [`HostRegistry`](registry::HostRegistry) holding a
//! selection and any runtime overrides. Outbound traffic consults the
//! registry in two places: the connector's DNS resolver, which pins
//! configured hostnames to the selected host's address, and the request
//! routing seam, which rewrites requests aimed at a configured host to the
//! selected one.
//!
//! # Architecture
//!
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution (hosts, validate, resolve, fetch).
//! - [`config`] -- Host config model, parsing, validation, and the
//!   [`ConfigSource`](config::ConfigSource) fallback chain.
//! - [`error`] -- Unified error types using `thiserror`.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print output.
//! - [`registry`] -- Shared config store, per-client registries, and the
//!   registry pool keyed by client handle.
//! - [`transport`] -- Override DNS resolver, request routing layer, and
//!   hyper client assembly.

// Binary crate — public functions are internal, not consumed by external users.
#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod logging;
pub mod registry;
pub mod transport;
