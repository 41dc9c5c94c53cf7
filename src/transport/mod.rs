//! Transport integration: DNS overrides, request routing, client assembly.
//!
//! The registry is consulted on every outbound request from two places:
//! the connector's resolver ([`dns`]) and the request routing seam
//! ([`routing`]). [`client`] puts both around a hyper client.

pub mod client;
pub mod dns;
pub mod routing;

pub use client::{build_http_client, HttpClient, RoutedClient};
pub use dns::OverrideResolver;
pub use routing::{route_request, Routing, RoutingLayer};
