//! HTTP client assembly.
//!
//! [`build_http_client`] wires one registry into a connection-pooled
//! hyper client: the [`OverrideResolver`] sits under the TLS connector,
//! and the [`Routing`] layer sits in front of the client.
//!
//! Pooled connections are keyed by request authority, so a connection
//! opened before a dns-mode selection change is reused until it idles out.

use std::sync::Arc;
use std::time::Duration;

use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

use super::dns::OverrideResolver;
use super::routing::Routing;
use crate::registry::HostRegistry;

pub type HttpsConnector = hyper_rustls::HttpsConnector<HttpConnector<OverrideResolver>>;
pub type HttpClient = Client<HttpsConnector, http_body_util::Full<bytes::Bytes>>;
pub type RoutedClient = Routing<HttpClient>;

#[must_use]
pub fn build_http_client(registry: Arc<HostRegistry>) -> RoutedClient {
    // When multiple rustls crypto providers are compiled in, rustls cannot
    // auto-detect which one to use. Explicitly install `ring`.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let mut http = HttpConnector::new_with_resolver(OverrideResolver::new(Arc::clone(&registry)));
    http.enforce_http(false);

    let https = hyper_rustls::HttpsConnectorBuilder::new()
        .with_webpki_roots()
        .https_or_http()
        .enable_http1()
        .wrap_connector(http);

    let client = Client::builder(TokioExecutor::new())
        .pool_idle_timeout(Duration::from_secs(30))
        .build(https);

    Routing::new(client, registry)
}
