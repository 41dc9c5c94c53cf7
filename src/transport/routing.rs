//! Request routing seam between callers and the HTTP transport.
//!
//! [`Routing`] wraps any `tower::Service<http::Request<B>>` (normally the
//! hyper client) and passes each request through [`route_request`] before
//! delegating. When the selected host is in url mode and the request
//! targets a known host, the request's scheme and authority are rewritten
//! to the selected host. In every other case the request is untouched.

use std::sync::Arc;
use std::task::{Context, Poll};

use http::header::HOST;
use http::uri::{PathAndQuery, Uri};
use http::{HeaderValue, Request};
use tower::{Layer, Service, ServiceExt};

use crate::config::model::{HostElement, HostMode};
use crate::registry::HostRegistry;

/// Rewrite `request` towards the selected host. Returns whether it changed.
pub fn route_request<B>(registry: &HostRegistry, request: &mut Request<B>) -> bool {
    let Some(selected) = registry.selected_host() else {
        return false;
    };
    if selected.mode() != HostMode::Url {
        return false;
    }
    if !targets_known_host(registry, request.uri()) {
        return false;
    }
    if let Err(e) = selected.port() {
        tracing::warn!(tag = %selected.tag(), error = %e, "not routing to selected host");
        return false;
    }

    let (authority, uri) = match rewrite_uri(request.uri(), &selected) {
        Ok(rewritten) => rewritten,
        Err(e) => {
            tracing::warn!(
                tag = %selected.tag(),
                uri = %request.uri(),
                error = %e,
                "cannot build routed uri"
            );
            return false;
        }
    };

    tracing::debug!(from = %request.uri(), to = %uri, tag = %selected.tag(), "routing request");

    if request.headers().contains_key(HOST) {
        if let Ok(value) = HeaderValue::from_str(authority) {
            request.headers_mut().insert(HOST, value);
        }
    }
    *request.uri_mut() = uri;
    true
}

fn targets_known_host(registry: &HostRegistry, uri: &Uri) -> bool {
    let Some(host) = uri.host() else {
        return false;
    };
    if registry.is_host_configured(host) {
        return true;
    }
    // Elements may carry an explicit port, e.g. `10.0.2.2:8080`.
    uri.authority()
        .map(|a| a.as_str())
        .is_some_and(|authority| authority != host && registry.is_host_configured(authority))
}

/// Build the routed URI. The selected `host` may carry a path prefix
/// (`api.example.com/v2`), which is prepended to the request path.
fn rewrite_uri<'a>(uri: &Uri, selected: &'a HostElement) -> Result<(&'a str, Uri), http::Error> {
    let (authority, prefix) = match selected.host().split_once('/') {
        Some((authority, prefix)) => (authority, prefix.trim_matches('/')),
        None => (selected.host(), ""),
    };

    let path_and_query = uri.path_and_query().map_or("/", PathAndQuery::as_str);
    let path_and_query = if prefix.is_empty() {
        path_and_query.to_string()
    } else {
        format!("/{prefix}{path_and_query}")
    };

    let uri = Uri::builder()
        .scheme(selected.scheme().to_ascii_lowercase().as_str())
        .authority(authority)
        .path_and_query(path_and_query)
        .build()?;
    Ok((authority, uri))
}

#[derive(Debug, Clone)]
pub struct RoutingLayer {
    registry: Arc<HostRegistry>,
}

impl RoutingLayer {
    #[must_use]
    pub fn new(registry: Arc<HostRegistry>) -> Self {
        Self { registry }
    }
}

impl<S> Layer<S> for RoutingLayer {
    type Service = Routing<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Routing::new(inner, Arc::clone(&self.registry))
    }
}

#[derive(Debug, Clone)]
pub struct Routing<S> {
    inner: S,
    registry: Arc<HostRegistry>,
}

impl<S> Routing<S> {
    #[must_use]
    pub fn new(inner: S, registry: Arc<HostRegistry>) -> Self {
        Self { inner, registry }
    }

    /// Route and send one request on a clone of this service.
    pub async fn send<B>(&self, request: Request<B>) -> Result<S::Response, S::Error>
    where
        S: Service<Request<B>> + Clone,
    {
        self.clone().oneshot(request).await
    }
}

impl<S, B> Service<Request<B>> for Routing<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<B>) -> Self::Future {
        route_request(&self.registry, &mut request);
        self.inner.call(request)
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::*;
    use crate::config::LoadedHosts;
    use crate::registry::ConfigStore;

    fn registry() -> Arc<HostRegistry> {
        let store = Arc::new(ConfigStore::with_hosts(LoadedHosts::from_elements(
            vec![
                HostElement::new("Prod", "prod", "api.example.com"),
                HostElement::new("Staging", "staging", "staging.example.com/v2")
                    .with_scheme("http"),
                HostElement::new("Prod DNS", "prod-dns", "api.example.com")
                    .with_dns_address("203.0.113.5"),
                HostElement::new("Gopher", "gopher", "gopher.example.com").with_scheme("gopher"),
                HostElement::new("Emulator", "emulator", "10.0.2.2:8080").with_scheme("http"),
            ],
            "test",
        )));
        Arc::new(HostRegistry::new(store))
    }

    fn get(uri: &str) -> Request<()> {
        Request::get(uri).body(()).unwrap()
    }

    #[test]
    fn pass_through_without_selection() {
        let registry = registry();
        let mut request = get("https://api.example.com/users?page=2");
        assert!(!route_request(&registry, &mut request));
        assert_eq!(request.uri(), "https://api.example.com/users?page=2");
    }

    #[test]
    fn pass_through_for_dns_selection() {
        let registry = registry();
        registry.select("prod-dns");
        let mut request = get("https://api.example.com/users");
        assert!(!route_request(&registry, &mut request));
        assert_eq!(request.uri(), "https://api.example.com/users");
    }

    #[test]
    fn pass_through_for_unknown_host() {
        let registry = registry();
        registry.select("staging");
        let mut request = get("https://www.example.org/users");
        assert!(!route_request(&registry, &mut request));
        assert_eq!(request.uri(), "https://www.example.org/users");
    }

    #[test]
    fn pass_through_for_unsupported_scheme() {
        let registry = registry();
        registry.select("gopher");
        let mut request = get("https://api.example.com/users");
        assert!(!route_request(&registry, &mut request));
        assert_eq!(request.uri(), "https://api.example.com/users");
    }

    #[test]
    fn url_selection_rewrites_scheme_authority_and_prefix() {
        let registry = registry();
        registry.select("staging");
        let mut request = get("https://api.example.com/users?page=2");
        assert!(route_request(&registry, &mut request));
        assert_eq!(
            request.uri(),
            "http://staging.example.com/v2/users?page=2"
        );
    }

    #[test]
    fn url_selection_updates_existing_host_header() {
        let registry = registry();
        registry.select("emulator");
        let mut request = Request::get("https://api.example.com/")
            .header(HOST, "api.example.com")
            .body(())
            .unwrap();
        assert!(route_request(&registry, &mut request));
        assert_eq!(request.uri(), "http://10.0.2.2:8080/");
        assert_eq!(request.headers()[HOST], "10.0.2.2:8080");
    }

    #[test]
    fn known_host_with_port_is_matched_by_authority() {
        let registry = registry();
        registry.select("prod");
        let mut request = get("http://10.0.2.2:8080/health");
        assert!(route_request(&registry, &mut request));
        assert_eq!(request.uri(), "https://api.example.com/health");
    }

    #[tokio::test]
    async fn layer_routes_before_inner_service() {
        let registry = registry();
        registry.select("staging");
        let inner = tower::service_fn(|request: Request<()>| async move {
            Ok::<_, Infallible>(request.uri().to_string())
        });
        let routed = RoutingLayer::new(Arc::clone(&registry)).layer(inner);

        let seen = routed.send(get("https://api.example.com/ping")).await.unwrap();
        assert_eq!(seen, "http://staging.example.com/v2/ping");

        registry.select("");
        let seen = routed.send(get("https://api.example.com/ping")).await.unwrap();
        assert_eq!(seen, "https://api.example.com/ping");
    }
}
