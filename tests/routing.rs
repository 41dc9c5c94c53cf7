//! Integration tests for the request routing seam.

use std::convert::Infallible;
use std::sync::Arc;

use http::{Request, Response};
use tower::{service_fn, Layer, ServiceExt};

use hostswitch::config::model::HostElement;
use hostswitch::config::LoadedHosts;
use hostswitch::registry::{ConfigStore, HostRegistry};
use hostswitch::transport::{route_request, RoutingLayer};

fn registry() -> Arc<HostRegistry> {
    let store = Arc::new(ConfigStore::with_hosts(LoadedHosts::from_elements(
        vec![
            HostElement::new("Production", "prod", "api.example.com"),
            HostElement::new("Staging", "staging", "staging.example.com/v2"),
            HostElement::new("Pinned", "pinned", "api.example.com")
                .with_dns_address("203.0.113.10"),
        ],
        "test",
    )));
    Arc::new(HostRegistry::new(store))
}

#[test]
fn url_selection_rewrites_known_hosts_only() {
    let registry = registry();
    registry.select("staging");

    let mut known = Request::get("https://api.example.com/users?page=2")
        .header("host", "api.example.com")
        .body(())
        .unwrap();
    assert!(route_request(&registry, &mut known));
    assert_eq!(known.uri(), "https://staging.example.com/v2/users?page=2");
    assert_eq!(known.headers()["host"], "staging.example.com");

    let mut unknown = Request::get("https://other.example.org/users").body(()).unwrap();
    assert!(!route_request(&registry, &mut unknown));
    assert_eq!(unknown.uri(), "https://other.example.org/users");
}

#[test]
fn dns_selection_leaves_requests_alone() {
    let registry = registry();
    registry.select("pinned");

    let mut request = Request::get("https://api.example.com/users").body(()).unwrap();
    assert!(!route_request(&registry, &mut request));
    assert_eq!(request.uri(), "https://api.example.com/users");
}

#[test]
fn override_becomes_routing_target() {
    let registry = registry();
    registry.add_override(HostElement::new("Local", "local", "127.0.0.1:8080").with_scheme("http"));
    registry.select("local");

    let mut request = Request::post("https://api.example.com/orders").body(()).unwrap();
    assert!(route_request(&registry, &mut request));
    assert_eq!(request.uri(), "http://127.0.0.1:8080/orders");
    assert_eq!(request.method(), http::Method::POST);
}

#[tokio::test]
async fn layer_routes_before_inner_service() {
    let registry = registry();
    let service = RoutingLayer::new(Arc::clone(&registry)).layer(service_fn(
        |req: Request<()>| async move {
            Ok::<_, Infallible>(Response::new(req.uri().to_string()))
        },
    ));

    let seen = service
        .clone()
        .oneshot(Request::get("https://api.example.com/a").body(()).unwrap())
        .await
        .unwrap();
    assert_eq!(seen.body(), "https://api.example.com/a");

    registry.select("staging");
    let seen = service
        .oneshot(Request::get("https://api.example.com/a").body(()).unwrap())
        .await
        .unwrap();
    assert_eq!(seen.body(), "https://staging.example.com/v2/a");
}
