//! DNS resolver hook with registry-driven address overrides.
//!
//! [`OverrideResolver`] plugs into hyper-util's `HttpConnector` as its
//! resolver. For a hostname that belongs to a known host element, while
//! the selected element is in dns mode, it answers with the selected
//! element's fixed address. Every other lookup, and any override whose
//! address cannot be used, goes to the fallback resolver (the system
//! resolver by default). An override never makes a resolvable name fail.

use std::future::Future;
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use hyper_util::client::legacy::connect::dns::{GaiResolver, Name};
use tower::{Service, ServiceExt};

use crate::config::model::HostMode;
use crate::config::validation::parse_dotted_quad;
use crate::error::HostswitchError;
use crate::registry::HostRegistry;

pub type Addrs = std::vec::IntoIter<SocketAddr>;

#[derive(Clone)]
pub struct OverrideResolver<R = GaiResolver> {
    registry: Arc<HostRegistry>,
    fallback: R,
}

impl OverrideResolver<GaiResolver> {
    /// Override resolver falling back to `getaddrinfo`.
    #[must_use]
    pub fn new(registry: Arc<HostRegistry>) -> Self {
        Self::with_fallback(registry, GaiResolver::new())
    }
}

impl<R> OverrideResolver<R> {
    #[must_use]
    pub fn with_fallback(registry: Arc<HostRegistry>, fallback: R) -> Self {
        Self { registry, fallback }
    }

    /// The fixed addresses for `hostname`, or `None` to use normal resolution.
    ///
    /// Ports are left at 0; the connector fills in the request port.
    pub fn override_addrs(
        &self,
        hostname: &str,
    ) -> Result<Option<Vec<SocketAddr>>, HostswitchError> {
        if hostname.is_empty() {
            return Err(HostswitchError::InvalidHostname(hostname.to_string()));
        }
        if !self.registry.is_host_configured(hostname) {
            return Ok(None);
        }
        let Some(selected) = self.registry.selected_host() else {
            return Ok(None);
        };
        if selected.mode() != HostMode::Dns {
            return Ok(None);
        }

        match selected.address().and_then(parse_literal) {
            Some(ip) => {
                tracing::debug!(
                    hostname = %hostname,
                    tag = %selected.tag(),
                    address = %ip,
                    "dns override"
                );
                Ok(Some(vec![SocketAddr::new(ip, 0)]))
            }
            None => {
                tracing::warn!(
                    hostname = %hostname,
                    tag = %selected.tag(),
                    address = selected.address().unwrap_or_default(),
                    "unusable override address, using system resolution"
                );
                Ok(None)
            }
        }
    }
}

fn parse_literal(address: &str) -> Option<IpAddr> {
    address
        .parse::<IpAddr>()
        .ok()
        .or_else(|| parse_dotted_quad(address).map(IpAddr::V4))
}

impl<R> Service<Name> for OverrideResolver<R>
where
    R: Service<Name> + Clone + Send + 'static,
    R::Response: Iterator<Item = SocketAddr>,
    R::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    R::Future: Send,
{
    type Response = Addrs;
    type Error = io::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Addrs, io::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, name: Name) -> Self::Future {
        match self.override_addrs(name.as_str()) {
            Ok(Some(addrs)) => Box::pin(async move { Ok(addrs.into_iter()) }),
            Ok(None) => {
                let fallback = self.fallback.clone();
                Box::pin(async move {
                    let addrs = fallback.oneshot(name).await.map_err(io::Error::other)?;
                    Ok(addrs.collect::<Vec<_>>().into_iter())
                })
            }
            Err(e) => Box::pin(async move { Err(io::Error::new(io::ErrorKind::InvalidInput, e)) }),
        }
    }
}
