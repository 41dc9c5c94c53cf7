//! `hostswitch resolve` — resolve a hostname through the override resolver.

use std::net::SocketAddr;
use std::sync::Arc;

use hyper_util::client::legacy::connect::dns::Name;
use tower::ServiceExt;

use crate::cli::ResolveArgs;
use crate::error::HostswitchError;
use crate::transport::OverrideResolver;

use super::Session;

pub async fn execute(args: &ResolveArgs) -> Result<(), HostswitchError> {
    let session = Session::open(&args.selection).await?;
    let resolver = OverrideResolver::new(Arc::clone(&session.registry));

    let via = match resolver.override_addrs(&args.hostname)? {
        Some(_) => session
            .registry
            .selected_host()
            .map_or_else(|| "override".to_string(), |e| format!("override: {}", e.tag())),
        None => "system".to_string(),
    };

    let name: Name = args
        .hostname
        .parse()
        .map_err(|_| HostswitchError::InvalidHostname(args.hostname.clone()))?;
    let addrs: Vec<SocketAddr> = resolver.oneshot(name).await?.collect();

    for addr in &addrs {
        println!("{} -> {} ({via})", args.hostname, addr.ip());
    }

    session.close();
    Ok(())
}
