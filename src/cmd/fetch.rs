//! `hostswitch fetch` — send a GET request through the routed client.
//!
//! Builds the same client an application would get from
//! [`build_http_client`], so the request goes through the routing seam
//! and the override resolver. Prints the status and the body.

use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};

use crate::cli::FetchArgs;
use crate::error::HostswitchError;
use crate::transport::build_http_client;

use super::Session;

pub async fn execute(args: &FetchArgs) -> Result<(), HostswitchError> {
    let url = url::Url::parse(&args.url).map_err(|e| HostswitchError::UriParse {
        source: Box::new(e),
    })?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(HostswitchError::UnsupportedProtocol(url.scheme().to_string()));
    }

    let session = Session::open(&args.selection).await?;
    let client = build_http_client(std::sync::Arc::clone(&session.registry));

    let req = http::Request::get(url.as_str())
        .body(Full::new(Bytes::new()))
        .map_err(|e| HostswitchError::HttpRequest {
            source: Box::new(e),
        })?;

    let timeout = Duration::from_secs(args.timeout);
    let response = tokio::time::timeout(timeout, client.send(req))
        .await
        .map_err(|_| HostswitchError::HttpRequest {
            source: format!("request timed out after {}s", args.timeout).into(),
        })?
        .map_err(|e| HostswitchError::HttpRequest {
            source: Box::new(e),
        })?;

    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .map_err(|e| HostswitchError::HttpRequest {
            source: Box::new(e),
        })?
        .to_bytes();

    tracing::info!(url = %url, status = status.as_u16(), bytes = body.len(), "fetch complete");
    eprintln!("{status} ({} bytes)", body.len());
    println!("{}", String::from_utf8_lossy(&body));

    session.close();
    Ok(())
}
