// Best-effort forwarding of listing queries to an external inventory API
// Callers fall back to the local inventory whenever this returns an error,
// including a reachable upstream that answers without a successful envelope.

use anyhow::{bail, Context, Result};
use reqwest::{header::ACCEPT, Client};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::inventory::paginate::PaginationMeta;

pub const FALLBACK_NOTE: &str =
    "Upstream inventory unavailable, serving listings from the local mock inventory";

/// The listing envelope an upstream must answer with. Listings themselves
/// are relayed as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamListing {
    pub success: bool,
    pub data: Vec<Value>,
    pub meta: PaginationMeta,
}

/// Accepts only a successful listing envelope.
pub fn parse_listing(body: Value) -> Result<UpstreamListing> {
    let listing: UpstreamListing = serde_json::from_value(body)
        .context("Upstream inventory returned a body that is not a listing envelope")?;
    if !listing.success {
        bail!("Upstream inventory reported an unsuccessful query");
    }
    Ok(listing)
}

pub fn vehicles_url(base_url: &str, raw_query: Option<&str>) -> String {
    let base = base_url.trim_end_matches('/');
    match raw_query.filter(|qs| !qs.is_empty()) {
        Some(qs) => format!("{base}/vehicles?{qs}"),
        None => format!("{base}/vehicles"),
    }
}

/// Relays the raw query string unchanged so comma-separated lists survive.
pub async fn fetch_vehicles(
    client: &Client,
    base_url: &str,
    raw_query: Option<&str>,
    timeout: Duration,
) -> Result<UpstreamListing> {
    let url = vehicles_url(base_url, raw_query);
    tracing::debug!(url = %url, "Forwarding listing query upstream");

    let response = client
        .get(&url)
        .header(ACCEPT, "application/json")
        .timeout(timeout)
        .send()
        .await
        .with_context(|| format!("Failed to reach upstream inventory at {url}"))?
        .error_for_status()
        .context("Upstream inventory returned an error status")?;

    let body = response
        .json::<Value>()
        .await
        .context("Upstream inventory returned a body that is not JSON")?;
    parse_listing(body)
}
