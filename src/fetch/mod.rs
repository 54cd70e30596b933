mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use crate::error::{FeedError, Result};

/// USGS summary feed of every earthquake recorded in the past day.
pub const DEFAULT_FEED_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_day.geojson";

/// Issues a single GET for `url` and returns the body.
///
/// No retry and no backoff: a transport error or a non-success status is
/// returned to the caller as is.
#[tracing::instrument(skip(client))]
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let parsed = reqwest::Url::parse(url).map_err(|e| FeedError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    let req = reqwest::Request::new(reqwest::Method::GET, parsed);

    let resp = client.execute(req).await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(FeedError::Status {
            status: status.as_u16(),
        });
    }

    let bytes = resp.bytes().await?;
    tracing::debug!(bytes = bytes.len(), "Feed body received");
    Ok(bytes.to_vec())
}
