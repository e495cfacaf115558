//! Dataset retrieval over HTTP or from the local filesystem.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result};
use bytes::Bytes;
use tracing::debug;

/// GETs `url` and returns the body. Non-2xx responses are errors.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Bytes> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?.error_for_status()?;
    Ok(resp.bytes().await?)
}

/// Loads a dataset from a local path, or fetches it when `source` is an http(s) URL.
#[tracing::instrument(skip(client))]
pub async fn fetch_source<C: HttpClient>(client: &C, source: &str) -> Result<Bytes> {
    let bytes = if source.starts_with("http") {
        fetch_bytes(client, source)
            .await
            .with_context(|| format!("failed to fetch '{source}'"))?
    } else {
        let data = tokio::fs::read(source)
            .await
            .with_context(|| format!("failed to read '{source}'"))?;
        Bytes::from(data)
    };
    debug!(bytes = bytes.len(), "Dataset loaded");
    Ok(bytes)
}
