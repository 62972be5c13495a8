//! GitHub client: the single point of network access for the sync pipeline.
//!
//! Two seams are exposed as traits so the pipeline can run against stubs:
//! `RemoteLister` (directory listing) and `ContentFetcher` (raw file bodies).
//! No retries: any non-2xx response is returned as an error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::errors::SyncError;
use crate::models::{FileDescriptor, RawListingEntry};

#[async_trait]
pub trait RemoteLister: Send + Sync {
    /// Lists the directory and returns descriptors whose name ends with `suffix`,
    /// in the order the API returned them.
    async fn list(&self, url: &str, suffix: &str) -> Result<Vec<FileDescriptor>, SyncError>;
}

#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, SyncError>;
}

#[derive(Clone)]
pub struct GithubClient {
    client: Client,
}

impl GithubClient {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, SyncError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Issues one GET and returns the status alongside the full body.
    async fn get(&self, url: &str) -> Result<(StatusCode, String), SyncError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(url, status = status.as_u16(), bytes = body.len(), "GET completed");
        Ok((status, body))
    }
}

#[async_trait]
impl RemoteLister for GithubClient {
    async fn list(&self, url: &str, suffix: &str) -> Result<Vec<FileDescriptor>, SyncError> {
        let (status, body) = self.get(url).await?;
        if !status.is_success() {
            return Err(SyncError::Listing {
                status: status.as_u16(),
                body,
            });
        }
        parse_listing(&body, suffix)
    }
}

#[async_trait]
impl ContentFetcher for GithubClient {
    async fn fetch(&self, url: &str) -> Result<String, SyncError> {
        let (status, body) = self.get(url).await?;
        if !status.is_success() {
            return Err(SyncError::Fetch {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

/// Parses a listing body and keeps downloadable entries ending with `suffix`.
pub fn parse_listing(body: &str, suffix: &str) -> Result<Vec<FileDescriptor>, SyncError> {
    let entries: Vec<RawListingEntry> =
        serde_json::from_str(body).map_err(|e| SyncError::parse("directory listing", e))?;

    Ok(entries
        .into_iter()
        .filter(|entry| entry.name.ends_with(suffix))
        .filter_map(|entry| {
            let name = entry.name.clone();
            let descriptor = entry.into_descriptor();
            if descriptor.is_none() {
                warn!("Skipping listing entry '{name}' with no download URL");
            }
            descriptor
        })
        .collect())
}
