use crate::clock::Clock;
use crate::config::DirectoryConfig;
use crate::storage::{MemoryStorage, Storage};
use crate::types::{ChainlistError, Result};
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client for the upstream catalogs with a response cache keyed by URL.
///
/// A body is cached only after it parsed as JSON, so failed or garbled
/// responses are fetched again on the next call.
pub struct Fetcher {
    http_client: Client,
    storage: Box<dyn Storage>,
    max_retries: u32,
    retry_backoff: Duration,
}

impl Fetcher {
    pub fn new(config: &DirectoryConfig) -> Self {
        let storage = MemoryStorage::new_unboxed().with_ttl(config.upstream_cache_ttl);
        Self::with_storage(config, Box::new(storage))
    }

    /// Build a fetcher whose URL cache expires against the given clock.
    pub fn with_clock(config: &DirectoryConfig, clock: Arc<dyn Clock>) -> Self {
        let storage = MemoryStorage::new_unboxed()
            .with_ttl(config.upstream_cache_ttl)
            .with_clock(clock);
        Self::with_storage(config, Box::new(storage))
    }

    pub fn with_storage(config: &DirectoryConfig, storage: Box<dyn Storage>) -> Self {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http_client,
            storage,
            max_retries: config.max_retries,
            retry_backoff: config.retry_backoff,
        }
    }

    /// GET `url` as JSON, answering from the cache when possible.
    pub async fn fetch_with_cache(&self, url: &str) -> Result<Value> {
        if let Some(body) = self.storage.get(url) {
            debug!("cache hit for {}", url);
            return Ok(serde_json::from_slice(&body)?);
        }

        let body = self.fetch_with_retry(url).await?;
        let value: Value = serde_json::from_slice(&body)?;
        self.storage.set(url, &body);

        Ok(value)
    }

    /// Forget the cached response for `url`.
    pub fn evict(&self, url: &str) {
        self.storage.delete(url);
    }

    /// Forget every cached response.
    pub fn clear_cache(&self) {
        self.storage.clear();
    }

    async fn fetch_with_retry(&self, url: &str) -> Result<Vec<u8>> {
        let mut delay = self.retry_backoff;
        let mut attempt = 0;

        loop {
            match self.execute_request(url).await {
                Ok(body) => return Ok(body),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    warn!(
                        "fetching {} failed ({}), retry {}/{} in {:?}",
                        url, e, attempt, self.max_retries, delay
                    );
                    tokio::time::sleep(delay).await;
                    delay = delay.saturating_mul(2);
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn execute_request(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .http_client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(ChainlistError::Upstream {
                url: url.to_string(),
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).chars().take(512).collect(),
            });
        }

        Ok(bytes.to_vec())
    }
}
