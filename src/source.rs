//! Data sources feeding the block and ledger stores.
//!
//! `HttpSource` is the production backend. `InMemorySource` serves fixed
//! data and counts fetch attempts, for tests and offline sessions.

use crate::block::Block;
use crate::error::{ExplorerError, Result};
use crate::ledger::Ledger;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Abstraction over where block and ledger lists come from.
#[allow(async_fn_in_trait)]
pub trait DataSource: Send + Sync {
    async fn fetch_blocks(&self, endpoint: &str) -> Result<Vec<Block>>;
    async fn fetch_ledger(&self, endpoint: &str) -> Result<Vec<Ledger>>;
}

#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ExplorerError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// GET `endpoint` and decode a JSON array
    async fn get_list<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Vec<T>> {
        let start = Instant::now();

        let items = self.request_list(endpoint).await.map_err(|e| {
            let err = ExplorerError::from(e);
            warn!(endpoint, error = %err, "source.fetch.failed");
            err
        })?;

        info!(
            endpoint,
            count = items.len(),
            duration_ms = %start.elapsed().as_millis(),
            "source.fetch"
        );

        Ok(items)
    }

    async fn request_list<T: DeserializeOwned>(
        &self,
        endpoint: &str,
    ) -> std::result::Result<Vec<T>, reqwest::Error> {
        self.client
            .get(endpoint)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<T>>()
            .await
    }
}

impl DataSource for HttpSource {
    async fn fetch_blocks(&self, endpoint: &str) -> Result<Vec<Block>> {
        self.get_list(endpoint).await
    }

    async fn fetch_ledger(&self, endpoint: &str) -> Result<Vec<Ledger>> {
        self.get_list(endpoint).await
    }
}

#[derive(Debug, Default)]
pub struct InMemorySource {
    blocks: Vec<Block>,
    ledger: Vec<Ledger>,
    failure: Option<ExplorerError>,
    fetches: AtomicUsize,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blocks(mut self, blocks: Vec<Block>) -> Self {
        self.blocks = blocks;
        self
    }

    pub fn with_ledger(mut self, ledger: Vec<Ledger>) -> Self {
        self.ledger = ledger;
        self
    }

    /// Make every fetch fail with `error`
    pub fn failing(mut self, error: ExplorerError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Number of fetches attempted so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn record_fetch(&self) -> Result<()> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl DataSource for InMemorySource {
    async fn fetch_blocks(&self, _endpoint: &str) -> Result<Vec<Block>> {
        self.record_fetch()?;
        Ok(self.blocks.clone())
    }

    async fn fetch_ledger(&self, _endpoint: &str) -> Result<Vec<Ledger>> {
        self.record_fetch()?;
        Ok(self.ledger.clone())
    }
}
