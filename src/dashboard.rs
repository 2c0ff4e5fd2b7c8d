//! Owned application state for the dashboard.
//!
//! A `Dashboard` is built once at startup, handed by reference to whatever
//! renders it, and consumed by [`Dashboard::shutdown`]. Refresh actions
//! await the fetch with no lock held and then commit the new list with a
//! single write, so readers only ever see a complete list.

use crate::block::{AnnotatedBlock, Block};
use crate::config::Config;
use crate::endpoints::EndpointRegistry;
use crate::error::Result;
use crate::ledger::Ledger;
use crate::source::{DataSource, HttpSource};
use crate::storage::{FileStorage, KeyValueStorage, MemoryStorage};
use crate::store::blocks::fetch_blocks;
use crate::store::ledger::fetch_ledger;
use crate::store::{BlockStore, LedgerStore, Theme, ThemeStore};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

pub struct Dashboard<S: DataSource = HttpSource> {
    endpoints: EndpointRegistry,
    source: S,
    blocks: RwLock<BlockStore>,
    ledger: RwLock<LedgerStore>,
    theme: RwLock<ThemeStore>,
}

impl Dashboard<HttpSource> {
    /// Build the dashboard from configuration: HTTP source, endpoint
    /// registry and file-backed (or ephemeral) preference storage
    pub fn init(config: &Config) -> Result<Self> {
        let source = HttpSource::new(config.request_timeout()?)?;

        let storage: Arc<dyn KeyValueStorage> = if config.storage.ephemeral {
            info!("Preferences kept in memory for this session");
            Arc::new(MemoryStorage::new())
        } else {
            let file = FileStorage::open(config.storage_path())?;
            info!(path = %file.path().display(), "Preferences loaded");
            Arc::new(file)
        };

        let endpoints = EndpointRegistry::new(config.endpoints.urls.clone());
        info!(
            endpoints = ?endpoints.iter().collect::<Vec<_>>(),
            "Starting ledger explorer"
        );

        Self::with_parts(endpoints, source, storage)
    }
}

impl<S: DataSource> Dashboard<S> {
    pub fn with_parts(
        endpoints: EndpointRegistry,
        source: S,
        storage: Arc<dyn KeyValueStorage>,
    ) -> Result<Self> {
        let theme = ThemeStore::load(storage)?;
        Ok(Self {
            endpoints,
            source,
            blocks: RwLock::new(BlockStore::new()),
            ledger: RwLock::new(LedgerStore::new()),
            theme: RwLock::new(theme),
        })
    }

    pub fn endpoints(&self) -> &EndpointRegistry {
        &self.endpoints
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Replace the block list from the blocks endpoint, returning its length
    pub async fn refresh_blocks(&self) -> Result<usize> {
        let blocks = fetch_blocks(&self.endpoints, &self.source).await?;
        let count = blocks.len();
        self.blocks.write().await.replace_blocks(blocks);
        Ok(count)
    }

    /// Replace the ledger snapshots from the ledger endpoint
    pub async fn populate_ledger(&self) -> Result<usize> {
        let ledger = fetch_ledger(&self.endpoints, &self.source).await?;
        let count = ledger.len();
        self.ledger.write().await.replace_ledger(ledger);
        Ok(count)
    }

    pub async fn set_search_text(&self, search_text: impl Into<String>) {
        self.blocks.write().await.set_search_text(search_text);
    }

    pub async fn search_text(&self) -> String {
        self.blocks.read().await.search_text().to_string()
    }

    pub async fn blocks(&self) -> Vec<Block> {
        self.blocks.read().await.blocks().to_vec()
    }

    /// Filtered view aged against the current wall clock
    pub async fn filtered_blocks(&self) -> Vec<AnnotatedBlock> {
        self.filtered_blocks_at(Utc::now()).await
    }

    pub async fn filtered_blocks_at(&self, now: DateTime<Utc>) -> Vec<AnnotatedBlock> {
        self.blocks.read().await.filtered_blocks(now)
    }

    pub async fn ledger(&self) -> Vec<Ledger> {
        self.ledger.read().await.ledger().to_vec()
    }

    pub async fn theme(&self) -> Theme {
        self.theme.read().await.theme()
    }

    pub async fn is_dark_theme(&self) -> bool {
        self.theme.read().await.is_dark_theme()
    }

    pub async fn toggle_theme(&self) -> Result<Theme> {
        self.theme.write().await.toggle_theme()
    }

    pub async fn shutdown(self) {
        let blocks = self.blocks.read().await.blocks().len();
        let ledger = self.ledger.read().await.ledger().len();
        info!(blocks, ledger, "Shutting down ledger explorer");
    }
}
