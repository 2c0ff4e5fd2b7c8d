use crate::block::{AnnotatedBlock, Block};
use crate::endpoints::{EndpointRegistry, EndpointRole};
use crate::error::Result;
use crate::relative_time::relative_time;
use crate::source::DataSource;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Blocks matching `search`, each annotated with its age relative to `now`.
///
/// Input order is preserved and `blocks` is left untouched.
pub fn filter_blocks(blocks: &[Block], search: &str, now: DateTime<Utc>) -> Vec<AnnotatedBlock> {
    blocks
        .iter()
        .filter(|block| block.matches(search))
        .map(|block| AnnotatedBlock {
            block: block.clone(),
            relative_created_at: relative_time(&block.created_at, now),
        })
        .collect()
}

/// Fetch the full block list from the registered blocks endpoint.
///
/// Fails with `MissingEndpoint` before touching `source` when no endpoint
/// is registered.
pub async fn fetch_blocks<S: DataSource>(
    endpoints: &EndpointRegistry,
    source: &S,
) -> Result<Vec<Block>> {
    let endpoint = endpoints.get(EndpointRole::Blocks)?;
    source.fetch_blocks(endpoint).await
}

#[derive(Debug, Clone, Default)]
pub struct BlockStore {
    blocks: Vec<Block>,
    search_text: String,
}

impl BlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn set_search_text(&mut self, search_text: impl Into<String>) {
        self.search_text = search_text.into();
    }

    /// Swap in a freshly fetched list as a whole
    pub fn replace_blocks(&mut self, blocks: Vec<Block>) {
        debug!(count = blocks.len(), "blocks.replace");
        self.blocks = blocks;
    }

    /// Derived view over the current list and search text, recomputed on
    /// every call
    pub fn filtered_blocks(&self, now: DateTime<Utc>) -> Vec<AnnotatedBlock> {
        filter_blocks(&self.blocks, &self.search_text, now)
    }

    /// Replace the block list from the blocks endpoint; on error the current
    /// list is kept
    pub async fn refresh_blocks<S: DataSource>(
        &mut self,
        endpoints: &EndpointRegistry,
        source: &S,
    ) -> Result<()> {
        let blocks = fetch_blocks(endpoints, source).await?;
        self.replace_blocks(blocks);
        Ok(())
    }
}
