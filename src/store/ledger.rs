use crate::endpoints::{EndpointRegistry, EndpointRole};
use crate::error::Result;
use crate::ledger::Ledger;
use crate::source::DataSource;

/// Fetch ledger snapshots from the registered ledger endpoint
pub async fn fetch_ledger<S: DataSource>(
    endpoints: &EndpointRegistry,
    source: &S,
) -> Result<Vec<Ledger>> {
    let endpoint = endpoints.get(EndpointRole::Ledger)?;
    source.fetch_ledger(endpoint).await
}

#[derive(Debug, Clone, Default)]
pub struct LedgerStore {
    ledger: Vec<Ledger>,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ledger(&self) -> &[Ledger] {
        &self.ledger
    }

    pub fn replace_ledger(&mut self, ledger: Vec<Ledger>) {
        self.ledger = ledger;
    }

    /// Replace the snapshots from the ledger endpoint
    pub async fn populate_table<S: DataSource>(
        &mut self,
        endpoints: &EndpointRegistry,
        source: &S,
    ) -> Result<()> {
        let ledger = fetch_ledger(endpoints, source).await?;
        self.replace_ledger(ledger);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExplorerError;
    use crate::source::InMemorySource;

    #[tokio::test]
    async fn test_populate_uses_second_endpoint() {
        let mut store = LedgerStore::new();
        let source = InMemorySource::new().with_ledger(vec![Ledger {
            replica_num: 4,
            ..Default::default()
        }]);

        // only the blocks slot is registered
        let blocks_only = EndpointRegistry::new(vec!["http://node/blocks".to_string()]);
        let result = store.populate_table(&blocks_only, &source).await;
        assert_eq!(
            result,
            Err(ExplorerError::MissingEndpoint(EndpointRole::Ledger))
        );
        assert_eq!(source.fetch_count(), 0);

        let both = EndpointRegistry::new(vec![
            "http://node/blocks".to_string(),
            "http://node/ledger".to_string(),
        ]);
        store.populate_table(&both, &source).await.unwrap();
        assert_eq!(store.ledger().len(), 1);
        assert_eq!(store.ledger()[0].replica_num, 4);
    }
}
