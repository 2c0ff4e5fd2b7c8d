//! Integration tests for dashboard state flows

use chrono::{TimeZone, Utc};
use ledger_explorer::block::{Block, Transaction};
use ledger_explorer::config::Config;
use ledger_explorer::endpoints::{EndpointRegistry, EndpointRole};
use ledger_explorer::ledger::Ledger;
use ledger_explorer::source::InMemorySource;
use ledger_explorer::storage::{FileStorage, MemoryStorage};
use ledger_explorer::store::Theme;
use ledger_explorer::{Dashboard, ExplorerError};
use std::sync::Arc;
use tempfile::TempDir;

fn block(id: u64, key: Option<&str>, created_at: &str) -> Block {
    Block {
        id,
        number: id.to_string(),
        transactions: vec![Transaction {
            cmd: "get".to_string(),
            key: key.map(str::to_string),
            ..Default::default()
        }],
        size: 100,
        created_at: created_at.to_string(),
    }
}

fn registry() -> EndpointRegistry {
    EndpointRegistry::new(vec![
        "http://node/v1/blocks".to_string(),
        "http://node/v1/ledger".to_string(),
    ])
}

#[tokio::test]
async fn test_missing_endpoint_fails_before_fetch() -> Result<(), Box<dyn std::error::Error>> {
    let source = InMemorySource::new().with_blocks(vec![block(1, Some("abc"), "")]);
    let dashboard = Dashboard::with_parts(
        EndpointRegistry::default(),
        source,
        Arc::new(MemoryStorage::new()),
    )?;

    let result = dashboard.refresh_blocks().await;
    assert_eq!(
        result,
        Err(ExplorerError::MissingEndpoint(EndpointRole::Blocks))
    );
    assert_eq!(dashboard.source().fetch_count(), 0);
    assert!(dashboard.blocks().await.is_empty());

    let result = dashboard.populate_ledger().await;
    assert_eq!(
        result,
        Err(ExplorerError::MissingEndpoint(EndpointRole::Ledger))
    );
    assert_eq!(dashboard.source().fetch_count(), 0);

    Ok(())
}

#[tokio::test]
async fn test_search_scenario() -> Result<(), Box<dyn std::error::Error>> {
    let source = InMemorySource::new().with_blocks(vec![block(1, Some("abc"), "2024-03-10T11:00:00Z")]);
    let dashboard = Dashboard::with_parts(registry(), source, Arc::new(MemoryStorage::new()))?;
    dashboard.refresh_blocks().await?;

    let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();

    dashboard.set_search_text("abc").await;
    let view = dashboard.filtered_blocks_at(now).await;
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].block.id, 1);
    assert_eq!(view[0].relative_created_at, "1h");

    dashboard.set_search_text("xyz").await;
    assert!(dashboard.filtered_blocks_at(now).await.is_empty());
    assert_eq!(dashboard.search_text().await, "xyz");

    // the source list is untouched by filtering
    assert_eq!(dashboard.blocks().await.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_refresh_replaces_whole_list() -> Result<(), Box<dyn std::error::Error>> {
    let source = InMemorySource::new()
        .with_blocks(vec![block(1, None, ""), block(2, None, "")])
        .with_ledger(vec![Ledger {
            block_num: 2,
            ..Default::default()
        }]);
    let dashboard = Dashboard::with_parts(registry(), source, Arc::new(MemoryStorage::new()))?;

    assert_eq!(dashboard.refresh_blocks().await?, 2);
    assert_eq!(dashboard.refresh_blocks().await?, 2);
    assert_eq!(dashboard.blocks().await.len(), 2);
    assert_eq!(dashboard.source().fetch_count(), 2);

    assert_eq!(dashboard.populate_ledger().await?, 1);
    assert_eq!(dashboard.ledger().await[0].block_num, 2);

    Ok(())
}

#[tokio::test]
async fn test_source_failure_propagates() -> Result<(), Box<dyn std::error::Error>> {
    let source =
        InMemorySource::new().failing(ExplorerError::SourceUnavailable("node down".to_string()));
    let dashboard = Dashboard::with_parts(registry(), source, Arc::new(MemoryStorage::new()))?;

    let result = dashboard.refresh_blocks().await;
    assert!(matches!(result, Err(ExplorerError::SourceUnavailable(_))));
    assert_eq!(dashboard.source().fetch_count(), 1);
    assert!(dashboard.blocks().await.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_theme_toggle_persists_across_sessions() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("storage.json");

    let first = Dashboard::with_parts(
        registry(),
        InMemorySource::new(),
        Arc::new(FileStorage::open(&path)?),
    )?;
    assert_eq!(first.theme().await, Theme::Light);
    assert_eq!(first.toggle_theme().await?, Theme::Dark);
    first.shutdown().await;

    let second = Dashboard::with_parts(
        registry(),
        InMemorySource::new(),
        Arc::new(FileStorage::open(&path)?),
    )?;
    assert!(second.is_dark_theme().await);
    assert_eq!(second.toggle_theme().await?, Theme::Light);

    Ok(())
}

#[tokio::test]
async fn test_init_from_config() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let storage_path = temp_dir.path().join("prefs.json");
    let config = Config::from_toml_str(&format!(
        r#"
        [endpoints]
        urls = ["http://127.0.0.1:1/v1/blocks"]

        [http]
        timeout = "2s"

        [storage]
        path = "{}"
        "#,
        storage_path.display()
    ))?;

    let dashboard = Dashboard::init(&config)?;
    assert_eq!(
        dashboard.endpoints().iter().collect::<Vec<_>>(),
        vec!["http://127.0.0.1:1/v1/blocks"]
    );
    assert_eq!(dashboard.theme().await, Theme::Light);

    dashboard.toggle_theme().await?;
    assert!(storage_path.exists());

    let result = dashboard.populate_ledger().await;
    assert_eq!(
        result,
        Err(ExplorerError::MissingEndpoint(EndpointRole::Ledger))
    );

    Ok(())
}
