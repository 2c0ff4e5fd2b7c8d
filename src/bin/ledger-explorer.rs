#![forbid(unsafe_code)]
//! Command-line front end for the ledger explorer

use clap::{Parser, Subcommand};
use colored::*;
use ledger_explorer::cli::{blocks_table, init_tracing, ledger_table};
use ledger_explorer::config::load_config;
use ledger_explorer::{Dashboard, ExplorerError};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetches blocks and shows those matching the search text
    Blocks {
        /// Substring of a block id or transaction key
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Fetches and shows ledger metrics
    Ledger,
    /// Shows or toggles the colour theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
}

#[derive(Subcommand)]
enum ThemeAction {
    Show,
    Toggle,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    let dashboard = Dashboard::init(&config)?;

    let outcome = run(&dashboard, cli.command).await;
    dashboard.shutdown().await;

    if let Err(ExplorerError::MissingEndpoint(role)) = &outcome {
        eprintln!(
            "{}",
            format!("❌ No {} endpoint configured", role).red().bold()
        );
        eprintln!(
            "{}",
            format!("💡 Add it to [endpoints].urls in {}", cli.config.display()).yellow()
        );
    }

    outcome?;
    Ok(())
}

async fn run(dashboard: &Dashboard, command: Commands) -> ledger_explorer::Result<()> {
    let theme = dashboard.theme().await;

    match command {
        Commands::Blocks { search } => {
            let count = dashboard.refresh_blocks().await?;
            dashboard.set_search_text(search).await;
            let view = dashboard.filtered_blocks().await;

            if view.is_empty() {
                println!("{}", "📭 No matching blocks".yellow());
            } else {
                println!("{}", blocks_table(&view, theme));
            }
            println!(
                "{}",
                format!("{} of {} blocks shown", view.len(), count).bright_blue()
            );
        }
        Commands::Ledger => {
            dashboard.populate_ledger().await?;
            let snapshots = dashboard.ledger().await;
            if snapshots.is_empty() {
                println!("{}", "📭 Ledger endpoint returned no data".yellow());
            }
            for snapshot in &snapshots {
                println!("{}", ledger_table(snapshot, theme));
            }
        }
        Commands::Theme { action } => match action.unwrap_or(ThemeAction::Show) {
            ThemeAction::Show => println!("🎨 Theme: {}", theme.to_string().bold()),
            ThemeAction::Toggle => {
                let theme = dashboard.toggle_theme().await?;
                println!("{}", format!("🎨 Theme set to {}", theme).green());
            }
        },
    }

    Ok(())
}
