//! Shared helpers for the command-line front end

use crate::block::AnnotatedBlock;
use crate::ledger::Ledger;
use crate::store::Theme;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Color as TableColor;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};
use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber, honouring `RUST_LOG` and defaulting to info
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn accent(theme: Theme) -> TableColor {
    match theme {
        Theme::Light => TableColor::DarkCyan,
        Theme::Dark => TableColor::Cyan,
    }
}

fn header(title: &str, theme: Theme) -> Cell {
    Cell::new(title)
        .fg(accent(theme))
        .add_attribute(Attribute::Bold)
}

pub fn blocks_table(blocks: &[AnnotatedBlock], theme: Theme) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            header("ID", theme),
            header("Number", theme),
            header("Txns", theme),
            header("Keys", theme),
            header("Size", theme),
            header("Age", theme),
        ]);

    for annotated in blocks {
        let block = &annotated.block;
        let keys: Vec<&str> = block
            .transactions
            .iter()
            .filter_map(|tx| tx.key.as_deref())
            .collect();
        let age = if annotated.relative_created_at.is_empty() {
            "-"
        } else {
            annotated.relative_created_at.as_str()
        };

        table.add_row(vec![
            Cell::new(block.id),
            Cell::new(&block.number),
            Cell::new(block.transactions.len()).set_alignment(CellAlignment::Right),
            Cell::new(keys.join(", ")),
            Cell::new(format!("{} B", block.size)).set_alignment(CellAlignment::Right),
            Cell::new(age).fg(TableColor::Grey),
        ]);
    }

    table
}

pub fn ledger_table(snapshot: &Ledger, theme: Theme) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![header("Metric", theme), header("Value", theme)]);

    for (label, value) in snapshot.counters() {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}
