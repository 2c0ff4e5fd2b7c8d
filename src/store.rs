//! State containers backing the dashboard views
//!
//! - [`blocks`] - Block list, search text and the filtered view
//! - [`ledger`] - Ledger metric snapshots
//! - [`theme`] - Light/dark preference mirrored to storage

pub mod blocks;
pub mod ledger;
pub mod theme;

pub use blocks::{filter_blocks, BlockStore};
pub use ledger::LedgerStore;
pub use theme::{Theme, ThemeStore, THEME_KEY};
