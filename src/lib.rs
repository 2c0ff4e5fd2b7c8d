//! Ledger Explorer - client-side state for a ledger dashboard
//!
//! # Architecture
//!
//! ## Records
//! - [`block`] - Blocks, transactions and annotated blocks
//! - [`ledger`] - Ledger metric snapshots
//!
//! ## Views
//! - [`relative_time`] - Human-readable block ages
//! - [`store`] - Block, ledger and theme stores
//! - [`dashboard`] - Owned application state tying the stores together
//!
//! ## Collaborators
//! - [`endpoints`] - Endpoint registry
//! - [`source`] - HTTP and in-memory data sources
//! - [`storage`] - Durable key-value storage
//!
//! ## Configuration & Utilities
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//! - [`cli`] - CLI utilities

#![forbid(unsafe_code)]

// ============================================================================
// Records
// ============================================================================
pub mod block;
pub mod ledger;

// ============================================================================
// Views
// ============================================================================
pub mod dashboard;
pub mod relative_time;
pub mod store;

// ============================================================================
// Collaborators
// ============================================================================
pub mod endpoints;
pub mod source;
pub mod storage;

// ============================================================================
// Configuration & Utilities
// ============================================================================
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;

pub use dashboard::Dashboard;
pub use error::{ExplorerError, Result};
