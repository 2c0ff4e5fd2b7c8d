//! Registry of data-source endpoints.
//!
//! Slots are positional: the first registered URL serves blocks, the second
//! serves ledger metrics.

use crate::error::{ExplorerError, Result};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointRole {
    Blocks,
    Ledger,
}

impl EndpointRole {
    /// Registry slot used for this role
    pub const fn index(self) -> usize {
        match self {
            EndpointRole::Blocks => 0,
            EndpointRole::Ledger => 1,
        }
    }
}

impl fmt::Display for EndpointRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EndpointRole::Blocks => write!(f, "blocks"),
            EndpointRole::Ledger => write!(f, "ledger"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointRegistry {
    endpoints: Vec<String>,
}

impl EndpointRegistry {
    pub fn new(endpoints: Vec<String>) -> Self {
        Self { endpoints }
    }

    /// Append an endpoint to the next free slot
    pub fn register(&mut self, url: impl Into<String>) {
        self.endpoints.push(url.into());
    }

    /// Look up the endpoint for `role`.
    ///
    /// A blank entry counts as unregistered.
    pub fn get(&self, role: EndpointRole) -> Result<&str> {
        self.endpoints
            .get(role.index())
            .map(|url| url.trim())
            .filter(|url| !url.is_empty())
            .ok_or(ExplorerError::MissingEndpoint(role))
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.endpoints.iter().map(String::as_str)
    }
}
