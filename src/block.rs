//! Block and transaction records as served by the blocks endpoint

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Decode a transaction list, treating `null` for the list or any entry as
/// absent
fn transactions_skipping_nulls<'de, D>(deserializer: D) -> Result<Vec<Transaction>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Option<Vec<Option<Transaction>>> = Option::deserialize(deserializer)?;
    Ok(entries.unwrap_or_default().into_iter().flatten().collect())
}

/// Strings pass through, numbers are rendered, anything else is empty
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// A single recorded operation inside a block.
///
/// Which optional fields are present depends on `cmd`; no shape validation
/// is performed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, deserialize_with = "lenient_string")]
    pub cmd: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_key: Option<String>,
}

impl Transaction {
    /// True when this transaction carries a key containing `needle`
    pub fn key_contains(&self, needle: &str) -> bool {
        self.key.as_deref().is_some_and(|key| key.contains(needle))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: u64,
    /// Display-only block number
    #[serde(default, deserialize_with = "lenient_string")]
    pub number: String,
    #[serde(default, deserialize_with = "transactions_skipping_nulls")]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub size: u64,
    /// ISO-8601 creation timestamp; `null` or non-string values decode as
    /// empty
    #[serde(default, deserialize_with = "lenient_string")]
    pub created_at: String,
}

impl Block {
    /// Search predicate: the decimal id or any transaction key contains
    /// `needle`. Case-sensitive; an empty needle matches every block.
    pub fn matches(&self, needle: &str) -> bool {
        self.id.to_string().contains(needle)
            || self.transactions.iter().any(|tx| tx.key_contains(needle))
    }
}

/// A block together with its computed relative age
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedBlock {
    #[serde(flatten)]
    pub block: Block,
    pub relative_created_at: String,
}
