//! Ledger metric snapshots served by the ledger endpoint

use serde::{Deserialize, Serialize};

/// Configuration and runtime counters reported by the ledger.
///
/// Treated as an opaque snapshot; counters missing from the payload
/// default to zero. Durations and the chain age may be fractional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ledger {
    pub replica_num: u64,
    pub client_num: u64,
    pub worker_num: u64,
    pub client_batch_num: u64,
    pub max_process_txn: u64,
    pub client_batch_wait_time: f64,
    pub input_worker_num: u64,
    pub output_worker_num: u64,
    pub client_timeout_ms: f64,
    pub min_data_receive_num: u64,
    pub max_malicious_replica_num: u64,
    pub checkpoint_water_mark: u64,
    pub transaction_num: u64,
    pub block_num: u64,
    pub chain_age: f64,
}

impl Ledger {
    /// Labelled counters in display order, rendered for output
    pub fn counters(&self) -> [(&'static str, String); 15] {
        [
            ("Replicas", self.replica_num.to_string()),
            ("Clients", self.client_num.to_string()),
            ("Workers", self.worker_num.to_string()),
            ("Client batch size", self.client_batch_num.to_string()),
            ("Max process txn", self.max_process_txn.to_string()),
            ("Client batch wait time", format_measure(self.client_batch_wait_time)),
            ("Input workers", self.input_worker_num.to_string()),
            ("Output workers", self.output_worker_num.to_string()),
            ("Client timeout (ms)", format_measure(self.client_timeout_ms)),
            ("Min data receive", self.min_data_receive_num.to_string()),
            ("Max malicious replicas", self.max_malicious_replica_num.to_string()),
            ("Checkpoint watermark", self.checkpoint_water_mark.to_string()),
            ("Transactions", self.transaction_num.to_string()),
            ("Blocks", self.block_num.to_string()),
            ("Chain age", format_measure(self.chain_age)),
        ]
    }
}

/// Whole values print without a fractional part
fn format_measure(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}
