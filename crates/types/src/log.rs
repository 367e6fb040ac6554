use alloy_primitives::{Address, B256, Bytes};
use serde::{Deserialize, Serialize};

/// A single event log emitted by a transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
    /// The address of the contract that emitted the log.
    pub address: Address,

    /// The log topics. The first topic, when present, is the event
    /// signature hash.
    pub topics: Vec<B256>,

    /// The ABI-encoded log data.
    pub data: Bytes,

    /// The position of the log within the block.
    pub log_index: u64,

    /// Whether the log was invalidated by an upstream reorg at the source.
    /// Removed logs are never processed.
    pub removed: bool,
}
