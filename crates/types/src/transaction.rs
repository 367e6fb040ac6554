use crate::Log;
use alloy_primitives::{Address, B256, Bytes, U256};
use serde::{Deserialize, Serialize};

/// A persisted transaction together with the receipt fields the indexer
/// cares about.
///
/// Only transactions that pass the relevance filter are ever persisted;
/// everything else is dropped before insert as a storage-reduction policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// The transaction hash.
    pub hash: B256,

    /// The number of the block containing this transaction.
    pub block_number: u64,

    /// The timestamp of the containing block.
    pub block_timestamp: u64,

    /// The hash of the containing block.
    pub block_hash: B256,

    /// The sender.
    pub from: Address,

    /// The recipient. `None` for contract creations.
    pub to: Option<Address>,

    /// The address of the contract created by this transaction, if any.
    pub created_contract_address: Option<Address>,

    /// The position of the transaction within its block. Defines the total
    /// processing order together with the block number.
    pub transaction_index: u64,

    /// The raw transaction input.
    pub input: Bytes,

    /// The execution status from the receipt. `Some(0)` means reverted.
    pub status: Option<u64>,

    /// The logs emitted by this transaction.
    pub logs: Vec<Log>,

    /// The effective gas price, in wei.
    pub gas_price: u128,

    /// The gas used, from the receipt.
    pub gas_used: u128,

    /// The transaction fee, `gas_price * gas_used`.
    pub transaction_fee: u128,

    /// The transferred value, in wei.
    pub value: U256,

    /// EIP-4844 blob versioned hashes carried by this transaction.
    pub blob_versioned_hashes: Vec<B256>,
}

impl Transaction {
    /// Whether this transaction references any EIP-4844 blobs.
    pub fn has_blobs(&self) -> bool {
        !self.blob_versioned_hashes.is_empty()
    }

    /// The logs of this transaction in canonical processing order: logs
    /// flagged as removed are dropped, the rest are sorted ascending by
    /// log index.
    pub fn ordered_logs(&self) -> Vec<&Log> {
        let mut logs: Vec<&Log> = self.logs.iter().filter(|log| !log.removed).collect();
        logs.sort_by_key(|log| log.log_index);
        logs
    }
}
