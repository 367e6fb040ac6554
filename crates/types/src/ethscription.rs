use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

/// A data object inscribed on-chain via transaction input or a recognized
/// contract event.
///
/// At most one ethscription exists per transaction hash: the first valid
/// creation candidate in processing order wins, regardless of source.
/// Creation-time fields are immutable; only the ownership pair rolls forward
/// on transfers, and the attachment fields may be set once when a blob-backed
/// attachment is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ethscription {
    /// The hash of the inscribing transaction. Unique.
    pub transaction_hash: B256,

    /// The number of the block the ethscription was created in.
    pub block_number: u64,

    /// The timestamp of the creating block.
    pub block_timestamp: u64,

    /// The hash of the creating block.
    pub block_hash: B256,

    /// The index of the creating transaction within its block.
    pub transaction_index: u64,

    /// The creator: the transaction sender for input-derived ethscriptions,
    /// the emitting contract for event-derived ones.
    pub creator: Address,

    /// The owner before the most recent transfer.
    pub previous_owner: Address,

    /// The current owner.
    pub current_owner: Address,

    /// The owner at creation time.
    pub initial_owner: Address,

    /// The content URI carried by the ethscription.
    pub content_uri: String,

    /// The index of the creation event log. `None` when the ethscription was
    /// derived from transaction input rather than a log.
    pub event_log_index: Option<u64>,

    /// The effective gas price of the creating transaction.
    pub gas_price: u128,

    /// The gas used by the creating transaction.
    pub gas_used: u128,

    /// The fee paid by the creating transaction.
    pub transaction_fee: u128,

    /// The value transferred by the creating transaction.
    pub value: U256,

    /// SHA-256 of the resolved blob attachment content, `0x`-prefixed.
    pub attachment_sha: Option<String>,

    /// Mimetype of the resolved blob attachment.
    pub attachment_mimetype: Option<String>,
}
