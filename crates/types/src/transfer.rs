use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};

/// A recorded change of ownership for an existing ethscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// The hash of the transaction that created the transferred ethscription.
    pub ethscription_transaction_hash: B256,

    /// The hash of the transaction that performed the transfer.
    pub transaction_hash: B256,

    /// The number of the block the transfer happened in.
    pub block_number: u64,

    /// The timestamp of the block the transfer happened in.
    pub block_timestamp: u64,

    /// The hash of the block the transfer happened in.
    pub block_hash: B256,

    /// The index of the performing transaction within its block.
    pub transaction_index: u64,

    /// The previous owner.
    pub from: Address,

    /// The new owner.
    pub to: Address,

    /// The order of this transfer within the performing transaction,
    /// starting at 0 and incrementing across input-derived and event-derived
    /// transfers alike, in processing order.
    pub transfer_index: u64,

    /// The index of the transfer event log. `None` for input-derived
    /// transfers.
    pub event_log_index: Option<u64>,

    /// The previous owner asserted by an ESIP-2 style event. The transfer is
    /// only valid if this matches the ethscription's recorded previous owner.
    pub enforced_previous_owner: Option<Address>,
}
