use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

/// An imported block.
///
/// Blocks are keyed by `number`. For any two persisted blocks with adjacent
/// numbers, the higher block's `parent_hash` equals the lower block's `hash`,
/// unless the lower block is a genesis block: genesis blocks are seeded out
/// of causal order and exempt from linkage checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// The block number.
    pub number: u64,

    /// The hash of the block itself.
    pub hash: B256,

    /// The hash of the parent block.
    pub parent_hash: B256,

    /// The timestamp of the block (seconds since Unix epoch).
    pub timestamp: u64,

    /// Whether this block belongs to the network's fixed set of historical
    /// genesis heights.
    pub is_genesis: bool,

    /// When the block finished importing (seconds since Unix epoch).
    ///
    /// `None` means the write is in progress or was never finalized. A block
    /// is terminal once this is set; it may only be removed wholesale by a
    /// reorg.
    pub imported_at: Option<u64>,
}
