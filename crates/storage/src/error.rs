use alloy_primitives::B256;
use thiserror::Error;

/// Errors that may occur while interacting with indexer storage.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    /// A block with this number already exists. Raised when a concurrent
    /// importer raced ahead on the same height; the losing attempt is
    /// discarded as already-done.
    #[error("block {0} already exists")]
    DuplicateBlock(u64),

    /// An ethscription for this transaction hash already exists. At most
    /// one ethscription is ever created per transaction.
    #[error("ethscription for transaction {0} already exists")]
    DuplicateEthscription(B256),

    /// The expected entry was not found.
    #[error("entry not found: {0}")]
    EntryNotFound(String),

    /// A write conflicted with existing state in a way the pipeline does
    /// not recover from.
    #[error("conflict: {0}")]
    Conflict(String),
}
