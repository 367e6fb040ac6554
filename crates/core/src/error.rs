use ethscriptions_provider::ProviderError;
use ethscriptions_storage::StorageError;
use thiserror::Error;

/// Errors raised by the import pipeline.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The upstream has not finished processing the block yet. Transient:
    /// the driving loop stops cleanly and retries on its next poll.
    #[error("block {0} is not ready to import yet")]
    BlockNotReady(u64),

    /// A fetched block came back for a different height than requested.
    /// This violates a pipeline invariant and is fatal.
    #[error("fetched block height mismatch: expected {expected}, got {got}")]
    MismatchedHeights {
        /// The requested height.
        expected: u64,
        /// The height the response carried.
        got: u64,
    },

    /// The upstream RPC collaborator failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// A storage operation failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
