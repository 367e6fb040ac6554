use crate::{BlockResult, ProviderError, ReceiptsResponse};
use async_trait::async_trait;
use ethscriptions_types::BlobSidecar;

/// Read access to the upstream chain.
///
/// Implementations are expected to be cheap to share across fetch tasks.
#[async_trait]
pub trait BlockProvider: Send + Sync {
    /// Fetches the block at `number` with full transaction objects.
    ///
    /// Returns `Ok(None)` when the chain has no block at that height yet.
    async fn block_by_number(&self, number: u64) -> Result<Option<BlockResult>, ProviderError>;

    /// Fetches every receipt of the block at `number` in one call.
    ///
    /// Upstream errors are folded into the [`ReceiptsResponse`] so the
    /// caller can distinguish the transient not-ready signal from hard
    /// failures.
    async fn receipts_by_block(&self, number: u64) -> Result<ReceiptsResponse, ProviderError>;

    /// Returns the current chain tip number.
    async fn latest_block_number(&self) -> Result<u64, ProviderError>;

    /// Fetches the blob sidecars of the block at `number`.
    async fn blob_sidecars(&self, number: u64) -> Result<Vec<BlobSidecar>, ProviderError>;
}
