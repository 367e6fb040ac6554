use crate::{BatchOutcome, BlockImporter, ImportError};
use ethscriptions_provider::BlockProvider;
use ethscriptions_storage::Storage;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Drives the [`BlockImporter`] continuously: catch up to the chain tip,
/// sleep for the poll interval, repeat until cancelled.
#[derive(Debug)]
pub struct ImportDriver<S, P> {
    importer: BlockImporter<S, P>,
    poll_interval: Duration,
    cancel: CancellationToken,
}

impl<S: Storage, P: BlockProvider> ImportDriver<S, P> {
    /// Creates a driver around the given importer.
    pub const fn new(
        importer: BlockImporter<S, P>,
        poll_interval: Duration,
        cancel: CancellationToken,
    ) -> Self {
        Self { importer, poll_interval, cancel }
    }

    /// Imports batches until the chain has nothing ready, then returns the
    /// number of blocks imported.
    ///
    /// A rolled-back reorg is not terminal; the next batch re-imports from
    /// the truncation point.
    pub async fn run_until_caught_up(&self) -> Result<u64, ImportError> {
        let mut total = 0u64;
        loop {
            match self.importer.import_batch().await {
                Ok(BatchOutcome::Imported { blocks }) => total += blocks,
                Ok(BatchOutcome::Reorged { truncated_from }) => {
                    tracing::debug!(
                        target: "driver",
                        truncated_from,
                        "Re-importing after rollback"
                    );
                }
                Err(ImportError::BlockNotReady(number)) => {
                    tracing::debug!(target: "driver", next = number, "Caught up to the chain tip");
                    return Ok(total);
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Runs the poll loop until the cancellation token fires.
    pub async fn run(&self) -> Result<(), ImportError> {
        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    tracing::info!(target: "driver", "Shutting down");
                    return Ok(());
                }
                caught_up = self.run_until_caught_up() => {
                    let imported = caught_up?;
                    if imported > 0 {
                        tracing::info!(target: "driver", imported, "Caught up");
                    }
                }
            }

            tokio::select! {
                _ = self.cancel.cancelled() => {
                    tracing::info!(target: "driver", "Shutting down");
                    return Ok(());
                }
                _ = tokio::time::sleep(self.poll_interval) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{MockProvider, add_block, importer, wire_tx};
    use alloy_primitives::B256;
    use ethscriptions_storage::StorageReader;
    use std::sync::Arc;

    fn driver(
        provider: Arc<MockProvider>,
        batch_size: u64,
    ) -> (Arc<ethscriptions_storage::MemoryStorage>, ImportDriver<ethscriptions_storage::MemoryStorage, MockProvider>)
    {
        let (storage, importer) = importer(provider, batch_size);
        let driver =
            ImportDriver::new(importer, Duration::from_millis(10), CancellationToken::new());
        (storage, driver)
    }

    #[tokio::test]
    async fn catches_up_to_the_tip_and_stops() {
        let provider = Arc::new(MockProvider::default());
        add_block(&provider, 100, vec![]);
        add_block(&provider, 101, vec![wire_tx(0xaa, "data:,test".as_bytes().to_vec(), 0)]);
        add_block(&provider, 102, vec![]);
        let (storage, driver) = driver(provider, 2);

        let imported = driver.run_until_caught_up().await.unwrap();
        assert_eq!(imported, 3);
        assert_eq!(storage.max_block_number().unwrap(), Some(102));
        assert!(
            storage
                .ethscription_by_transaction_hash(B256::with_last_byte(0xaa))
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn run_returns_once_cancelled() {
        let provider = Arc::new(MockProvider::default());
        add_block(&provider, 100, vec![]);
        let (_storage, driver) = driver(provider, 1);

        driver.cancel.cancel();
        driver.run().await.unwrap();
    }
}
