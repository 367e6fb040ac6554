use crate::{
    ImportError, OwnershipValidator, TransactionProcessor, is_possibly_relevant,
    resolve_attachment,
};
use alloy_primitives::B256;
use ethscriptions_protocol::ChainConfig;
use ethscriptions_provider::{
    BlockProvider, ProviderError, ReceiptResult, ReceiptsResponse, TransactionResult,
};
use ethscriptions_storage::{Storage, StorageError};
use ethscriptions_types::{Block, Transaction};
use futures::future::try_join_all;
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Instant, SystemTime, UNIX_EPOCH},
};

/// What one [`BlockImporter::import_batch`] call accomplished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// The batch was applied; `blocks` counts the newly imported heights.
    Imported {
        /// How many blocks this batch actually imported.
        blocks: u64,
    },
    /// A reorg was detected and rolled back instead of importing. The next
    /// batch re-imports from the truncation point.
    Reorged {
        /// The first removed height.
        truncated_from: u64,
    },
}

/// One block fetched from the upstream, paired with its receipts.
#[derive(Debug)]
struct FetchedBlock {
    number: u64,
    block: Option<ethscriptions_provider::BlockResult>,
    receipts: ReceiptsResponse,
}

/// A fetched block that passed the readiness checks.
#[derive(Debug)]
struct ReadyBlock {
    number: u64,
    hash: B256,
    parent_hash: B256,
    timestamp: u64,
    transactions: Vec<TransactionResult>,
    receipts: Vec<ReceiptResult>,
}

impl FetchedBlock {
    fn into_ready(self) -> Result<ReadyBlock, ImportError> {
        if self.receipts.is_not_ready() {
            return Err(ImportError::BlockNotReady(self.number));
        }
        let Some(block) = self.block else {
            return Err(ImportError::BlockNotReady(self.number));
        };
        let Some(hash) = block.hash else {
            return Err(ImportError::BlockNotReady(self.number));
        };
        let got = block.number.to::<u64>();
        if got != self.number {
            return Err(ImportError::MismatchedHeights { expected: self.number, got });
        }
        let Some(page) = self.receipts.result else {
            let detail = match self.receipts.error {
                Some(error) => format!("receipts error {}: {}", error.code, error.message),
                None => "empty receipts response".to_string(),
            };
            return Err(ProviderError::UnexpectedResponse(detail).into());
        };

        Ok(ReadyBlock {
            number: self.number,
            hash,
            parent_hash: block.parent_hash,
            timestamp: block.timestamp.to::<u64>(),
            transactions: block.transactions,
            receipts: page.receipts,
        })
    }
}

/// Drives persisted state forward one batch of blocks at a time.
///
/// A batch moves through a fixed cycle: select the next heights, fetch
/// blocks and receipts concurrently, validate readiness, roll back on a
/// detected reorg, and otherwise apply each block as one atomic unit of
/// work.
#[derive(Debug)]
pub struct BlockImporter<S, P> {
    storage: Arc<S>,
    provider: Arc<P>,
    config: ChainConfig,
    processor: TransactionProcessor,
    batch_size: u64,
}

impl<S: Storage, P: BlockProvider> BlockImporter<S, P> {
    /// Creates an importer over the given storage and provider.
    pub fn new(storage: Arc<S>, provider: Arc<P>, config: ChainConfig, batch_size: u64) -> Self {
        let processor = TransactionProcessor::new(config.clone());
        Self { storage, provider, config, processor, batch_size: batch_size.max(1) }
    }

    /// Imports the next batch of blocks.
    ///
    /// Returns [`ImportError::BlockNotReady`] when the chain has nothing
    /// importable yet; the caller treats that as "caught up" and polls
    /// again later.
    pub async fn import_batch(&self) -> Result<BatchOutcome, ImportError> {
        let numbers = self.next_blocks_to_import().await?;
        let started = Instant::now();

        let fetched = self.fetch_blocks(&numbers).await?;
        let mut ready = Vec::with_capacity(fetched.len());
        for block in fetched {
            ready.push(block.into_ready()?);
        }

        let mut imported = 0u64;
        for block in &ready {
            if let Some(truncated_from) = self.detect_reorg(block)? {
                let removed = self.storage.truncate_from(truncated_from)?;
                tracing::info!(
                    target: "importer",
                    height = block.number,
                    truncated_from,
                    removed,
                    "Reorg detected, rolled back"
                );
                return Ok(BatchOutcome::Reorged { truncated_from });
            }
            if self.apply_block(block).await? {
                imported += 1;
            }
        }

        let elapsed = started.elapsed();
        tracing::info!(
            target: "importer",
            blocks = imported,
            elapsed_ms = elapsed.as_millis() as u64,
            blocks_per_second = imported as f64 / elapsed.as_secs_f64().max(f64::EPSILON),
            "Imported batch"
        );
        Ok(BatchOutcome::Imported { blocks: imported })
    }

    /// Selects the next heights to import: unimported genesis heights in
    /// ascending order while any remain, then sequential heights after the
    /// persisted maximum, clamped to the chain tip.
    async fn next_blocks_to_import(&self) -> Result<Vec<u64>, ImportError> {
        let mut pending_genesis = Vec::new();
        for &height in self.config.genesis_blocks() {
            if self.storage.block_by_number(height)?.is_none() {
                pending_genesis.push(height);
                if pending_genesis.len() as u64 == self.batch_size {
                    break;
                }
            }
        }
        if !pending_genesis.is_empty() {
            return Ok(pending_genesis);
        }

        let max = self.storage.max_block_number()?.unwrap_or(self.config.max_genesis_block());
        let tip = self.provider.latest_block_number().await?;
        let next: Vec<u64> =
            (max + 1..=max.saturating_add(self.batch_size)).take_while(|&n| n <= tip).collect();
        if next.is_empty() {
            return Err(ImportError::BlockNotReady(max + 1));
        }
        Ok(next)
    }

    /// Fetches blocks and receipts for the given heights, two concurrent
    /// requests per height, joined back in request order.
    async fn fetch_blocks(&self, numbers: &[u64]) -> Result<Vec<FetchedBlock>, ImportError> {
        let fetches = numbers.iter().map(|&number| {
            let provider = Arc::clone(&self.provider);
            async move {
                let (block, receipts) = tokio::try_join!(
                    provider.block_by_number(number),
                    provider.receipts_by_block(number)
                )?;
                Ok::<_, ProviderError>(FetchedBlock { number, block, receipts })
            }
        });
        Ok(try_join_all(fetches).await?)
    }

    /// Checks the fetched block's parent hash against the persisted parent.
    ///
    /// Genesis heights are exempt, as is any height whose parent was never
    /// persisted. Returns the height to truncate from on a mismatch.
    fn detect_reorg(&self, block: &ReadyBlock) -> Result<Option<u64>, ImportError> {
        if self.config.is_genesis_block(block.number) {
            return Ok(None);
        }
        let Some(parent) = self.storage.block_by_number(block.number.saturating_sub(1))? else {
            return Ok(None);
        };
        if parent.hash != block.parent_hash {
            return Ok(Some(parent.number));
        }
        Ok(None)
    }

    /// Applies one block as a single unit of work. Returns `false` when a
    /// racing importer already persisted this height, which is benign.
    async fn apply_block(&self, block: &ReadyBlock) -> Result<bool, ImportError> {
        let esips = self.config.esips_at(block.number);

        let receipts: HashMap<B256, &ReceiptResult> =
            block.receipts.iter().map(|receipt| (receipt.transaction_hash, receipt)).collect();
        let mut transactions = Vec::new();
        for wire_tx in &block.transactions {
            let Some(receipt) = receipts.get(&wire_tx.hash) else {
                return Err(ProviderError::UnexpectedResponse(format!(
                    "missing receipt for transaction {}",
                    wire_tx.hash
                ))
                .into());
            };
            let tx = build_transaction(block, wire_tx, receipt);
            if is_possibly_relevant(&tx, esips) {
                transactions.push(tx);
            }
        }
        transactions.sort_by_key(|tx| tx.transaction_index);

        // Sidecars are fetched up front so the unit of work stays synchronous.
        let sidecars = if esips.esip8 && transactions.iter().any(Transaction::has_blobs) {
            self.provider.blob_sidecars(block.number).await?
        } else {
            Vec::new()
        };

        let record = Block {
            number: block.number,
            hash: block.hash,
            parent_hash: block.parent_hash,
            timestamp: block.timestamp,
            is_genesis: self.config.is_genesis_block(block.number),
            imported_at: None,
        };
        let imported_at = unix_now();

        let result = self.storage.with_unit_of_work(|state| {
            state.insert_block(record.clone())?;
            state.insert_transactions(transactions.clone())?;
            let mut validator = OwnershipValidator;
            for tx in &transactions {
                let outcome = self.processor.process(tx, state, &mut validator)?;
                if outcome.created && esips.esip8 && tx.has_blobs() {
                    match resolve_attachment(tx, &sidecars) {
                        Ok(attachment) => {
                            state.set_attachment(tx.hash, attachment.sha, attachment.mimetype)?;
                        }
                        Err(err) => tracing::warn!(
                            target: "importer",
                            tx = %tx.hash,
                            %err,
                            "Attachment resolution failed"
                        ),
                    }
                }
            }
            state.mark_imported(record.number, imported_at)?;
            Ok(())
        });

        match result {
            Ok(()) => {
                tracing::debug!(
                    target: "importer",
                    number = block.number,
                    transactions = transactions.len(),
                    "Imported block"
                );
                Ok(true)
            }
            Err(StorageError::DuplicateBlock(number)) => {
                tracing::debug!(target: "importer", number, "Block already persisted, skipping");
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }
}

fn build_transaction(
    block: &ReadyBlock,
    wire_tx: &TransactionResult,
    receipt: &ReceiptResult,
) -> Transaction {
    let gas_price = receipt.effective_gas_price.unwrap_or_default().to::<u128>();
    let gas_used = receipt.gas_used.to::<u128>();

    Transaction {
        hash: wire_tx.hash,
        block_number: block.number,
        block_timestamp: block.timestamp,
        block_hash: block.hash,
        from: wire_tx.from,
        to: wire_tx.to,
        created_contract_address: receipt.contract_address,
        transaction_index: wire_tx.transaction_index.to::<u64>(),
        input: wire_tx.input.clone(),
        status: receipt.status.map(|status| status.to::<u64>()),
        logs: receipt.logs.iter().cloned().map(ethscriptions_provider::LogResult::into_log).collect(),
        gas_price,
        gas_used,
        transaction_fee: gas_price.saturating_mul(gas_used),
        value: wire_tx.value,
        blob_versioned_hashes: wire_tx.blob_versioned_hashes.clone(),
    }
}

fn unix_now() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|elapsed| elapsed.as_secs()).unwrap_or_default()
}
