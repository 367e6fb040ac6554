//! Shared test doubles for the import pipeline.

use crate::BlockImporter;
use alloy_primitives::{Address, B256, Bytes, U64, U128, U256, address};
use async_trait::async_trait;
use ethscriptions_protocol::{ChainConfig, ExecutionMode};
use ethscriptions_provider::{
    BlockProvider, BlockResult, ProviderError, ReceiptResult, ReceiptsPage, ReceiptsResponse,
    TransactionResult,
};
use ethscriptions_storage::MemoryStorage;
use ethscriptions_types::BlobSidecar;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

pub(crate) const FROM: Address = address!("1111111111111111111111111111111111111111");
pub(crate) const TO: Address = address!("2222222222222222222222222222222222222222");

/// An in-memory chain the importer can fetch from.
#[derive(Default)]
pub(crate) struct MockProvider {
    pub(crate) blocks: Mutex<HashMap<u64, BlockResult>>,
    pub(crate) receipts: Mutex<HashMap<u64, ReceiptsResponse>>,
    pub(crate) sidecars: Mutex<HashMap<u64, Vec<BlobSidecar>>>,
}

#[async_trait]
impl BlockProvider for MockProvider {
    async fn block_by_number(&self, number: u64) -> Result<Option<BlockResult>, ProviderError> {
        Ok(self.blocks.lock().unwrap().get(&number).cloned())
    }

    async fn receipts_by_block(&self, number: u64) -> Result<ReceiptsResponse, ProviderError> {
        Ok(self.receipts.lock().unwrap().get(&number).cloned().unwrap_or_default())
    }

    async fn latest_block_number(&self) -> Result<u64, ProviderError> {
        Ok(self.blocks.lock().unwrap().keys().copied().max().unwrap_or_default())
    }

    async fn blob_sidecars(&self, number: u64) -> Result<Vec<BlobSidecar>, ProviderError> {
        Ok(self.sidecars.lock().unwrap().get(&number).cloned().unwrap_or_default())
    }
}

pub(crate) fn block_hash(number: u64) -> B256 {
    B256::with_last_byte(number as u8)
}

pub(crate) fn wire_tx(last_byte: u8, input: impl Into<Bytes>, index: u64) -> TransactionResult {
    TransactionResult {
        hash: B256::with_last_byte(last_byte),
        from: FROM,
        to: Some(TO),
        transaction_index: U64::from(index),
        input: input.into(),
        value: U256::ZERO,
        blob_versioned_hashes: vec![],
    }
}

pub(crate) fn receipt_for(tx: &TransactionResult) -> ReceiptResult {
    ReceiptResult {
        transaction_hash: tx.hash,
        effective_gas_price: Some(U128::from(10u64)),
        gas_used: U128::from(21_000u64),
        status: Some(U64::from(1u64)),
        contract_address: None,
        logs: vec![],
    }
}

pub(crate) fn add_block_with_hash(
    provider: &MockProvider,
    number: u64,
    hash: B256,
    parent_hash: B256,
    txs: Vec<TransactionResult>,
) {
    let receipts = txs.iter().map(receipt_for).collect();
    provider.blocks.lock().unwrap().insert(
        number,
        BlockResult {
            number: U64::from(number),
            hash: Some(hash),
            parent_hash,
            timestamp: U64::from(1_700_000_000 + number),
            transactions: txs,
        },
    );
    provider.receipts.lock().unwrap().insert(number, ReceiptsResponse::ready(ReceiptsPage { receipts }));
}

pub(crate) fn add_block(provider: &MockProvider, number: u64, txs: Vec<TransactionResult>) {
    add_block_with_hash(provider, number, block_hash(number), block_hash(number - 1), txs);
}

/// An importer over fresh in-memory storage, on a test network whose single
/// genesis height is 100.
pub(crate) fn importer(
    provider: Arc<MockProvider>,
    batch_size: u64,
) -> (Arc<MemoryStorage>, BlockImporter<MemoryStorage, MockProvider>) {
    let storage = Arc::new(MemoryStorage::new());
    let config = ChainConfig::testnet(ExecutionMode::Production, 100);
    let importer = BlockImporter::new(storage.clone(), provider, config, batch_size);
    (storage, importer)
}
