use crate::{StateTx, Storage, StorageError, StorageReader};
use alloy_primitives::B256;
use ethscriptions_types::{Block, Ethscription, Transaction, Transfer};
use std::{
    collections::{BTreeMap, HashMap},
    sync::Mutex,
};
use tracing::debug;

/// Committed indexer state.
#[derive(Debug, Clone, Default)]
struct State {
    blocks: BTreeMap<u64, Block>,
    transactions: HashMap<B256, Transaction>,
    ethscriptions: HashMap<B256, Ethscription>,
    transfers: Vec<Transfer>,
}

/// An in-memory storage engine.
///
/// Units of work stage against a clone of the committed state and swap it
/// in on success, which gives all-or-nothing semantics per block and
/// serializes APPLY phases on the state lock.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    state: Mutex<State>,
}

impl MemoryStorage {
    /// Creates an empty storage engine.
    pub fn new() -> Self {
        Self::default()
    }
}

/// The staged view of one unit of work against [`MemoryStorage`].
#[derive(Debug)]
struct MemoryTx {
    state: State,
}

impl StorageReader for MemoryStorage {
    fn max_block_number(&self) -> Result<Option<u64>, StorageError> {
        let state = self.state.lock().expect("storage lock poisoned");
        Ok(state.blocks.keys().next_back().copied())
    }

    fn block_by_number(&self, number: u64) -> Result<Option<Block>, StorageError> {
        let state = self.state.lock().expect("storage lock poisoned");
        Ok(state.blocks.get(&number).cloned())
    }

    fn ethscription_by_transaction_hash(
        &self,
        transaction_hash: B256,
    ) -> Result<Option<Ethscription>, StorageError> {
        let state = self.state.lock().expect("storage lock poisoned");
        Ok(state.ethscriptions.get(&transaction_hash).cloned())
    }

    fn transactions_by_block(&self, number: u64) -> Result<Vec<Transaction>, StorageError> {
        let state = self.state.lock().expect("storage lock poisoned");
        let mut transactions: Vec<Transaction> = state
            .transactions
            .values()
            .filter(|tx| tx.block_number == number)
            .cloned()
            .collect();
        transactions.sort_by_key(|tx| tx.transaction_index);
        Ok(transactions)
    }

    fn transfers_by_transaction(
        &self,
        transaction_hash: B256,
    ) -> Result<Vec<Transfer>, StorageError> {
        let state = self.state.lock().expect("storage lock poisoned");
        let mut transfers: Vec<Transfer> = state
            .transfers
            .iter()
            .filter(|transfer| transfer.transaction_hash == transaction_hash)
            .cloned()
            .collect();
        transfers.sort_by_key(|transfer| transfer.transfer_index);
        Ok(transfers)
    }
}

impl Storage for MemoryStorage {
    fn with_unit_of_work<T>(
        &self,
        f: impl FnOnce(&mut dyn StateTx) -> Result<T, StorageError>,
    ) -> Result<T, StorageError> {
        let mut committed = self.state.lock().expect("storage lock poisoned");
        let mut tx = MemoryTx { state: committed.clone() };

        let out = f(&mut tx)?;
        *committed = tx.state;
        Ok(out)
    }

    fn truncate_from(&self, height: u64) -> Result<u64, StorageError> {
        let mut state = self.state.lock().expect("storage lock poisoned");

        let removed: Vec<u64> = state.blocks.range(height..).map(|(number, _)| *number).collect();
        for number in &removed {
            state.blocks.remove(number);
        }
        state.transactions.retain(|_, tx| tx.block_number < height);
        state.ethscriptions.retain(|_, ethscription| ethscription.block_number < height);
        state.transfers.retain(|transfer| transfer.block_number < height);

        rebuild_ownership(&mut state);

        debug!(target: "storage", height, blocks_removed = removed.len(), "Truncated storage");
        Ok(removed.len() as u64)
    }
}

/// Recomputes ownership of every surviving ethscription from its surviving
/// transfers, in chronological order. Needed after a truncate removed
/// transfers that had rolled ownership forward.
fn rebuild_ownership(state: &mut State) {
    let mut transfers = state.transfers.clone();
    transfers.sort_by_key(|t| (t.block_number, t.transaction_index, t.transfer_index));

    for ethscription in state.ethscriptions.values_mut() {
        ethscription.previous_owner = ethscription.creator;
        ethscription.current_owner = ethscription.initial_owner;
    }
    for transfer in transfers {
        if let Some(ethscription) =
            state.ethscriptions.get_mut(&transfer.ethscription_transaction_hash)
        {
            ethscription.previous_owner = ethscription.current_owner;
            ethscription.current_owner = transfer.to;
        }
    }
}

impl StateTx for MemoryTx {
    fn ethscription_exists(&self, transaction_hash: B256) -> bool {
        self.state.ethscriptions.contains_key(&transaction_hash)
    }

    fn ethscription_by_transaction_hash(&self, transaction_hash: B256) -> Option<Ethscription> {
        self.state.ethscriptions.get(&transaction_hash).cloned()
    }

    fn insert_block(&mut self, block: Block) -> Result<(), StorageError> {
        if self.state.blocks.contains_key(&block.number) {
            return Err(StorageError::DuplicateBlock(block.number));
        }
        self.state.blocks.insert(block.number, block);
        Ok(())
    }

    fn insert_transactions(&mut self, transactions: Vec<Transaction>) -> Result<(), StorageError> {
        for transaction in transactions {
            if self.state.transactions.contains_key(&transaction.hash) {
                return Err(StorageError::Conflict(format!(
                    "transaction {} already exists",
                    transaction.hash
                )));
            }
            self.state.transactions.insert(transaction.hash, transaction);
        }
        Ok(())
    }

    fn insert_ethscription(&mut self, ethscription: Ethscription) -> Result<(), StorageError> {
        if self.state.ethscriptions.contains_key(&ethscription.transaction_hash) {
            return Err(StorageError::DuplicateEthscription(ethscription.transaction_hash));
        }
        self.state.ethscriptions.insert(ethscription.transaction_hash, ethscription);
        Ok(())
    }

    fn record_transfer(&mut self, transfer: Transfer) -> Result<(), StorageError> {
        let ethscription = self
            .state
            .ethscriptions
            .get_mut(&transfer.ethscription_transaction_hash)
            .ok_or_else(|| {
                StorageError::EntryNotFound(format!(
                    "ethscription {}",
                    transfer.ethscription_transaction_hash
                ))
            })?;

        ethscription.previous_owner = ethscription.current_owner;
        ethscription.current_owner = transfer.to;
        self.state.transfers.push(transfer);
        Ok(())
    }

    fn set_attachment(
        &mut self,
        transaction_hash: B256,
        sha: String,
        mimetype: String,
    ) -> Result<(), StorageError> {
        let ethscription =
            self.state.ethscriptions.get_mut(&transaction_hash).ok_or_else(|| {
                StorageError::EntryNotFound(format!("ethscription {transaction_hash}"))
            })?;

        ethscription.attachment_sha = Some(sha);
        ethscription.attachment_mimetype = Some(mimetype);
        Ok(())
    }

    fn mark_imported(&mut self, number: u64, imported_at: u64) -> Result<(), StorageError> {
        let block = self
            .state
            .blocks
            .get_mut(&number)
            .ok_or_else(|| StorageError::EntryNotFound(format!("block {number}")))?;

        block.imported_at = Some(imported_at);
        Ok(())
    }
}
