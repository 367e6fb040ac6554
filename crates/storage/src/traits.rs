use crate::StorageError;
use alloy_primitives::B256;
use ethscriptions_types::{Block, Ethscription, Transaction, Transfer};

/// Read access to persisted indexer state.
///
/// Implementations are expected to provide thread-safe access; readers only
/// ever observe committed state.
pub trait StorageReader {
    /// The highest persisted block number, imported or not.
    fn max_block_number(&self) -> Result<Option<u64>, StorageError>;

    /// The block at the given number, if persisted.
    fn block_by_number(&self, number: u64) -> Result<Option<Block>, StorageError>;

    /// The ethscription created by the given transaction, if any.
    fn ethscription_by_transaction_hash(
        &self,
        transaction_hash: B256,
    ) -> Result<Option<Ethscription>, StorageError>;

    /// The persisted transactions of a block, ascending by transaction
    /// index.
    fn transactions_by_block(&self, number: u64) -> Result<Vec<Transaction>, StorageError>;

    /// The transfers performed by the given transaction, ascending by
    /// transfer index.
    fn transfers_by_transaction(
        &self,
        transaction_hash: B256,
    ) -> Result<Vec<Transfer>, StorageError>;
}

/// The staged view of one atomic unit of work.
///
/// All APPLY-phase writes for a block go through this view. Reads issued
/// against it observe the staged writes, which the first-valid-wins
/// creation dedup and intra-block transfer targeting depend on.
pub trait StateTx {
    /// Whether an ethscription exists for the given transaction hash,
    /// staged writes included.
    fn ethscription_exists(&self, transaction_hash: B256) -> bool;

    /// The ethscription for the given transaction hash, staged writes
    /// included.
    fn ethscription_by_transaction_hash(&self, transaction_hash: B256) -> Option<Ethscription>;

    /// Stages a block insert. Fails with [`StorageError::DuplicateBlock`]
    /// if the number is already taken.
    fn insert_block(&mut self, block: Block) -> Result<(), StorageError>;

    /// Stages a bulk transaction insert.
    fn insert_transactions(&mut self, transactions: Vec<Transaction>) -> Result<(), StorageError>;

    /// Stages an ethscription insert. Fails with
    /// [`StorageError::DuplicateEthscription`] if one already exists for
    /// the transaction hash; that conflict is the authoritative backstop
    /// behind the existence check callers make first.
    fn insert_ethscription(&mut self, ethscription: Ethscription) -> Result<(), StorageError>;

    /// Stages a transfer insert and rolls the target ethscription's
    /// ownership forward: `previous_owner` takes the old `current_owner`,
    /// `current_owner` takes the transfer recipient.
    fn record_transfer(&mut self, transfer: Transfer) -> Result<(), StorageError>;

    /// Attaches blob-derived attachment metadata to an existing
    /// ethscription.
    fn set_attachment(
        &mut self,
        transaction_hash: B256,
        sha: String,
        mimetype: String,
    ) -> Result<(), StorageError>;

    /// Marks a staged block as fully imported.
    fn mark_imported(&mut self, number: u64, imported_at: u64) -> Result<(), StorageError>;
}

/// Persistent indexer storage.
pub trait Storage: StorageReader + Send + Sync {
    /// Runs one atomic unit of work: the closure's staged writes commit if
    /// it returns `Ok` and are discarded wholesale if it returns `Err`.
    ///
    /// Units of work are serialized; no two may be in flight at once.
    fn with_unit_of_work<T>(
        &self,
        f: impl FnOnce(&mut dyn StateTx) -> Result<T, StorageError>,
    ) -> Result<T, StorageError>
    where
        Self: Sized;

    /// Deletes every block with number `>= height`, cascading to its
    /// transactions, ethscriptions and transfers, and returns the number of
    /// blocks removed. This is the reorg rollback primitive.
    fn truncate_from(&self, height: u64) -> Result<u64, StorageError>;
}
