//! Storage traits and the in-memory engine for the ethscriptions indexer.
//!
//! The import pipeline writes through a per-block atomic unit of work:
//! either the block, its transactions, its creations and its transfers all
//! commit, or none do. Uniqueness conflicts on block numbers and
//! ethscription hashes are recognized, recoverable outcomes rather than
//! generic errors, because both the first-valid-wins creation dedup and the
//! racing-importer tolerance rely on them.

mod error;
pub use error::StorageError;

mod traits;
pub use traits::{StateTx, Storage, StorageReader};

mod memory;
pub use memory::MemoryStorage;
