//! Core types shared across the ethscriptions indexer.
//!
//! This crate defines the derived records produced by the block import
//! pipeline, together with the raw transaction and log shapes it consumes.

mod block;
pub use block::Block;

mod log;
pub use log::Log;

mod transaction;
pub use transaction::Transaction;

mod ethscription;
pub use ethscription::Ethscription;

mod transfer;
pub use transfer::Transfer;

mod blob;
pub use blob::BlobSidecar;
