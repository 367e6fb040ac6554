//! Upstream chain RPC collaborator for the ethscriptions indexer.
//!
//! The import pipeline consumes the chain through the [`BlockProvider`]
//! trait: full blocks by number, batched receipts by block, the chain tip,
//! and blob sidecars. Responses are trusted apart from parent-hash linkage,
//! which the importer cross-checks itself.

mod error;
pub use error::ProviderError;

mod wire;
pub use wire::{
    BlobSidecarResult, BlockResult, LogResult, ReceiptResult, ReceiptsPage, ReceiptsResponse,
    RpcErrorPayload, TransactionResult,
};

mod traits;
pub use traits::BlockProvider;

mod rpc;
pub use rpc::RpcBlockProvider;
