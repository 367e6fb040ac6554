//! The block import pipeline and interpretation engine of the ethscriptions
//! indexer.
//!
//! The [`BlockImporter`] advances persisted state through a fixed cycle:
//! select the next batch of heights, fetch blocks and receipts concurrently,
//! validate readiness, detect and roll back reorgs, then apply each block as
//! one atomic unit of work. Within a block, the [`TransactionProcessor`]
//! interprets each relevant transaction under the activation rules of its
//! height and persists the resulting creations and transfers.

mod error;
pub use error::ImportError;

mod relevance;
pub use relevance::is_possibly_relevant;

mod validator;
pub use validator::{OwnershipValidator, TransferValidator};

mod attachment;
pub use attachment::{Attachment, AttachmentError, resolve_attachment};

mod processor;
pub use processor::{ProcessOutcome, TransactionProcessor};

mod importer;
pub use importer::{BatchOutcome, BlockImporter};

mod driver;
pub use driver::ImportDriver;

#[cfg(test)]
mod test_utils;
