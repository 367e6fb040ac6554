//! Blob-backed attachment resolution.
//!
//! A creating transaction that carries EIP-4844 blob hashes gets its blob
//! content resolved into an attachment digest and mimetype. Resolution is
//! best-effort: any failure here is logged by the caller and leaves the
//! ethscription without an attachment.

use alloy_primitives::B256;
use ethscriptions_types::{BlobSidecar, Transaction};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Errors raised while resolving a blob attachment. Never fatal to the
/// block import.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AttachmentError {
    /// A versioned hash on the transaction matched none of the block's
    /// sidecars.
    #[error("no blob sidecar matches versioned hash {0}")]
    MissingBlob(B256),

    /// The matched blobs carried no payload after unpacking.
    #[error("blob payload is empty after unpacking")]
    EmptyContent,
}

/// A resolved blob attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// `0x`-prefixed SHA-256 of the unpacked content.
    pub sha: String,
    /// The sniffed mimetype of the content.
    pub mimetype: String,
}

/// Resolves the attachment carried by `tx`'s blobs out of the block's
/// sidecars.
///
/// Each of the transaction's versioned hashes must match a sidecar; the
/// matched blob payloads are unpacked and concatenated in hash order.
pub fn resolve_attachment(
    tx: &Transaction,
    sidecars: &[BlobSidecar],
) -> Result<Attachment, AttachmentError> {
    let mut content = Vec::new();
    for versioned_hash in &tx.blob_versioned_hashes {
        let sidecar = sidecars
            .iter()
            .find(|sidecar| sidecar.versioned_hash() == *versioned_hash)
            .ok_or(AttachmentError::MissingBlob(*versioned_hash))?;
        content.extend(unpack_blob(&sidecar.data));
    }

    // Trailing zero bytes are blob padding, not content.
    while content.last() == Some(&0) {
        content.pop();
    }
    if content.is_empty() {
        return Err(AttachmentError::EmptyContent);
    }

    Ok(Attachment {
        sha: format!("0x{:x}", Sha256::digest(&content)),
        mimetype: sniff_mimetype(&content).to_string(),
    })
}

/// Unpacks a blob into its payload bytes: each 32-byte field element
/// reserves its first byte to stay below the BLS modulus, so the payload
/// lives in the remaining 31 bytes of each element.
fn unpack_blob(blob: &[u8]) -> Vec<u8> {
    blob.chunks(32).flat_map(|element| element.get(1..).unwrap_or_default()).copied().collect()
}

fn sniff_mimetype(content: &[u8]) -> &'static str {
    if content.starts_with(&[0x1f, 0x8b]) {
        "application/gzip"
    } else if content.starts_with(b"\x89PNG") {
        "image/png"
    } else if content.starts_with(&[0xff, 0xd8, 0xff]) {
        "image/jpeg"
    } else if std::str::from_utf8(content).is_ok() {
        "text/plain"
    } else {
        "application/octet-stream"
    }
}
