use alloy_primitives::{B256, Bytes};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// An EIP-4844 blob sidecar, as returned by the upstream blob retrieval
/// collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobSidecar {
    /// The KZG commitment to the blob.
    pub kzg_commitment: Bytes,

    /// The raw blob payload.
    pub data: Bytes,
}

impl BlobSidecar {
    /// The versioned hash of this sidecar: `0x01` followed by the last 31
    /// bytes of the SHA-256 of the KZG commitment.
    ///
    /// A transaction's blob versioned hash references this sidecar iff the
    /// two are equal.
    pub fn versioned_hash(&self) -> B256 {
        let digest = Sha256::digest(&self.kzg_commitment);
        let mut hash = B256::from_slice(&digest);
        hash[0] = 0x01;
        hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versioned_hash_is_prefixed_sha256() {
        let sidecar = BlobSidecar {
            kzg_commitment: Bytes::from_static(&[0xab; 48]),
            data: Bytes::new(),
        };

        let hash = sidecar.versioned_hash();
        let digest = Sha256::digest([0xab; 48]);

        assert_eq!(hash[0], 0x01);
        assert_eq!(&hash[1..], &digest[1..]);
    }

    #[test]
    fn distinct_commitments_yield_distinct_hashes() {
        let a = BlobSidecar {
            kzg_commitment: Bytes::from_static(&[0x01; 48]),
            data: Bytes::new(),
        };
        let b = BlobSidecar {
            kzg_commitment: Bytes::from_static(&[0x02; 48]),
            data: Bytes::new(),
        };

        assert_ne!(a.versioned_hash(), b.versioned_hash());
    }
}
