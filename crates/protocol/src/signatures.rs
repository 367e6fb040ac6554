//! Event signature topics recognized by the interpretation engine.
//!
//! Each topic is the Keccak-256 digest of the canonical event signature
//! string, computed once on first use.

use alloy_primitives::{B256, keccak256};
use std::sync::LazyLock;

/// Topic of the ESIP-3 creation event,
/// `ethscriptions_protocol_CreateEthscription(address,string)`.
pub static CREATE_ETHSCRIPTION_TOPIC: LazyLock<B256> =
    LazyLock::new(|| keccak256("ethscriptions_protocol_CreateEthscription(address,string)"));

/// Topic of the ESIP-1 transfer event,
/// `ethscriptions_protocol_TransferEthscription(address,bytes32)`.
pub static TRANSFER_ETHSCRIPTION_TOPIC: LazyLock<B256> =
    LazyLock::new(|| keccak256("ethscriptions_protocol_TransferEthscription(address,bytes32)"));

/// Topic of the ESIP-2 transfer event,
/// `ethscriptions_protocol_TransferEthscriptionForPreviousOwner(address,address,bytes32)`.
pub static TRANSFER_ETHSCRIPTION_FOR_PREVIOUS_OWNER_TOPIC: LazyLock<B256> = LazyLock::new(|| {
    keccak256("ethscriptions_protocol_TransferEthscriptionForPreviousOwner(address,address,bytes32)")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topics_are_distinct() {
        assert_ne!(*CREATE_ETHSCRIPTION_TOPIC, *TRANSFER_ETHSCRIPTION_TOPIC);
        assert_ne!(
            *TRANSFER_ETHSCRIPTION_TOPIC,
            *TRANSFER_ETHSCRIPTION_FOR_PREVIOUS_OWNER_TOPIC
        );
        assert_ne!(*CREATE_ETHSCRIPTION_TOPIC, B256::ZERO);
    }
}
