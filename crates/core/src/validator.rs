use ethscriptions_protocol::TransferCandidate;
use ethscriptions_types::Ethscription;

/// Decides whether a transfer candidate may move its target ethscription.
///
/// The processor calls `validate` exactly once per candidate whose target
/// exists, in generation order, and records only the accepted ones.
pub trait TransferValidator {
    /// Whether the candidate is allowed to transfer the given ethscription.
    fn validate(&mut self, ethscription: &Ethscription, candidate: &TransferCandidate) -> bool;
}

/// The shipped validation rule: only the current owner may transfer, and an
/// asserted previous owner must match the recorded one.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnershipValidator;

impl TransferValidator for OwnershipValidator {
    fn validate(&mut self, ethscription: &Ethscription, candidate: &TransferCandidate) -> bool {
        if ethscription.current_owner != candidate.from {
            return false;
        }
        match candidate.enforced_previous_owner {
            Some(enforced) => ethscription.previous_owner == enforced,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, B256, U256, address};

    const OWNER: Address = address!("1111111111111111111111111111111111111111");
    const PREVIOUS: Address = address!("2222222222222222222222222222222222222222");
    const STRANGER: Address = address!("3333333333333333333333333333333333333333");

    fn ethscription() -> Ethscription {
        Ethscription {
            transaction_hash: B256::ZERO,
            block_number: 0,
            block_timestamp: 0,
            block_hash: B256::ZERO,
            transaction_index: 0,
            creator: PREVIOUS,
            previous_owner: PREVIOUS,
            current_owner: OWNER,
            initial_owner: PREVIOUS,
            content_uri: "data:,x".to_string(),
            event_log_index: None,
            gas_price: 0,
            gas_used: 0,
            transaction_fee: 0,
            value: U256::ZERO,
            attachment_sha: None,
            attachment_mimetype: None,
        }
    }

    fn candidate(from: Address, enforced: Option<Address>) -> TransferCandidate {
        TransferCandidate {
            ethscription_transaction_hash: B256::ZERO,
            from,
            to: STRANGER,
            event_log_index: None,
            enforced_previous_owner: enforced,
        }
    }

    #[test]
    fn only_the_current_owner_may_transfer() {
        let mut validator = OwnershipValidator;
        assert!(validator.validate(&ethscription(), &candidate(OWNER, None)));
        assert!(!validator.validate(&ethscription(), &candidate(STRANGER, None)));
    }

    #[test]
    fn enforced_previous_owner_must_match() {
        let mut validator = OwnershipValidator;
        assert!(validator.validate(&ethscription(), &candidate(OWNER, Some(PREVIOUS))));
        assert!(!validator.validate(&ethscription(), &candidate(OWNER, Some(STRANGER))));
    }
}
