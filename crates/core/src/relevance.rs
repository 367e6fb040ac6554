use alloy_primitives::B256;
use ethscriptions_protocol::{
    CREATE_ETHSCRIPTION_TOPIC, Esips, TRANSFER_ETHSCRIPTION_FOR_PREVIOUS_OWNER_TOPIC,
    TRANSFER_ETHSCRIPTION_TOPIC, creation_from_input, transfers_from_input,
};
use ethscriptions_types::Transaction;

/// Whether a transaction could plausibly create or transfer an ethscription
/// under the given activation rules.
///
/// This is the persistence filter: transactions that fail it are dropped
/// before insert. Event logs are matched on signature topic alone, without
/// decoding: a log that later fails to decode still keeps its transaction
/// persisted. Permissive; false positives cost a row, false negatives lose
/// data. Reverted transactions are never relevant.
pub fn is_possibly_relevant(tx: &Transaction, esips: Esips) -> bool {
    if tx.status == Some(0) {
        return false;
    }

    possibly_creates(tx, esips) || possibly_transfers(tx, esips)
}

fn possibly_creates(tx: &Transaction, esips: Esips) -> bool {
    creation_from_input(tx, esips).is_some()
        || (esips.esip3 && has_topic(tx, &CREATE_ETHSCRIPTION_TOPIC))
}

fn possibly_transfers(tx: &Transaction, esips: Esips) -> bool {
    !transfers_from_input(tx, esips).is_empty()
        || (esips.esip1 && has_topic(tx, &TRANSFER_ETHSCRIPTION_TOPIC))
        || (esips.esip2 && has_topic(tx, &TRANSFER_ETHSCRIPTION_FOR_PREVIOUS_OWNER_TOPIC))
}

fn has_topic(tx: &Transaction, topic: &B256) -> bool {
    tx.logs.iter().any(|log| log.topics.first() == Some(topic))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, Bytes, U256, address};
    use ethscriptions_types::Log;

    fn tx(
        input: impl Into<Bytes>,
        to: Option<Address>,
        status: Option<u64>,
        logs: Vec<Log>,
    ) -> Transaction {
        Transaction {
            hash: B256::ZERO,
            block_number: 20_000_000,
            block_timestamp: 1_700_000_000,
            block_hash: B256::ZERO,
            from: address!("1111111111111111111111111111111111111111"),
            to,
            created_contract_address: None,
            transaction_index: 0,
            input: input.into(),
            status,
            logs,
            gas_price: 10,
            gas_used: 21_000,
            transaction_fee: 210_000,
            value: U256::ZERO,
            blob_versioned_hashes: vec![],
        }
    }

    const TO: Address = address!("2222222222222222222222222222222222222222");

    #[test]
    fn data_uri_input_is_relevant() {
        let esips = Esips::all_enabled();
        assert!(is_possibly_relevant(
            &tx("data:,hi".as_bytes().to_vec(), Some(TO), Some(1), vec![]),
            esips
        ));
    }

    #[test]
    fn transfer_shaped_input_is_relevant() {
        let esips = Esips::all_enabled();
        assert!(is_possibly_relevant(&tx(vec![0u8; 32], Some(TO), Some(1), vec![]), esips));
    }

    #[test]
    fn event_signature_alone_is_relevant() {
        // Wrong topic count: the decoder will skip this log, but the
        // transaction row is still kept.
        let log = Log {
            address: TO,
            topics: vec![*TRANSFER_ETHSCRIPTION_TOPIC],
            data: Bytes::new(),
            log_index: 0,
            removed: false,
        };
        let esips = Esips::all_enabled();
        assert!(is_possibly_relevant(&tx(Bytes::new(), None, Some(1), vec![log]), esips));

        let creation = Log {
            address: TO,
            topics: vec![*CREATE_ETHSCRIPTION_TOPIC],
            data: Bytes::new(),
            log_index: 0,
            removed: false,
        };
        assert!(is_possibly_relevant(&tx(Bytes::new(), None, Some(1), vec![creation]), esips));
    }

    #[test]
    fn event_signatures_gate_on_activation() {
        let log = Log {
            address: TO,
            topics: vec![*TRANSFER_ETHSCRIPTION_TOPIC, B256::ZERO, B256::ZERO],
            data: Bytes::new(),
            log_index: 0,
            removed: false,
        };
        assert!(!is_possibly_relevant(
            &tx(Bytes::new(), None, Some(1), vec![log]),
            Esips::at_mainnet_height(0)
        ));
    }

    #[test]
    fn reverted_transactions_are_never_relevant() {
        let esips = Esips::all_enabled();
        assert!(!is_possibly_relevant(
            &tx("data:,hi".as_bytes().to_vec(), Some(TO), Some(0), vec![]),
            esips
        ));
    }

    #[test]
    fn plain_value_transfer_is_irrelevant() {
        let esips = Esips::all_enabled();
        assert!(!is_possibly_relevant(&tx(Bytes::new(), Some(TO), Some(1), vec![]), esips));
    }
}
