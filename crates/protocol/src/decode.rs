//! Decoding of raw transaction input and event logs into creation and
//! transfer candidates.
//!
//! Decoding is stateless and per-transaction. A malformed log or input
//! never aborts the containing transaction: the offending candidate is
//! skipped and the rest proceed.

use crate::{
    CREATE_ETHSCRIPTION_TOPIC, Esips, TRANSFER_ETHSCRIPTION_FOR_PREVIOUS_OWNER_TOPIC,
    TRANSFER_ETHSCRIPTION_TOPIC, is_valid_data_uri, utf8_input,
};
use alloy_primitives::{Address, B256, U256};
use ethscriptions_types::{Log, Transaction};

/// A candidate ethscription creation, from input or from a creation event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationCandidate {
    /// The creator: transaction sender or emitting contract.
    pub creator: Address,
    /// The owner at creation time.
    pub initial_owner: Address,
    /// The content URI.
    pub content_uri: String,
    /// The creation event's log index, `None` for input-derived candidates.
    pub event_log_index: Option<u64>,
}

/// A candidate ethscription transfer, from input or from a transfer event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferCandidate {
    /// The hash of the transaction that created the target ethscription.
    pub ethscription_transaction_hash: B256,
    /// The asserted current owner giving the ethscription away.
    pub from: Address,
    /// The recipient.
    pub to: Address,
    /// The transfer event's log index, `None` for input-derived candidates.
    pub event_log_index: Option<u64>,
    /// The previous owner asserted by the ESIP-2 event form.
    pub enforced_previous_owner: Option<Address>,
}

/// Decodes a creation candidate from the transaction input.
///
/// Present iff the UTF-8-decoded input (gzip-inflated under ESIP-7) is a
/// valid data URI and the transaction has a destination address.
pub fn creation_from_input(tx: &Transaction, esips: Esips) -> Option<CreationCandidate> {
    let to = tx.to?;
    let content_uri = utf8_input(&tx.input, esips.esip7)?;
    if !is_valid_data_uri(&content_uri) {
        return None;
    }

    Some(CreationCandidate {
        creator: tx.from,
        initial_owner: to,
        content_uri,
        event_log_index: None,
    })
}

/// Decodes creation candidates from the transaction's event logs, in
/// canonical log order. Empty unless ESIP-3 is active.
///
/// A log with the creation topic but the wrong topic count or undecodable
/// string data is skipped individually.
pub fn creations_from_events(tx: &Transaction, esips: Esips) -> Vec<CreationCandidate> {
    if !esips.esip3 {
        return Vec::new();
    }

    tx.ordered_logs()
        .into_iter()
        .filter(|log| log.topics.first() == Some(&*CREATE_ETHSCRIPTION_TOPIC))
        .filter_map(|log| {
            if log.topics.len() != 2 {
                return None;
            }
            let content_uri = decode_abi_string(&log.data)?;

            Some(CreationCandidate {
                creator: log.address,
                initial_owner: topic_to_address(&log.topics[1]),
                content_uri,
                event_log_index: Some(log.log_index),
            })
        })
        .collect()
}

/// Decodes transfer candidates from the transaction input: the input is a
/// sequence of concatenated 32-byte ethscription transaction hashes.
///
/// Before ESIP-5 exactly one hash is allowed; after, any positive multiple
/// of 32 bytes. Candidates are emitted in input order; whether each hash
/// names an existing ethscription is the processor's concern.
pub fn transfers_from_input(tx: &Transaction, esips: Esips) -> Vec<TransferCandidate> {
    let Some(to) = tx.to else {
        return Vec::new();
    };

    let valid_length = if esips.esip5 {
        !tx.input.is_empty() && tx.input.len() % 32 == 0
    } else {
        tx.input.len() == 32
    };
    if !valid_length {
        return Vec::new();
    }

    tx.input
        .chunks_exact(32)
        .map(|chunk| TransferCandidate {
            ethscription_transaction_hash: B256::from_slice(chunk),
            from: tx.from,
            to,
            event_log_index: None,
            enforced_previous_owner: None,
        })
        .collect()
}

/// Decodes transfer candidates from the transaction's event logs, in
/// canonical log order, filtered to the signatures enabled at this height.
///
/// The ESIP-1 form carries recipient and ethscription hash; the ESIP-2 form
/// additionally asserts the expected previous owner. A wrong topic count
/// skips that log only.
pub fn transfers_from_events(tx: &Transaction, esips: Esips) -> Vec<TransferCandidate> {
    tx.ordered_logs()
        .into_iter()
        .filter_map(|log| {
            let topic = log.topics.first()?;
            if esips.esip1 && topic == &*TRANSFER_ETHSCRIPTION_TOPIC {
                decode_esip1_transfer(log)
            } else if esips.esip2 && topic == &*TRANSFER_ETHSCRIPTION_FOR_PREVIOUS_OWNER_TOPIC {
                decode_esip2_transfer(log)
            } else {
                None
            }
        })
        .collect()
}

fn decode_esip1_transfer(log: &Log) -> Option<TransferCandidate> {
    if log.topics.len() != 3 {
        return None;
    }

    Some(TransferCandidate {
        ethscription_transaction_hash: log.topics[2],
        from: log.address,
        to: topic_to_address(&log.topics[1]),
        event_log_index: Some(log.log_index),
        enforced_previous_owner: None,
    })
}

fn decode_esip2_transfer(log: &Log) -> Option<TransferCandidate> {
    if log.topics.len() != 4 {
        return None;
    }

    Some(TransferCandidate {
        ethscription_transaction_hash: log.topics[3],
        from: log.address,
        to: topic_to_address(&log.topics[2]),
        event_log_index: Some(log.log_index),
        enforced_previous_owner: Some(topic_to_address(&log.topics[1])),
    })
}

/// ABI-decodes an address from a 32-byte topic word: the last 20 bytes.
/// Padding bytes are ignored, the way lenient ABI decoders read addresses.
fn topic_to_address(topic: &B256) -> Address {
    Address::from_slice(&topic[12..])
}

/// ABI-decodes a dynamic string from event data: an offset word, a length
/// word, then the bytes. Invalid UTF-8 sequences are replaced rather than
/// rejected; embedded NULs are dropped.
fn decode_abi_string(data: &[u8]) -> Option<String> {
    let offset: usize = U256::from_be_slice(data.get(..32)?).try_into().ok()?;
    let start = offset.checked_add(32)?;
    let len: usize = U256::from_be_slice(data.get(offset..start)?).try_into().ok()?;
    let bytes = data.get(start..start.checked_add(len)?)?;

    Some(String::from_utf8_lossy(bytes).replace('\0', ""))
}
