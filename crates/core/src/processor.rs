use crate::TransferValidator;
use ethscriptions_protocol::{
    ChainConfig, CreationCandidate, TransferCandidate, creation_from_input, creations_from_events,
    transfers_from_events, transfers_from_input,
};
use ethscriptions_storage::{StateTx, StorageError};
use ethscriptions_types::{Ethscription, Transaction, Transfer};

/// What processing one transaction produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProcessOutcome {
    /// Whether this transaction created an ethscription.
    pub created: bool,
    /// How many transfers were recorded.
    pub transfers_recorded: u64,
}

/// Interprets one transaction under the activation rules of its height and
/// stages the resulting writes.
///
/// Phases run in a fixed order: creation from input, creations from events,
/// transfers from input, transfers from events. The first valid creation
/// wins; at most one ethscription ever exists per transaction hash. A single
/// transfer index counter runs across both transfer phases.
#[derive(Debug, Clone)]
pub struct TransactionProcessor {
    config: ChainConfig,
}

impl TransactionProcessor {
    /// Creates a processor for the given network configuration.
    pub const fn new(config: ChainConfig) -> Self {
        Self { config }
    }

    /// Processes one transaction against the staged state.
    pub fn process(
        &self,
        tx: &Transaction,
        state: &mut dyn StateTx,
        validator: &mut dyn TransferValidator,
    ) -> Result<ProcessOutcome, StorageError> {
        let esips = self.config.esips_at(tx.block_number);
        let mut outcome = ProcessOutcome::default();

        if let Some(candidate) = creation_from_input(tx, esips) {
            outcome.created |= try_create(tx, candidate, state)?;
        }
        for candidate in creations_from_events(tx, esips) {
            outcome.created |= try_create(tx, candidate, state)?;
        }

        // One index counter across both transfer sources, input first.
        // Candidates whose target does not exist are skipped without
        // consuming an index; candidates that reach validation consume one
        // whether or not they are accepted.
        let mut transfer_index = 0u64;
        let input_candidates = transfers_from_input(tx, esips);
        let event_candidates = transfers_from_events(tx, esips);
        for candidate in input_candidates.into_iter().chain(event_candidates) {
            let Some(target) =
                state.ethscription_by_transaction_hash(candidate.ethscription_transaction_hash)
            else {
                continue;
            };

            let index = transfer_index;
            transfer_index += 1;

            if validator.validate(&target, &candidate) {
                state.record_transfer(build_transfer(tx, &candidate, index))?;
                outcome.transfers_recorded += 1;
            } else {
                tracing::debug!(
                    target: "processor",
                    tx = %tx.hash,
                    ethscription = %candidate.ethscription_transaction_hash,
                    "Rejected transfer candidate"
                );
            }
        }

        Ok(outcome)
    }
}

/// Stages a creation unless an ethscription already exists for this
/// transaction hash.
fn try_create(
    tx: &Transaction,
    candidate: CreationCandidate,
    state: &mut dyn StateTx,
) -> Result<bool, StorageError> {
    if state.ethscription_exists(tx.hash) {
        return Ok(false);
    }

    tracing::debug!(
        target: "processor",
        tx = %tx.hash,
        owner = %candidate.initial_owner,
        "Creating ethscription"
    );
    state.insert_ethscription(Ethscription {
        transaction_hash: tx.hash,
        block_number: tx.block_number,
        block_timestamp: tx.block_timestamp,
        block_hash: tx.block_hash,
        transaction_index: tx.transaction_index,
        creator: candidate.creator,
        previous_owner: candidate.creator,
        current_owner: candidate.initial_owner,
        initial_owner: candidate.initial_owner,
        content_uri: candidate.content_uri,
        event_log_index: candidate.event_log_index,
        gas_price: tx.gas_price,
        gas_used: tx.gas_used,
        transaction_fee: tx.transaction_fee,
        value: tx.value,
        attachment_sha: None,
        attachment_mimetype: None,
    })?;
    Ok(true)
}

fn build_transfer(tx: &Transaction, candidate: &TransferCandidate, index: u64) -> Transfer {
    Transfer {
        ethscription_transaction_hash: candidate.ethscription_transaction_hash,
        transaction_hash: tx.hash,
        block_number: tx.block_number,
        block_timestamp: tx.block_timestamp,
        block_hash: tx.block_hash,
        transaction_index: tx.transaction_index,
        from: candidate.from,
        to: candidate.to,
        transfer_index: index,
        event_log_index: candidate.event_log_index,
        enforced_previous_owner: candidate.enforced_previous_owner,
    }
}
