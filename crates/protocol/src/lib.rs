//! Protocol activation rules and the transaction/event interpretation engine
//! for the ethscriptions indexer.
//!
//! Parsing behavior changes at fixed block heights via numbered activation
//! rules (ESIPs). The [`ChainConfig`] maps a height to the set of enabled
//! rules, and the decoder turns raw transaction input and event logs into
//! creation and transfer candidates under those rules.

mod chain;
pub use chain::{ChainConfig, ExecutionMode, Network};

mod esips;
pub use esips::Esips;

mod signatures;
pub use signatures::{
    CREATE_ETHSCRIPTION_TOPIC, TRANSFER_ETHSCRIPTION_FOR_PREVIOUS_OWNER_TOPIC,
    TRANSFER_ETHSCRIPTION_TOPIC,
};

mod data_uri;
pub use data_uri::is_valid_data_uri;

mod input;
pub use input::utf8_input;

mod decode;
pub use decode::{
    CreationCandidate, TransferCandidate, creation_from_input, creations_from_events,
    transfers_from_events, transfers_from_input,
};
