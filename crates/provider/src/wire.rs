//! Wire shapes of the upstream JSON-RPC responses.
//!
//! Quantities arrive as `0x`-prefixed hex strings; the receipts call is the
//! provider-specific batched form that returns every receipt of a block in
//! one response, or a transient error while the provider is still indexing
//! the block.

use alloy_primitives::{Address, B256, Bytes, U64, U128, U256};
use ethscriptions_types::BlobSidecar;
use serde::{Deserialize, Serialize};

/// The JSON-RPC error code of the transient "block being processed" signal.
pub const NOT_READY_CODE: i64 = -32600;

/// The JSON-RPC error message of the transient "block being processed"
/// signal.
pub const NOT_READY_MESSAGE: &str = "Block being processed - please try again later";

/// A full block as returned by `eth_getBlockByNumber` with transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockResult {
    /// The block number.
    pub number: U64,
    /// The block hash. Absent for pending blocks, which are never ready to
    /// import.
    pub hash: Option<B256>,
    /// The parent block hash.
    pub parent_hash: B256,
    /// The block timestamp.
    pub timestamp: U64,
    /// The block's transactions, in block order.
    #[serde(default)]
    pub transactions: Vec<TransactionResult>,
}

/// A transaction within a [`BlockResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResult {
    /// The transaction hash.
    pub hash: B256,
    /// The sender.
    pub from: Address,
    /// The recipient; absent for contract creations.
    #[serde(default)]
    pub to: Option<Address>,
    /// The position within the block.
    pub transaction_index: U64,
    /// The raw input.
    pub input: Bytes,
    /// The transferred value.
    pub value: U256,
    /// EIP-4844 blob versioned hashes, when present.
    #[serde(default)]
    pub blob_versioned_hashes: Vec<B256>,
}

/// A receipt within a [`ReceiptsPage`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptResult {
    /// The hash of the transaction this receipt belongs to.
    pub transaction_hash: B256,
    /// The effective gas price paid.
    #[serde(default)]
    pub effective_gas_price: Option<U128>,
    /// The gas used.
    pub gas_used: U128,
    /// The execution status; `0x0` means reverted. Absent on pre-Byzantium
    /// receipts.
    #[serde(default)]
    pub status: Option<U64>,
    /// The created contract address, if any.
    #[serde(default)]
    pub contract_address: Option<Address>,
    /// The emitted logs.
    #[serde(default)]
    pub logs: Vec<LogResult>,
}

/// An event log within a [`ReceiptResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogResult {
    /// The emitting contract.
    pub address: Address,
    /// The log topics.
    #[serde(default)]
    pub topics: Vec<B256>,
    /// The ABI-encoded log data.
    pub data: Bytes,
    /// The position of the log within the block.
    pub log_index: U64,
    /// Whether the log was removed by an upstream reorg.
    #[serde(default)]
    pub removed: bool,
}

impl LogResult {
    /// Converts the wire log into the domain [`ethscriptions_types::Log`].
    pub fn into_log(self) -> ethscriptions_types::Log {
        ethscriptions_types::Log {
            address: self.address,
            topics: self.topics,
            data: self.data,
            log_index: self.log_index.to::<u64>(),
            removed: self.removed,
        }
    }
}

/// The successful payload of the batched receipts call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptsPage {
    /// Every receipt of the requested block.
    pub receipts: Vec<ReceiptResult>,
}

/// A JSON-RPC error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcErrorPayload {
    /// The error code.
    pub code: i64,
    /// The error message.
    pub message: String,
}

/// The outcome of the batched receipts call: either a page of receipts or
/// the upstream error, preserved so the importer can recognize the
/// transient not-ready signal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReceiptsResponse {
    /// The receipts, when the call succeeded.
    pub result: Option<ReceiptsPage>,
    /// The upstream error, when it failed.
    pub error: Option<RpcErrorPayload>,
}

impl ReceiptsResponse {
    /// Wraps a successful receipts page.
    pub const fn ready(page: ReceiptsPage) -> Self {
        Self { result: Some(page), error: None }
    }

    /// Wraps an upstream error payload.
    pub const fn errored(error: RpcErrorPayload) -> Self {
        Self { result: None, error: Some(error) }
    }

    /// Whether the upstream reported the transient "still processing"
    /// condition for this block.
    pub fn is_not_ready(&self) -> bool {
        self.error
            .as_ref()
            .is_some_and(|error| error.code == NOT_READY_CODE || error.message == NOT_READY_MESSAGE)
    }
}

/// A blob sidecar as returned by the upstream blob retrieval call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobSidecarResult {
    /// The KZG commitment.
    pub kzg_commitment: Bytes,
    /// The blob payload.
    pub blob: Bytes,
}

impl BlobSidecarResult {
    /// Converts the wire sidecar into the domain [`BlobSidecar`].
    pub fn into_sidecar(self) -> BlobSidecar {
        BlobSidecar { kzg_commitment: self.kzg_commitment, data: self.blob }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_result_deserializes_hex_quantities() {
        let raw = r#"{
            "number": "0x1312d00",
            "hash": "0x00000000000000000000000000000000000000000000000000000000000000aa",
            "parentHash": "0x00000000000000000000000000000000000000000000000000000000000000bb",
            "timestamp": "0x65000000",
            "transactions": [{
                "hash": "0x00000000000000000000000000000000000000000000000000000000000000cc",
                "from": "0x1111111111111111111111111111111111111111",
                "to": null,
                "transactionIndex": "0x1",
                "input": "0x64617461",
                "value": "0x0"
            }]
        }"#;

        let block: BlockResult = serde_json::from_str(raw).unwrap();
        assert_eq!(block.number.to::<u64>(), 20_000_000);
        assert_eq!(block.timestamp.to::<u64>(), 0x6500_0000);
        assert_eq!(block.transactions.len(), 1);
        assert_eq!(block.transactions[0].transaction_index.to::<u64>(), 1);
        assert_eq!(block.transactions[0].to, None);
        assert!(block.transactions[0].blob_versioned_hashes.is_empty());
    }

    #[test]
    fn receipt_deserializes() {
        let raw = r#"{
            "transactionHash": "0x00000000000000000000000000000000000000000000000000000000000000cc",
            "effectiveGasPrice": "0xa",
            "gasUsed": "0x5208",
            "status": "0x1",
            "contractAddress": null,
            "logs": [{
                "address": "0x2222222222222222222222222222222222222222",
                "topics": [],
                "data": "0x",
                "logIndex": "0x0"
            }]
        }"#;

        let receipt: ReceiptResult = serde_json::from_str(raw).unwrap();
        assert_eq!(receipt.gas_used.to::<u128>(), 21_000);
        assert_eq!(receipt.status.unwrap().to::<u64>(), 1);
        assert!(!receipt.logs[0].removed);
    }

    #[test]
    fn not_ready_signal_is_recognized() {
        let not_ready = ReceiptsResponse::errored(RpcErrorPayload {
            code: NOT_READY_CODE,
            message: NOT_READY_MESSAGE.to_string(),
        });
        assert!(not_ready.is_not_ready());

        let other_error = ReceiptsResponse::errored(RpcErrorPayload {
            code: -32000,
            message: "execution reverted".to_string(),
        });
        assert!(!other_error.is_not_ready());

        assert!(!ReceiptsResponse::ready(ReceiptsPage { receipts: vec![] }).is_not_ready());
    }
}
