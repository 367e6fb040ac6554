use crate::{
    BlobSidecarResult, BlockProvider, BlockResult, ProviderError, ReceiptsPage, ReceiptsResponse,
    RpcErrorPayload,
};
use alloy_rpc_client::RpcClient;
use async_trait::async_trait;
use ethscriptions_types::BlobSidecar;
use serde::Serialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use url::Url;

/// How long a fetched tip number stays fresh before the next
/// `eth_blockNumber` round trip.
const TIP_CACHE_TTL: Duration = Duration::from_secs(1);

/// The parameter object of the batched receipts call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReceiptsParam {
    block_number: String,
}

/// A [`BlockProvider`] backed by a JSON-RPC endpoint over HTTP.
#[derive(Debug)]
pub struct RpcBlockProvider {
    client: RpcClient,
    tip: Mutex<Option<(Instant, u64)>>,
}

impl RpcBlockProvider {
    /// Creates a provider talking to the endpoint at `url`.
    pub fn new_http(url: Url) -> Self {
        Self { client: RpcClient::new_http(url), tip: Mutex::new(None) }
    }

    fn hex_number(number: u64) -> String {
        format!("0x{number:x}")
    }
}

#[async_trait]
impl BlockProvider for RpcBlockProvider {
    async fn block_by_number(&self, number: u64) -> Result<Option<BlockResult>, ProviderError> {
        let block: Option<BlockResult> = self
            .client
            .request("eth_getBlockByNumber", (Self::hex_number(number), true))
            .await?;
        Ok(block)
    }

    async fn receipts_by_block(&self, number: u64) -> Result<ReceiptsResponse, ProviderError> {
        let params = (ReceiptsParam { block_number: Self::hex_number(number) },);
        let result: Result<ReceiptsPage, _> =
            self.client.request("eth_getTransactionReceipts", params).await;
        match result {
            Ok(page) => Ok(ReceiptsResponse::ready(page)),
            Err(err) => match err.as_error_resp() {
                Some(payload) => Ok(ReceiptsResponse::errored(RpcErrorPayload {
                    code: payload.code,
                    message: payload.message.to_string(),
                })),
                None => Err(err.into()),
            },
        }
    }

    async fn latest_block_number(&self) -> Result<u64, ProviderError> {
        let mut tip = self.tip.lock().await;
        if let Some((fetched_at, number)) = *tip {
            if fetched_at.elapsed() < TIP_CACHE_TTL {
                return Ok(number);
            }
        }

        let latest: alloy_primitives::U64 = self.client.request_noparams("eth_blockNumber").await?;
        let number = latest.to::<u64>();
        *tip = Some((Instant::now(), number));
        tracing::trace!(target: "provider", tip = number, "Refreshed chain tip");
        Ok(number)
    }

    async fn blob_sidecars(&self, number: u64) -> Result<Vec<BlobSidecar>, ProviderError> {
        let sidecars: Option<Vec<BlobSidecarResult>> = self
            .client
            .request("eth_getBlobSidecars", (Self::hex_number(number),))
            .await?;
        Ok(sidecars.unwrap_or_default().into_iter().map(BlobSidecarResult::into_sidecar).collect())
    }
}
