//! The ethscriptions indexer daemon: polls an Ethereum JSON-RPC endpoint and
//! imports blocks into the ethscriptions state, rolling back reorgs as they
//! are detected.

pub mod flags;

use crate::flags::IndexerArgs;
use anyhow::Result;
use clap::Parser;
use ethscriptions_core::{BlockImporter, ImportDriver};
use ethscriptions_provider::RpcBlockProvider;
use ethscriptions_storage::MemoryStorage;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<()> {
    let args = IndexerArgs::parse();
    args.init_tracing()?;

    let config = args.chain_config();
    let storage = Arc::new(MemoryStorage::new());
    let provider = Arc::new(RpcBlockProvider::new_http(args.rpc_url.clone()));
    let importer = BlockImporter::new(storage, provider, config, args.batch_size);

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!(target: "indexer", "Received ctrl-c, stopping");
            signal_cancel.cancel();
        }
    });

    tracing::info!(
        target: "indexer",
        network = %args.network(),
        batch_size = args.batch_size,
        "Starting import loop"
    );
    let driver = ImportDriver::new(importer, args.poll_interval(), cancel);
    driver.run().await?;

    tracing::info!(target: "indexer", "Stopped");
    Ok(())
}
