//! CLI flags of the indexer daemon.

use anyhow::{Result, anyhow};
use clap::{ArgAction, Parser, ValueEnum};
use ethscriptions_protocol::{ChainConfig, ExecutionMode, Network};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use url::Url;

/// The network selector flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NetworkFlag {
    /// Ethereum mainnet.
    Mainnet,
    /// The designated test network.
    Testnet,
}

/// The execution mode flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeFlag {
    /// Normal operation.
    Production,
    /// Local development; enables rules with no mainnet activation height.
    Development,
}

/// CLI arguments of the indexer daemon.
#[derive(Debug, Parser)]
#[command(
    name = "ethscriptions-indexer",
    version,
    about = "Reorg-safe ethscriptions block import daemon"
)]
pub struct IndexerArgs {
    /// The JSON-RPC endpoint to index from.
    #[arg(long, env = "RPC_URL")]
    pub rpc_url: Url,

    /// The network to index.
    #[arg(long, env = "ETHEREUM_NETWORK", value_enum, default_value = "mainnet")]
    pub network: NetworkFlag,

    /// The execution mode.
    #[arg(long, env = "INDEXER_MODE", value_enum, default_value = "production")]
    pub mode: ModeFlag,

    /// How many blocks to fetch per import batch.
    #[arg(long, env = "BLOCK_IMPORT_BATCH_SIZE", default_value_t = 2)]
    pub batch_size: u64,

    /// The first indexed height on the test network.
    #[arg(
        long,
        env = "TESTNET_START_BLOCK",
        default_value_t = ChainConfig::DEFAULT_TESTNET_START_BLOCK
    )]
    pub testnet_start_block: u64,

    /// Seconds to sleep between polls once caught up to the chain tip.
    #[arg(long, default_value_t = 4)]
    pub poll_interval: u64,

    /// Verbosity level (-v debug, -vv trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbosity: u8,
}

impl IndexerArgs {
    /// The network configuration selected by these flags.
    pub fn chain_config(&self) -> ChainConfig {
        let mode = match self.mode {
            ModeFlag::Production => ExecutionMode::Production,
            ModeFlag::Development => ExecutionMode::Development,
        };
        match self.network {
            NetworkFlag::Mainnet => ChainConfig::mainnet(mode),
            NetworkFlag::Testnet => ChainConfig::testnet(mode, self.testnet_start_block),
        }
    }

    /// The selected network, for logging.
    pub const fn network(&self) -> Network {
        match self.network {
            NetworkFlag::Mainnet => Network::Mainnet,
            NetworkFlag::Testnet => Network::Testnet,
        }
    }

    /// How long to sleep between polls at the tip.
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval)
    }

    /// Installs the global tracing subscriber. `RUST_LOG` overrides the
    /// verbosity flags.
    pub fn init_tracing(&self) -> Result<()> {
        let default_directive = match self.verbosity {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init()
            .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_select_mainnet_production() {
        let args =
            IndexerArgs::try_parse_from(["ethscriptions-indexer", "--rpc-url", "http://localhost:8545"])
                .unwrap();
        assert_eq!(args.network, NetworkFlag::Mainnet);
        assert_eq!(args.mode, ModeFlag::Production);
        assert_eq!(args.batch_size, 2);

        let config = args.chain_config();
        assert_eq!(config.network, Network::Mainnet);
        assert_eq!(config.max_genesis_block(), 17478950);
    }

    #[test]
    fn testnet_uses_the_configured_start_block() {
        let args = IndexerArgs::try_parse_from([
            "ethscriptions-indexer",
            "--rpc-url",
            "http://localhost:8545",
            "--network",
            "testnet",
            "--testnet-start-block",
            "12345",
        ])
        .unwrap();

        let config = args.chain_config();
        assert_eq!(config.network, Network::Testnet);
        assert_eq!(config.genesis_blocks(), &[12345]);
    }
}
