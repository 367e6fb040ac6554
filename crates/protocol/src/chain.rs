use crate::Esips;
use derive_more::Display;

/// The network being indexed.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default)]
pub enum Network {
    /// Ethereum mainnet.
    #[default]
    #[display("mainnet")]
    Mainnet,
    /// The designated test network.
    #[display("testnet")]
    Testnet,
}

/// The execution mode of the indexer process.
///
/// Development mode enables ESIP-8 outside the test network, since ESIP-8
/// has no mainnet activation height yet.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Normal operation.
    #[default]
    #[display("production")]
    Production,
    /// Local development.
    #[display("development")]
    Development,
}

/// Network-level configuration consumed by the import pipeline: the genesis
/// height set and the activation table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainConfig {
    /// The network selector.
    pub network: Network,
    /// The execution mode.
    pub mode: ExecutionMode,
    /// The fixed, sorted set of genesis heights for this network.
    genesis_blocks: Vec<u64>,
}

impl ChainConfig {
    /// The historical genesis heights on mainnet. These blocks are seeded
    /// out of causal order and exempt from parent-hash linkage checks.
    pub const MAINNET_GENESIS_BLOCKS: [u64; 13] = [
        1608625, 3369985, 3981254, 5873780, 8205613, 9046950, 9046974, 9239285, 9430552, 10548855,
        10711341, 15437996, 17478950,
    ];

    /// The default first indexed height on the test network.
    pub const DEFAULT_TESTNET_START_BLOCK: u64 = 9228092;

    /// Creates a mainnet configuration.
    pub fn mainnet(mode: ExecutionMode) -> Self {
        Self {
            network: Network::Mainnet,
            mode,
            genesis_blocks: Self::MAINNET_GENESIS_BLOCKS.to_vec(),
        }
    }

    /// Creates a test network configuration starting at the given height.
    pub fn testnet(mode: ExecutionMode, start_block: u64) -> Self {
        Self { network: Network::Testnet, mode, genesis_blocks: vec![start_block] }
    }

    /// The sorted genesis heights of this network.
    pub fn genesis_blocks(&self) -> &[u64] {
        &self.genesis_blocks
    }

    /// The highest genesis height.
    pub fn max_genesis_block(&self) -> u64 {
        *self.genesis_blocks.last().expect("genesis block set is never empty")
    }

    /// Whether the given height is a genesis height.
    pub fn is_genesis_block(&self, height: u64) -> bool {
        self.genesis_blocks.binary_search(&height).is_ok()
    }

    /// The activation rule set at the given height.
    ///
    /// Pure function of height: on the test network every rule is enabled
    /// unconditionally; elsewhere each rule activates at its fixed height,
    /// with ESIP-8 additionally gated on development mode.
    pub fn esips_at(&self, height: u64) -> Esips {
        match self.network {
            Network::Testnet => Esips::all_enabled(),
            Network::Mainnet => {
                let mut esips = Esips::at_mainnet_height(height);
                esips.esip8 = self.mode == ExecutionMode::Development;
                esips
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mainnet_genesis_blocks_are_sorted() {
        let config = ChainConfig::mainnet(ExecutionMode::Production);
        let mut sorted = config.genesis_blocks().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, config.genesis_blocks());
        assert_eq!(config.max_genesis_block(), 17478950);
        assert!(config.is_genesis_block(1608625));
        assert!(!config.is_genesis_block(1608626));
    }

    #[test]
    fn testnet_enables_everything() {
        let config = ChainConfig::testnet(ExecutionMode::Production, 100);
        assert_eq!(config.esips_at(0), Esips::all_enabled());
    }

    #[test]
    fn esip8_requires_development_mode_on_mainnet() {
        let prod = ChainConfig::mainnet(ExecutionMode::Production);
        assert!(!prod.esips_at(u64::MAX).esip8);

        let dev = ChainConfig::mainnet(ExecutionMode::Development);
        assert!(dev.esips_at(0).esip8);
    }
}
