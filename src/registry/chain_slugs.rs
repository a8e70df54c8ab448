use crate::types::chain::{
    ARBITRUM, AVALANCHE, BASE, BLAST, BSC, CELO, CRONOS, FANTOM, GNOSIS, KAVA, LINEA, MAINNET,
    MANTLE, METIS, MOONBEAM, OPTIMISM, POLYGON, POLYGON_ZKEVM, SCROLL, UNICHAIN, WORLDCHAIN,
    ZKSYNC_ERA, ZORA,
};
use std::collections::HashMap;

// =============================================================================
// Chain slugs (join key against the TVL catalog)
// =============================================================================

pub const BUNDLED_CHAIN_SLUGS: &[(u64, &str)] = &[
    (MAINNET, "ethereum"),
    (OPTIMISM, "optimism"),
    (CRONOS, "cronos"),
    (BSC, "bsc"),
    (GNOSIS, "xdai"),
    (UNICHAIN, "unichain"),
    (POLYGON, "polygon"),
    (FANTOM, "fantom"),
    (ZKSYNC_ERA, "era"),
    (WORLDCHAIN, "wc"),
    (METIS, "metis"),
    (POLYGON_ZKEVM, "polygon zkevm"),
    (MOONBEAM, "moonbeam"),
    (KAVA, "kava"),
    (MANTLE, "mantle"),
    (BASE, "base"),
    (ARBITRUM, "arbitrum"),
    (CELO, "celo"),
    (AVALANCHE, "avalanche"),
    (LINEA, "linea"),
    (BLAST, "blast"),
    (SCROLL, "scroll"),
    (ZORA, "zora"),
];

/// chainId -> slug lookup.
#[derive(Debug, Clone, Default)]
pub struct ChainSlugs {
    slugs: HashMap<u64, String>,
}

impl ChainSlugs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = &'a (u64, &'a str)>) -> Self {
        let mut table = Self::new();
        for (chain_id, slug) in pairs {
            table = table.with_slug(*chain_id, slug);
        }
        table
    }

    /// Slugs are stored lowercased.
    pub fn with_slug(mut self, chain_id: u64, slug: &str) -> Self {
        self.slugs.insert(chain_id, slug.to_lowercase());
        self
    }

    pub fn get(&self, chain_id: u64) -> Option<&str> {
        self.slugs.get(&chain_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.slugs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slugs.is_empty()
    }
}
