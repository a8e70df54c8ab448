//! Bundled static data: extra RPCs, chain slugs and manual chain overrides.

mod chain_slugs;
mod extra_rpcs;

pub use chain_slugs::{ChainSlugs, BUNDLED_CHAIN_SLUGS};
pub use extra_rpcs::ExtraRpcRegistry;

use crate::types::{chains_from_value, ChainRecord, ChainlistError};
use once_cell::sync::Lazy;
use serde_json::Value;
use tracing::warn;

const BUNDLED_OVERRIDES: &str = include_str!("../../data/overrides.json");
const OVERRIDES_SOURCE: &str = "data/overrides.json";

static BUNDLED: Lazy<Registries> = Lazy::new(|| Registries {
    extra_rpcs: ExtraRpcRegistry::from_json_str(extra_rpcs::BUNDLED_EXTRA_RPCS),
    chain_slugs: ChainSlugs::from_pairs(BUNDLED_CHAIN_SLUGS),
    overrides: parse_overrides(BUNDLED_OVERRIDES),
});

/// The static tables the pipeline joins against.
#[derive(Debug, Clone, Default)]
pub struct Registries {
    pub extra_rpcs: ExtraRpcRegistry,
    pub chain_slugs: ChainSlugs,
    /// Full records that replace fetched chains with the same id.
    pub overrides: Vec<ChainRecord>,
}

impl Registries {
    /// Registries compiled into the binary, parsed on first use.
    pub fn bundled() -> &'static Registries {
        &BUNDLED
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_extra_rpcs(mut self, extra_rpcs: ExtraRpcRegistry) -> Self {
        self.extra_rpcs = extra_rpcs;
        self
    }

    pub fn with_chain_slugs(mut self, chain_slugs: ChainSlugs) -> Self {
        self.chain_slugs = chain_slugs;
        self
    }

    pub fn with_overrides(mut self, overrides: Vec<ChainRecord>) -> Self {
        self.overrides = overrides;
        self
    }
}

fn parse_overrides(raw: &str) -> Vec<ChainRecord> {
    let parsed = serde_json::from_str::<Value>(raw)
        .map_err(ChainlistError::from)
        .and_then(|value| chains_from_value(value, OVERRIDES_SOURCE));
    match parsed {
        Ok(overrides) => overrides,
        Err(e) => {
            warn!("ignoring override registry: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::chain::{KAVA, METIS};

    #[test]
    fn test_bundled_registries() {
        let registries = Registries::bundled();
        assert!(!registries.extra_rpcs.is_empty());
        assert!(!registries.chain_slugs.is_empty());

        let ids: Vec<u64> = registries.overrides.iter().map(|chain| chain.chain_id).collect();
        assert!(ids.contains(&KAVA));
        assert!(ids.contains(&METIS));
    }

    #[test]
    fn test_bad_overrides_document() {
        assert!(parse_overrides("not json").is_empty());
        assert!(parse_overrides("{}").is_empty());
    }
}
