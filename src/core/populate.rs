use crate::registry::Registries;
use crate::types::{has_placeholder, ChainRecord, RpcEntry, TvlIndex};
use std::collections::HashSet;

/// Merge a chain's RPC list with the registry's extra RPCs and attach TVL.
///
/// Extra RPCs come first, then the chain's own RPCs. URLs lose one trailing
/// slash, duplicates keep their first position, and URLs with a `${...}`
/// placeholder are dropped. `tvl` and `chainSlug` are set together, only when
/// the chain has a slug and the TVL catalog has an entry for it.
pub fn populate_chain(mut chain: ChainRecord, tvl: &TvlIndex, registries: &Registries) -> ChainRecord {
    let extras = registries.extra_rpcs.get(chain.chain_id).iter().cloned();
    let own = std::mem::take(&mut chain.rpc);
    chain.rpc = merge_rpcs(extras, own);

    if let Some(slug) = registries.chain_slugs.get(chain.chain_id) {
        if let Some(value) = tvl.get(slug) {
            chain.tvl = Some(value);
            chain.chain_slug = Some(slug.to_string());
        }
    }

    chain
}

fn merge_rpcs(
    extras: impl IntoIterator<Item = RpcEntry>,
    own: impl IntoIterator<Item = RpcEntry>,
) -> Vec<RpcEntry> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();

    for entry in extras.into_iter().chain(own) {
        let entry = entry.normalized();
        if has_placeholder(entry.url()) || !seen.insert(entry.url().to_string()) {
            continue;
        }
        merged.push(entry);
    }

    merged
}

/// Order by descending TVL; missing TVL counts as zero, ties go to the lower
/// chain ID.
pub fn sort_by_tvl(chains: &mut [ChainRecord]) {
    chains.sort_by(|a, b| {
        b.sort_tvl()
            .total_cmp(&a.sort_tvl())
            .then_with(|| a.chain_id.cmp(&b.chain_id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{ChainSlugs, ExtraRpcRegistry};
    use crate::types::{NativeCurrency, TrackedRpc, Tracking, TvlRecord};
    use serde_json::json;

    fn chain(chain_id: u64, rpc: &[&str]) -> ChainRecord {
        serde_json::from_value(json!({
            "name": format!("Chain {}", chain_id),
            "shortName": format!("c{}", chain_id),
            "chainId": chain_id,
            "nativeCurrency": { "name": "Ether", "symbol": "ETH", "decimals": 18 },
            "rpc": rpc,
        }))
        .unwrap()
    }

    fn urls(chain: &ChainRecord) -> Vec<&str> {
        chain.rpc.iter().map(RpcEntry::url).collect()
    }

    fn registries_with(chain_id: u64, extras: &[&str]) -> Registries {
        Registries::empty().with_extra_rpcs(ExtraRpcRegistry::new().with_entry(
            chain_id,
            extras.iter().map(|u| RpcEntry::Bare(u.to_string())).collect(),
        ))
    }

    #[test]
    fn test_merge_dedup_and_placeholder() {
        let registries = registries_with(1, &["https://a.com/", "https://b.com"]);
        let input = chain(1, &["https://a.com", "https://c.com/${INFURA_API_KEY}"]);

        let out = populate_chain(input, &TvlIndex::default(), &registries);
        assert_eq!(urls(&out), vec!["https://a.com", "https://b.com"]);
    }

    #[test]
    fn test_extras_come_first() {
        let registries = registries_with(1, &["https://rpc2.com/"]);
        let out = populate_chain(chain(1, &["https://rpc1.com"]), &TvlIndex::default(), &registries);
        assert_eq!(urls(&out), vec!["https://rpc2.com", "https://rpc1.com"]);
    }

    #[test]
    fn test_no_rpc_sources_gives_empty_list() {
        let tvl = TvlIndex::default();

        let out = populate_chain(chain(5, &[]), &tvl, &Registries::empty());
        assert!(out.rpc.is_empty());

        let registries = Registries::empty()
            .with_extra_rpcs(ExtraRpcRegistry::from_value(&serde_json::Value::Null));
        let out = populate_chain(chain(5, &[]), &tvl, &registries);
        assert!(out.rpc.is_empty());

        let mut no_rpc = chain(5, &[]);
        no_rpc.rpc = serde_json::from_value::<ChainRecord>(json!({
            "name": "x",
            "chainId": 5,
            "nativeCurrency": { "name": "x", "symbol": "x", "decimals": 18 }
        }))
        .unwrap()
        .rpc;
        let out = populate_chain(no_rpc, &tvl, &registries);
        assert!(out.rpc.is_empty());
    }

    #[test]
    fn test_tracking_survives_merge() {
        let tracked = RpcEntry::Tracked(TrackedRpc {
            url: "https://eth.llamarpc.com/".into(),
            tracking: Some(Tracking::None),
            tracking_details: Some("no logs".into()),
            is_open_source: Some(true),
        });
        let registries = Registries::empty()
            .with_extra_rpcs(ExtraRpcRegistry::new().with_entry(1, vec![tracked]));

        let out = populate_chain(
            chain(1, &["https://eth.llamarpc.com"]),
            &TvlIndex::default(),
            &registries,
        );
        assert_eq!(out.rpc.len(), 1);
        assert_eq!(out.rpc[0].url(), "https://eth.llamarpc.com");
        assert_eq!(out.rpc[0].tracking(), Some(Tracking::None));
    }

    #[test]
    fn test_tvl_attached_when_slug_matches() {
        let registries = Registries::empty().with_chain_slugs(ChainSlugs::new().with_slug(1, "ethereum"));
        let tvl = TvlIndex::new(&[TvlRecord { name: "Ethereum".into(), tvl: 1000.0 }]);

        let out = populate_chain(chain(1, &[]), &tvl, &registries);
        assert_eq!(out.tvl, Some(1000.0));
        assert_eq!(out.chain_slug.as_deref(), Some("ethereum"));
    }

    #[test]
    fn test_slug_without_tvl_attaches_nothing() {
        let registries = Registries::empty().with_chain_slugs(ChainSlugs::new().with_slug(1, "ethereum"));
        let tvl = TvlIndex::new(&[TvlRecord { name: "Base".into(), tvl: 3.0 }]);

        let out = populate_chain(chain(1, &[]), &tvl, &registries);
        assert!(out.tvl.is_none());
        assert!(out.chain_slug.is_none());

        let out = populate_chain(chain(8453, &[]), &tvl, &registries);
        assert!(out.tvl.is_none());
    }

    #[test]
    fn test_sort_by_tvl() {
        let mut chains = vec![chain(1, &[]), chain(2, &[]), chain(3, &[])];
        chains[0].tvl = Some(5.0);
        chains[2].tvl = Some(10.0);

        sort_by_tvl(&mut chains);
        let tvls: Vec<Option<f64>> = chains.iter().map(|c| c.tvl).collect();
        assert_eq!(tvls, vec![Some(10.0), Some(5.0), None]);
    }

    #[test]
    fn test_sort_ties_by_chain_id() {
        let mut chains = vec![chain(30, &[]), chain(7, &[]), chain(12, &[])];
        chains[1].tvl = Some(0.0);

        sort_by_tvl(&mut chains);
        let ids: Vec<u64> = chains.iter().map(|c| c.chain_id).collect();
        assert_eq!(ids, vec![7, 12, 30]);
    }

    #[test]
    fn test_native_currency_untouched() {
        let out = populate_chain(chain(1, &[]), &TvlIndex::default(), &Registries::empty());
        assert_eq!(
            out.native_currency,
            NativeCurrency { name: "Ether".into(), symbol: "ETH".into(), decimals: 18 }
        );
    }
}
