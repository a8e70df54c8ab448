use super::fetcher::Fetcher;
use super::populate::{populate_chain, sort_by_tvl};
use crate::config::{DirectoryConfig, LIGHTWEIGHT_RPC_LIMIT};
use crate::registry::Registries;
use crate::types::{
    chains_from_value, tvls_from_value, ChainRecord, LightweightChain, Result, RpcEntry, TvlIndex,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Aggregates the public catalogs and the bundled registries into the chain
/// directory.
///
/// # Example
///
/// ```rust,no_run
/// # async fn example() -> chainlist::Result<()> {
/// use chainlist::{ChainDirectory, DirectoryConfig};
///
/// let directory = ChainDirectory::new(DirectoryConfig::new());
/// let chains = directory.generate_chain_data().await?;
/// println!("{} chains", chains.len());
/// # Ok(())
/// # }
/// ```
pub struct ChainDirectory {
    config: DirectoryConfig,
    fetcher: Fetcher,
    registries: Arc<Registries>,
}

impl ChainDirectory {
    /// Directory over the bundled registries.
    pub fn new(config: DirectoryConfig) -> Self {
        let fetcher = Fetcher::new(&config);
        Self::with_parts(config, fetcher, Registries::bundled().clone())
    }

    pub fn with_parts(config: DirectoryConfig, fetcher: Fetcher, registries: Registries) -> Self {
        Self {
            config,
            fetcher,
            registries: Arc::new(registries),
        }
    }

    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    pub fn registries(&self) -> &Registries {
        &self.registries
    }

    /// Full dataset, sorted by descending TVL.
    pub async fn generate_chain_data(&self) -> Result<Vec<ChainRecord>> {
        let (chains, tvl) = self.load_sources().await?;

        let mut populated: Vec<ChainRecord> = chains
            .into_iter()
            .map(|chain| populate_chain(chain, &tvl, &self.registries))
            .collect();
        sort_by_tvl(&mut populated);

        info!("aggregated {} chains", populated.len());
        Ok(populated)
    }

    /// Top chains by TVL in reduced form, for fast first paint.
    pub async fn generate_lightweight_chain_data(&self) -> Result<Vec<LightweightChain>> {
        let mut chains = self.generate_chain_data().await?;
        chains.truncate(self.config.lightweight_limit);

        Ok(chains.into_iter().map(to_lightweight).collect())
    }

    /// Fetch both catalogs concurrently and apply the override registry.
    async fn load_sources(&self) -> Result<(Vec<ChainRecord>, TvlIndex)> {
        let (chains_doc, tvl_doc) = tokio::try_join!(
            self.fetcher.fetch_with_cache(&self.config.chains_url),
            self.fetcher.fetch_with_cache(&self.config.tvl_url),
        )?;

        let chains_url = &self.config.chains_url;
        let tvl_url = &self.config.tvl_url;
        let fetched = self.parse_or_evict(chains_url, chains_from_value(chains_doc, chains_url))?;
        let tvl_records = self.parse_or_evict(tvl_url, tvls_from_value(tvl_doc, tvl_url))?;
        let tvl = TvlIndex::new(&tvl_records);
        debug!("fetched {} chains and {} TVL entries", fetched.len(), tvl.len());

        Ok((merge_overrides(fetched, &self.registries.overrides), tvl))
    }

    /// Drop a rejected document from the URL cache so the next run refetches it.
    fn parse_or_evict<T>(&self, url: &str, parsed: Result<T>) -> Result<T> {
        if parsed.is_err() {
            self.fetcher.evict(url);
        }
        parsed
    }
}

/// Drop deprecated and overridden chains, then append the overrides.
pub fn merge_overrides(fetched: Vec<ChainRecord>, overrides: &[ChainRecord]) -> Vec<ChainRecord> {
    let override_ids: std::collections::HashSet<u64> =
        overrides.iter().map(|chain| chain.chain_id).collect();

    fetched
        .into_iter()
        .filter(|chain| !chain.is_deprecated() && !override_ids.contains(&chain.chain_id))
        .chain(overrides.iter().cloned())
        .collect()
}

fn to_lightweight(chain: ChainRecord) -> LightweightChain {
    LightweightChain {
        chain_id: chain.chain_id,
        name: chain.name,
        native_currency: chain.native_currency,
        short_name: chain.short_name,
        tvl: chain.tvl,
        chain_slug: chain.chain_slug,
        rpc: chain
            .rpc
            .iter()
            .take(LIGHTWEIGHT_RPC_LIMIT)
            .map(RpcEntry::url)
            .map(str::to_string)
            .collect(),
    }
}
