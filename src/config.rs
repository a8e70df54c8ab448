use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

// =============================================================================
// Upstream catalogs
// =============================================================================

pub const DEFAULT_CHAINS_URL: &str = "https://chainid.network/chains.json";
pub const DEFAULT_TVL_URL: &str = "https://api.llama.fi/chains";

// =============================================================================
// Limits
// =============================================================================

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_RETRIES: u32 = 2;
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(250);
pub const DEFAULT_LIGHTWEIGHT_LIMIT: usize = 20;
pub const LIGHTWEIGHT_RPC_LIMIT: usize = 2;
pub const CLIENT_RPC_LIMIT: usize = 3;
pub const DEFAULT_RESPONSE_CACHE_TTL: Duration = Duration::from_secs(300);

/// Settings for fetching and aggregating the chain directory.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub chains_url: String,
    pub tvl_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
    pub retry_backoff: Duration,
    /// `None` keeps fetched catalogs for the life of the process.
    pub upstream_cache_ttl: Option<Duration>,
    pub lightweight_limit: usize,
}

impl DirectoryConfig {
    /// Create a configuration pointing at the public catalogs
    pub fn new() -> Self {
        Self {
            chains_url: DEFAULT_CHAINS_URL.into(),
            tvl_url: DEFAULT_TVL_URL.into(),
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
            upstream_cache_ttl: None,
            lightweight_limit: DEFAULT_LIGHTWEIGHT_LIMIT,
        }
    }

    /// Set the chain catalog URL
    pub fn with_chains_url(mut self, url: impl Into<String>) -> Self {
        self.chains_url = url.into();
        self
    }

    /// Set the TVL catalog URL
    pub fn with_tvl_url(mut self, url: impl Into<String>) -> Self {
        self.tvl_url = url.into();
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set how many times a failed upstream request is retried
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the delay before the first retry; it doubles on each further attempt
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    pub fn with_upstream_cache_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.upstream_cache_ttl = ttl;
        self
    }

    pub fn with_lightweight_limit(mut self, limit: usize) -> Self {
        self.lightweight_limit = limit;
        self
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Parser, Debug)]
#[command(name = "chainlist")]
#[command(about = "EVM chain and RPC directory aggregation service")]
pub struct Cli {
    #[command(flatten)]
    pub upstream: UpstreamArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct UpstreamArgs {
    /// Chain metadata catalog URL
    #[arg(long, global = true, env = "CHAINLIST_CHAINS_URL", default_value = DEFAULT_CHAINS_URL)]
    pub chains_url: String,

    /// TVL-by-chain catalog URL
    #[arg(long, global = true, env = "CHAINLIST_TVL_URL", default_value = DEFAULT_TVL_URL)]
    pub tvl_url: String,

    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "CHAINLIST_TIMEOUT_SECS", default_value = "10")]
    pub timeout_secs: u64,

    /// Retries after a failed upstream request
    #[arg(long, global = true, env = "CHAINLIST_MAX_RETRIES", default_value = "2")]
    pub max_retries: u32,

    /// Initial retry delay in milliseconds
    #[arg(long, global = true, env = "CHAINLIST_RETRY_BACKOFF_MS", default_value = "250")]
    pub retry_backoff_ms: u64,

    /// Expire fetched catalogs after this many seconds (default: never)
    #[arg(long, global = true, env = "CHAINLIST_UPSTREAM_CACHE_TTL_SECS")]
    pub upstream_cache_ttl_secs: Option<u64>,
}

impl UpstreamArgs {
    pub fn to_config(&self) -> DirectoryConfig {
        DirectoryConfig::new()
            .with_chains_url(self.chains_url.clone())
            .with_tvl_url(self.tvl_url.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_max_retries(self.max_retries)
            .with_retry_backoff(Duration::from_millis(self.retry_backoff_ms))
            .with_upstream_cache_ttl(self.upstream_cache_ttl_secs.map(Duration::from_secs))
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Serve the chain directory over HTTP
    Serve {
        /// Listen address
        #[arg(long, env = "CHAINLIST_BIND", default_value = "0.0.0.0:3000")]
        bind: SocketAddr,

        /// How long an aggregated response is reused, in seconds
        #[arg(long, env = "CHAINLIST_CACHE_TTL_SECS", default_value = "300")]
        cache_ttl_secs: u64,
    },

    /// Aggregate once and write the result as JSON
    Export {
        /// Emit the top chains in reduced form instead of the full dataset
        #[arg(long)]
        lightweight: bool,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_config() {
        let config = DirectoryConfig::new();
        assert_eq!(config.chains_url, DEFAULT_CHAINS_URL);
        assert_eq!(config.tvl_url, DEFAULT_TVL_URL);
        assert_eq!(config.lightweight_limit, 20);
        assert!(config.upstream_cache_ttl.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = DirectoryConfig::new()
            .with_chains_url("http://localhost:1/chains.json")
            .with_max_retries(0)
            .with_upstream_cache_ttl(Some(Duration::from_secs(60)));

        assert_eq!(config.chains_url, "http://localhost:1/chains.json");
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.upstream_cache_ttl, Some(Duration::from_secs(60)));
    }

    #[test]
    #[serial]
    fn test_cli_defaults() {
        std::env::remove_var("CHAINLIST_BIND");
        std::env::remove_var("CHAINLIST_CHAINS_URL");

        let cli = Cli::try_parse_from(["chainlist", "serve"]).unwrap();
        match cli.command {
            Command::Serve { bind, cache_ttl_secs } => {
                assert_eq!(bind.port(), 3000);
                assert_eq!(cache_ttl_secs, 300);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(cli.upstream.chains_url, DEFAULT_CHAINS_URL);
    }

    #[test]
    #[serial]
    fn test_cli_env_overrides() {
        std::env::set_var("CHAINLIST_BIND", "127.0.0.1:8080");
        std::env::set_var("CHAINLIST_CHAINS_URL", "http://mirror.local/chains.json");

        let cli = Cli::try_parse_from(["chainlist", "serve"]).unwrap();

        std::env::remove_var("CHAINLIST_BIND");
        std::env::remove_var("CHAINLIST_CHAINS_URL");

        match cli.command {
            Command::Serve { bind, .. } => assert_eq!(bind.to_string(), "127.0.0.1:8080"),
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(
            cli.upstream.to_config().chains_url,
            "http://mirror.local/chains.json"
        );
    }

    #[test]
    #[serial]
    fn test_cli_export_with_global_args() {
        let cli = Cli::try_parse_from([
            "chainlist",
            "export",
            "--lightweight",
            "--max-retries",
            "5",
            "-o",
            "chains.json",
        ])
        .unwrap();

        assert_eq!(cli.upstream.max_retries, 5);
        match cli.command {
            Command::Export { lightweight, output } => {
                assert!(lightweight);
                assert_eq!(output, Some(PathBuf::from("chains.json")));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
