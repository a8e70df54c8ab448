use anyhow::Context;
use chainlist::clock::system_clock;
use chainlist::config::{Cli, Command};
use chainlist::server::{self, AppState};
use chainlist::ChainDirectory;
use clap::Parser;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    enable_tracing();
    let cli = Cli::parse();
    let mut config = cli.upstream.to_config();

    match cli.command {
        Command::Serve { bind, cache_ttl_secs } => {
            // Upstream bodies must not outlive the response cache or refreshes serve stale data.
            if config.upstream_cache_ttl.is_none() {
                config = config.with_upstream_cache_ttl(Some(Duration::from_secs(cache_ttl_secs)));
            }
            let directory = ChainDirectory::new(config);
            info!("chain catalog: {}", directory.config().chains_url);
            info!("TVL catalog: {}", directory.config().tvl_url);
            info!("response cache: {}s", cache_ttl_secs);

            let state = AppState::new(directory, Duration::from_secs(cache_ttl_secs), system_clock());
            server::serve(bind, Arc::new(state))
                .await
                .context("HTTP server failed")?;
        }
        Command::Export { lightweight, output } => {
            let directory = ChainDirectory::new(config);
            let json = if lightweight {
                let chains = directory
                    .generate_lightweight_chain_data()
                    .await
                    .context("failed to aggregate chain data")?;
                info!("exporting {} chains (lightweight)", chains.len());
                serde_json::to_string_pretty(&chains)?
            } else {
                let chains = directory
                    .generate_chain_data()
                    .await
                    .context("failed to aggregate chain data")?;
                info!("exporting {} chains", chains.len());
                serde_json::to_string_pretty(&chains)?
            };
            write_output(output.as_deref(), &json)?;
        }
    }

    Ok(())
}

fn write_output(path: Option<&Path>, json: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
            Ok(())
        }
    }
}

fn enable_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chainlist=info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
