mod routes;

pub use routes::CHAINS_CACHE_CONTROL;

use crate::clock::Clock;
use crate::core::{strip_server_only_data, to_checked_json, CachedEntry, ChainDirectory, ResponseCache};
use crate::types::Result;
use axum::{routing::get, Router};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::info;

/// Shared state behind the HTTP handlers.
pub struct AppState {
    directory: ChainDirectory,
    cache: ResponseCache<Value>,
    refresh: Mutex<()>,
}

impl AppState {
    pub fn new(directory: ChainDirectory, cache_ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            directory,
            cache: ResponseCache::new(cache_ttl, clock),
            refresh: Mutex::new(()),
        }
    }

    pub fn directory(&self) -> &ChainDirectory {
        &self.directory
    }

    /// Sanitized chain list and whether it came from the cache.
    ///
    /// Concurrent misses wait for a single recomputation instead of each
    /// hitting the upstream catalogs.
    pub async fn chains(&self) -> Result<(Arc<CachedEntry<Value>>, bool)> {
        if let Some(entry) = self.cache.get_fresh() {
            return Ok((entry, true));
        }

        let _guard = self.refresh.lock().await;
        if let Some(entry) = self.cache.get_fresh() {
            return Ok((entry, true));
        }

        let chains = self.directory.generate_chain_data().await?;
        let data = to_checked_json(&strip_server_only_data(&chains))?;
        Ok((self.cache.store(data), false))
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/chains", get(routes::get_chains))
        .route("/health", get(routes::health))
        .with_state(state)
}

/// Bind and serve until Ctrl-C.
pub async fn serve(addr: SocketAddr, state: Arc<AppState>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}
