use crate::config::CLIENT_RPC_LIMIT;
use crate::types::{ChainRecord, ClientChain, ClientRpc, RpcEntry};
use serde_json::Value;
use tracing::error;

/// Keys that must never reach a browser.
pub const SERVER_ONLY_KEYS: &[&str] = &["extraRpcs", "serverOnlyData"];

/// Build the client view of each chain.
pub fn strip_server_only_data(chains: &[ChainRecord]) -> Vec<ClientChain> {
    chains.iter().map(to_client_chain).collect()
}

pub fn to_client_chain(chain: &ChainRecord) -> ClientChain {
    ClientChain {
        chain_id: chain.chain_id,
        name: chain.name.clone(),
        short_name: chain.short_name.clone(),
        native_currency: chain.native_currency.clone(),
        tvl: chain.tvl,
        chain_slug: chain.chain_slug.clone(),
        network_id: chain.network_id,
        slip44: chain.slip44,
        ens: chain.ens.clone(),
        explorers: chain.explorers.clone(),
        faucets: chain.faucets.clone(),
        info_url: chain.info_url.clone(),
        parent: chain.parent.clone(),
        status: chain.status.clone(),
        rpc: chain
            .rpc
            .iter()
            .take(CLIENT_RPC_LIMIT)
            .map(|entry: &RpcEntry| ClientRpc {
                url: entry.url().to_string(),
            })
            .collect(),
    }
}

/// Serialize client chains and check the result for server-only keys.
///
/// Any such key found at the top level of a record is removed and logged.
pub fn to_checked_json(chains: &[ClientChain]) -> serde_json::Result<Value> {
    let mut value = serde_json::to_value(chains)?;
    if let Value::Array(items) = &mut value {
        for item in items {
            remove_server_only_keys(item);
        }
    }
    Ok(value)
}

fn remove_server_only_keys(item: &mut Value) {
    let Value::Object(map) = item else {
        return;
    };
    for key in SERVER_ONLY_KEYS {
        if map.remove(*key).is_some() {
            let chain_id = map.get("chainId").cloned().unwrap_or_default();
            error!(
                "server-only field '{}' leaked into client chain {}; removed",
                key, chain_id
            );
        }
    }
}
