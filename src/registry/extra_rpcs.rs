use crate::types::chain::json_kind;
use crate::types::rpc::rpc_list_from_value;
use crate::types::RpcEntry;
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

pub(crate) const BUNDLED_EXTRA_RPCS: &str = include_str!("../../data/extra_rpcs.json");

/// Curated backup endpoints keyed by chain ID.
#[derive(Debug, Clone, Default)]
pub struct ExtraRpcRegistry {
    entries: HashMap<u64, Vec<RpcEntry>>,
}

impl ExtraRpcRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from `{ "<chainId>": { "rpcs": [...] } }`.
    ///
    /// Never fails. A non-object document gives an empty registry, and entries
    /// with a bad key, a non-object value or no `rpcs` array are logged and
    /// left out.
    pub fn from_value(value: &Value) -> Self {
        let map = match value {
            Value::Object(map) => map,
            other => {
                warn!("extra RPC registry is not an object (got {})", json_kind(other));
                return Self::default();
            }
        };

        let mut entries = HashMap::with_capacity(map.len());
        for (key, entry) in map {
            let chain_id = match key.parse::<u64>() {
                Ok(id) => id,
                Err(_) => {
                    warn!("extra RPC registry: ignoring non-numeric chain id '{}'", key);
                    continue;
                }
            };

            match entry.get("rpcs") {
                Some(rpcs @ Value::Array(_)) => {
                    entries.insert(chain_id, rpc_list_from_value(rpcs));
                }
                _ => warn!(
                    "extra RPC registry: chain {} has no rpcs array, treating as empty",
                    chain_id
                ),
            }
        }

        Self { entries }
    }

    pub fn from_json_str(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => Self::from_value(&value),
            Err(e) => {
                warn!("extra RPC registry is not valid JSON: {}", e);
                Self::default()
            }
        }
    }

    pub fn with_entry(mut self, chain_id: u64, rpcs: Vec<RpcEntry>) -> Self {
        self.entries.insert(chain_id, rpcs);
        self
    }

    /// Extra RPCs for a chain; empty when none are registered.
    pub fn get(&self, chain_id: u64) -> &[RpcEntry] {
        self.entries
            .get(&chain_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
