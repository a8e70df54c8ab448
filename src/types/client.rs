use super::chain::{ChainStatus, Ens, Explorer, NativeCurrency, Parent};
use serde::{Deserialize, Serialize};

/// RPC endpoint as exposed to browsers: the URL and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRpc {
    pub url: String,
}

/// Client-facing chain record. Every serialized field is listed here, so
/// provider annotations and server-only data cannot be carried over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientChain {
    pub chain_id: u64,
    pub name: String,
    pub short_name: String,
    pub native_currency: NativeCurrency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tvl: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slip44: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ens: Option<Ens>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explorers: Option<Vec<Explorer>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faucets: Option<Vec<String>>,
    #[serde(rename = "infoURL", default, skip_serializing_if = "Option::is_none")]
    pub info_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Parent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ChainStatus>,
    pub rpc: Vec<ClientRpc>,
}
