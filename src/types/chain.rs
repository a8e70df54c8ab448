use super::error::{ChainlistError, Result as ChainlistResult};
use super::rpc::{deserialize_rpc_list, RpcEntry};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::warn;

// =============================================================================
// Chain IDs
// =============================================================================

pub const MAINNET: u64 = 1;
pub const OPTIMISM: u64 = 10;
pub const CRONOS: u64 = 25;
pub const BSC: u64 = 56;
pub const GNOSIS: u64 = 100;
pub const UNICHAIN: u64 = 130;
pub const POLYGON: u64 = 137;
pub const FANTOM: u64 = 250;
pub const ZKSYNC_ERA: u64 = 324;
pub const WORLDCHAIN: u64 = 480;
pub const METIS: u64 = 1088;
pub const POLYGON_ZKEVM: u64 = 1101;
pub const MOONBEAM: u64 = 1284;
pub const KAVA: u64 = 2222;
pub const MANTLE: u64 = 5000;
pub const BASE: u64 = 8453;
pub const ARBITRUM: u64 = 42161;
pub const CELO: u64 = 42220;
pub const AVALANCHE: u64 = 43114;
pub const LINEA: u64 = 59144;
pub const BLAST: u64 = 81457;
pub const SCROLL: u64 = 534352;
pub const ZORA: u64 = 7777777;

// =============================================================================
// Records
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainStatus {
    Active,
    Incubating,
    Deprecated,
    Other(String),
}

impl ChainStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ChainStatus::Active => "active",
            ChainStatus::Incubating => "incubating",
            ChainStatus::Deprecated => "deprecated",
            ChainStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for ChainStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "active" => ChainStatus::Active,
            "incubating" => ChainStatus::Incubating,
            "deprecated" => ChainStatus::Deprecated,
            _ => ChainStatus::Other(raw),
        }
    }
}

impl Serialize for ChainStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ChainStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(ChainStatus::from)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ens {
    pub registry: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explorer {
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bridge {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parent {
    #[serde(rename = "type")]
    pub kind: String,
    pub chain: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bridges: Vec<Bridge>,
}

/// One network as held server-side.
///
/// Upstream fields this type does not model are kept in `extra` so the full
/// dataset loses nothing; they never reach the client view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainRecord {
    pub name: String,
    #[serde(default)]
    pub short_name: String,
    pub chain_id: u64,
    pub native_currency: NativeCurrency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ChainStatus>,
    #[serde(default, deserialize_with = "deserialize_rpc_list")]
    pub rpc: Vec<RpcEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_id: Option<u64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub slip44: Option<u64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub ens: Option<Ens>,
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub explorers: Option<Vec<Explorer>>,
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub faucets: Option<Vec<String>>,
    #[serde(rename = "infoURL", default, skip_serializing_if = "Option::is_none")]
    pub info_url: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub parent: Option<Parent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tvl: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_slug: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChainRecord {
    pub fn is_deprecated(&self) -> bool {
        matches!(self.status, Some(ChainStatus::Deprecated))
    }

    /// TVL used for ordering; chains without a figure rank as zero.
    pub fn sort_tvl(&self) -> f64 {
        self.tvl.unwrap_or(0.0)
    }
}

/// Reduced record used for fast first paint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightweightChain {
    pub chain_id: u64,
    pub name: String,
    pub native_currency: NativeCurrency,
    pub short_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tvl: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_slug: Option<String>,
    pub rpc: Vec<String>,
}

/// Optional field that falls back to `None` when its value has the wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let kind = json_kind(&value);
    Ok(serde_json::from_value(value).unwrap_or_else(|e| {
        warn!("ignoring malformed optional field ({}): {}", kind, e);
        None
    }))
}

/// Optional list whose malformed items are dropped. A non-array value counts
/// as absent; an empty array stays present.
fn lenient_list<'de, D, T>(deserializer: D) -> std::result::Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        Value::Null => return Ok(None),
        other => {
            warn!("ignoring list field given as {}", json_kind(&other));
            return Ok(None);
        }
    };

    Ok(Some(
        items
            .into_iter()
            .filter_map(|item| match serde_json::from_value(item) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    warn!("skipping malformed list item: {}", e);
                    None
                }
            })
            .collect(),
    ))
}

/// Parse a raw chain catalog document fetched from `url`.
///
/// The document itself must be an array. Elements that do not form a valid
/// record are skipped and logged; the remaining ones are kept.
pub fn chains_from_value(value: Value, url: &str) -> ChainlistResult<Vec<ChainRecord>> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(ChainlistError::Catalog {
                url: url.to_string(),
                kind: json_kind(&other),
            })
        }
    };

    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<ChainRecord>(item) {
            Ok(chain) if chain.chain_id > 0 => Some(chain),
            Ok(_) => {
                warn!("skipping catalog entry {}: chainId must be positive", index);
                None
            }
            Err(e) => {
                warn!("skipping catalog entry {}: {}", index, e);
                None
            }
        })
        .collect())
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
