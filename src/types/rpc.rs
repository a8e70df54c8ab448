use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Privacy posture a provider declares for its public endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tracking {
    /// No data is collected
    None,
    /// Some request metadata is collected
    Limited,
    /// Requests are tracked
    Yes,
    /// The provider makes no statement
    Unspecified,
    /// Anything the registry does not recognise
    Unknown,
}

impl Tracking {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tracking::None => "none",
            Tracking::Limited => "limited",
            Tracking::Yes => "yes",
            Tracking::Unspecified => "unspecified",
            Tracking::Unknown => "unknown",
        }
    }
}

impl From<&str> for Tracking {
    fn from(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "none" => Tracking::None,
            "limited" => Tracking::Limited,
            "yes" => Tracking::Yes,
            "unspecified" => Tracking::Unspecified,
            _ => Tracking::Unknown,
        }
    }
}

impl Serialize for Tracking {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Tracking {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Tracking::from(raw.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedRpc {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking: Option<Tracking>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_open_source: Option<bool>,
}

/// One RPC endpoint, either a bare URL or a URL with provider annotations.
///
/// The shape is decided once when the upstream JSON is read; nothing downstream
/// inspects raw JSON again.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RpcEntry {
    Bare(String),
    Tracked(TrackedRpc),
}

impl RpcEntry {
    /// Convert a raw registry value. Strings become `Bare`, objects with a
    /// string `url` become `Tracked`, everything else is rejected.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(url) => Some(RpcEntry::Bare(url.clone())),
            Value::Object(map) => {
                let url = map.get("url")?.as_str()?.to_string();
                let tracking = map
                    .get("tracking")
                    .and_then(Value::as_str)
                    .map(Tracking::from);
                let tracking_details = map
                    .get("trackingDetails")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                let is_open_source = map.get("isOpenSource").and_then(Value::as_bool);

                Some(RpcEntry::Tracked(TrackedRpc {
                    url,
                    tracking,
                    tracking_details,
                    is_open_source,
                }))
            }
            _ => None,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            RpcEntry::Bare(url) => url,
            RpcEntry::Tracked(tracked) => &tracked.url,
        }
    }

    pub fn tracking(&self) -> Option<Tracking> {
        match self {
            RpcEntry::Bare(_) => None,
            RpcEntry::Tracked(tracked) => tracked.tracking,
        }
    }

    /// Same entry with its URL passed through [`normalize_url`].
    pub fn normalized(self) -> Self {
        match self {
            RpcEntry::Bare(url) => RpcEntry::Bare(normalize_url(&url).to_string()),
            RpcEntry::Tracked(mut tracked) => {
                tracked.url = normalize_url(&tracked.url).to_string();
                RpcEntry::Tracked(tracked)
            }
        }
    }
}

impl<'de> Deserialize<'de> for RpcEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        RpcEntry::from_value(&value)
            .ok_or_else(|| serde::de::Error::custom("expected an RPC url or an object with a url"))
    }
}

/// Reads an RPC list without ever failing: a non-array becomes an empty list
/// and entries of the wrong shape are dropped.
pub fn deserialize_rpc_list<'de, D>(deserializer: D) -> Result<Vec<RpcEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(rpc_list_from_value(&value))
}

pub fn rpc_list_from_value(value: &Value) -> Vec<RpcEntry> {
    match value {
        Value::Array(items) => items.iter().filter_map(RpcEntry::from_value).collect(),
        _ => Vec::new(),
    }
}

/// Strip a single trailing slash.
pub fn normalize_url(url: &str) -> &str {
    url.strip_suffix('/').unwrap_or(url)
}

/// True when the URL still carries a `${...}` substitution such as an API key.
pub fn has_placeholder(url: &str) -> bool {
    match url.find("${") {
        Some(start) => url[start + 2..].contains('}'),
        None => false,
    }
}
