use super::error::{ChainlistError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvlRecord {
    pub name: String,
    pub tvl: f64,
}

/// Case-insensitive lookup of TVL by chain name.
#[derive(Debug, Clone, Default)]
pub struct TvlIndex {
    by_name: HashMap<String, f64>,
}

impl TvlIndex {
    /// Index records by lowercased name; the first record for a name wins.
    pub fn new(records: &[TvlRecord]) -> Self {
        let mut by_name = HashMap::with_capacity(records.len());
        for record in records {
            by_name
                .entry(record.name.to_lowercase())
                .or_insert(record.tvl);
        }
        Self { by_name }
    }

    pub fn get(&self, slug: &str) -> Option<f64> {
        self.by_name.get(&slug.to_lowercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Parse a raw TVL document fetched from `url`, skipping elements without a
/// name or numeric tvl. A document that is not an array is rejected.
pub fn tvls_from_value(value: Value, url: &str) -> Result<Vec<TvlRecord>> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(ChainlistError::Catalog {
                url: url.to_string(),
                kind: super::chain::json_kind(&other),
            })
        }
    };

    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<TvlRecord>(item).ok())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_index_is_case_insensitive() {
        let index = TvlIndex::new(&[
            TvlRecord { name: "Ethereum".into(), tvl: 1000.0 },
            TvlRecord { name: "ethereum".into(), tvl: 5.0 },
            TvlRecord { name: "Base".into(), tvl: 42.5 },
        ]);

        assert_eq!(index.get("ethereum"), Some(1000.0));
        assert_eq!(index.get("BASE"), Some(42.5));
        assert_eq!(index.get("arbitrum"), None);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_tvls_from_value() {
        let records = tvls_from_value(
            json!([
            { "gecko_id": "ethereum", "tvl": 1000.0, "tokenSymbol": "ETH", "name": "Ethereum", "chainId": 1 },
            { "name": "NoTvl" },
            { "name": "NullTvl", "tvl": null },
            { "name": "Tron", "tvl": 7 }
            ]),
            "tvl",
        )
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].tvl, 7.0);
    }

    #[test]
    fn test_tvls_from_value_rejects_non_array() {
        let err = tvls_from_value(json!({ "message": "down" }), "tvl").unwrap_err();
        assert!(matches!(err, ChainlistError::Catalog { kind: "object", .. }));
    }
}
