#![allow(dead_code)]

use chainlist::{ChainDirectory, DirectoryConfig, Fetcher, Registries};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CHAINS_PATH: &str = "/chains.json";
pub const TVL_PATH: &str = "/tvl/chains";

pub fn raw_chain(chain_id: u64, name: &str, rpc: &[&str]) -> Value {
    json!({
        "name": name,
        "chain": "ETH",
        "shortName": name.to_lowercase().replace(' ', "-"),
        "chainId": chain_id,
        "networkId": chain_id,
        "nativeCurrency": { "name": "Ether", "symbol": "ETH", "decimals": 18 },
        "rpc": rpc,
        "faucets": [],
        "infoURL": format!("https://{}.example", chain_id),
    })
}

pub fn config_for(server: &MockServer) -> DirectoryConfig {
    DirectoryConfig::new()
        .with_chains_url(format!("{}{}", server.uri(), CHAINS_PATH))
        .with_tvl_url(format!("{}{}", server.uri(), TVL_PATH))
        .with_timeout(Duration::from_secs(2))
        .with_max_retries(0)
}

pub fn directory_for(server: &MockServer, registries: Registries) -> ChainDirectory {
    let config = config_for(server);
    let fetcher = Fetcher::new(&config);
    ChainDirectory::with_parts(config, fetcher, registries)
}

pub async fn mount_catalogs(server: &MockServer, chains: Value, tvl: Value) {
    Mock::given(method("GET"))
        .and(path(CHAINS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(chains))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(TVL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(tvl))
        .mount(server)
        .await;
}
