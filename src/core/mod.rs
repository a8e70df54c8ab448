mod fetcher;
mod pipeline;
mod populate;
mod response_cache;
mod sanitize;

pub use fetcher::Fetcher;
pub use pipeline::{merge_overrides, ChainDirectory};
pub use populate::{populate_chain, sort_by_tvl};
pub use response_cache::{CachedEntry, ResponseCache};
pub use sanitize::{strip_server_only_data, to_checked_json, to_client_chain, SERVER_ONLY_KEYS};
