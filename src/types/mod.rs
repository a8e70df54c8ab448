pub mod chain;
pub mod client;
pub mod error;
pub mod rpc;
pub mod tvl;

pub use chain::{
    chains_from_value, Bridge, ChainRecord, ChainStatus, Ens, Explorer, LightweightChain,
    NativeCurrency, Parent,
};
pub use client::{ClientChain, ClientRpc};
pub use error::{ChainlistError, Result};
pub use rpc::{has_placeholder, normalize_url, RpcEntry, TrackedRpc, Tracking};
pub use tvl::{tvls_from_value, TvlIndex, TvlRecord};
