pub mod clock;
pub mod config;
pub mod core;
pub mod registry;
pub mod server;
pub mod storage;
pub mod types;

pub use crate::core::{populate_chain, strip_server_only_data, ChainDirectory, Fetcher, ResponseCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::DirectoryConfig;
pub use registry::{ChainSlugs, ExtraRpcRegistry, Registries};
pub use storage::{MemoryStorage, Storage};
pub use types::{ChainRecord, ChainlistError, ClientChain, LightweightChain, Result, RpcEntry};
