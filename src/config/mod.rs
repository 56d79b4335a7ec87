mod config;
mod multicall;

pub use config::{MulticallSettings, RpcSettings, Settings};
pub use multicall::{MulticallConfig, DEFAULT_BATCH_SIZE, DEFAULT_TIMEOUT};
