pub mod abis;
pub mod config;
pub mod error;
pub mod multicall;
pub mod utils;

pub use abis::MULTICALL3_ADDRESS;
pub use config::{MulticallConfig, Settings};
pub use error::{CodecError, MulticallError};
pub use multicall::{
    Aggregate3Codec, CallCodec, CallRequest, CallResult, FailureMode, JsonAbiCodec, Multicaller,
    PartialResults, ProviderCaller, RemoteCaller,
};
