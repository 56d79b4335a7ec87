//! Batched read calls through Multicall3 `aggregate3`.
//!
//! - [`batch`] - splits a request list into bounded batches
//! - [`codec`] - packs batches into aggregate3 calldata and unpacks responses
//! - [`invoker`] - the `eth_call` capability a batch is sent through
//! - [`engine`] - runs the batches under one deadline and reassembles results

pub mod batch;
pub mod codec;
pub mod engine;
pub mod invoker;
pub mod types;

pub use batch::chunk_ranges;
pub use codec::{Aggregate3Codec, CallCodec, JsonAbiCodec};
pub use engine::{FailureMode, Multicaller, PartialResults};
pub use invoker::{ProviderCaller, RemoteCaller};
pub use types::{CallRequest, CallResult};
