use std::time::Duration;

use alloy::transports::TransportError;
use thiserror::Error;

/// Errors produced while packing or unpacking `aggregate3` payloads.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("abi error: {0}")]
    Abi(#[from] alloy::sol_types::Error),

    #[error("dynamic abi error: {0}")]
    DynAbi(#[from] alloy::dyn_abi::Error),

    #[error("invalid ABI JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("function `{0}` not found in ABI")]
    MissingFunction(&'static str),

    #[error("unexpected value shape: {0}")]
    UnexpectedShape(String),

    #[error("expected {expected} results, got {actual}")]
    ResultCount { expected: usize, actual: usize },
}

/// Errors that abort a whole multicall invocation.
///
/// Chunk-level variants carry `start`, the index of the first request of the
/// chunk that failed. A sub-call failing with `allow_failure = true` is never an
/// error; it shows up as `CallResult { success: false, .. }`.
#[derive(Debug, Error)]
pub enum MulticallError {
    #[error("batch size must be at least 1")]
    InvalidBatchSize,

    #[error("failed to pack multicall {start}: {source}")]
    Encode {
        start: usize,
        #[source]
        source: CodecError,
    },

    #[error("failed to execute multicall {start}: {source}")]
    RemoteCall {
        start: usize,
        #[source]
        source: TransportError,
    },

    #[error("multicall {start} did not complete within {timeout:?}")]
    DeadlineExceeded { start: usize, timeout: Duration },

    #[error("failed to unpack multicall {start} (chunk {chunk}): {source}")]
    Decode {
        chunk: usize,
        start: usize,
        #[source]
        source: CodecError,
    },
}

impl MulticallError {
    /// True when the aggregator call itself failed or timed out.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::RemoteCall { .. } | Self::DeadlineExceeded { .. })
    }

    /// Start index of the chunk that caused the abort, if any.
    pub fn chunk_start(&self) -> Option<usize> {
        match self {
            Self::InvalidBatchSize => None,
            Self::Encode { start, .. }
            | Self::RemoteCall { start, .. }
            | Self::DeadlineExceeded { start, .. }
            | Self::Decode { start, .. } => Some(*start),
        }
    }
}
