use log::{debug, warn};
use tokio::time::{timeout_at, Instant};

use super::{
    batch::chunk_ranges,
    codec::{Aggregate3Codec, CallCodec},
    invoker::RemoteCaller,
    types::{CallRequest, CallResult},
};
use crate::{
    config::MulticallConfig,
    error::{CodecError, MulticallError},
};

/// What to hand back when a batch fails part way through an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    /// Return only the error.
    #[default]
    AllOrNothing,
    /// Return the results of every batch that completed, plus the error.
    Partial,
}

impl FailureMode {
    pub fn from_partial_flag(partial: bool) -> Self {
        if partial {
            Self::Partial
        } else {
            Self::AllOrNothing
        }
    }
}

/// Outcome of [`Multicaller::execute_partial`].
///
/// `results` always covers a prefix of the requests: `results[i]` belongs to
/// `requests[i]`. It covers all of them only when `error` is `None`.
#[derive(Debug)]
pub struct PartialResults {
    pub results: Vec<CallResult>,
    pub error: Option<MulticallError>,
}

impl PartialResults {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Drop the completed prefix if any batch failed.
    pub fn into_result(self) -> Result<Vec<CallResult>, MulticallError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.results),
        }
    }
}

/// Executes arbitrary read calls through Multicall3, in batches.
///
/// Requests are split into batches of at most `batch_size`, each batch is sent
/// as one aggregate3 `eth_call`, one after the other, and all of them share a
/// single deadline of `timeout` that starts when the invocation starts.
pub struct Multicaller<C, K = Aggregate3Codec> {
    config: MulticallConfig<C>,
    codec: K,
}

impl<C: RemoteCaller> Multicaller<C> {
    pub fn new(config: MulticallConfig<C>) -> Self {
        Self::with_codec(config, Aggregate3Codec)
    }
}

impl<C: RemoteCaller, K: CallCodec> Multicaller<C, K> {
    pub fn with_codec(config: MulticallConfig<C>, codec: K) -> Self {
        Self { config, codec }
    }

    pub fn config(&self) -> &MulticallConfig<C> {
        &self.config
    }

    /// Execute `calls` and return one result per call, in input order.
    ///
    /// Any batch failing to encode, execute or decode aborts the whole
    /// invocation and no results are returned. A call failing with
    /// `allow_failure = true` is not a batch failure.
    pub async fn execute(&self, calls: &[CallRequest]) -> Result<Vec<CallResult>, MulticallError> {
        let mut results = Vec::with_capacity(calls.len());
        self.run(calls, &mut results).await?;
        Ok(results)
    }

    /// Like [`execute`](Self::execute), but keeps the results of the batches
    /// that completed before a failure.
    pub async fn execute_partial(&self, calls: &[CallRequest]) -> PartialResults {
        let mut results = Vec::with_capacity(calls.len());
        let error = self.run(calls, &mut results).await.err();
        PartialResults { results, error }
    }

    pub async fn execute_with(&self, calls: &[CallRequest], mode: FailureMode) -> PartialResults {
        match mode {
            FailureMode::Partial => self.execute_partial(calls).await,
            FailureMode::AllOrNothing => match self.execute(calls).await {
                Ok(results) => PartialResults {
                    results,
                    error: None,
                },
                Err(error) => PartialResults {
                    results: Vec::new(),
                    error: Some(error),
                },
            },
        }
    }

    async fn run(
        &self,
        calls: &[CallRequest],
        results: &mut Vec<CallResult>,
    ) -> Result<(), MulticallError> {
        if calls.is_empty() {
            return Ok(());
        }

        let timeout = self.config.timeout();
        // None when the timeout is too large to represent; batches then run
        // without a deadline.
        let deadline = Instant::now().checked_add(timeout);
        let address = self.config.multicall_address();

        for (chunk, range) in chunk_ranges(calls.len(), self.config.batch_size()).enumerate() {
            let start = range.start;
            let batch = &calls[range];

            let data = self
                .codec
                .encode(batch)
                .map_err(|source| MulticallError::Encode { start, source })?;

            debug!(
                "Executing multicall {} ({} calls, {} bytes) on {}",
                start,
                batch.len(),
                data.len(),
                address
            );

            let call = self.config.caller().call(address, data, self.config.block());
            let outcome = match deadline {
                Some(deadline) => timeout_at(deadline, call).await,
                None => Ok(call.await),
            };
            let raw = match outcome {
                Ok(Ok(raw)) => raw,
                Ok(Err(source)) => {
                    warn!("Multicall {} failed: {}", start, source);
                    return Err(MulticallError::RemoteCall { start, source });
                },
                Err(_) => {
                    warn!("Multicall {} hit the {:?} deadline", start, timeout);
                    return Err(MulticallError::DeadlineExceeded { start, timeout });
                },
            };

            let decoded = self
                .codec
                .decode(&raw)
                .and_then(|decoded| {
                    if decoded.len() == batch.len() {
                        Ok(decoded)
                    } else {
                        Err(CodecError::ResultCount {
                            expected: batch.len(),
                            actual: decoded.len(),
                        })
                    }
                })
                .map_err(|source| MulticallError::Decode {
                    chunk,
                    start,
                    source,
                })?;

            // Batches run in order, so this batch lands at results[start..end].
            debug_assert_eq!(results.len(), start);
            results.extend(decoded);
        }

        Ok(())
    }
}
