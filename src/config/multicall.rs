use std::num::NonZeroUsize;
use std::time::Duration;

use alloy::{eips::BlockId, primitives::Address};

use crate::error::MulticallError;

/// Default maximum number of calls packed into one aggregate3 call.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Default time budget for a whole multicall invocation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Reusable multicall configuration.
///
/// Read-only after construction, so one instance can serve any number of
/// concurrent invocations.
///
/// - `caller`: how `eth_call` reaches the chain
/// - `multicall_address`: the Multicall3 deployment for the chain, see
///   <https://www.multicall3.com/deployments>
/// - `batch_size`: maximum number of calls per aggregate3 call. Packing more
///   calls per round-trip is generally cheaper and faster.
/// - `timeout`: deadline for the whole invocation, shared by all batches
/// - `block`: block every call is executed against, latest when unset
#[derive(Debug, Clone)]
pub struct MulticallConfig<C> {
    caller: C,
    multicall_address: Address,
    batch_size: NonZeroUsize,
    timeout: Duration,
    block: Option<BlockId>,
}

impl<C> MulticallConfig<C> {
    /// Create a new multicall config. Fails when `batch_size` is zero.
    pub fn new(
        caller: C,
        multicall_address: Address,
        batch_size: usize,
        timeout: Duration,
    ) -> Result<Self, MulticallError> {
        let batch_size = NonZeroUsize::new(batch_size).ok_or(MulticallError::InvalidBatchSize)?;
        Ok(Self {
            caller,
            multicall_address,
            batch_size,
            timeout,
            block: None,
        })
    }

    /// Config with a batch size of 100 and a 30 second timeout.
    pub fn with_defaults(caller: C, multicall_address: Address) -> Self {
        Self {
            caller,
            multicall_address,
            batch_size: NonZeroUsize::new(DEFAULT_BATCH_SIZE).unwrap_or(NonZeroUsize::MIN),
            timeout: DEFAULT_TIMEOUT,
            block: None,
        }
    }

    /// Pin every call to `block`.
    pub fn at_block(mut self, block: BlockId) -> Self {
        self.block = Some(block);
        self
    }

    pub fn caller(&self) -> &C {
        &self.caller
    }

    pub fn multicall_address(&self) -> Address {
        self.multicall_address
    }

    pub fn batch_size(&self) -> NonZeroUsize {
        self.batch_size
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn block(&self) -> Option<BlockId> {
        self.block
    }
}
