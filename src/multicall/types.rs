use alloy::{
    primitives::{Address, Bytes},
    sol_types::SolCall,
};

use crate::abis::{Call3, McResult};

/// A packed call to be executed through Multicall3 (`Call3` in the ABI).
///
/// `call_data` is opaque to the engine: it is whatever the target contract
/// expects, usually produced with `SolCall::abi_encode`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRequest {
    pub target: Address,
    /// When false, a failing sub-call reverts the whole aggregate3 call.
    pub allow_failure: bool,
    pub call_data: Bytes,
}

impl CallRequest {
    pub fn new(target: Address, call_data: impl Into<Bytes>, allow_failure: bool) -> Self {
        Self {
            target,
            allow_failure,
            call_data: call_data.into(),
        }
    }

    /// Build a request from a typed contract call.
    ///
    /// # Example
    /// ```ignore
    /// let req = CallRequest::from_call(token, &IERC20::nameCall {}, true);
    /// ```
    pub fn from_call<C: SolCall>(target: Address, call: &C, allow_failure: bool) -> Self {
        Self::new(target, call.abi_encode(), allow_failure)
    }
}

impl From<&CallRequest> for Call3 {
    fn from(req: &CallRequest) -> Self {
        Call3 {
            target: req.target,
            allowFailure: req.allow_failure,
            callData: req.call_data.clone(),
        }
    }
}

/// Outcome of a single sub-call (`Result` in the Multicall3 ABI).
///
/// `data` is always empty when `success` is false.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallResult {
    pub success: bool,
    pub data: Bytes,
}

impl CallResult {
    pub fn success(data: impl Into<Bytes>) -> Self {
        Self {
            success: true,
            data: data.into(),
        }
    }

    pub fn failure() -> Self {
        Self::default()
    }

    /// Decode the return data as the output of `C`.
    ///
    /// Returns `Ok(None)` for a failed sub-call.
    pub fn decode<C: SolCall>(&self) -> Result<Option<C::Return>, alloy::sol_types::Error> {
        if !self.success {
            return Ok(None);
        }
        C::abi_decode_returns(&self.data).map(Some)
    }
}

impl From<McResult> for CallResult {
    fn from(res: McResult) -> Self {
        if res.success {
            Self::success(res.returnData)
        } else {
            // Revert data is dropped; callers only see the failure flag.
            Self::failure()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abis::IERC20;
    use alloy::{primitives::address, sol_types::SolValue};

    const WETH: Address = address!("7ceB23fD6bC0adD59E62ac25578270cFf1b9f619");

    #[test]
    fn test_from_call_packs_selector() {
        let req = CallRequest::from_call(WETH, &IERC20::nameCall {}, true);
        assert_eq!(req.target, WETH);
        assert!(req.allow_failure);
        assert_eq!(&req.call_data[..4], IERC20::nameCall::SELECTOR.as_slice());
    }

    #[test]
    fn test_failed_result_drops_revert_data() {
        let raw = McResult {
            success: false,
            returnData: Bytes::from_static(&[0x08, 0xc3, 0x79, 0xa0]),
        };
        let result = CallResult::from(raw);
        assert!(!result.success);
        assert!(result.data.is_empty());
    }

    #[test]
    fn test_decode_typed_return() {
        let ok = CallResult::success(String::from("Wrapped Ether").abi_encode());
        let name = ok.decode::<IERC20::nameCall>().unwrap();
        assert_eq!(name.as_deref(), Some("Wrapped Ether"));

        let failed = CallResult::failure();
        assert_eq!(failed.decode::<IERC20::nameCall>().unwrap(), None);
    }

    #[test]
    fn test_decode_mismatched_return_errors() {
        let garbage = CallResult::success(Bytes::from_static(&[0x01, 0x02]));
        assert!(garbage.decode::<IERC20::decimalsCall>().is_err());
    }
}
