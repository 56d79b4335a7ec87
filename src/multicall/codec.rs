//! Packing and unpacking of Multicall3 `aggregate3` payloads.
//!
//! Two codecs share the [`CallCodec`] trait:
//!
//! - [`Aggregate3Codec`] - compile-time `sol!` bindings
//! - [`JsonAbiCodec`] - driven by a JSON ABI, by default the bundled Multicall3 ABI

use std::sync::Arc;

use alloy::{
    dyn_abi::{DynSolType, DynSolValue, Specifier},
    json_abi::JsonAbi,
    primitives::{Bytes, Selector},
    sol_types::SolCall,
};
use once_cell::sync::OnceCell;

use super::types::{CallRequest, CallResult};
use crate::{
    abis::{IMulticall3, MULTICALL_ABI_JSON},
    error::CodecError,
};

const AGGREGATE3: &str = "aggregate3";

/// Encodes a chunk of requests into aggregator calldata and decodes the
/// aggregator's response back into per-call results, in the same order.
pub trait CallCodec: Send + Sync {
    fn encode(&self, calls: &[CallRequest]) -> Result<Bytes, CodecError>;

    fn decode(&self, data: &[u8]) -> Result<Vec<CallResult>, CodecError>;
}

/// Codec backed by the `sol!` generated `aggregate3` bindings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggregate3Codec;

impl CallCodec for Aggregate3Codec {
    fn encode(&self, calls: &[CallRequest]) -> Result<Bytes, CodecError> {
        let call = IMulticall3::aggregate3Call {
            calls: calls.iter().map(Into::into).collect(),
        };
        Ok(call.abi_encode().into())
    }

    fn decode(&self, data: &[u8]) -> Result<Vec<CallResult>, CodecError> {
        let results = IMulticall3::aggregate3Call::abi_decode_returns(data)?;
        Ok(results.into_iter().map(CallResult::from).collect())
    }
}

const AGGREGATE3_SIGNATURE: &str = "aggregate3((address,bool,bytes)[])";

/// Resolved `aggregate3` signature taken from a JSON ABI.
#[derive(Debug)]
struct Aggregate3Abi {
    selector: Selector,
    outputs: DynSolType,
}

impl Aggregate3Abi {
    fn from_json(json: &str) -> Result<Self, CodecError> {
        let abi: JsonAbi = serde_json::from_str(json)?;
        let overloads = abi
            .function(AGGREGATE3)
            .filter(|overloads| !overloads.is_empty())
            .ok_or(CodecError::MissingFunction(AGGREGATE3))?;

        let function = overloads
            .iter()
            .find(|function| function.signature() == AGGREGATE3_SIGNATURE)
            .ok_or_else(|| {
                let found: Vec<String> = overloads.iter().map(|f| f.signature()).collect();
                CodecError::UnexpectedShape(format!(
                    "expected {AGGREGATE3_SIGNATURE}, got {}",
                    found.join(", ")
                ))
            })?;

        let outputs = function
            .outputs
            .iter()
            .map(|param| param.resolve())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            selector: function.selector(),
            outputs: DynSolType::Tuple(outputs),
        })
    }
}

/// Parsed once per process, on first use of [`JsonAbiCodec::bundled`].
static BUNDLED_AGGREGATE3: OnceCell<Arc<Aggregate3Abi>> = OnceCell::new();

/// Codec driven by a JSON ABI definition of Multicall3.
///
/// Cloning is cheap; all clones share the parsed definition.
#[derive(Debug, Clone)]
pub struct JsonAbiCodec {
    abi: Arc<Aggregate3Abi>,
}

impl JsonAbiCodec {
    /// Codec for the Multicall3 ABI bundled with this crate.
    ///
    /// The bundled JSON is parsed on the first call only; concurrent first
    /// callers wait for that single parse.
    pub fn bundled() -> Result<Self, CodecError> {
        let abi = BUNDLED_AGGREGATE3
            .get_or_try_init(|| Aggregate3Abi::from_json(MULTICALL_ABI_JSON).map(Arc::new))?;
        Ok(Self { abi: abi.clone() })
    }

    /// Codec for any ABI JSON exposing an `aggregate3` function.
    pub fn from_json(json: &str) -> Result<Self, CodecError> {
        Ok(Self {
            abi: Arc::new(Aggregate3Abi::from_json(json)?),
        })
    }

    pub fn selector(&self) -> Selector {
        self.abi.selector
    }
}

impl CallCodec for JsonAbiCodec {
    fn encode(&self, calls: &[CallRequest]) -> Result<Bytes, CodecError> {
        let triples = calls
            .iter()
            .map(|call| {
                DynSolValue::Tuple(vec![
                    DynSolValue::Address(call.target),
                    DynSolValue::Bool(call.allow_failure),
                    DynSolValue::Bytes(call.call_data.to_vec()),
                ])
            })
            .collect();
        let args = DynSolValue::Tuple(vec![DynSolValue::Array(triples)]);

        let mut data = self.abi.selector.to_vec();
        data.extend_from_slice(&args.abi_encode_params());
        Ok(data.into())
    }

    fn decode(&self, data: &[u8]) -> Result<Vec<CallResult>, CodecError> {
        let decoded = self.abi.outputs.abi_decode_params(data)?;

        let entries = match decoded.as_tuple() {
            Some([returned]) => returned.as_array().ok_or_else(|| {
                CodecError::UnexpectedShape(format!("expected result array, got {returned:?}"))
            })?,
            _ => {
                return Err(CodecError::UnexpectedShape(format!(
                    "expected single return value, got {decoded:?}"
                )))
            },
        };

        entries.iter().map(result_from_dyn).collect()
    }
}

// Struct outputs may decode as plain or named tuples depending on enabled
// alloy features, so fields are read through the accessors.
fn result_from_dyn(value: &DynSolValue) -> Result<CallResult, CodecError> {
    match value.as_tuple() {
        Some([success, data]) => match (success.as_bool(), data.as_bytes()) {
            (Some(true), Some(data)) => Ok(CallResult::success(data.to_vec())),
            (Some(false), Some(_)) => Ok(CallResult::failure()),
            _ => Err(CodecError::UnexpectedShape(format!(
                "expected (bool,bytes), got {value:?}"
            ))),
        },
        _ => Err(CodecError::UnexpectedShape(format!(
            "expected (bool,bytes), got {value:?}"
        ))),
    }
}
