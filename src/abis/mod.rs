pub mod erc20;
pub mod multicall;

pub use erc20::IERC20;
pub use multicall::{Call3, IMulticall3, McResult, MULTICALL3_ADDRESS};

/// Multicall3 ABI in the standard JSON format, bundled into the binary.
pub const MULTICALL_ABI_JSON: &str = include_str!("multicall_abi.json");
