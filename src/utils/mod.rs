//! Small helpers shared by the CLI and library callers.
//!
//! - [`conversion`] - hex formatting and address parsing

mod conversion;

pub use conversion::{hex_encode, parse_addresses};
