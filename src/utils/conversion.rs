//! Formatting and parsing helpers.

use alloy::primitives::{hex, Address};
use anyhow::{Context, Result};

/// Encode bytes as a lowercase hex string with 0x prefix.
pub fn hex_encode(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse a list of hex addresses, failing on the first invalid one.
pub fn parse_addresses(addresses: &[String]) -> Result<Vec<Address>> {
    addresses
        .iter()
        .map(|addr| {
            addr.trim()
                .parse::<Address>()
                .with_context(|| format!("Invalid address: {addr}"))
        })
        .collect()
}
