//! Address parsing

use ethers::types::Address;

use crate::error::{Error, Result};

/// Parse a `0x`-prefixed, 40 hex digit account address
///
/// Mixed-case input is accepted without checksum verification; the address is
/// treated as an opaque key by the registries.
pub fn parse_address(input: &str) -> Result<Address> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .ok_or_else(|| Error::InvalidAddress(format!("missing 0x prefix: {}", trimmed)))?;

    if digits.len() != 40 {
        return Err(Error::InvalidAddress(format!(
            "expected 40 hex digits, got {}: {}",
            digits.len(),
            trimmed
        )));
    }

    let bytes = hex::decode(digits)
        .map_err(|e| Error::InvalidAddress(format!("{}: {}", trimmed, e)))?;

    Ok(Address::from_slice(&bytes))
}

/// Format an address as lowercase `0x`-prefixed hex
pub fn format_address(address: &Address) -> String {
    format!("0x{}", hex::encode(address.as_bytes()))
}
