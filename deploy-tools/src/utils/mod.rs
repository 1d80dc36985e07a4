// Copyright 2026, SolDisc Developers
// For licensing, see licenses/COPYRIGHT.md at the repository root

//! General purpose utilities.

use alloy::primitives::{utils::format_ether, U256};
use bytesize::ByteSize;
use color::{Color, GREY, MINT, PINK, YELLOW};

pub mod color;

/// Pretty-prints an amount of the native token given in wei.
pub fn format_fee(fee: U256) -> String {
    let text = format!("{} ETH", format_ether(fee));
    if fee <= U256::from(5e14) {
        text.mint()
    } else if fee <= U256::from(5e15) {
        text.yellow()
    } else {
        text.red()
    }
}

/// Pretty-prints a gas amount.
pub fn format_gas(gas: u64) -> String {
    let text = format!("{gas} gas");
    if gas <= 3_000_000 {
        text.mint()
    } else if gas <= 7_000_000 {
        text.yellow()
    } else {
        text.pink()
    }
}

/// Pretty-prints a file size based on its limits.
pub fn format_file_size(len: ByteSize, mid: ByteSize, max: ByteSize) -> String {
    let color = if len <= mid {
        MINT
    } else if len <= max {
        YELLOW
    } else {
        PINK
    };

    format!("{color}{len}{GREY} ({} bytes)", len.as_u64())
}

/// Converts a decimal gwei amount into wei.
pub fn convert_gwei_to_wei(gwei: f64) -> Result<u128, InvalidGwei> {
    if !gwei.is_finite() || gwei < 0.0 {
        return Err(InvalidGwei(gwei.to_string()));
    }
    let wei = gwei * 1e9;
    if !wei.is_finite() || wei >= u128::MAX as f64 {
        return Err(InvalidGwei(gwei.to_string()));
    }
    Ok(wei as u128)
}

#[derive(Debug, thiserror::Error)]
#[error("invalid gwei amount: {0}")]
pub struct InvalidGwei(String);

/// Decodes hex text, tolerating a `0x` prefix and surrounding whitespace.
pub fn decode0x(text: impl AsRef<str>) -> Result<Vec<u8>, hex::FromHexError> {
    let text = text.as_ref().trim();
    let text = text.strip_prefix("0x").unwrap_or(text);
    hex::decode(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gwei_conversion() {
        assert_eq!(convert_gwei_to_wei(100.0).unwrap(), 100_000_000_000);
        assert_eq!(convert_gwei_to_wei(0.5).unwrap(), 500_000_000);
        assert!(convert_gwei_to_wei(-1.0).is_err());
        assert!(convert_gwei_to_wei(f64::NAN).is_err());
        assert!(convert_gwei_to_wei(f64::INFINITY).is_err());
    }

    #[test]
    fn decode_hex_with_prefix() {
        assert_eq!(decode0x(" 0x0a0b \n").unwrap(), vec![0x0a, 0x0b]);
        assert_eq!(decode0x("ff").unwrap(), vec![0xff]);
        assert!(decode0x("0xzz").is_err());
    }
}
