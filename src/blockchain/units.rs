// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Fixed-point conversion from the smallest on-chain unit to display units.

use alloy::primitives::U256;

/// Format `value` (in smallest units) as a decimal string with `decimals`
/// fractional digits of scale.
///
/// The fraction is truncated to `precision` digits and trailing zeros are
/// trimmed, keeping at least one digit after the point:
///
/// | wei | precision | result |
/// |-----|-----------|--------|
/// | 1.5e18 | 4 | `1.5` |
/// | 0 | 4 | `0.0` |
/// | 1.23456789e18 | 4 | `1.2345` |
pub fn format_units(value: U256, decimals: u8, precision: u8) -> String {
    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = value / divisor;
    let remainder = value % divisor;

    let digits = format!(
        "{:0>width$}",
        remainder.to_string(),
        width = decimals as usize
    );
    let keep = (precision as usize).min(digits.len());
    let fraction = digits[..keep].trim_end_matches('0');

    if fraction.is_empty() {
        format!("{whole}.0")
    } else {
        format!("{whole}.{fraction}")
    }
}
