// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain types and constants.

use std::fmt;

use alloy::primitives::U256;

use super::units::format_units;

/// Decimals of the native currency (1 ETH = 10^18 wei).
pub const ETH_DECIMALS: u8 = 18;

/// Display symbol of the native currency.
pub const ETH_SYMBOL: &str = "ETH";

/// Transport used to reach a node, derived from the endpoint URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    /// `http://` or `https://`
    Http,
    /// `ws://` or `wss://`
    WebSocket,
}

impl EndpointKind {
    /// Map a URL scheme to a transport. Unknown schemes yield `None`.
    pub fn from_scheme(scheme: &str) -> Option<Self> {
        match scheme {
            "http" | "https" => Some(Self::Http),
            "ws" | "wss" => Some(Self::WebSocket),
            _ => None,
        }
    }
}

/// Native balance of a single account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeBalance {
    /// Currency symbol (e.g., "ETH")
    pub symbol: &'static str,
    /// Balance in wei
    pub balance_raw: U256,
    /// Balance in ETH, truncated to the display precision
    pub balance_formatted: String,
}

impl NativeBalance {
    /// Build an ETH balance from a wei amount.
    pub fn eth(wei: U256, precision: u8) -> Self {
        Self {
            symbol: ETH_SYMBOL,
            balance_raw: wei,
            balance_formatted: format_units(wei, ETH_DECIMALS, precision),
        }
    }
}

impl fmt::Display for NativeBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.balance_formatted, self.symbol)
    }
}
