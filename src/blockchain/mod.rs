// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ethereum JSON-RPC integration.
//!
//! This module provides functionality for:
//! - Connecting to a node over HTTP(S) or WebSocket and verifying liveness
//! - Querying native ETH balances
//! - Converting wei amounts to display strings

pub mod client;
pub mod types;
pub mod units;

pub use client::{EthClient, QueryError};
pub use types::*;
pub use units::format_units;
