// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ethereum Balance Checker
//!
//! Reads wallet addresses from a text file, looks up each native ETH balance
//! through a JSON-RPC node and writes an ordered JSON report to stdout and a
//! file. Lookups run one at a time; a failed lookup is recorded for its
//! address and never stops the batch.
//!
//! ## Modules
//!
//! - `wallets` - Address list loading
//! - `blockchain` - Node connection and balance queries (alloy)
//! - `batch` - Sequential batch lookup
//! - `report` - Ordered report and JSON writers
//! - `runner` - Run orchestration
//! - `cli` / `config` / `logging` - Command line, settings, tracing setup

pub mod batch;
pub mod blockchain;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod runner;
pub mod wallets;

#[cfg(test)]
pub(crate) mod test_utils;
