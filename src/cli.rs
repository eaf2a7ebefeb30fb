// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Command line interface.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::{
    CheckerConfig, DEFAULT_INPUT_FILE, DEFAULT_OUTPUT_FILE, DEFAULT_PRECISION,
    DEFAULT_REQUEST_TIMEOUT_SECS, NODE_URL_ENV,
};

#[derive(Debug, Parser)]
#[command(
    name = "eth-balance-checker",
    version,
    about = "Check native ETH balances for a list of wallet addresses",
    long_about = None
)]
pub struct Cli {
    /// File with one Ethereum address per line
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_INPUT_FILE)]
    pub input: PathBuf,

    /// JSON file the results are written to
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Ethereum node URL (http, https, ws or wss)
    #[arg(short, long, value_name = "URL", env = NODE_URL_ENV, hide_env_values = true)]
    pub node: String,

    /// Fractional ETH digits shown per balance
    #[arg(
        long,
        value_name = "DIGITS",
        default_value_t = DEFAULT_PRECISION,
        value_parser = clap::value_parser!(u8).range(1..=18)
    )]
    pub precision: u8,

    /// Per-request timeout in seconds
    #[arg(
        long,
        value_name = "SECS",
        default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Print results without writing the output file
    #[arg(long)]
    pub no_save: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn into_config(self) -> CheckerConfig {
        CheckerConfig {
            input: self.input,
            output: (!self.no_save).then_some(self.output),
            node_url: self.node,
            precision: self.precision,
            request_timeout: Duration::from_secs(self.timeout),
        }
    }
}
