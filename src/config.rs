// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Defaults, environment variable names and the resolved configuration the
//! orchestrator consumes. Values come from the command line (see
//! [`crate::cli`]); the node URL may also come from the environment.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `ETH_NODE_URL` | Ethereum JSON-RPC endpoint (`http`, `https`, `ws`, `wss`) | Required unless `--node` is given |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the node URL.
///
/// Hosted endpoints usually embed an API key in the path, so the value is
/// never printed in full.
pub const NODE_URL_ENV: &str = "ETH_NODE_URL";

/// Environment variable selecting the log format (`json` or `pretty`).
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Address list read when no `--input` is given.
pub const DEFAULT_INPUT_FILE: &str = "wallets.txt";

/// Report file written when no `--output` is given.
pub const DEFAULT_OUTPUT_FILE: &str = "balances.json";

/// Fractional ETH digits shown in the report.
pub const DEFAULT_PRECISION: u8 = 4;

/// Upper bound for a single RPC request, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Resolved settings for one run.
#[derive(Clone)]
pub struct CheckerConfig {
    /// Address list file
    pub input: PathBuf,
    /// Report file; `None` skips writing it
    pub output: Option<PathBuf>,
    /// Node endpoint URL
    pub node_url: String,
    /// Fractional digits in formatted balances
    pub precision: u8,
    /// Upper bound per RPC request
    pub request_timeout: Duration,
}

impl CheckerConfig {
    /// Configuration with the default file names for the given node.
    pub fn new(node_url: impl Into<String>) -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_FILE),
            output: Some(PathBuf::from(DEFAULT_OUTPUT_FILE)),
            node_url: node_url.into(),
            precision: DEFAULT_PRECISION,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl fmt::Debug for CheckerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckerConfig")
            .field("input", &self.input)
            .field("output", &self.output)
            .field("node_url", &"<redacted>")
            .field("precision", &self.precision)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
