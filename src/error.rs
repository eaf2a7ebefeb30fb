// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Error types for a balance check run.
//!
//! Per-address lookup failures are [`QueryError`](crate::blockchain::QueryError)
//! and stay inside the batch. The types here are the ones that reach the
//! orchestrator.

use std::io;
use std::path::PathBuf;

/// Fatal errors. Any of these ends the run before a report is produced.
#[derive(Debug, thiserror::Error)]
pub enum CheckerError {
    #[error("cannot read address file {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid node URL: {0}")]
    InvalidNodeUrl(String),

    #[error("cannot connect to Ethereum node {0}")]
    Connection(String),
}

/// Errors while emitting a finished report. Reported, never fatal.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("cannot write {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write report to stdout: {0}")]
    Stdout(#[source] io::Error),

    #[error("cannot encode report: {0}")]
    Json(#[from] serde_json::Error),
}
