// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Run Orchestration
//!
//! A run moves through fixed stages:
//!
//! ```text
//! Loading -> Connecting -> Checking -> Writing -> Done
//!    |           |
//!    v           v
//!  (fatal)    (fatal)
//! ```
//!
//! Only `Loading` and `Connecting` can fail the run, and both fail before any
//! output exists. Once `Checking` starts the run always reaches `Done`:
//! lookup failures are recorded in the report and a failed file write is
//! logged, not returned.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, error, info, warn};

use crate::batch::{check_balances, BalanceSource};
use crate::blockchain::EthClient;
use crate::config::CheckerConfig;
use crate::error::CheckerError;
use crate::report::{print_report, write_report, BalanceReport};
use crate::wallets::load_addresses;

/// Stage of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Loading,
    Connecting,
    Checking,
    Writing,
    Done,
}

fn enter(stage: RunStage) {
    debug!(?stage, "Entering stage");
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Addresses read from the input, duplicates included
    pub queried: usize,
    /// Entries in the report
    pub reported: usize,
    /// Report entries holding a balance
    pub succeeded: usize,
    /// Report entries holding an error
    pub failed: usize,
    /// Where the report was saved, if it was
    pub saved_to: Option<PathBuf>,
}

/// Execute a full run: load, connect, check, write.
///
/// Returns an error only for the fatal stages. The node connection lives for
/// the duration of the check and is dropped before returning.
pub async fn run(config: &CheckerConfig) -> Result<RunSummary, CheckerError> {
    let started = Instant::now();

    enter(RunStage::Loading);
    let addresses = load_addresses(&config.input)?;
    info!(
        count = addresses.len(),
        path = %config.input.display(),
        "Loaded wallet addresses"
    );
    if addresses.is_empty() {
        warn!(path = %config.input.display(), "Address file has no entries");
    }

    enter(RunStage::Connecting);
    let client = EthClient::connect(&config.node_url, config.request_timeout, config.precision).await?;

    let summary = check_and_write(config, &addresses, &client).await;
    drop(client);

    info!(
        elapsed_secs = started.elapsed().as_secs_f64(),
        "Completed"
    );
    Ok(summary)
}

/// The non-fatal half of a run: check every address, then emit the report.
pub async fn check_and_write<S: BalanceSource>(
    config: &CheckerConfig,
    addresses: &[String],
    source: &S,
) -> RunSummary {
    enter(RunStage::Checking);
    let report = check_balances(source, addresses).await;

    enter(RunStage::Writing);
    let saved_to = emit(&report, config.output.as_deref());

    enter(RunStage::Done);
    let summary = RunSummary {
        queried: addresses.len(),
        reported: report.len(),
        succeeded: report.success_count(),
        failed: report.failure_count(),
        saved_to,
    };
    info!(
        queried = summary.queried,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "Balance check finished"
    );
    summary
}

/// Print the report and save it when an output path is set.
fn emit(report: &BalanceReport, output: Option<&Path>) -> Option<PathBuf> {
    if let Err(e) = print_report(report) {
        error!(error = %e, "Failed to print balances");
    }

    let path = output?;
    match write_report(report, path) {
        Ok(()) => {
            info!(path = %path.display(), "Balances saved");
            Some(path.to_path_buf())
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "Failed to save balances");
            None
        }
    }
}
