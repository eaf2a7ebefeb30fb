// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Sequential batch lookup over an address list.
//!
//! Addresses are queried one at a time in input order. A failed lookup is
//! recorded against its address and the batch moves on; nothing is retried.
//! Each finished lookup logs a `checked`/`total` progress event at `info`.

use std::future::Future;

use tracing::{debug, info, warn};

use crate::blockchain::{NativeBalance, QueryError};
use crate::report::{BalanceOutcome, BalanceReport};

/// Anything that can answer a native balance query for one address.
pub trait BalanceSource {
    fn fetch_balance(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<NativeBalance, QueryError>>;
}

/// Query every address in `addresses` and collect the outcomes.
///
/// Every input address is queried, duplicates included. A duplicate keeps the
/// position of its first occurrence and the outcome of its last.
pub async fn check_balances<S: BalanceSource>(source: &S, addresses: &[String]) -> BalanceReport {
    let total = addresses.len();
    let mut report = BalanceReport::with_capacity(total);

    for (index, address) in addresses.iter().enumerate() {
        let checked = index + 1;
        let outcome = match source.fetch_balance(address).await {
            Ok(balance) => {
                info!(checked, total, %address, %balance, "Checked balance");
                BalanceOutcome::Balance(balance)
            }
            Err(e) => {
                if let QueryError::InvalidAddress(detail) = &e {
                    debug!(%address, %detail, "Address rejected");
                }
                warn!(checked, total, %address, error = %e, "Failed to fetch balance");
                BalanceOutcome::Failed(e.to_string())
            }
        };

        if report.record(address, outcome).is_some() {
            debug!(%address, position = checked, "Duplicate address, keeping latest result");
        }
    }

    info!(
        queried = total,
        unique = report.len(),
        failed = report.failure_count(),
        "Balance batch complete"
    );
    report
}
