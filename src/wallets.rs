// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet address list loading.
//!
//! The input is UTF-8 text with one address per line. Lines are trimmed and
//! blank lines skipped. Nothing else is validated here: malformed addresses
//! are reported per address when they are queried. Order and duplicates are
//! preserved.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::CheckerError;

/// Byte order mark some editors put at the start of UTF-8 files.
const UTF8_BOM: char = '\u{feff}';

/// Load the address list from `path`.
pub fn load_addresses(path: impl AsRef<Path>) -> Result<Vec<String>, CheckerError> {
    let path = path.as_ref();
    let file_access = |source: io::Error| CheckerError::FileAccess {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(file_access)?;
    read_addresses(BufReader::new(file)).map_err(file_access)
}

/// Read addresses from any buffered reader, one per non-blank line.
pub fn read_addresses(reader: impl BufRead) -> io::Result<Vec<String>> {
    let mut addresses = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = if index == 0 {
            line.trim_start_matches(UTF8_BOM)
        } else {
            line.as_str()
        };

        let address = line.trim();
        if !address.is_empty() {
            addresses.push(address.to_string());
        }
    }

    Ok(addresses)
}
