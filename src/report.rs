// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Balance Report
//!
//! Ordered mapping from address to lookup outcome, and the writers that emit
//! it as JSON.
//!
//! ## Output Format
//!
//! A single JSON object. Keys are addresses in first-seen input order. Values
//! are either a balance (`"1.5 ETH"`) or an error (`"Error: invalid address"`).
//! The tagged [`BalanceOutcome`] is flattened to that string only when
//! serializing. Key and value escaping follows RFC 8259 as implemented by
//! `serde_json`; non-ASCII text is written verbatim.
//!
//! ```json
//! {
//!     "0xAAA": "1.5 ETH",
//!     "not-an-address": "Error: invalid address"
//! }
//! ```

use std::io::{self, BufWriter, Write};
use std::path::Path;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;

use crate::blockchain::NativeBalance;
use crate::error::ReportError;

/// Indentation used for pretty-printed output.
const JSON_INDENT: &[u8] = b"    ";

/// Result of looking up one address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalanceOutcome {
    /// Lookup succeeded
    Balance(NativeBalance),
    /// Lookup failed with the given message
    Failed(String),
}

impl BalanceOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Balance(_))
    }

    /// String written to the report for this outcome.
    pub fn display_value(&self) -> String {
        match self {
            Self::Balance(balance) => balance.to_string(),
            Self::Failed(message) => format!("Error: {message}"),
        }
    }
}

/// Lookup outcomes keyed by address, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceReport {
    entries: IndexMap<String, BalanceOutcome>,
}

impl BalanceReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Record the outcome for `address`.
    ///
    /// A repeated address keeps its original position and takes the new
    /// outcome. The replaced outcome is returned.
    pub fn record(&mut self, address: &str, outcome: BalanceOutcome) -> Option<BalanceOutcome> {
        self.entries.insert(address.to_string(), outcome)
    }

    pub fn get(&self, address: &str) -> Option<&BalanceOutcome> {
        self.entries.get(address)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BalanceOutcome)> + '_ {
        self.entries.iter().map(|(address, outcome)| (address.as_str(), outcome))
    }

    pub fn success_count(&self) -> usize {
        self.entries.values().filter(|o| o.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.len() - self.success_count()
    }

    /// Flattened `(address, value)` pairs, exactly as serialized.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.iter()
            .map(|(address, outcome)| (address.to_string(), outcome.display_value()))
            .collect()
    }
}

impl Serialize for BalanceReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (address, outcome) in &self.entries {
            map.serialize_entry(address, &outcome.display_value())?;
        }
        map.end()
    }
}

/// Encode the report as pretty JSON into `writer`.
fn write_pretty<W: Write>(writer: W, report: &BalanceReport) -> Result<(), serde_json::Error> {
    let mut serializer =
        serde_json::Serializer::with_formatter(writer, PrettyFormatter::with_indent(JSON_INDENT));
    report.serialize(&mut serializer)
}

/// Render the report as pretty JSON.
pub fn render_json(report: &BalanceReport) -> Result<String, ReportError> {
    let mut buf = Vec::new();
    write_pretty(&mut buf, report)?;
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Print the report to standard output.
pub fn print_report(report: &BalanceReport) -> Result<(), ReportError> {
    let json = render_json(report)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}").map_err(ReportError::Stdout)?;
    stdout.flush().map_err(ReportError::Stdout)
}

/// Write the report to `path`, replacing any existing file.
///
/// The JSON goes to a uniquely named temp file in the target directory, which
/// is then renamed over the target. On any failure the temp file is removed
/// and a previous report at `path` is left intact.
pub fn write_report(report: &BalanceReport, path: impl AsRef<Path>) -> Result<(), ReportError> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_access = |source: io::Error| ReportError::FileAccess {
        path: path.to_path_buf(),
        source,
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(file_access)?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        write_pretty(&mut writer, report).map_err(|e| encode_error(path, e))?;
        writeln!(writer).map_err(file_access)?;
        writer.flush().map_err(file_access)?;
    }

    temp.persist(path).map_err(|e| file_access(e.error))?;
    Ok(())
}

/// Classify a serializer failure: I/O underneath is a file error, anything
/// else an encoding error.
fn encode_error(path: &Path, e: serde_json::Error) -> ReportError {
    if e.io_error_kind().is_some() {
        ReportError::FileAccess {
            path: path.to_path_buf(),
            source: e.into(),
        }
    } else {
        ReportError::Json(e)
    }
}
