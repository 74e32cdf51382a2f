// Dweve HashBench - Hash Table Benchmark Metrics
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for the metrics pipeline.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for metrics pipeline operations.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Errors raised while loading, normalizing, aggregating or writing metrics.
///
/// # Examples
///
/// ```
/// use hashbench_core::MetricsError;
///
/// let err = MetricsError::MissingColumn {
///     origin: "metrics.csv".into(),
///     column: "value".to_string(),
/// };
/// assert_eq!(err.to_string(), "Missing required column 'value' in 'metrics.csv'");
/// ```
#[derive(Debug, Error)]
pub enum MetricsError {
    /// None of the requested input sources exist.
    #[error("No input found: none of {} exist", display_paths(.searched))]
    NoInput {
        /// Every location that was checked.
        searched: Vec<PathBuf>,
    },

    /// I/O operation failed for a specific path.
    #[error("I/O error for '{}': {message}", .path.display())]
    Io {
        /// The path being read or written.
        path: PathBuf,
        /// The underlying error message.
        message: String,
    },

    /// The CSV reader or writer rejected the data.
    #[error("CSV error in '{}' at line {line}: {message}", .origin.display())]
    Csv {
        /// Source or artifact the error belongs to.
        origin: PathBuf,
        /// Line number (1-based, header included). Zero when unknown.
        line: u64,
        /// Error message from the CSV library.
        message: String,
    },

    /// A required column is absent from a source header.
    #[error("Missing required column '{column}' in '{}'", .origin.display())]
    MissingColumn {
        /// Source that lacks the column.
        origin: PathBuf,
        /// Name of the missing column.
        column: String,
    },

    /// A field could not be interpreted as its column's type.
    #[error(
        "Invalid value '{value}' in column '{column}' of '{}' at line {line}",
        .origin.display()
    )]
    InvalidField {
        /// Source containing the field.
        origin: PathBuf,
        /// Line number (1-based, header included).
        line: u64,
        /// Column name.
        column: String,
        /// The offending text.
        value: String,
    },

    /// A source holds more rows than the configured limit.
    #[error("Row limit exceeded in '{}': more than {limit} rows", .origin.display())]
    RowLimit {
        /// Source that exceeded the limit.
        origin: PathBuf,
        /// Configured maximum.
        limit: usize,
    },

    /// Arithmetic was attempted on a value that never parsed as a number.
    #[error("Non-numeric value '{value}' for metric '{metric}' ({context})")]
    NonNumericValue {
        /// Metric of the offending record.
        metric: String,
        /// The original text.
        value: String,
        /// Operation or group that needed the number.
        context: String,
    },
}

impl MetricsError {
    /// Create an I/O error with path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a CSV error from the `csv` crate, taking the line from its position.
    pub fn csv_error(origin: impl Into<PathBuf>, source: csv::Error) -> Self {
        let line = source.position().map(|p| p.line()).unwrap_or(0);
        Self::Csv {
            origin: origin.into(),
            line,
            message: source.to_string(),
        }
    }

    /// Returns `true` for the fatal no-input condition.
    pub fn is_no_input(&self) -> bool {
        matches!(self, Self::NoInput { .. })
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "(no sources requested)".to_string();
    }
    paths
        .iter()
        .map(|p| format!("'{}'", p.display()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_input_lists_every_path() {
        let err = MetricsError::NoInput {
            searched: vec![PathBuf::from("a.csv"), PathBuf::from("b.csv")],
        };
        let msg = err.to_string();
        assert!(msg.starts_with("No input found"));
        assert!(msg.contains("'a.csv'"));
        assert!(msg.contains("'b.csv'"));
        assert!(err.is_no_input());
    }

    #[test]
    fn test_no_input_without_sources() {
        let err = MetricsError::NoInput { searched: vec![] };
        assert!(err.to_string().contains("no sources requested"));
    }

    #[test]
    fn test_invalid_field_display() {
        let err = MetricsError::InvalidField {
            origin: PathBuf::from("runs.csv"),
            line: 7,
            column: "table_m".to_string(),
            value: "sixteen".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("sixteen"));
        assert!(msg.contains("table_m"));
        assert!(msg.contains("line 7"));
        assert!(!err.is_no_input());
    }

    #[test]
    fn test_non_numeric_display() {
        let err = MetricsError::NonNumericValue {
            metric: "time_ns".to_string(),
            value: "n/a".to_string(),
            context: "unit conversion".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Non-numeric value 'n/a' for metric 'time_ns' (unit conversion)"
        );
    }

    #[test]
    fn test_io_error_keeps_path() {
        let io = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = MetricsError::io_error("out/stats.csv", io);
        assert!(err.to_string().contains("out/stats.csv"));
        assert!(err.to_string().contains("denied"));
    }
}
