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

//! Reading raw metric sources into a unified record set.
//!
//! Sources are CSV files with a header row. Columns are located by name, so
//! column order and extra columns do not matter. The `run_id` column is
//! optional when [`LoaderConfig::assume_single_repetition`] is set.

use crate::config::{LoaderConfig, ValuePolicy};
use crate::error::{MetricsError, Result};
use crate::record::{RawRecord, RecordSet};
use crate::value::Value;
use csv::StringRecord;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Loads every existing source in `paths`, in order.
///
/// Missing paths are skipped. At least one must exist.
///
/// # Errors
///
/// - [`MetricsError::NoInput`] if none of the paths exist
/// - any error from [`load_source`] for an existing path
pub fn load_sources(paths: &[PathBuf], config: &LoaderConfig) -> Result<RecordSet> {
    let mut set = RecordSet::new();
    let mut found = 0usize;

    for path in paths {
        if !path.is_file() {
            debug!(path = %path.display(), "source not found, skipping");
            continue;
        }
        let records = load_source(path, config)?;
        info!(path = %path.display(), rows = records.len(), "loaded source");
        set.append(records);
        found += 1;
    }

    if found == 0 {
        return Err(MetricsError::NoInput {
            searched: paths.to_vec(),
        });
    }

    Ok(set)
}

/// Loads a single source file.
pub fn load_source(path: &Path, config: &LoaderConfig) -> Result<Vec<RawRecord>> {
    let file = File::open(path).map_err(|e| MetricsError::io_error(path, e))?;
    parse_records(file, path, config)
}

/// Parses raw records from any reader.
///
/// `origin` is only used for error messages.
///
/// # Examples
///
/// ```
/// use hashbench_core::{parse_records, LoaderConfig, Value};
/// use std::path::Path;
///
/// let csv = "table_type,table_m,hash_name,data_n,phase,metric,value\n\
///            chaining,16,fnv,1000,insert,time_ns,500000\n";
/// let records = parse_records(csv.as_bytes(), Path::new("inline"), &LoaderConfig::default())?;
/// assert_eq!(records[0].run_id, 0);
/// assert_eq!(records[0].value, Value::Numeric(500000.0));
/// # Ok::<(), hashbench_core::MetricsError>(())
/// ```
///
/// # Errors
///
/// - [`MetricsError::MissingColumn`] when a required column is absent
/// - [`MetricsError::InvalidField`] for non-integer `run_id`, `table_m` or
///   `data_n`, and for non-numeric `value` under [`ValuePolicy::Strict`]
/// - [`MetricsError::RowLimit`] past [`LoaderConfig::max_rows`]
/// - [`MetricsError::Csv`] for malformed CSV
pub fn parse_records<R: Read>(
    reader: R,
    origin: &Path,
    config: &LoaderConfig,
) -> Result<Vec<RawRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(true)
        .trim(if config.trim {
            csv::Trim::All
        } else {
            csv::Trim::None
        })
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| MetricsError::csv_error(origin, e))?
        .clone();
    let columns = ColumnIndex::resolve(&headers, origin, config)?;
    if columns.run_id.is_none() {
        debug!(origin = %origin.display(), "no run_id column, assuming a single repetition");
    }

    let mut records = Vec::new();
    for (record_idx, result) in csv_reader.records().enumerate() {
        let row = result.map_err(|e| MetricsError::csv_error(origin, e))?;
        if row.iter().all(str::is_empty) {
            continue;
        }

        // Only kept rows count toward the limit.
        if records.len() >= config.max_rows {
            return Err(MetricsError::RowLimit {
                origin: origin.to_path_buf(),
                limit: config.max_rows,
            });
        }

        // Header is line 1, so the first record is line 2 when position is unknown.
        let line = row
            .position()
            .map(|p| p.line())
            .unwrap_or(record_idx as u64 + 2);
        let fields = RowFields {
            row: &row,
            line,
            origin,
        };
        records.push(columns.read(&fields, config)?);
    }

    Ok(records)
}

/// Positions of the schema columns within a source header.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    run_id: Option<usize>,
    table_type: usize,
    table_m: usize,
    hash_name: usize,
    data_n: usize,
    phase: usize,
    metric: usize,
    value: usize,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord, origin: &Path, config: &LoaderConfig) -> Result<Self> {
        let require = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| MetricsError::MissingColumn {
                    origin: origin.to_path_buf(),
                    column: name.to_string(),
                })
        };

        let run_id = headers.iter().position(|h| h == "run_id");
        if run_id.is_none() && !config.assume_single_repetition {
            return Err(MetricsError::MissingColumn {
                origin: origin.to_path_buf(),
                column: "run_id".to_string(),
            });
        }

        Ok(Self {
            run_id,
            table_type: require("table_type")?,
            table_m: require("table_m")?,
            hash_name: require("hash_name")?,
            data_n: require("data_n")?,
            phase: require("phase")?,
            metric: require("metric")?,
            value: require("value")?,
        })
    }

    fn read(&self, fields: &RowFields<'_>, config: &LoaderConfig) -> Result<RawRecord> {
        let run_id = match self.run_id {
            Some(idx) => fields.integer(idx, "run_id")?,
            None => 0,
        };

        let raw_value = fields.text(self.value);
        let value = Value::parse(raw_value);
        if config.value_policy == ValuePolicy::Strict && value.is_unparsed() {
            return Err(fields.invalid("value", raw_value));
        }

        Ok(RawRecord {
            run_id,
            table_type: fields.text(self.table_type).to_string(),
            table_m: fields.integer(self.table_m, "table_m")?,
            hash_name: fields.text(self.hash_name).to_string(),
            data_n: fields.integer(self.data_n, "data_n")?,
            phase: fields.text(self.phase).to_string(),
            metric: fields.text(self.metric).to_string(),
            value,
        })
    }
}

/// A data row together with its location, for error reporting.
struct RowFields<'a> {
    row: &'a StringRecord,
    line: u64,
    origin: &'a Path,
}

impl RowFields<'_> {
    fn text(&self, idx: usize) -> &str {
        self.row.get(idx).unwrap_or("")
    }

    fn integer(&self, idx: usize, column: &str) -> Result<u64> {
        let raw = self.text(idx);
        raw.trim().parse::<u64>().map_err(|_| self.invalid(column, raw))
    }

    fn invalid(&self, column: &str, value: &str) -> MetricsError {
        MetricsError::InvalidField {
            origin: self.origin.to_path_buf(),
            line: self.line,
            column: column.to_string(),
            value: value.to_string(),
        }
    }
}
