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

//! Raw benchmark records and the unified record set.

use crate::value::Value;
use serde::Serialize;

/// Column names of the raw record schema, in artifact order.
pub const RECORD_COLUMNS: [&str; 8] = [
    "run_id",
    "table_type",
    "table_m",
    "hash_name",
    "data_n",
    "phase",
    "metric",
    "value",
];

/// One observed measurement.
///
/// Field order matches [`RECORD_COLUMNS`], which is also the column order of
/// the unified artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawRecord {
    /// Repetition identifier (0 when the source has a single repetition).
    pub run_id: u64,
    /// Structure family under test, e.g. `chaining` or `linear`.
    pub table_type: String,
    /// Table capacity parameter.
    pub table_m: u64,
    /// Hash function identifier.
    pub hash_name: String,
    /// Input size.
    pub data_n: u64,
    /// Experiment phase: `insert`, `search`, `structure`, `gaps`.
    pub phase: String,
    /// Measurement name, e.g. `time_ns` or `collisions`.
    pub metric: String,
    /// The measurement.
    pub value: Value,
}

impl RawRecord {
    /// Returns a copy with `metric` and `value` replaced.
    pub fn with_measurement(&self, metric: impl Into<String>, value: Value) -> Self {
        Self {
            metric: metric.into(),
            value,
            ..self.clone()
        }
    }
}

/// All records of one pipeline invocation, in load order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    records: Vec<RawRecord>,
}

impl RecordSet {
    /// Creates an empty record set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the records of one source.
    pub fn append(&mut self, records: Vec<RawRecord>) {
        self.records.extend(records);
    }

    /// Adds a single record.
    pub fn push(&mut self, record: RawRecord) {
        self.records.push(record);
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when no records are present.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over records in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, RawRecord> {
        self.records.iter()
    }

    /// Borrows the records as a slice.
    pub fn as_slice(&self) -> &[RawRecord] {
        &self.records
    }

    /// Returns `true` if any record carries `metric`.
    pub fn has_metric(&self, metric: &str) -> bool {
        self.records.iter().any(|r| r.metric == metric)
    }
}

impl From<Vec<RawRecord>> for RecordSet {
    fn from(records: Vec<RawRecord>) -> Self {
        Self { records }
    }
}

impl FromIterator<RawRecord> for RecordSet {
    fn from_iter<I: IntoIterator<Item = RawRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a RawRecord;
    type IntoIter = std::slice::Iter<'a, RawRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
#[allow(clippy::too_many_arguments)]
pub(crate) fn record(
    run_id: u64,
    table_type: &str,
    table_m: u64,
    hash_name: &str,
    data_n: u64,
    phase: &str,
    metric: &str,
    value: f64,
) -> RawRecord {
    RawRecord {
        run_id,
        table_type: table_type.to_string(),
        table_m,
        hash_name: hash_name.to_string(),
        data_n,
        phase: phase.to_string(),
        metric: metric.to_string(),
        value: Value::Numeric(value),
    }
}
