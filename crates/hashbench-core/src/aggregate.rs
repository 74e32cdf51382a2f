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

//! Grouping of normalized records into per-combination statistics.
//!
//! The full table is keyed by
//! `(table_type, table_m, hash_name, data_n, phase, metric)`. The structure
//! aggregates (chain lengths, gap statistics) drop `phase`, which is constant
//! within their selections. Rows come out ordered by key.

use crate::error::{MetricsError, Result};
use crate::record::{RawRecord, RecordSet};
use crate::stats::Summary;
use crate::value::Value;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use tracing::info;

/// Column names of the full aggregate table.
pub const AGGREGATE_COLUMNS: [&str; 11] = [
    "table_type",
    "table_m",
    "hash_name",
    "data_n",
    "phase",
    "metric",
    "mean",
    "std",
    "min",
    "max",
    "count",
];

/// Column names of the structure aggregates.
pub const STRUCTURE_COLUMNS: [&str; 10] = [
    "table_type",
    "table_m",
    "hash_name",
    "data_n",
    "metric",
    "mean",
    "std",
    "min",
    "max",
    "count",
];

/// Grouping key of the full aggregate table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AggregateKey {
    pub table_type: String,
    pub table_m: u64,
    pub hash_name: String,
    pub data_n: u64,
    pub phase: String,
    pub metric: String,
}

impl AggregateKey {
    /// Extracts the key of a record.
    pub fn of(record: &RawRecord) -> Self {
        Self {
            table_type: record.table_type.clone(),
            table_m: record.table_m,
            hash_name: record.hash_name.clone(),
            data_n: record.data_n,
            phase: record.phase.clone(),
            metric: record.metric.clone(),
        }
    }
}

impl fmt::Display for AggregateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "table_type={} table_m={} hash_name={} data_n={} phase={} metric={}",
            self.table_type, self.table_m, self.hash_name, self.data_n, self.phase, self.metric
        )
    }
}

/// Grouping key of the structure aggregates (no phase).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StructureKey {
    pub table_type: String,
    pub table_m: u64,
    pub hash_name: String,
    pub data_n: u64,
    pub metric: String,
}

impl StructureKey {
    /// Extracts the key of a record.
    pub fn of(record: &RawRecord) -> Self {
        Self {
            table_type: record.table_type.clone(),
            table_m: record.table_m,
            hash_name: record.hash_name.clone(),
            data_n: record.data_n,
            metric: record.metric.clone(),
        }
    }
}

impl fmt::Display for StructureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "table_type={} table_m={} hash_name={} data_n={} metric={}",
            self.table_type, self.table_m, self.hash_name, self.data_n, self.metric
        )
    }
}

/// One row of the full aggregate table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
    pub table_type: String,
    pub table_m: u64,
    pub hash_name: String,
    pub data_n: u64,
    pub phase: String,
    pub metric: String,
    #[serde(serialize_with = "nan_as_empty")]
    pub mean: f64,
    #[serde(serialize_with = "nan_as_empty")]
    pub std: f64,
    #[serde(serialize_with = "nan_as_empty")]
    pub min: f64,
    #[serde(serialize_with = "nan_as_empty")]
    pub max: f64,
    pub count: usize,
}

impl AggregateRow {
    fn new(key: AggregateKey, summary: Summary) -> Self {
        Self {
            table_type: key.table_type,
            table_m: key.table_m,
            hash_name: key.hash_name,
            data_n: key.data_n,
            phase: key.phase,
            metric: key.metric,
            mean: summary.mean,
            std: summary.std,
            min: summary.min,
            max: summary.max,
            count: summary.count,
        }
    }

    /// Returns the grouping key of this row.
    pub fn key(&self) -> AggregateKey {
        AggregateKey {
            table_type: self.table_type.clone(),
            table_m: self.table_m,
            hash_name: self.hash_name.clone(),
            data_n: self.data_n,
            phase: self.phase.clone(),
            metric: self.metric.clone(),
        }
    }
}

/// One row of a structure aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructureRow {
    pub table_type: String,
    pub table_m: u64,
    pub hash_name: String,
    pub data_n: u64,
    pub metric: String,
    #[serde(serialize_with = "nan_as_empty")]
    pub mean: f64,
    #[serde(serialize_with = "nan_as_empty")]
    pub std: f64,
    #[serde(serialize_with = "nan_as_empty")]
    pub min: f64,
    #[serde(serialize_with = "nan_as_empty")]
    pub max: f64,
    pub count: usize,
}

impl StructureRow {
    fn new(key: StructureKey, summary: Summary) -> Self {
        Self {
            table_type: key.table_type,
            table_m: key.table_m,
            hash_name: key.hash_name,
            data_n: key.data_n,
            metric: key.metric,
            mean: summary.mean,
            std: summary.std,
            min: summary.min,
            max: summary.max,
            count: summary.count,
        }
    }
}

/// The full per-combination aggregate table, ordered by key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateTable {
    rows: Vec<AggregateRow>,
}

impl AggregateTable {
    /// All rows, ordered by key.
    pub fn rows(&self) -> &[AggregateRow] {
        &self.rows
    }

    /// Iterates over rows.
    pub fn iter(&self) -> std::slice::Iter<'_, AggregateRow> {
        self.rows.iter()
    }

    /// Number of rows (distinct keys).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Looks up the row for `key`.
    pub fn get(&self, key: &AggregateKey) -> Option<&AggregateRow> {
        self.rows
            .binary_search_by(|row| row.key().cmp(key))
            .ok()
            .map(|idx| &self.rows[idx])
    }
}

impl<'a> IntoIterator for &'a AggregateTable {
    type Item = &'a AggregateRow;
    type IntoIter = std::slice::Iter<'a, AggregateRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Aggregates the normalized record set into the full table.
///
/// Every key present in `records` produces exactly one row; single-sample
/// groups are kept with an undefined (NaN) standard deviation. Missing values
/// are left out of the statistics and the count, so a group holding only
/// gaps has a count of zero and NaN statistics.
///
/// # Errors
///
/// Returns [`MetricsError::NonNumericValue`] if any record holds an unparsed value.
pub fn aggregate(records: &RecordSet) -> Result<AggregateTable> {
    let groups = group_values(records, AggregateKey::of)?;
    let rows: Vec<AggregateRow> = groups
        .into_iter()
        .map(|(key, values)| AggregateRow::new(key, Summary::of_observed(&values)))
        .collect();

    info!(records = records.len(), groups = rows.len(), "aggregated records");
    Ok(AggregateTable { rows })
}

/// Aggregates records by the five-field structure key.
///
/// # Errors
///
/// Returns [`MetricsError::NonNumericValue`] if any record holds an unparsed value.
pub fn aggregate_structure<'a, I>(records: I) -> Result<Vec<StructureRow>>
where
    I: IntoIterator<Item = &'a RawRecord>,
{
    let groups = group_values(records, StructureKey::of)?;
    Ok(groups
        .into_iter()
        .map(|(key, values)| StructureRow::new(key, Summary::of_observed(&values)))
        .collect())
}

fn group_values<'a, K, I, F>(records: I, key_of: F) -> Result<BTreeMap<K, Vec<f64>>>
where
    K: Ord + fmt::Display,
    I: IntoIterator<Item = &'a RawRecord>,
    F: Fn(&RawRecord) -> K,
{
    let mut groups: BTreeMap<K, Vec<f64>> = BTreeMap::new();
    for record in records {
        let key = key_of(record);
        match &record.value {
            Value::Numeric(value) => groups.entry(key).or_default().push(*value),
            Value::Missing => {
                groups.entry(key).or_default();
            }
            Value::Unparsed(text) => {
                return Err(MetricsError::NonNumericValue {
                    metric: record.metric.clone(),
                    value: text.clone(),
                    context: format!("aggregating {}", key),
                });
            }
        }
    }
    Ok(groups)
}

/// Writes NaN as an empty CSV field.
fn nan_as_empty<S: Serializer>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    if value.is_nan() {
        serializer.serialize_none()
    } else {
        serializer.serialize_f64(*value)
    }
}
