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

//! Named selections over aggregated and normalized data.
//!
//! Three kinds of selection live here:
//!
//! - [`SliceName`]: filtered views over the full aggregate table
//! - [`StructureSlice`]: raw-record selections aggregated by the structure key
//! - [`ChartSlice`]: the views handed to the chart emitter, with labels

use crate::aggregate::{aggregate_structure, AggregateRow, AggregateTable, StructureRow};
use crate::error::Result;
use crate::normalize::{MEMORY_MB, TIME_MS};
use crate::record::{RawRecord, RecordSet};

/// Exact-match predicate over the descriptive fields.
///
/// `None` and an empty metric list match anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Filter {
    /// Required table family.
    pub table_type: Option<&'static str>,
    /// Required phase.
    pub phase: Option<&'static str>,
    /// Accepted metrics.
    pub metrics: &'static [&'static str],
}

impl Filter {
    /// Matches every row.
    pub const ANY: Filter = Filter {
        table_type: None,
        phase: None,
        metrics: &[],
    };

    /// Matches any of `metrics`.
    pub const fn metrics(metrics: &'static [&'static str]) -> Self {
        Self {
            table_type: None,
            phase: None,
            metrics,
        }
    }

    /// Adds a phase requirement.
    pub const fn in_phase(mut self, phase: &'static str) -> Self {
        self.phase = Some(phase);
        self
    }

    /// Adds a table family requirement.
    pub const fn for_table(mut self, table_type: &'static str) -> Self {
        self.table_type = Some(table_type);
        self
    }

    /// Tests the descriptive fields of one row.
    pub fn matches(&self, table_type: &str, phase: &str, metric: &str) -> bool {
        self.table_type.map_or(true, |t| t == table_type)
            && self.phase.map_or(true, |p| p == phase)
            && (self.metrics.is_empty() || self.metrics.contains(&metric))
    }

    /// Tests an aggregate row.
    pub fn matches_row(&self, row: &AggregateRow) -> bool {
        self.matches(&row.table_type, &row.phase, &row.metric)
    }

    /// Tests a raw record.
    pub fn matches_record(&self, record: &RawRecord) -> bool {
        self.matches(&record.table_type, &record.phase, &record.metric)
    }
}

/// Named views over the full aggregate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliceName {
    /// Every `time_ms` row. Phase is filtered later, when charting.
    InsertTimeMs,
    /// `time_ms` rows of the search phase.
    SearchTimeMs,
    /// Every `collisions` row.
    InsertCollisions,
    /// Every `memory_mb` row.
    InsertMemoryMb,
}

impl SliceName {
    /// All table slices, in emission order.
    pub const ALL: [SliceName; 4] = [
        SliceName::InsertTimeMs,
        SliceName::SearchTimeMs,
        SliceName::InsertCollisions,
        SliceName::InsertMemoryMb,
    ];

    /// Artifact stem of the slice.
    pub fn as_str(&self) -> &'static str {
        match self {
            SliceName::InsertTimeMs => "insert_time_ms",
            SliceName::SearchTimeMs => "search_time_ms",
            SliceName::InsertCollisions => "insert_collisions",
            SliceName::InsertMemoryMb => "insert_memory_mb",
        }
    }

    /// The predicate selecting this slice.
    pub fn filter(&self) -> Filter {
        match self {
            SliceName::InsertTimeMs => Filter::metrics(&[TIME_MS]),
            SliceName::SearchTimeMs => Filter::metrics(&[TIME_MS]).in_phase("search"),
            SliceName::InsertCollisions => Filter::metrics(&["collisions"]),
            SliceName::InsertMemoryMb => Filter::metrics(&[MEMORY_MB]),
        }
    }

    /// Artifact file name.
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.as_str())
    }
}

/// An immutable filtered view over aggregate rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice<'a> {
    rows: Vec<&'a AggregateRow>,
}

impl<'a> Slice<'a> {
    /// Selects the rows of `table` accepted by `filter`.
    pub fn select(table: &'a AggregateTable, filter: &Filter) -> Self {
        Self {
            rows: table.iter().filter(|row| filter.matches_row(row)).collect(),
        }
    }

    /// Narrows this slice further.
    pub fn refine(&self, filter: &Filter) -> Self {
        Self {
            rows: self
                .rows
                .iter()
                .copied()
                .filter(|row| filter.matches_row(row))
                .collect(),
        }
    }

    /// Selected rows, in table order.
    pub fn rows(&self) -> &[&'a AggregateRow] {
        &self.rows
    }

    /// Number of selected rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` when nothing was selected.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Selects a named slice of `table`.
///
/// # Examples
///
/// ```
/// use hashbench_core::{aggregate, select, RawRecord, RecordSet, SliceName, Value};
///
/// let records = RecordSet::from(vec![RawRecord {
///     run_id: 0,
///     table_type: "linear".into(),
///     table_m: 32,
///     hash_name: "mul".into(),
///     data_n: 100,
///     phase: "insert".into(),
///     metric: "collisions".into(),
///     value: Value::Numeric(12.0),
/// }]);
/// let table = aggregate(&records)?;
/// assert_eq!(select(&table, SliceName::InsertCollisions).len(), 1);
/// assert!(select(&table, SliceName::InsertMemoryMb).is_empty());
/// # Ok::<(), hashbench_core::MetricsError>(())
/// ```
pub fn select(table: &AggregateTable, name: SliceName) -> Slice<'_> {
    Slice::select(table, &name.filter())
}

/// Selections aggregated from raw records by the structure key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructureSlice {
    /// Longest three chains of chaining tables.
    ChainingTop3,
    /// Gap statistics of every table family.
    GapsStats,
}

impl StructureSlice {
    /// All structure slices, in emission order.
    pub const ALL: [StructureSlice; 2] = [StructureSlice::ChainingTop3, StructureSlice::GapsStats];

    /// Name of the slice.
    pub fn as_str(&self) -> &'static str {
        match self {
            StructureSlice::ChainingTop3 => "chaining_top3",
            StructureSlice::GapsStats => "gaps_stats",
        }
    }

    /// The predicate applied to raw records.
    pub fn filter(&self) -> Filter {
        match self {
            StructureSlice::ChainingTop3 => {
                Filter::metrics(&["chain_top1", "chain_top2", "chain_top3"])
                    .in_phase("structure")
                    .for_table("chaining")
            }
            StructureSlice::GapsStats => Filter::metrics(&["min", "avg", "max"]).in_phase("gaps"),
        }
    }

    /// Artifact file name.
    pub fn file_name(&self) -> &'static str {
        match self {
            StructureSlice::ChainingTop3 => "chaining_top3_stats.csv",
            StructureSlice::GapsStats => "gaps_stats.csv",
        }
    }

    /// Filters `records` and aggregates them by the structure key.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::NonNumericValue`](crate::MetricsError::NonNumericValue)
    /// if a selected record holds an unparsed value.
    pub fn build(&self, records: &RecordSet) -> Result<Vec<StructureRow>> {
        let filter = self.filter();
        aggregate_structure(records.iter().filter(|r| filter.matches_record(r)))
    }
}

/// Longest-chain statistics of chaining tables.
pub fn chaining_top3(records: &RecordSet) -> Result<Vec<StructureRow>> {
    StructureSlice::ChainingTop3.build(records)
}

/// Gap statistics of every table family.
pub fn gaps_stats(records: &RecordSet) -> Result<Vec<StructureRow>> {
    StructureSlice::GapsStats.build(records)
}

/// A slice prepared for charting.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSlice<'a> {
    /// File name prefix, e.g. `plot_insert`.
    pub stem: &'static str,
    /// Chart title.
    pub title: &'static str,
    /// X axis label.
    pub x_label: &'static str,
    /// Y axis label.
    pub y_label: &'static str,
    /// Rows to plot.
    pub slice: Slice<'a>,
}

struct ChartSelection {
    source: SliceName,
    refine: Filter,
    stem: &'static str,
    title: &'static str,
    y_label: &'static str,
}

const CHART_SELECTIONS: [ChartSelection; 4] = [
    ChartSelection {
        source: SliceName::InsertTimeMs,
        refine: Filter::ANY.in_phase("insert"),
        stem: "plot_insert",
        title: "Insert time (ms)",
        y_label: "time (ms)",
    },
    ChartSelection {
        source: SliceName::SearchTimeMs,
        refine: Filter::ANY,
        stem: "plot_search",
        title: "Search time (ms)",
        y_label: "time (ms)",
    },
    ChartSelection {
        source: SliceName::InsertCollisions,
        refine: Filter::ANY,
        stem: "plot_collisions",
        title: "Insert collisions",
        y_label: "collisions",
    },
    ChartSelection {
        source: SliceName::InsertMemoryMb,
        refine: Filter::ANY,
        stem: "plot_memory",
        title: "Insert memory (MB)",
        y_label: "memory (MB)",
    },
];

/// The non-empty chart selections of `table`.
///
/// Insert time is restricted to the insert phase; memory appears only when
/// memory rows exist.
pub fn chart_slices(table: &AggregateTable) -> Vec<ChartSlice<'_>> {
    CHART_SELECTIONS
        .iter()
        .filter_map(|sel| {
            let slice = select(table, sel.source).refine(&sel.refine);
            (!slice.is_empty()).then(|| ChartSlice {
                stem: sel.stem,
                title: sel.title,
                x_label: "hash",
                y_label: sel.y_label,
                slice,
            })
        })
        .collect()
}
