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

//! Chart planning.
//!
//! Turns a [`ChartSlice`] into one [`ChartPlan`] per `(table_type, data_n)`
//! pair. Planning is pure: no drawing, no file access.

use hashbench_core::{AggregateRow, ChartSlice};
use std::collections::{BTreeMap, BTreeSet};

/// One plotted point: category index, mean and error bar half-height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Index into [`ChartPlan::categories`].
    pub x: usize,
    /// Mean of the aggregate row.
    pub mean: f64,
    /// Standard deviation; NaN when undefined.
    pub std: f64,
}

impl Point {
    /// Returns `true` when an error bar should be drawn.
    pub fn has_error_bar(&self) -> bool {
        !self.std.is_nan()
    }
}

/// All points of one table size.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Table size the series belongs to.
    pub table_m: u64,
    /// Legend entry, `m={table_m}`.
    pub label: String,
    /// Points ordered by hash name.
    pub points: Vec<Point>,
}

/// Everything needed to draw one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPlan {
    /// Output file name, `{stem}_{table_type}_n{data_n}.svg`.
    pub file_name: String,
    /// Chart caption.
    pub title: String,
    /// X axis description.
    pub x_label: String,
    /// Y axis description.
    pub y_label: String,
    /// Table family of every row in the chart.
    pub table_type: String,
    /// Data size of every row in the chart.
    pub data_n: u64,
    /// Hash names along the x axis, sorted.
    pub categories: Vec<String>,
    /// One series per table size, ascending.
    pub series: Vec<Series>,
}

impl ChartPlan {
    /// Y range covering every mean and error bar.
    ///
    /// The range always includes zero and adds a little headroom on top.
    pub fn y_range(&self) -> (f64, f64) {
        let mut low = 0.0f64;
        let mut high = 0.0f64;
        for point in self.series.iter().flat_map(|s| &s.points) {
            let spread = if point.has_error_bar() { point.std } else { 0.0 };
            let (bottom, top) = (point.mean - spread, point.mean + spread);
            if bottom.is_finite() {
                low = low.min(bottom);
            }
            if top.is_finite() {
                high = high.max(top);
            }
        }
        if high <= low {
            return (low, low + 1.0);
        }
        (low, high + (high - low) * 0.1)
    }
}

/// Plans every chart of one selection.
///
/// Charts come out sorted by table type, then data size.
pub fn plan_charts(chart: &ChartSlice<'_>) -> Vec<ChartPlan> {
    let mut groups: BTreeMap<(&str, u64), Vec<&AggregateRow>> = BTreeMap::new();
    for &row in chart.slice.rows() {
        groups
            .entry((row.table_type.as_str(), row.data_n))
            .or_default()
            .push(row);
    }

    groups
        .into_iter()
        .map(|((table_type, data_n), rows)| plan_group(chart, table_type, data_n, &rows))
        .collect()
}

/// Plans the charts of several selections, in order.
pub fn plan_all(charts: &[ChartSlice<'_>]) -> Vec<ChartPlan> {
    charts.iter().flat_map(plan_charts).collect()
}

fn plan_group(
    chart: &ChartSlice<'_>,
    table_type: &str,
    data_n: u64,
    rows: &[&AggregateRow],
) -> ChartPlan {
    let categories: Vec<String> = rows
        .iter()
        .map(|r| r.hash_name.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect();

    let mut by_size: BTreeMap<u64, Vec<&AggregateRow>> = BTreeMap::new();
    for &row in rows {
        by_size.entry(row.table_m).or_default().push(row);
    }

    let series = by_size
        .into_iter()
        .map(|(table_m, mut members)| {
            members.sort_by(|a, b| a.hash_name.cmp(&b.hash_name));
            let points = members
                .iter()
                .filter(|row| row.count > 0)
                .filter_map(|row| {
                    let x = categories.binary_search(&row.hash_name).ok()?;
                    Some(Point {
                        x,
                        mean: row.mean,
                        std: row.std,
                    })
                })
                .collect();
            Series {
                table_m,
                label: format!("m={table_m}"),
                points,
            }
        })
        .collect();

    ChartPlan {
        file_name: format!("{}_{}_n{}.svg", chart.stem, table_type, data_n),
        title: format!("{} - {}, n={}", chart.title, table_type, data_n),
        x_label: chart.x_label.to_string(),
        y_label: chart.y_label.to_string(),
        table_type: table_type.to_string(),
        data_n,
        categories,
        series,
    }
}
