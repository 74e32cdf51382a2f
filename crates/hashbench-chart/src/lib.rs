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

//! Comparison charts for aggregated hash table benchmark metrics.
//!
//! Each chart selection of the aggregate table yields one SVG per
//! `(table_type, data_n)` pair. A chart has one line per table size
//! (`m=...`), hash names along the x axis and mean values with standard
//! deviation error bars on the y axis.
//!
//! Planning ([`plan_charts`]) is pure and separate from drawing
//! ([`render_chart`]), so chart layout can be inspected without a drawing
//! backend.
//!
//! # Examples
//!
//! ```no_run
//! use hashbench_chart::render_charts;
//! use hashbench_core::{Pipeline, PipelineConfig};
//! use std::path::Path;
//!
//! let output = Pipeline::new(PipelineConfig::default()).run()?;
//! let charts = render_charts(&output.chart_slices(), Path::new("results/summary"))?;
//! println!("{} charts", charts.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod plan;
mod render;

pub use error::{ChartError, Result};
pub use plan::{plan_all, plan_charts, ChartPlan, Point, Series};
pub use render::render_chart;

use hashbench_core::ChartSlice;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Renders every chart of `charts` into `out_dir`.
///
/// Returns the files written, in selection order. Selections produce no
/// file when they hold no rows.
///
/// # Errors
///
/// Fails when the directory cannot be created or a chart cannot be drawn.
pub fn render_charts(charts: &[ChartSlice<'_>], out_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir).map_err(|e| ChartError::io_error(out_dir, e))?;

    let plans = plan_all(charts);
    let mut written = Vec::with_capacity(plans.len());
    for plan in &plans {
        let path = out_dir.join(&plan.file_name);
        render_chart(plan, &path)?;
        debug!(path = %path.display(), series = plan.series.len(), "rendered chart");
        written.push(path);
    }

    info!(charts = written.len(), dir = %out_dir.display(), "charts rendered");
    Ok(written)
}
