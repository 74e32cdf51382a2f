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

//! End-to-end pipeline: load, normalize, aggregate, select, emit.
//!
//! Everything is computed before the first file is written, so a failing
//! stage never leaves partial output behind.

use crate::aggregate::{
    aggregate, AggregateTable, StructureRow, AGGREGATE_COLUMNS, STRUCTURE_COLUMNS,
};
use crate::config::PipelineConfig;
use crate::emit::ArtifactWriter;
use crate::error::Result;
use crate::loader::load_sources;
use crate::normalize::normalize;
use crate::record::{RecordSet, RECORD_COLUMNS};
use crate::slice::{chart_slices, select, ChartSlice, SliceName, StructureSlice};
use std::path::{Path, PathBuf};
use tracing::info;

/// Artifact holding every normalized record.
pub const UNIFIED_FILE: &str = "metrics_unified.csv";

/// Artifact holding the full aggregate table.
pub const STATS_FILE: &str = "stats_by_combination.csv";

/// Computed results of one pipeline invocation.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Normalized records.
    pub records: RecordSet,
    /// Aggregate table over `records`.
    pub table: AggregateTable,
    /// Longest-chain statistics.
    pub chaining_top3: Vec<StructureRow>,
    /// Gap statistics.
    pub gaps_stats: Vec<StructureRow>,
    /// Directory the artifacts go to.
    pub output_dir: PathBuf,
    /// Files written, in emission order. Empty until written.
    pub artifacts: Vec<PathBuf>,
}

impl PipelineOutput {
    /// The chart selections of the aggregate table.
    pub fn chart_slices(&self) -> Vec<ChartSlice<'_>> {
        chart_slices(&self.table)
    }

    fn structure_rows(&self, slice: StructureSlice) -> &[StructureRow] {
        match slice {
            StructureSlice::ChainingTop3 => &self.chaining_top3,
            StructureSlice::GapsStats => &self.gaps_stats,
        }
    }
}

/// Runs the metrics pipeline for one configuration.
///
/// # Examples
///
/// ```no_run
/// use hashbench_core::{Pipeline, PipelineConfig};
///
/// let output = Pipeline::new(PipelineConfig::default()).run()?;
/// println!("{} aggregate rows", output.table.len());
/// # Ok::<(), hashbench_core::MetricsError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Creates a pipeline.
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Computes every table without touching the output directory.
    ///
    /// # Errors
    ///
    /// Fails with [`MetricsError::NoInput`](crate::MetricsError::NoInput) when no
    /// source exists, and with loader or arithmetic errors otherwise.
    pub fn compute(&self) -> Result<PipelineOutput> {
        let raw = load_sources(&self.config.inputs, &self.config.loader)?;
        let records = normalize(&raw)?;
        let table = aggregate(&records)?;
        let chaining_top3 = StructureSlice::ChainingTop3.build(&records)?;
        let gaps_stats = StructureSlice::GapsStats.build(&records)?;

        Ok(PipelineOutput {
            records,
            table,
            chaining_top3,
            gaps_stats,
            output_dir: self.config.output_dir.clone(),
            artifacts: Vec::new(),
        })
    }

    /// Computes every table, then writes the CSV artifacts.
    pub fn run(&self) -> Result<PipelineOutput> {
        let mut output = self.compute()?;
        output.artifacts = write_artifacts(&output, &self.config.output_dir)?;
        info!(
            dir = %self.config.output_dir.display(),
            artifacts = output.artifacts.len(),
            "pipeline complete"
        );
        Ok(output)
    }
}

/// Writes the CSV artifacts of `output` into `dir`.
///
/// The unified record set and the full aggregate table are always written;
/// slices and structure aggregates only when non-empty.
pub fn write_artifacts(output: &PipelineOutput, dir: &Path) -> Result<Vec<PathBuf>> {
    let mut writer = ArtifactWriter::create(dir)?;

    writer.write_required(UNIFIED_FILE, &RECORD_COLUMNS, output.records.as_slice())?;
    writer.write_required(STATS_FILE, &AGGREGATE_COLUMNS, output.table.rows())?;

    for name in SliceName::ALL {
        let slice = select(&output.table, name);
        writer.write_optional(&name.file_name(), &AGGREGATE_COLUMNS, slice.rows())?;
    }

    for slice in StructureSlice::ALL {
        writer.write_optional(slice.file_name(), &STRUCTURE_COLUMNS, output.structure_rows(slice))?;
    }

    Ok(writer.into_written())
}
