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

//! Command-line arguments and execution.

use crate::error::CliError;
use clap::Parser;
use hashbench_chart::render_charts;
use hashbench_core::{
    LoaderConfig, Pipeline, PipelineConfig, ValuePolicy, DEFAULT_OUTPUT_DIR,
};
use std::path::PathBuf;
use tracing::info;

/// Normalize, aggregate and chart hash table benchmark metrics.
///
/// Reads `results/runs/metrics_padrao.csv` and `results/runs/metrics_bonus.csv`
/// (whichever exist) and writes CSV tables and SVG charts to
/// `results/summary/`.
///
/// # Examples
///
/// ```bash
/// # Default locations
/// hashbench
///
/// # Explicit sources, tables only
/// hashbench --input runs/a.csv --input runs/b.csv --output-dir out --no-charts
///
/// # Debug logging
/// RUST_LOG=debug hashbench
/// ```
#[derive(Debug, Parser)]
#[command(name = "hashbench")]
#[command(author, version, about = "Normalize and aggregate hash table benchmark metrics", long_about = None)]
pub struct Cli {
    /// Input CSV file (repeatable). Replaces the default sources.
    #[arg(short, long = "input", value_name = "PATH")]
    pub inputs: Vec<PathBuf>,

    /// Directory receiving tables and charts.
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Fail when a source has no run_id column instead of assuming one run.
    #[arg(long)]
    pub require_run_id: bool,

    /// Reject non-numeric measurement values while loading.
    #[arg(long)]
    pub strict_values: bool,

    /// Write CSV tables only.
    #[arg(long)]
    pub no_charts: bool,
}

impl Cli {
    /// Pipeline configuration selected by the arguments.
    pub fn config(&self) -> PipelineConfig {
        let policy = if self.strict_values {
            ValuePolicy::Strict
        } else {
            ValuePolicy::Permissive
        };
        let loader = LoaderConfig::default()
            .with_single_repetition(!self.require_run_id)
            .with_value_policy(policy);

        let mut config = PipelineConfig::default()
            .with_output_dir(&self.output_dir)
            .with_loader(loader);
        if !self.inputs.is_empty() {
            config = config.with_inputs(self.inputs.clone());
        }
        config
    }

    /// Runs the pipeline and renders charts.
    ///
    /// Returns the output directory.
    ///
    /// # Errors
    ///
    /// Returns the first failure of any stage. Tables are never written when
    /// loading or aggregation fails.
    pub fn execute(&self) -> Result<PathBuf, CliError> {
        let output = Pipeline::new(self.config()).run()?;

        if self.no_charts {
            info!("chart rendering disabled");
        } else {
            render_charts(&output.chart_slices(), &output.output_dir)?;
        }

        Ok(output.output_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbench_core::{DEFAULT_BONUS_SOURCE, DEFAULT_STANDARD_SOURCE};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("hashbench").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).config();
        assert_eq!(
            config.inputs,
            vec![
                PathBuf::from(DEFAULT_STANDARD_SOURCE),
                PathBuf::from(DEFAULT_BONUS_SOURCE)
            ]
        );
        assert_eq!(config.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert!(config.loader.assume_single_repetition);
        assert_eq!(config.loader.value_policy, ValuePolicy::Permissive);
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_inputs_replace_defaults() {
        let config = parse(&["--input", "a.csv", "-i", "b.csv", "-o", "out"]).config();
        assert_eq!(config.inputs, vec![PathBuf::from("a.csv"), PathBuf::from("b.csv")]);
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_flags() {
        let cli = parse(&["--require-run-id", "--strict-values", "--no-charts"]);
        assert!(cli.no_charts);
        let config = cli.config();
        assert!(!config.loader.assume_single_repetition);
        assert_eq!(config.loader.value_policy, ValuePolicy::Strict);
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Cli::try_parse_from(["hashbench", "--bogus"]).is_err());
    }
}
