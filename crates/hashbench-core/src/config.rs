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

//! Pipeline configuration.
//!
//! Defaults reproduce the fixed behaviour of the pipeline: the two standard
//! result sources, the `results/summary` output directory, permissive value
//! parsing and the single-repetition assumption.

use std::path::PathBuf;

/// Default source of the standard experiment run.
pub const DEFAULT_STANDARD_SOURCE: &str = "results/runs/metrics_padrao.csv";

/// Default source of the bonus experiment run.
pub const DEFAULT_BONUS_SOURCE: &str = "results/runs/metrics_bonus.csv";

/// Default directory for every emitted artifact.
pub const DEFAULT_OUTPUT_DIR: &str = "results/summary";

/// Default maximum number of rows accepted from a single source.
pub const DEFAULT_MAX_ROWS: usize = 1_000_000;

/// How the loader treats `value` fields that do not parse as numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValuePolicy {
    /// Keep the original text; arithmetic on it fails later with a typed error.
    #[default]
    Permissive,
    /// Reject the source at load time.
    Strict,
}

/// Settings for reading raw metric sources.
///
/// # Examples
///
/// ```
/// use hashbench_core::{LoaderConfig, ValuePolicy};
///
/// let config = LoaderConfig::default()
///     .with_value_policy(ValuePolicy::Strict)
///     .with_single_repetition(false);
/// assert_eq!(config.delimiter, b',');
/// assert!(!config.assume_single_repetition);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Field delimiter (default: `,`).
    pub delimiter: u8,
    /// Trim whitespace around fields (default: `true`).
    pub trim: bool,
    /// Treat a source without a `run_id` column as one repetition with id 0.
    ///
    /// When `false`, a missing `run_id` column is a schema error.
    pub assume_single_repetition: bool,
    /// Handling of non-numeric `value` fields.
    pub value_policy: ValuePolicy,
    /// Maximum rows per source (default: 1,000,000).
    pub max_rows: usize,
}

impl LoaderConfig {
    /// Sets the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the single-repetition assumption.
    pub fn with_single_repetition(mut self, assume: bool) -> Self {
        self.assume_single_repetition = assume;
        self
    }

    /// Sets the value policy.
    pub fn with_value_policy(mut self, policy: ValuePolicy) -> Self {
        self.value_policy = policy;
        self
    }

    /// Sets the per-source row limit.
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
            assume_single_repetition: true,
            value_policy: ValuePolicy::Permissive,
            max_rows: DEFAULT_MAX_ROWS,
        }
    }
}

/// Configuration of one pipeline invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Sources to load, in order. Missing ones are skipped.
    pub inputs: Vec<PathBuf>,
    /// Directory receiving every artifact.
    pub output_dir: PathBuf,
    /// Loader settings.
    pub loader: LoaderConfig,
}

impl PipelineConfig {
    /// Creates a configuration for the given sources and output directory.
    pub fn new(inputs: Vec<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            inputs,
            output_dir: output_dir.into(),
            loader: LoaderConfig::default(),
        }
    }

    /// Replaces the source list.
    pub fn with_inputs(mut self, inputs: Vec<PathBuf>) -> Self {
        self.inputs = inputs;
        self
    }

    /// Sets the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Sets the loader settings.
    pub fn with_loader(mut self, loader: LoaderConfig) -> Self {
        self.loader = loader;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(
            vec![
                PathBuf::from(DEFAULT_STANDARD_SOURCE),
                PathBuf::from(DEFAULT_BONUS_SOURCE),
            ],
            DEFAULT_OUTPUT_DIR,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_loader_config() {
        let config = LoaderConfig::default();
        assert_eq!(config.delimiter, b',');
        assert!(config.trim);
        assert!(config.assume_single_repetition);
        assert_eq!(config.value_policy, ValuePolicy::Permissive);
        assert_eq!(config.max_rows, DEFAULT_MAX_ROWS);
    }

    #[test]
    fn test_default_pipeline_config() {
        let config = PipelineConfig::default();
        assert_eq!(
            config.inputs,
            vec![
                PathBuf::from(DEFAULT_STANDARD_SOURCE),
                PathBuf::from(DEFAULT_BONUS_SOURCE)
            ]
        );
        assert_eq!(config.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
    }

    #[test]
    fn test_default_source_locations() {
        assert_eq!(DEFAULT_STANDARD_SOURCE, "results/runs/metrics_padrao.csv");
        assert_eq!(DEFAULT_BONUS_SOURCE, "results/runs/metrics_bonus.csv");
        assert_eq!(DEFAULT_OUTPUT_DIR, "results/summary");
    }

    #[test]
    fn test_builders() {
        let config = PipelineConfig::default()
            .with_inputs(vec![PathBuf::from("a.csv")])
            .with_output_dir("out")
            .with_loader(LoaderConfig::default().with_delimiter(b';').with_max_rows(10));
        assert_eq!(config.inputs.len(), 1);
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.loader.delimiter, b';');
        assert_eq!(config.loader.max_rows, 10);
    }
}
