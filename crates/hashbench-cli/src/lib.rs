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

//! Command-line front end for the hash table benchmark metrics pipeline.
//!
//! The `hashbench` binary loads benchmark measurement CSVs, normalizes units,
//! aggregates repeated runs and writes summary tables and comparison charts.
//! With no arguments it reads `results/runs/metrics_padrao.csv` and
//! `results/runs/metrics_bonus.csv` and writes to `results/summary/`.
//!
//! Logging goes to stderr. Without `RUST_LOG` the workspace crates log at
//! `info`; setting `RUST_LOG` replaces that filter entirely.
//!
//! # Examples
//!
//! ```no_run
//! use clap::Parser;
//! use hashbench_cli::cli::Cli;
//!
//! let cli = Cli::parse_from(["hashbench", "--no-charts"]);
//! let dir = cli.execute()?;
//! println!("OK: results in {}/", dir.display());
//! # Ok::<(), hashbench_cli::error::CliError>(())
//! ```

pub mod cli;
pub mod error;

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "hashbench_core=info,hashbench_chart=info,hashbench_cli=info";
