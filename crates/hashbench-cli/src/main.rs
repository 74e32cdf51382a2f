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

//! `hashbench` binary.
//!
//! ```bash
//! hashbench
//! RUST_LOG=debug hashbench --input runs.csv --output-dir out
//! ```

use clap::Parser;
use hashbench_cli::cli::Cli;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn display_dir(dir: &Path) -> String {
    let text = dir.display().to_string();
    text.trim_end_matches('/').to_string()
}

fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(hashbench_cli::DEFAULT_LOG_FILTER))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging to stderr; RUST_LOG replaces the default filter
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(std::io::stderr)
        .init();

    match cli.execute() {
        Ok(dir) => {
            println!("OK: results in {}/", display_dir(&dir));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
