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

//! Error type for the command-line front end.

use hashbench_chart::ChartError;
use hashbench_core::MetricsError;
use thiserror::Error;

/// Any failure that ends a `hashbench` invocation.
///
/// Messages are passed through unchanged from the stage that failed.
#[derive(Debug, Error)]
pub enum CliError {
    /// Loading, aggregating or writing tables failed.
    #[error(transparent)]
    Metrics(#[from] MetricsError),

    /// Drawing charts failed.
    #[error(transparent)]
    Chart(#[from] ChartError),
}

impl CliError {
    /// Returns `true` when no input source was found.
    pub fn is_no_input(&self) -> bool {
        matches!(self, CliError::Metrics(e) if e.is_no_input())
    }
}
