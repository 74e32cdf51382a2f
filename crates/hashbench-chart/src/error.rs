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

//! Error types for chart rendering.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for chart operations.
pub type Result<T> = std::result::Result<T, ChartError>;

/// Chart rendering errors.
///
/// # Examples
///
/// ```
/// use hashbench_chart::ChartError;
///
/// let err = ChartError::Render {
///     path: "plot_insert_chaining_n1000.svg".into(),
///     message: "font unavailable".to_string(),
/// };
/// assert_eq!(
///     err.to_string(),
///     "Failed to render chart 'plot_insert_chaining_n1000.svg': font unavailable"
/// );
/// ```
#[derive(Debug, Error)]
pub enum ChartError {
    /// The output directory could not be prepared.
    #[error("I/O error for '{}': {message}", .path.display())]
    Io {
        /// Directory or file involved.
        path: PathBuf,
        /// The underlying error message.
        message: String,
    },

    /// The drawing backend failed.
    #[error("Failed to render chart '{}': {message}", .path.display())]
    Render {
        /// Chart file being drawn.
        path: PathBuf,
        /// Error reported by the backend.
        message: String,
    },
}

impl ChartError {
    /// Creates an I/O error with path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ChartError::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Path of the file or directory the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            ChartError::Io { path, .. } | ChartError::Render { path, .. } => path,
        }
    }
}
