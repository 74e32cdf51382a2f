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

//! CSV artifact emission.

use crate::error::{MetricsError, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes tabular artifacts into one output directory.
///
/// Tracks every file written so callers can report them.
#[derive(Debug)]
pub struct ArtifactWriter {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl ArtifactWriter {
    /// Creates the output directory (and parents) if needed.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| MetricsError::io_error(&dir, e))?;
        Ok(Self {
            dir,
            written: Vec::new(),
        })
    }

    /// The output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Consumes the writer, returning the files written.
    pub fn into_written(self) -> Vec<PathBuf> {
        self.written
    }

    /// Writes a table even when it has no rows (header only).
    pub fn write_required<T: Serialize>(
        &mut self,
        file_name: &str,
        columns: &[&str],
        rows: &[T],
    ) -> Result<PathBuf> {
        let path = self.dir.join(file_name);
        write_csv(&path, columns, rows)?;
        debug!(path = %path.display(), rows = rows.len(), "wrote artifact");
        self.written.push(path.clone());
        Ok(path)
    }

    /// Writes a table, or nothing at all when it has no rows.
    pub fn write_optional<T: Serialize>(
        &mut self,
        file_name: &str,
        columns: &[&str],
        rows: &[T],
    ) -> Result<Option<PathBuf>> {
        if rows.is_empty() {
            debug!(file = file_name, "no rows, artifact skipped");
            return Ok(None);
        }
        self.write_required(file_name, columns, rows).map(Some)
    }
}

fn write_csv<T: Serialize>(path: &Path, columns: &[&str], rows: &[T]) -> Result<()> {
    let file = File::create(path).map_err(|e| MetricsError::io_error(path, e))?;
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    wtr.write_record(columns)
        .map_err(|e| MetricsError::csv_error(path, e))?;
    for row in rows {
        wtr.serialize(row)
            .map_err(|e| MetricsError::csv_error(path, e))?;
    }
    wtr.flush().map_err(|e| MetricsError::io_error(path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[derive(Serialize)]
    struct Row {
        name: &'static str,
        score: f64,
    }

    #[test]
    fn test_creates_nested_directory() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("results").join("summary");
        let writer = ArtifactWriter::create(&out).unwrap();
        assert!(out.is_dir());
        assert_eq!(writer.dir(), out.as_path());
    }

    #[test]
    fn test_write_required_with_rows() {
        let dir = TempDir::new().unwrap();
        let mut writer = ArtifactWriter::create(dir.path()).unwrap();
        let rows = [Row { name: "fnv", score: 0.5 }, Row { name: "mix", score: 2.0 }];
        let path = writer.write_required("t.csv", &["name", "score"], &rows).unwrap();
        let content = fs::read_to_string(path).unwrap();
        assert_eq!(content, "name,score\nfnv,0.5\nmix,2.0\n");
        assert_eq!(writer.written().len(), 1);
    }

    #[test]
    fn test_write_required_empty_writes_header() {
        let dir = TempDir::new().unwrap();
        let mut writer = ArtifactWriter::create(dir.path()).unwrap();
        let rows: [Row; 0] = [];
        let path = writer.write_required("t.csv", &["name", "score"], &rows).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "name,score\n");
    }

    #[test]
    fn test_write_optional_skips_empty() {
        let dir = TempDir::new().unwrap();
        let mut writer = ArtifactWriter::create(dir.path()).unwrap();
        let rows: [Row; 0] = [];
        let written = writer.write_optional("t.csv", &["name", "score"], &rows).unwrap();
        assert!(written.is_none());
        assert!(!dir.path().join("t.csv").exists());
        assert!(writer.into_written().is_empty());
    }
}
