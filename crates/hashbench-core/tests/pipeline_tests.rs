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

//! End-to-end tests for the metrics pipeline.
//!
//! Covers:
//! - Two sources merged into one aggregate
//! - Optional memory normalization
//! - Abort without output when no source exists
//! - Byte-identical output across runs
//! - Aggregation invariants (property-based)

use hashbench_core::{
    aggregate, normalize, Pipeline, PipelineConfig, RawRecord, RecordSet, Value,
    AGGREGATE_COLUMNS, RECORD_COLUMNS, STATS_FILE, STRUCTURE_COLUMNS, UNIFIED_FILE,
};
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const HEADER: &str = "run_id,table_type,table_m,hash_name,data_n,phase,metric,value";

// ===== Test Helpers =====

fn write_source(dir: &Path, name: &str, rows: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut content = String::from(HEADER);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');
    fs::write(&path, content).expect("Failed to write source");
    path
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("Failed to read artifact")
        .lines()
        .map(str::to_string)
        .collect()
}

fn run(inputs: Vec<PathBuf>, out_dir: &Path) -> hashbench_core::PipelineOutput {
    Pipeline::new(PipelineConfig::new(inputs, out_dir))
        .run()
        .expect("Pipeline failed")
}

// ===== Scenarios =====

#[test]
fn test_two_sources_are_aggregated_together() {
    let dir = TempDir::new().unwrap();
    let standard = write_source(
        dir.path(),
        "metrics_padrao.csv",
        &["0,chaining,16,fnv,1000,insert,time_ns,500000"],
    );
    let bonus = write_source(
        dir.path(),
        "metrics_bonus.csv",
        &["1,chaining,16,fnv,1000,insert,time_ns,700000"],
    );
    let out_dir = dir.path().join("summary");

    let output = run(vec![standard, bonus], &out_dir);

    let unified = read_lines(&out_dir.join(UNIFIED_FILE));
    assert_eq!(
        unified,
        vec![
            HEADER,
            "0,chaining,16,fnv,1000,insert,time_ms,0.5",
            "1,chaining,16,fnv,1000,insert,time_ms,0.7",
        ]
    );

    assert_eq!(output.table.len(), 1);
    let row = &output.table.rows()[0];
    assert!((row.mean - 0.6).abs() < 1e-12);
    assert_eq!(row.min, 0.5);
    assert_eq!(row.max, 0.7);
    assert_eq!(row.count, 2);
    assert!((row.std - 0.1414).abs() < 1e-4);

    let slice = read_lines(&out_dir.join("insert_time_ms.csv"));
    assert_eq!(slice.len(), 2);
    assert!(slice[1].starts_with("chaining,16,fnv,1000,insert,time_ms,"));
    assert!(slice[1].ends_with(",0.5,0.7,2"));
}

#[test]
fn test_sources_without_run_id_default_to_zero() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("runs.csv");
    fs::write(
        &path,
        "table_type,table_m,hash_name,data_n,phase,metric,value\n\
         linear,64,mix,100,insert,collisions,7\n",
    )
    .unwrap();
    let out_dir = dir.path().join("summary");

    run(vec![path], &out_dir);

    let unified = read_lines(&out_dir.join(UNIFIED_FILE));
    assert_eq!(unified[1], "0,linear,64,mix,100,insert,collisions,7.0");
}

#[test]
fn test_no_memory_rows_skip_memory_artifacts() {
    let dir = TempDir::new().unwrap();
    let src = write_source(
        dir.path(),
        "runs.csv",
        &[
            "0,linear,64,mix,100,insert,time_ns,2000000",
            "0,linear,64,mix,100,insert,collisions,5",
        ],
    );
    let out_dir = dir.path().join("summary");

    let output = run(vec![src], &out_dir);

    assert!(!output.records.has_metric("memory_mb"));
    assert!(!out_dir.join("insert_memory_mb.csv").exists());
    assert!(output.chart_slices().iter().all(|c| c.stem != "plot_memory"));
    assert!(out_dir.join("insert_collisions.csv").exists());
}

#[test]
fn test_memory_rows_are_converted() {
    let dir = TempDir::new().unwrap();
    let src = write_source(
        dir.path(),
        "runs.csv",
        &["0,linear,64,mix,100,insert,memory_bytes,2097152"],
    );
    let out_dir = dir.path().join("summary");

    run(vec![src], &out_dir);

    let memory = read_lines(&out_dir.join("insert_memory_mb.csv"));
    assert_eq!(memory[0], AGGREGATE_COLUMNS.join(","));
    assert_eq!(memory[1], "linear,64,mix,100,insert,memory_mb,2.0,,2.0,2.0,1");
}

#[test]
fn test_structure_aggregates() {
    let dir = TempDir::new().unwrap();
    let src = write_source(
        dir.path(),
        "runs.csv",
        &[
            "0,chaining,16,fnv,1000,structure,chain_top1,4",
            "1,chaining,16,fnv,1000,structure,chain_top1,6",
            "0,linear,16,fnv,1000,gaps,avg,1.5",
            "0,linear,16,fnv,1000,gaps,median,1.0",
        ],
    );
    let out_dir = dir.path().join("summary");

    run(vec![src], &out_dir);

    let top3 = read_lines(&out_dir.join("chaining_top3_stats.csv"));
    assert_eq!(top3[0], STRUCTURE_COLUMNS.join(","));
    assert_eq!(top3.len(), 2);
    assert!(top3[1].starts_with("chaining,16,fnv,1000,chain_top1,5.0,"));

    let gaps = read_lines(&out_dir.join("gaps_stats.csv"));
    assert_eq!(
        gaps,
        vec![
            STRUCTURE_COLUMNS.join(","),
            "linear,16,fnv,1000,avg,1.5,,1.5,1.5,1".to_string()
        ]
    );
}

#[test]
fn test_zero_inputs_abort_without_output() {
    let dir = TempDir::new().unwrap();
    let out_dir = dir.path().join("summary");
    let config = PipelineConfig::new(
        vec![dir.path().join("missing_a.csv"), dir.path().join("missing_b.csv")],
        &out_dir,
    );

    let err = Pipeline::new(config).run().unwrap_err();

    assert!(err.is_no_input());
    assert!(err.to_string().contains("missing_a.csv"));
    assert!(!out_dir.exists());
}

#[test]
fn test_one_missing_source_is_tolerated() {
    let dir = TempDir::new().unwrap();
    let src = write_source(dir.path(), "runs.csv", &["0,chaining,8,mod,10,insert,collisions,1"]);
    let out_dir = dir.path().join("summary");

    let output = run(vec![dir.path().join("absent.csv"), src], &out_dir);
    assert_eq!(output.records.len(), 1);
}

#[test]
fn test_artifact_headers() {
    let dir = TempDir::new().unwrap();
    let src = write_source(dir.path(), "runs.csv", &["0,chaining,8,mod,10,insert,time_ns,1"]);
    let out_dir = dir.path().join("summary");

    run(vec![src], &out_dir);

    assert_eq!(read_lines(&out_dir.join(UNIFIED_FILE))[0], RECORD_COLUMNS.join(","));
    assert_eq!(read_lines(&out_dir.join(STATS_FILE))[0], AGGREGATE_COLUMNS.join(","));
}

#[test]
fn test_blank_measurement_is_skipped() {
    let dir = TempDir::new().unwrap();
    let src = write_source(
        dir.path(),
        "runs.csv",
        &[
            "0,chaining,16,fnv,1000,insert,time_ns,500000",
            "1,chaining,16,fnv,1000,insert,time_ns,",
            "2,chaining,16,fnv,1000,insert,time_ns,700000",
        ],
    );
    let out_dir = dir.path().join("summary");

    let output = run(vec![src], &out_dir);

    let unified = read_lines(&out_dir.join(UNIFIED_FILE));
    assert_eq!(unified[2], "1,chaining,16,fnv,1000,insert,time_ms,");

    assert_eq!(output.table.len(), 1);
    let row = &output.table.rows()[0];
    assert!((row.mean - 0.6).abs() < 1e-12);
    assert_eq!((row.min, row.max, row.count), (0.5, 0.7, 2));

    let slice = read_lines(&out_dir.join("insert_time_ms.csv"));
    assert!(slice[1].ends_with(",0.5,0.7,2"));
}

#[test]
fn test_header_only_source_writes_empty_tables() {
    let dir = TempDir::new().unwrap();
    let src = write_source(dir.path(), "runs.csv", &[]);
    let out_dir = dir.path().join("summary");

    let output = run(vec![src], &out_dir);

    assert!(output.table.is_empty());
    assert_eq!(read_lines(&out_dir.join(UNIFIED_FILE)).len(), 1);
    assert_eq!(read_lines(&out_dir.join(STATS_FILE)).len(), 1);
    assert_eq!(output.artifacts.len(), 2);
}

#[test]
fn test_runs_are_byte_identical() {
    let dir = TempDir::new().unwrap();
    let src = write_source(
        dir.path(),
        "runs.csv",
        &[
            "1,open,32,xx,500,search,time_ns,1234567",
            "0,chaining,16,fnv,1000,insert,time_ns,500000",
            "0,chaining,8,fnv,1000,insert,collisions,3",
            "1,chaining,16,fnv,1000,insert,time_ns,700000",
            "0,chaining,16,fnv,1000,gaps,max,9",
        ],
    );
    let first = dir.path().join("first");
    let second = dir.path().join("second");

    let a = run(vec![src.clone()], &first);
    let b = run(vec![src], &second);

    assert_eq!(a.artifacts.len(), b.artifacts.len());
    for (left, right) in a.artifacts.iter().zip(&b.artifacts) {
        assert_eq!(left.file_name(), right.file_name());
        assert_eq!(fs::read(left).unwrap(), fs::read(right).unwrap());
    }
}

#[test]
fn test_rerun_overwrites_previous_output() {
    let dir = TempDir::new().unwrap();
    let src = write_source(dir.path(), "runs.csv", &["0,chaining,8,mod,10,insert,collisions,1"]);
    let out_dir = dir.path().join("summary");

    run(vec![src.clone()], &out_dir);
    let before = fs::read(out_dir.join(STATS_FILE)).unwrap();
    run(vec![src], &out_dir);
    assert_eq!(fs::read(out_dir.join(STATS_FILE)).unwrap(), before);
}

// ===== Property-Based Tests =====

fn record_strategy() -> impl Strategy<Value = RawRecord> {
    (
        0u64..3,
        prop::sample::select(vec!["chaining", "linear"]),
        prop::sample::select(vec![8u64, 16]),
        prop::sample::select(vec!["fnv", "mix"]),
        prop::sample::select(vec!["insert", "search"]),
        prop::sample::select(vec!["time_ns", "collisions", "memory_bytes"]),
        0.0f64..1e9,
    )
        .prop_map(|(run_id, table_type, table_m, hash_name, phase, metric, value)| RawRecord {
            run_id,
            table_type: table_type.to_string(),
            table_m,
            hash_name: hash_name.to_string(),
            data_n: 1000,
            phase: phase.to_string(),
            metric: metric.to_string(),
            value: Value::Numeric(value),
        })
}

proptest! {
    #[test]
    fn prop_one_row_per_distinct_key(records in prop::collection::vec(record_strategy(), 0..60)) {
        let set = normalize(&RecordSet::from(records)).unwrap();
        let table = aggregate(&set).unwrap();

        let keys: BTreeSet<_> = set
            .iter()
            .map(|r| {
                (
                    r.table_type.clone(),
                    r.table_m,
                    r.hash_name.clone(),
                    r.data_n,
                    r.phase.clone(),
                    r.metric.clone(),
                )
            })
            .collect();
        prop_assert_eq!(table.len(), keys.len());
        prop_assert_eq!(table.iter().map(|r| r.count).sum::<usize>(), set.len());
    }

    #[test]
    fn prop_std_undefined_iff_single_sample(records in prop::collection::vec(record_strategy(), 1..60)) {
        let table = aggregate(&normalize(&RecordSet::from(records)).unwrap()).unwrap();
        for row in table.iter() {
            prop_assert!(row.count >= 1);
            prop_assert_eq!(row.std.is_nan(), row.count < 2);
            let tol = 1e-9 * row.max.abs().max(1.0);
            prop_assert!(row.min <= row.mean + tol && row.mean <= row.max + tol);
        }
    }

    #[test]
    fn prop_normalize_converts_exactly_once(records in prop::collection::vec(record_strategy(), 0..40)) {
        let set = RecordSet::from(records);
        let normalized = normalize(&set).unwrap();
        prop_assert_eq!(normalized.len(), set.len());
        for (before, after) in set.iter().zip(normalized.iter()) {
            let v = before.value.as_f64().unwrap();
            match before.metric.as_str() {
                "time_ns" => {
                    prop_assert_eq!(after.metric.as_str(), "time_ms");
                    prop_assert_eq!(after.value.as_f64(), Some(v / 1_000_000.0));
                }
                "memory_bytes" => {
                    prop_assert_eq!(after.metric.as_str(), "memory_mb");
                    prop_assert_eq!(after.value.as_f64(), Some(v / 1_048_576.0));
                }
                _ => {
                    prop_assert_eq!(after, before);
                }
            }
        }
    }
}
