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

//! Normalization and aggregation of hash table benchmark metrics.
//!
//! This crate turns flat CSV measurement records produced by hash table
//! experiments into summary tables. Data flows strictly forward:
//!
//! 1. **Load**: read one or more CSV sources into a [`RecordSet`]
//! 2. **Normalize**: convert `time_ns` to `time_ms` and `memory_bytes` to `memory_mb`
//! 3. **Aggregate**: group by `(table_type, table_m, hash_name, data_n, phase, metric)`
//!    and compute mean, sample std, min, max and count
//! 4. **Select**: carve named slices out of the aggregate table
//! 5. **Emit**: write every table as CSV
//!
//! # Examples
//!
//! ## Running the whole pipeline
//!
//! ```no_run
//! use hashbench_core::{Pipeline, PipelineConfig};
//!
//! let config = PipelineConfig::new(
//!     vec!["runs/metrics_padrao.csv".into()],
//!     "results/summary",
//! );
//! let output = Pipeline::new(config).run()?;
//! for path in &output.artifacts {
//!     println!("wrote {}", path.display());
//! }
//! # Ok::<(), hashbench_core::MetricsError>(())
//! ```
//!
//! ## Working stage by stage
//!
//! ```
//! use hashbench_core::{aggregate, normalize, parse_records, LoaderConfig};
//! use std::path::Path;
//!
//! let csv = "run_id,table_type,table_m,hash_name,data_n,phase,metric,value\n\
//!            0,chaining,16,fnv,1000,insert,time_ns,500000\n\
//!            1,chaining,16,fnv,1000,insert,time_ns,700000\n";
//! let raw = parse_records(csv.as_bytes(), Path::new("inline"), &LoaderConfig::default())?;
//! let table = aggregate(&normalize(&raw.into())?)?;
//!
//! let row = &table.rows()[0];
//! assert_eq!(row.metric, "time_ms");
//! assert!((row.mean - 0.6).abs() < 1e-12);
//! assert_eq!((row.min, row.max, row.count), (0.5, 0.7, 2));
//! assert!(table.get(&row.key()).is_some());
//! # Ok::<(), hashbench_core::MetricsError>(())
//! ```
//!
//! # Values
//!
//! Measurement cells that do not parse as numbers are kept as
//! [`Value::Unparsed`]. Loading succeeds; any stage that needs the number
//! fails with [`MetricsError::NonNumericValue`]. Use [`ValuePolicy::Strict`]
//! to reject such cells while loading instead.
//!
//! Blank cells load as [`Value::Missing`]. They are converted as gaps, written
//! back as empty cells and left out of every mean and count.

mod aggregate;
mod config;
mod emit;
mod error;
mod loader;
mod normalize;
mod pipeline;
mod record;
mod slice;
mod stats;
mod value;

// Re-export public API
pub use aggregate::{
    aggregate, aggregate_structure, AggregateKey, AggregateRow, AggregateTable, StructureKey,
    StructureRow, AGGREGATE_COLUMNS, STRUCTURE_COLUMNS,
};
pub use config::{
    LoaderConfig, PipelineConfig, ValuePolicy, DEFAULT_BONUS_SOURCE, DEFAULT_MAX_ROWS,
    DEFAULT_OUTPUT_DIR, DEFAULT_STANDARD_SOURCE,
};
pub use emit::ArtifactWriter;
pub use error::{MetricsError, Result};
pub use loader::{load_source, load_sources, parse_records};
pub use normalize::{
    normalize, UnitConversion, BYTES_PER_MEBIBYTE, CONVERSIONS, MEMORY_BYTES, MEMORY_MB,
    NANOS_PER_MILLI, TIME_MS, TIME_NS,
};
pub use pipeline::{write_artifacts, Pipeline, PipelineOutput, STATS_FILE, UNIFIED_FILE};
pub use record::{RawRecord, RecordSet, RECORD_COLUMNS};
pub use slice::{
    chaining_top3, chart_slices, gaps_stats, select, ChartSlice, Filter, Slice, SliceName,
    StructureSlice,
};
pub use stats::Summary;
pub use value::Value;
