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

//! Unit normalization.
//!
//! Two fixed rules run before aggregation:
//!
//! 1. `time_ns` rows become `time_ms`, value divided by 1,000,000.
//! 2. `memory_bytes` rows become `memory_mb`, value divided by 1,048,576.
//!    Skipped entirely when no memory rows exist.
//!
//! The rules touch disjoint rows, and every other metric passes through.

use crate::error::Result;
use crate::record::{RawRecord, RecordSet};
use crate::value::Value;
use tracing::{debug, info};

/// Metric name of raw timings.
pub const TIME_NS: &str = "time_ns";
/// Metric name of normalized timings.
pub const TIME_MS: &str = "time_ms";
/// Metric name of raw memory usage.
pub const MEMORY_BYTES: &str = "memory_bytes";
/// Metric name of normalized memory usage.
pub const MEMORY_MB: &str = "memory_mb";

/// Nanoseconds per millisecond.
pub const NANOS_PER_MILLI: f64 = 1_000_000.0;
/// Bytes per mebibyte.
pub const BYTES_PER_MEBIBYTE: f64 = 1_048_576.0;

/// A single metric rewrite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitConversion {
    /// Metric name before conversion.
    pub from: &'static str,
    /// Metric name after conversion.
    pub to: &'static str,
    /// Divisor applied to the value.
    pub divisor: f64,
}

/// The conversion rules, in application order.
pub const CONVERSIONS: [UnitConversion; 2] = [
    UnitConversion {
        from: TIME_NS,
        to: TIME_MS,
        divisor: NANOS_PER_MILLI,
    },
    UnitConversion {
        from: MEMORY_BYTES,
        to: MEMORY_MB,
        divisor: BYTES_PER_MEBIBYTE,
    },
];

impl UnitConversion {
    fn apply(&self, record: &RawRecord) -> Result<RawRecord> {
        let context = format!("converting {} to {}", self.from, self.to);
        let converted = match record.value.require_numeric(&record.metric, context)? {
            Some(value) => Value::Numeric(value / self.divisor),
            None => Value::Missing,
        };
        Ok(record.with_measurement(self.to, converted))
    }
}

/// Produces the normalized copy of `records`.
///
/// The output has the same length and order as the input; converted rows
/// keep their identity fields and only change `metric` and `value`.
///
/// # Examples
///
/// ```
/// use hashbench_core::{normalize, RawRecord, RecordSet, Value};
///
/// let raw = RecordSet::from(vec![RawRecord {
///     run_id: 0,
///     table_type: "chaining".into(),
///     table_m: 16,
///     hash_name: "fnv".into(),
///     data_n: 1000,
///     phase: "insert".into(),
///     metric: "time_ns".into(),
///     value: Value::Numeric(500_000.0),
/// }]);
/// let normalized = normalize(&raw)?;
/// assert_eq!(normalized.as_slice()[0].metric, "time_ms");
/// assert_eq!(normalized.as_slice()[0].value, Value::Numeric(0.5));
/// # Ok::<(), hashbench_core::MetricsError>(())
/// ```
///
/// # Errors
///
/// Returns [`MetricsError::NonNumericValue`](crate::MetricsError::NonNumericValue)
/// when a row selected for conversion holds an unparsed value.
pub fn normalize(records: &RecordSet) -> Result<RecordSet> {
    if !records.has_metric(MEMORY_BYTES) {
        debug!("no {} rows, memory conversion skipped", MEMORY_BYTES);
    }
    let mut converted = [0usize; CONVERSIONS.len()];

    let normalized = records
        .iter()
        .map(|record| {
            for (idx, rule) in CONVERSIONS.iter().enumerate() {
                if record.metric == rule.from {
                    converted[idx] += 1;
                    return rule.apply(record);
                }
            }
            Ok(record.clone())
        })
        .collect::<Result<RecordSet>>()?;

    info!(
        rows = normalized.len(),
        time_rows = converted[0],
        memory_rows = converted[1],
        "normalized units"
    );
    Ok(normalized)
}
