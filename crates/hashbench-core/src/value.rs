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

//! Measurement values that may or may not be numeric.

use crate::error::{MetricsError, Result};
use serde::{Serialize, Serializer};
use std::fmt;

/// A measurement value as read from a source.
///
/// Sources occasionally carry text in the `value` column. Such fields are kept
/// verbatim as [`Value::Unparsed`] so they survive into the unified artifact;
/// any arithmetic on them fails with [`MetricsError::NonNumericValue`].
/// Blank cells (and a literal `NaN`) are gaps in the measurement: they load as
/// [`Value::Missing`], pass through conversions and are left out of aggregates.
///
/// # Examples
///
/// ```
/// use hashbench_core::Value;
///
/// assert_eq!(Value::parse("500000"), Value::Numeric(500000.0));
/// assert_eq!(Value::parse(" 0.25 "), Value::Numeric(0.25));
/// assert_eq!(Value::parse(""), Value::Missing);
/// assert_eq!(Value::parse("n/a"), Value::Unparsed("n/a".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A value that parsed as a floating point number.
    Numeric(f64),
    /// No measurement.
    Missing,
    /// The original text of a value that did not parse.
    Unparsed(String),
}

impl Value {
    /// Parses a raw field, falling back to [`Value::Unparsed`].
    pub fn parse(field: &str) -> Self {
        let trimmed = field.trim();
        if trimmed.is_empty() {
            return Value::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_nan() => Value::Missing,
            Ok(v) => Value::Numeric(v),
            Err(_) => Value::Unparsed(field.to_string()),
        }
    }

    /// Returns the number, if this value has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Numeric(v) => Some(*v),
            Value::Missing | Value::Unparsed(_) => None,
        }
    }

    /// Returns `true` if the value parsed as a number.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Numeric(_))
    }

    /// Returns `true` for a gap in the measurement.
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Returns `true` for text that is neither a number nor a gap.
    pub fn is_unparsed(&self) -> bool {
        matches!(self, Value::Unparsed(_))
    }

    /// Returns the number, `None` for a gap, or a typed error describing
    /// where a number was needed.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::NonNumericValue`] for unparsed values.
    pub fn require_numeric(
        &self,
        metric: &str,
        context: impl Into<String>,
    ) -> Result<Option<f64>> {
        match self {
            Value::Numeric(v) => Ok(Some(*v)),
            Value::Missing => Ok(None),
            Value::Unparsed(text) => Err(MetricsError::NonNumericValue {
                metric: metric.to_string(),
                value: text.clone(),
                context: context.into(),
            }),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Numeric(v) => write!(f, "{}", v),
            Value::Missing => Ok(()),
            Value::Unparsed(text) => f.write_str(text),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Numeric(v) => serializer.serialize_f64(*v),
            Value::Missing => serializer.serialize_none(),
            Value::Unparsed(text) => serializer.serialize_str(text),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Numeric(v)
    }
}
