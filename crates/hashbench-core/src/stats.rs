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

//! Descriptive statistics over a group of observations.

/// Statistical summary of one group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator). NaN below two samples.
    pub std: f64,
    /// Smallest observation.
    pub min: f64,
    /// Largest observation.
    pub max: f64,
    /// Number of observations.
    pub count: usize,
}

impl Summary {
    /// Computes the summary of `values`, or `None` when there are none.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashbench_core::Summary;
    ///
    /// let s = Summary::from_values(&[2.0, 4.0, 6.0]).unwrap();
    /// assert_eq!(s.mean, 4.0);
    /// assert_eq!(s.std, 2.0);
    /// assert_eq!((s.min, s.max, s.count), (2.0, 6.0, 3));
    ///
    /// assert!(Summary::from_values(&[1.0]).unwrap().std.is_nan());
    /// assert!(Summary::from_values(&[]).is_none());
    /// ```
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;

        let std = if count < 2 {
            f64::NAN
        } else {
            let variance = values
                .iter()
                .map(|v| {
                    let diff = v - mean;
                    diff * diff
                })
                .sum::<f64>()
                / (count - 1) as f64;
            variance.sqrt()
        };

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            mean,
            std,
            min,
            max,
            count,
        })
    }

    /// Summary of a group whose observations may all be missing.
    ///
    /// An empty group has a count of zero and NaN for every statistic.
    pub fn of_observed(values: &[f64]) -> Self {
        Self::from_values(values).unwrap_or(Self {
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
            count: 0,
        })
    }

    /// Returns `true` when the standard deviation is defined.
    pub fn has_std(&self) -> bool {
        !self.std.is_nan()
    }
}
