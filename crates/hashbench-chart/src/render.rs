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

//! SVG rendering of chart plans.

use crate::error::{ChartError, Result};
use crate::plan::ChartPlan;
use plotters::prelude::*;
use std::fmt::Display;
use std::path::Path;

// Font sizes
const TITLE_FONT_SIZE: u32 = 26;
const AXIS_LABEL_FONT_SIZE: u32 = 20;
const TICK_LABEL_FONT_SIZE: u32 = 16;
const LEGEND_FONT_SIZE: u32 = 16;

const CHART_SIZE: (u32, u32) = (960, 600);
const MARKER_SIZE: u32 = 4;
const ERROR_BAR_WIDTH: u32 = 10;

fn render_error<E: Display>(path: &Path) -> impl Fn(E) -> ChartError + '_ {
    move |e| ChartError::Render {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

/// Label of the category nearest to `x`, blank between categories.
fn category_label(categories: &[String], x: f64) -> String {
    let idx = x.round();
    if idx < 0.0 || (x - idx).abs() > 0.3 {
        return String::new();
    }
    categories.get(idx as usize).cloned().unwrap_or_default()
}

/// Draws `plan` as an SVG file at `path`.
///
/// Each series is a line through the means of its hashes with a marker per
/// point and a vertical error bar of one standard deviation. Points without
/// a defined deviation get no bar.
pub fn render_chart(plan: &ChartPlan, path: &Path) -> Result<()> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_error(path))?;

    let num_categories = plan.categories.len();
    let (y_min, y_max) = plan.y_range();

    let mut chart = ChartBuilder::on(&root)
        .caption(&plan.title, ("sans-serif", TITLE_FONT_SIZE))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(-0.5..(num_categories as f64 - 0.5), y_min..y_max)
        .map_err(render_error(path))?;

    let categories = &plan.categories;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(num_categories)
        .x_label_formatter(&|x| category_label(categories, *x))
        .x_desc(plan.x_label.as_str())
        .y_desc(plan.y_label.as_str())
        .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
        .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
        .draw()
        .map_err(render_error(path))?;

    for (idx, series) in plan.series.iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        let coords: Vec<(f64, f64)> = series
            .points
            .iter()
            .map(|p| (p.x as f64, p.mean))
            .collect();

        chart
            .draw_series(LineSeries::new(coords.clone(), color.stroke_width(2)))
            .map_err(render_error(path))?
            .label(series.label.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });

        chart
            .draw_series(
                coords
                    .iter()
                    .map(|&coord| Circle::new(coord, MARKER_SIZE, color.filled())),
            )
            .map_err(render_error(path))?;

        chart
            .draw_series(series.points.iter().filter(|p| p.has_error_bar()).map(|p| {
                ErrorBar::new_vertical(
                    p.x as f64,
                    p.mean - p.std,
                    p.mean,
                    p.mean + p.std,
                    color.stroke_width(1),
                    ERROR_BAR_WIDTH,
                )
            }))
            .map_err(render_error(path))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", LEGEND_FONT_SIZE))
        .draw()
        .map_err(render_error(path))?;

    root.present().map_err(render_error(path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        vec!["fnv".to_string(), "mix".to_string(), "mod".to_string()]
    }

    #[test]
    fn test_category_label_on_ticks() {
        assert_eq!(category_label(&names(), 0.0), "fnv");
        assert_eq!(category_label(&names(), 2.1), "mod");
    }

    #[test]
    fn test_category_label_between_ticks() {
        assert_eq!(category_label(&names(), 0.5), "");
        assert_eq!(category_label(&names(), -0.5), "");
        assert_eq!(category_label(&names(), 3.0), "");
    }

    #[test]
    fn test_render_error_message() {
        let err = render_error::<&str>(Path::new("a.svg"))("backend failure");
        assert_eq!(err.to_string(), "Failed to render chart 'a.svg': backend failure");
    }
}
