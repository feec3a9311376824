//! Chart-ready series and rendering options derived from stored rows.
//!
//! The output is shaped after Chart.js `data`/`options` objects so clients
//! can hand it to a renderer without further mapping.

pub mod options;
pub mod series;

pub use options::{build_options, ChartOptions};
pub use series::{build_series, ChartData, Colors, Dataset, Point, SeriesValues};

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{AxisSelection, ChartType, Row};

pub const PALETTE: [&str; 10] = [
    "#3B82F6", "#EF4444", "#10B981", "#F59E0B", "#8B5CF6",
    "#EC4899", "#06B6D4", "#84CC16", "#F97316", "#6366F1",
];

/// Bar, line and area charts show at most this many rows.
pub const MAX_SERIES_ROWS: usize = 50;

/// Smoothing applied to line and area strokes.
pub const LINE_TENSION: f64 = 0.4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub data: ChartData,
    pub options: ChartOptions,
}

/// Builds series and options for one axis selection.
pub fn build_chart(
    rows: &[Row],
    x_axis: &AxisSelection,
    y_axis: &AxisSelection,
    chart_type: ChartType,
) -> Result<Chart, AppError> {
    let data = build_series(rows, x_axis, y_axis, chart_type)?;
    let options = build_options(x_axis, y_axis, chart_type);
    Ok(Chart { data, options })
}

/// `#RRGGBB` to `rgba(r, g, b, alpha)`.
pub(crate) fn translucent(hex: &str, alpha: f64) -> String {
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|h| u8::from_str_radix(h, 16).ok())
            .unwrap_or(0)
    };
    format!("rgba({}, {}, {}, {})", channel(1..3), channel(3..5), channel(5..7), alpha)
}
