use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{translucent, LINE_TENSION, MAX_SERIES_ROWS, PALETTE};
use crate::error::AppError;
use crate::models::{AxisSelection, CellValue, ChartType, Row};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: SeriesValues,
    pub background_color: Colors,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Colors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesValues {
    Values(Vec<f64>),
    Points(Vec<Point>),
}

impl SeriesValues {
    pub fn len(&self) -> usize {
        match self {
            SeriesValues::Values(values) => values.len(),
            SeriesValues::Points(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Colors {
    Single(String),
    PerLabel(Vec<String>),
}

fn cell<'a>(row: &'a Row, column: &str) -> Option<&'a CellValue> {
    row.get(column)
}

/// Numeric reading of a cell; anything unparseable counts as zero.
fn number_or_zero(row: &Row, column: &str) -> f64 {
    cell(row, column).and_then(CellValue::as_f64).unwrap_or(0.0)
}

fn label_of(row: &Row, column: &str) -> String {
    cell(row, column).map(|v| v.to_string()).unwrap_or_default()
}

/// Derives chart series from `rows` for one axis selection.
///
/// Malformed y-values contribute zero instead of failing the chart. An empty
/// row set is an error rather than an empty chart.
pub fn build_series(
    rows: &[Row],
    x_axis: &AxisSelection,
    y_axis: &AxisSelection,
    chart_type: ChartType,
) -> Result<ChartData, AppError> {
    if rows.is_empty() {
        return Err(AppError::EmptyDataset);
    }

    let x = x_axis.column.as_str();
    let y = y_axis.column.as_str();
    let label = y_axis.display_label().to_string();

    let data = match chart_type {
        ChartType::Pie => pie(rows, x, y, label),
        ChartType::Scatter => scatter(rows, x, y, label),
        ChartType::Bar | ChartType::Line | ChartType::Area => {
            sequential(rows, x, y, label, chart_type)
        }
    };

    tracing::debug!(
        "Built {:?} series with {} labels from {} rows",
        chart_type,
        data.labels.len(),
        rows.len()
    );
    Ok(data)
}

fn pie(rows: &[Row], x: &str, y: &str, label: String) -> ChartData {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut labels: Vec<String> = Vec::new();
    let mut totals: Vec<f64> = Vec::new();

    for row in rows {
        let key = label_of(row, x);
        let value = number_or_zero(row, y);
        match index.get(&key) {
            Some(&pos) => totals[pos] += value,
            None => {
                index.insert(key.clone(), labels.len());
                labels.push(key);
                totals.push(value);
            }
        }
    }

    let colors = (0..labels.len())
        .map(|i| PALETTE[i % PALETTE.len()].to_string())
        .collect();

    ChartData {
        labels,
        datasets: vec![Dataset {
            label,
            data: SeriesValues::Values(totals),
            background_color: Colors::PerLabel(colors),
            border_color: None,
            border_width: None,
            fill: None,
            tension: None,
        }],
    }
}

fn scatter(rows: &[Row], x: &str, y: &str, label: String) -> ChartData {
    let points = rows
        .iter()
        .map(|row| Point {
            x: number_or_zero(row, x),
            y: number_or_zero(row, y),
        })
        .collect();

    ChartData {
        labels: Vec::new(),
        datasets: vec![Dataset {
            label,
            data: SeriesValues::Points(points),
            background_color: Colors::Single(PALETTE[0].to_string()),
            border_color: None,
            border_width: None,
            fill: None,
            tension: None,
        }],
    }
}

fn sequential(rows: &[Row], x: &str, y: &str, label: String, chart_type: ChartType) -> ChartData {
    let shown = &rows[..rows.len().min(MAX_SERIES_ROWS)];

    let labels = shown.iter().map(|row| label_of(row, x)).collect();
    let values = shown.iter().map(|row| number_or_zero(row, y)).collect();

    let dataset = if chart_type == ChartType::Bar {
        Dataset {
            label,
            data: SeriesValues::Values(values),
            background_color: Colors::Single(translucent(PALETTE[0], 0.6)),
            border_color: Some(Colors::Single(PALETTE[0].to_string())),
            border_width: Some(1),
            fill: None,
            tension: None,
        }
    } else {
        Dataset {
            label,
            data: SeriesValues::Values(values),
            background_color: Colors::Single(translucent(PALETTE[0], 0.2)),
            border_color: Some(Colors::Single(PALETTE[0].to_string())),
            border_width: Some(2),
            fill: Some(chart_type == ChartType::Area),
            tension: Some(LINE_TENSION),
        }
    };

    ChartData {
        labels,
        datasets: vec![dataset],
    }
}
