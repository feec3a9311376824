use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use uuid::Uuid;

use crate::services::chart::{ChartData, ChartOptions};
use crate::services::statistics::Statistics;

pub const SAMPLE_SIZE: usize = 5;

/// A raw spreadsheet cell as stored after ingestion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Lenient numeric reading used when charting: numbers pass through,
    /// numeric text is parsed, everything else is `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if !n.is_nan() => Some(*n),
            CellValue::Text(s) => parse_number(s),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

/// Parses trimmed text as a finite float. `"inf"`/`"NaN"` are rejected.
pub fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// One data row keyed by column name, in header order.
pub type Row = IndexMap<String, CellValue>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Number,
    Date,
    String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub sample_values: SmallVec<[CellValue; SAMPLE_SIZE]>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Upload {
    pub id: Uuid,
    #[serde(skip)]
    pub owner: String,
    pub file_name: String,
    pub columns: Vec<ColumnDescriptor>,
    pub rows: Vec<Row>,
    pub row_count: usize,
    pub created_at: DateTime<Utc>,
}

impl Upload {
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn summary(&self) -> UploadSummary {
        UploadSummary {
            id: self.id,
            file_name: self.file_name.clone(),
            columns: self.columns.clone(),
            row_count: self.row_count,
            created_at: self.created_at,
        }
    }
}

/// An upload without its row data, for listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSummary {
    pub id: Uuid,
    pub file_name: String,
    pub columns: Vec<ColumnDescriptor>,
    pub row_count: usize,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSelection {
    pub column: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl AxisSelection {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The label shown to users, falling back to the column name.
    pub fn display_label(&self) -> &str {
        match self.label.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => &self.column,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Line,
    Area,
    Pie,
    Scatter,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub id: Uuid,
    #[serde(skip)]
    pub owner: String,
    pub upload_id: Uuid,
    pub x_axis: AxisSelection,
    pub y_axis: AxisSelection,
    pub chart_type: ChartType,
    pub chart_data: ChartData,
    pub chart_config: ChartOptions,
    pub statistics: Option<Statistics>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_drops_integral_fraction() {
        assert_eq!(CellValue::Number(3.0).to_string(), "3");
        assert_eq!(CellValue::Number(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Null.to_string(), "");
        assert_eq!(CellValue::Bool(true).to_string(), "true");
    }

    #[test]
    fn as_f64_parses_numeric_text_only() {
        assert_eq!(CellValue::from(" 4.5 ").as_f64(), Some(4.5));
        assert_eq!(CellValue::from("abc").as_f64(), None);
        assert_eq!(CellValue::from("NaN").as_f64(), None);
        assert_eq!(CellValue::Bool(true).as_f64(), None);
        assert_eq!(CellValue::Null.as_f64(), None);
    }

    #[test]
    fn cell_values_round_trip_as_plain_json() {
        let row: Vec<CellValue> =
            serde_json::from_str(r#"[null, true, 1.5, "x"]"#).unwrap();
        assert_eq!(
            row,
            vec![
                CellValue::Null,
                CellValue::Bool(true),
                CellValue::Number(1.5),
                CellValue::from("x"),
            ]
        );
    }

    #[test]
    fn axis_label_falls_back_to_column() {
        assert_eq!(AxisSelection::new("price").display_label(), "price");
        assert_eq!(
            AxisSelection::new("price").with_label("Price").display_label(),
            "Price"
        );
        assert_eq!(
            AxisSelection::new("price").with_label("").display_label(),
            "price"
        );
    }
}
