use bytes::Bytes;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::Timelike;
use serde::Deserialize;
use std::io::Cursor;

use crate::error::AppError;
use crate::models::CellValue;

/// Header row plus data rows of one sheet, before ingestion.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawSheet {
    #[serde(default)]
    pub header: Option<Vec<String>>,
    #[serde(default)]
    pub rows: Vec<Vec<CellValue>>,
}

impl RawSheet {
    /// Splits the first row off as the header.
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        let mut rows = rows.into_iter();
        let header = rows
            .next()
            .map(|cells| cells.iter().map(|cell| cell.to_string()).collect());

        RawSheet {
            header,
            rows: rows.collect(),
        }
    }
}

/// Opens a workbook (xlsx, xls, xlsb or ods) and returns its first sheet.
/// Other sheets are ignored.
pub fn read_first_sheet(file_data: Bytes) -> Result<RawSheet, AppError> {
    let start = std::time::Instant::now();
    let cursor = Cursor::new(file_data);

    let mut workbook = open_workbook_auto_from_rs(cursor).map_err(|e| {
        tracing::error!("Failed to open workbook: {}", e);
        AppError::FileProcessingError(format!("Failed to open workbook: {}", e))
    })?;

    let sheet_names = workbook.sheet_names().to_vec();
    tracing::info!("Found {} sheets: {:?}", sheet_names.len(), sheet_names);

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range?,
        None => {
            tracing::warn!("Workbook has no sheets");
            return Ok(RawSheet::default());
        }
    };

    let rows: Vec<Vec<CellValue>> = range
        .rows()
        .map(|row| row.iter().map(cell_value).collect())
        .collect();

    tracing::info!("Read {} rows from first sheet in {:?}", rows.len(), start.elapsed());
    Ok(RawSheet::from_rows(rows))
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Null,
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(dt) if dt.num_seconds_from_midnight() == 0 => {
                CellValue::Text(dt.format("%Y-%m-%d").to_string())
            }
            Some(dt) => CellValue::Text(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => CellValue::Number(dt.as_f64()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_row_becomes_header() {
        let sheet = RawSheet::from_rows(vec![
            vec![CellValue::from("name"), CellValue::from(2023.0), CellValue::Null],
            vec![CellValue::from("a"), CellValue::from(1.0)],
        ]);
        assert_eq!(
            sheet.header,
            Some(vec!["name".to_string(), "2023".to_string(), String::new()])
        );
        assert_eq!(sheet.rows.len(), 1);
    }

    #[test]
    fn no_rows_means_no_header() {
        let sheet = RawSheet::from_rows(vec![]);
        assert_eq!(sheet, RawSheet::default());
    }

    #[test]
    fn blank_header_row_is_kept_for_ingest() {
        let sheet = RawSheet::from_rows(vec![vec![CellValue::Null, CellValue::from("")]]);
        assert_eq!(sheet.header, Some(vec![String::new(), String::new()]));
    }

    #[test]
    fn calamine_cells_map_to_values() {
        assert_eq!(cell_value(&Data::Int(3)), CellValue::Number(3.0));
        assert_eq!(cell_value(&Data::String("x".into())), CellValue::from("x"));
        assert_eq!(cell_value(&Data::Empty), CellValue::Null);
        assert_eq!(cell_value(&Data::Bool(false)), CellValue::Bool(false));
    }

    #[test]
    fn garbage_bytes_are_a_processing_error() {
        let err = read_first_sheet(Bytes::from_static(b"not a workbook")).unwrap_err();
        assert_eq!(err.kind(), "FileProcessingError");
    }
}
