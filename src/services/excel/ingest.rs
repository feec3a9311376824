use super::inference::infer_column_type;
use super::reader::RawSheet;
use super::utils::unique_header_name;
use crate::error::AppError;
use crate::models::{CellValue, ColumnDescriptor, Row, SAMPLE_SIZE};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct IngestedSheet {
    pub columns: Vec<ColumnDescriptor>,
    pub rows: Vec<Row>,
    pub row_count: usize,
}

/// Turns a header row plus data rows into keyed rows and column descriptors.
///
/// Trailing blank header cells are dropped; a header with no named cell left
/// is `NoHeaders`. Empty text cells are stored as `Null`.
pub fn ingest(sheet: RawSheet) -> Result<IngestedSheet, AppError> {
    let RawSheet { header, rows: data_rows } = sheet;

    let mut header = match header {
        None if data_rows.is_empty() => return Err(AppError::EmptySheet),
        None => return Err(AppError::NoHeaders),
        Some(header) => header,
    };
    while header.last().map_or(false, |name| name.trim().is_empty()) {
        header.pop();
    }
    if header.is_empty() {
        return Err(AppError::NoHeaders);
    }

    let mut existing_names = HashSet::new();
    let headers: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(idx, raw)| unique_header_name(raw, idx, &mut existing_names))
        .collect();

    let rows: Vec<Row> = data_rows
        .into_iter()
        .map(|cells| {
            let mut cells = cells.into_iter();
            headers
                .iter()
                .map(|name| (name.clone(), normalize(cells.next().unwrap_or_default())))
                .collect()
        })
        .collect();

    let columns = headers
        .iter()
        .map(|name| ColumnDescriptor {
            name: name.clone(),
            column_type: infer_column_type(non_null_values(&rows, name)),
            sample_values: non_null_values(&rows, name)
                .take(SAMPLE_SIZE)
                .cloned()
                .collect(),
        })
        .collect();

    let row_count = rows.len();
    tracing::debug!("Ingested {} rows across {} columns", row_count, headers.len());

    Ok(IngestedSheet {
        columns,
        rows,
        row_count,
    })
}

fn normalize(value: CellValue) -> CellValue {
    match value {
        CellValue::Text(text) if text.is_empty() => CellValue::Null,
        value => value,
    }
}

static NULL: CellValue = CellValue::Null;

/// Every row's value for `column`, `Null` where the row lacks it.
pub fn column_values<'a>(rows: &'a [Row], column: &'a str) -> impl Iterator<Item = &'a CellValue> + 'a {
    rows.iter().map(move |row| row.get(column).unwrap_or(&NULL))
}

fn non_null_values<'a>(rows: &'a [Row], column: &'a str) -> impl Iterator<Item = &'a CellValue> + 'a {
    column_values(rows, column).filter(|value| !value.is_null())
}
