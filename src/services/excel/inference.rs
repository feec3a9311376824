use super::utils::is_date_string;
use crate::models::{parse_number, CellValue, ColumnType};

/// Number of leading non-null values examined per column.
pub const TYPE_DETECTION_ROWS: usize = 10;

/// Classifies a column from its non-null values.
///
/// Number wins only on strictly more evidence than date; an equal nonzero
/// count resolves to date.
pub fn infer_column_type<'a, I>(values: I) -> ColumnType
where
    I: IntoIterator<Item = &'a CellValue>,
{
    let (numeric_count, date_count) = values
        .into_iter()
        .take(TYPE_DETECTION_ROWS)
        .fold((0usize, 0usize), |(num, date), value| match value {
            CellValue::Number(_) => (num + 1, date),
            CellValue::Text(s) if is_date_string(s) => (num, date + 1),
            CellValue::Text(s) if parse_number(s).is_some() => (num + 1, date),
            _ => (num, date),
        });

    if numeric_count > date_count && numeric_count > 0 {
        ColumnType::Number
    } else if date_count > 0 {
        ColumnType::Date
    } else {
        ColumnType::String
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(values: &[&str]) -> Vec<CellValue> {
        values.iter().map(|v| CellValue::from(*v)).collect()
    }

    #[test]
    fn iso_text_is_date() {
        assert_eq!(
            infer_column_type(&texts(&["2023-01-01", "2023-02-01"])),
            ColumnType::Date
        );
    }

    #[test]
    fn numbers_are_number() {
        let values = vec![CellValue::from(1.0), CellValue::from(2.0), CellValue::from(3.0)];
        assert_eq!(infer_column_type(&values), ColumnType::Number);
    }

    #[test]
    fn numeric_text_is_number() {
        assert_eq!(infer_column_type(&texts(&["1.5", " 2 ", "-3e2"])), ColumnType::Number);
    }

    #[test]
    fn words_and_empty_are_string() {
        assert_eq!(infer_column_type(&texts(&["a", "b"])), ColumnType::String);
        assert_eq!(infer_column_type(&Vec::<CellValue>::new()), ColumnType::String);
        assert_eq!(
            infer_column_type(&[CellValue::Bool(true), CellValue::Bool(false)]),
            ColumnType::String
        );
    }

    #[test]
    fn tie_between_number_and_date_is_date() {
        let values = vec![CellValue::from(1.0), CellValue::from("2023-01-01")];
        assert_eq!(infer_column_type(&values), ColumnType::Date);
    }

    #[test]
    fn number_needs_strict_majority_over_date() {
        let values = vec![
            CellValue::from(1.0),
            CellValue::from("2"),
            CellValue::from("2023-01-01"),
        ];
        assert_eq!(infer_column_type(&values), ColumnType::Number);
    }

    #[test]
    fn invalid_calendar_day_counts_as_nothing() {
        assert_eq!(infer_column_type(&texts(&["2023-02-30"])), ColumnType::String);
    }

    #[test]
    fn only_first_ten_values_are_examined() {
        let mut values = texts(&["x"; 10]);
        values.extend(vec![CellValue::from(1.0); 20]);
        assert_eq!(infer_column_type(&values), ColumnType::String);

        let mut values = vec![CellValue::from(1.0); 10];
        values.extend(texts(&["2023-01-01"; 20]));
        assert_eq!(infer_column_type(&values), ColumnType::Number);
    }
}
