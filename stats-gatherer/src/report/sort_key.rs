//! Sort keys for rendered rows.
//!
//! The table cells hold display strings such as `"2.00K"` or `"45.3%"`, whose
//! lexical order is meaningless (`"2.00K"` would sort before `"10.00b"`).
//! Rows built by the renderer carry an explicit sort value per cell; for rows
//! that only have their text, [`decode_for_sort`] recovers the magnitude from
//! the rendered string.
//!
//! The text heuristic only looks at the last one or two characters. A
//! collection literally named e.g. `"build2K"` decodes as a byte size and
//! fails to parse. Prefer explicit sort values wherever the raw number is
//! still known.

use super::{
    CellValue,
    Column,
    DisplayRow,
};
use crate::{
    error::StatsError,
    units,
};
use std::cmp::Ordering;

/// A comparable value recovered from a table cell.
///
/// Numbers order before text so a mixed column still sorts deterministically.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Number(f64),
    Text(String),
}

impl Eq for SortKey {}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<u64> for SortKey {
    fn from(value: u64) -> Self {
        SortKey::Number(value as f64)
    }
}

impl From<f64> for SortKey {
    fn from(value: f64) -> Self {
        SortKey::Number(value)
    }
}

/// Sort key of `row` for `column`: the cell's explicit sort value when it has
/// one, otherwise the value decoded from its text.
pub fn sort_key(row: &DisplayRow, column: Column) -> Result<SortKey, StatsError> {
    match row.cell(column).and_then(|cell| cell.sort_value.clone()) {
        Some(key) => Ok(key),
        None => decode_for_sort(row, column),
    }
}

/// Recover a comparable value from the rendered cell of `column`.
///
/// Checked in order:
/// 1. native numbers are returned as they are,
/// 2. a trailing `%` is stripped and the rest parsed as a decimal,
/// 3. a trailing unit suffix preceded by a digit is parsed as a byte size,
/// 4. anything else compares as text.
pub fn decode_for_sort(row: &DisplayRow, column: Column) -> Result<SortKey, StatsError> {
    let Some(cell) = row.cell(column) else {
        return Ok(SortKey::Text(String::new()));
    };

    let text = match &cell.value {
        CellValue::Number(number) => return Ok(SortKey::from(*number)),
        CellValue::Text(text) => text,
    };

    if let Some(percent) = text.strip_suffix('%') {
        return percent
            .trim()
            .parse::<f64>()
            .map(SortKey::Number)
            .map_err(|_| StatsError::format("percentage", text));
    }

    let mut tail = text.chars().rev();
    if let (Some(suffix), Some(previous)) = (tail.next(), tail.next()) {
        if units::is_unit_suffix(suffix) && previous.is_ascii_digit() {
            return units::parse_bytes(text).map(SortKey::Number);
        }
    }

    Ok(SortKey::Text(text.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::DisplayCell;
    use pretty_assertions::assert_eq;

    fn row_with(column: Column, value: CellValue) -> DisplayRow {
        let mut cells: Vec<DisplayCell> = (0..7).map(|_| DisplayCell::text("")).collect();
        cells[column.index()] = DisplayCell::new(value);
        DisplayRow::new(cells)
    }

    fn decode(column: Column, value: CellValue) -> Result<SortKey, StatsError> {
        decode_for_sort(&row_with(column, value), column)
    }

    #[test]
    fn native_numbers_are_returned_unchanged() {
        assert_eq!(decode(Column::Count, CellValue::Number(42)).unwrap(), SortKey::Number(42.0));
    }

    #[test]
    fn percentages_are_parsed_without_the_percent_sign() {
        assert_eq!(
            decode(Column::SizePercent, CellValue::Text("45.3%".into())).unwrap(),
            SortKey::Number(45.3)
        );
    }

    #[test]
    fn byte_sizes_are_decoded() {
        assert_eq!(
            decode(Column::IndexSize, CellValue::Text("2.00K".into())).unwrap(),
            SortKey::Number(2048.0)
        );
        assert_eq!(
            decode(Column::DbSize, CellValue::Text("10.00b".into())).unwrap(),
            SortKey::Number(10.0)
        );
    }

    #[test]
    fn plain_text_is_returned_unchanged() {
        assert_eq!(
            decode(Column::Collection, CellValue::Text("foo".into())).unwrap(),
            SortKey::Text("foo".to_string())
        );
        // A unit letter not preceded by a digit is just text.
        assert_eq!(
            decode(Column::Collection, CellValue::Text("app.logK".into())).unwrap(),
            SortKey::Text("app.logK".to_string())
        );
    }

    #[test]
    fn malformed_values_fail_loudly() {
        let err = decode(Column::SizePercent, CellValue::Text("n/a%".into())).unwrap_err();
        assert!(matches!(err, StatsError::Format { kind: "percentage", .. }));

        let err = decode(Column::Collection, CellValue::Text("app.build2K".into())).unwrap_err();
        assert!(matches!(err, StatsError::Format { kind: "byte size", .. }));
    }

    #[test]
    fn explicit_sort_values_win_over_text() {
        let mut cells: Vec<DisplayCell> = (0..7).map(|_| DisplayCell::text("")).collect();
        cells[Column::Collection.index()] = DisplayCell::text("app.build2K").with_sort_value(SortKey::Text("app.build2K".into()));
        let row = DisplayRow::new(cells);

        assert_eq!(
            sort_key(&row, Column::Collection).unwrap(),
            SortKey::Text("app.build2K".to_string())
        );
    }

    #[test]
    fn numbers_order_before_text() {
        let mut keys = vec![
            SortKey::Text("b".into()),
            SortKey::Number(10.0),
            SortKey::Text("a".into()),
            SortKey::Number(-1.0),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                SortKey::Number(-1.0),
                SortKey::Number(10.0),
                SortKey::Text("a".into()),
                SortKey::Text("b".into()),
            ]
        );
    }
}
