//! # Report Module
//!
//! Turns collected statistics into the sorted collection table.
//!
//! - **`Column`**: the seven fixed columns and their alignment
//! - **`DisplayRow`**: rendered cells of one collection, each optionally carrying its raw sort value
//! - **`sort_key`**: comparable values for sorting, decoded from text when no raw value is attached
//! - **`renderer`**: row construction, percentages, stable sorting and the summary block

pub mod column;
pub mod renderer;
pub mod sort_key;

pub use column::Column;
pub use renderer::*;
pub use sort_key::{
    decode_for_sort,
    sort_key,
    SortKey,
};

use std::fmt;

/// Content of a table cell: a native number or already-formatted text
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(u64),
    Text(String),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(number) => write!(f, "{number}"),
            CellValue::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayCell {
    pub value: CellValue,
    /// Raw value to sort by, so sorting never has to parse `value`
    pub sort_value: Option<SortKey>,
}

impl DisplayCell {
    pub fn new(value: CellValue) -> Self {
        Self {
            value,
            sort_value: None,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(CellValue::Text(text.into()))
    }

    pub fn number(number: u64) -> Self {
        Self::new(CellValue::Number(number))
    }

    pub fn with_sort_value(mut self, key: impl Into<SortKey>) -> Self {
        self.sort_value = Some(key.into());
        self
    }
}

/// One table row, cells ordered like [`Column`]
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    cells: Vec<DisplayCell>,
}

impl DisplayRow {
    pub fn new(cells: Vec<DisplayCell>) -> Self {
        Self { cells }
    }

    /// Row of plain cells without sort values
    pub fn from_values(values: impl IntoIterator<Item = CellValue>) -> Self {
        Self::new(values.into_iter().map(DisplayCell::new).collect())
    }

    pub fn cell(&self, column: Column) -> Option<&DisplayCell> {
        self.cells.get(column.index())
    }

    pub fn cells(&self) -> &[DisplayCell] {
        &self.cells
    }
}
