use comfy_table::CellAlignment;
use serde::{
    Deserialize,
    Serialize,
};
use strum::{
    Display,
    EnumIter,
    EnumString,
    IntoEnumIterator as _,
};

/// The fixed column set of the collection table, in display order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum Column {
    #[default]
    #[strum(serialize = "Collection")]
    #[serde(rename = "Collection")]
    Collection,
    #[strum(serialize = "Count")]
    #[serde(rename = "Count")]
    Count,
    #[strum(serialize = "% Size")]
    #[serde(rename = "% Size")]
    SizePercent,
    #[strum(serialize = "DB Size")]
    #[serde(rename = "DB Size")]
    DbSize,
    #[strum(serialize = "Avg Obj Size")]
    #[serde(rename = "Avg Obj Size")]
    AvgObjSize,
    #[strum(serialize = "Indexes")]
    #[serde(rename = "Indexes")]
    Indexes,
    #[strum(serialize = "Index Size")]
    #[serde(rename = "Index Size")]
    IndexSize,
}

impl Column {
    /// Position of the column within a row
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn headers() -> Vec<String> {
        Column::iter().map(|column| column.to_string()).collect()
    }

    pub fn alignment(self) -> CellAlignment {
        match self {
            Column::Collection => CellAlignment::Left,
            _ => CellAlignment::Right,
        }
    }
}

impl clap::ValueEnum for Column {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            Column::Collection,
            Column::Count,
            Column::SizePercent,
            Column::DbSize,
            Column::AvgObjSize,
            Column::Indexes,
            Column::IndexSize,
        ]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.to_string()))
    }
}
