use super::{
    sort_key,
    Column,
    DisplayCell,
    DisplayRow,
    SortKey,
};
use crate::{
    error::StatsError,
    metrics::{
        CollectedStats,
        CollectionStat,
        SummaryTotals,
    },
    units::format_bytes,
};
use comfy_table::{
    presets,
    Attribute,
    Cell,
    CellAlignment,
    ContentArrangement,
    Table,
};
use strum::IntoEnumIterator as _;

/// Share of `part` in `total` in percent. An empty total yields 0.
pub fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

pub fn format_percentage(percent: f64) -> String {
    format!("{percent:.1}%")
}

/// Rows in collection-enumeration order.
///
/// Percentages are relative to the grand total, so `totals` must be final.
pub fn build_rows(stats: &[CollectionStat], totals: &SummaryTotals) -> Vec<DisplayRow> {
    stats
        .iter()
        .map(|stat| {
            let percent = percentage(stat.size_bytes, totals.total_data_size_bytes);
            DisplayRow::new(vec![
                DisplayCell::text(&stat.namespace).with_sort_value(SortKey::Text(stat.namespace.clone())),
                DisplayCell::number(stat.document_count).with_sort_value(stat.document_count),
                DisplayCell::text(format_percentage(percent)).with_sort_value(percent),
                DisplayCell::text(format_bytes(stat.size_bytes as f64)).with_sort_value(stat.size_bytes),
                DisplayCell::text(format_bytes(stat.avg_object_size_bytes as f64))
                    .with_sort_value(stat.avg_object_size_bytes),
                DisplayCell::number(stat.index_count).with_sort_value(stat.index_count),
                DisplayCell::text(format_bytes(stat.total_index_size_bytes as f64))
                    .with_sort_value(stat.total_index_size_bytes),
            ])
        })
        .collect()
}

/// Stable sort by `column`. Equal keys keep their input order in both
/// directions.
pub fn sort_rows(rows: Vec<DisplayRow>, column: Column, descending: bool) -> Result<Vec<DisplayRow>, StatsError> {
    let mut keyed = rows
        .into_iter()
        .map(|row| -> Result<_, StatsError> { Ok((sort_key(&row, column)?, row)) })
        .collect::<Result<Vec<_>, _>>()?;

    keyed.sort_by(|(a, _), (b, _)| if descending { b.cmp(a) } else { a.cmp(b) });

    Ok(keyed.into_iter().map(|(_, row)| row).collect())
}

/// Render the sorted collection table followed by the summary block.
pub fn render(
    stats: &[CollectionStat],
    totals: &SummaryTotals,
    sort_column: Column,
    descending: bool,
) -> Result<String, StatsError> {
    let rows = sort_rows(build_rows(stats, totals), sort_column, descending)?;
    debug!(rows = rows.len(), column = %sort_column, descending, "Rendering collection table");

    Ok(format!("{}\n\n{}", collection_table(&rows), render_summary(totals)))
}

pub fn collection_table(rows: &[DisplayRow]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(Column::iter().map(|column| Cell::new(column).add_attribute(Attribute::Bold)));

    for column in Column::iter() {
        if let Some(table_column) = table.column_mut(column.index()) {
            table_column.set_cell_alignment(column.alignment());
        }
    }

    for row in rows {
        table.add_row(row.cells().iter().map(|cell| Cell::new(&cell.value)));
    }

    table
}

pub fn render_summary(totals: &SummaryTotals) -> String {
    format!(
        "Total Documents: {}\n\
         Total Data Size: {}\n\
         Total Index Size: {}",
        totals.total_document_count,
        format_bytes(totals.total_data_size_bytes as f64),
        format_bytes(totals.total_index_size_bytes as f64),
    )
}

/// Per-database totals, in the order databases were collected.
pub fn render_database_breakdown(collected: &CollectedStats) -> String {
    let grand_total = collected.totals.total_data_size_bytes;

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            ["Database", "Collections", "Count", "% Size", "DB Size", "Index Size"]
                .into_iter()
                .map(|header| Cell::new(header).add_attribute(Attribute::Bold)),
        );

    for index in 1..6 {
        if let Some(table_column) = table.column_mut(index) {
            table_column.set_cell_alignment(CellAlignment::Right);
        }
    }

    for group in collected.database_totals() {
        table.add_row(vec![
            Cell::new(&group.database),
            Cell::new(group.collection_count),
            Cell::new(group.totals.total_document_count),
            Cell::new(format_percentage(percentage(
                group.totals.total_data_size_bytes,
                grand_total,
            ))),
            Cell::new(format_bytes(group.totals.total_data_size_bytes as f64)),
            Cell::new(format_bytes(group.totals.total_index_size_bytes as f64)),
        ]);
    }

    table.to_string()
}
