use super::CollectionStat;
use serde::{
    Deserialize,
    Serialize,
};

/// Running totals over every collected collection.
///
/// Only ever grows: each [`CollectionStat`] is folded in exactly once, in
/// enumeration order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryTotals {
    pub total_document_count: u64,
    pub total_data_size_bytes: u64,
    pub total_index_size_bytes: u64,
}

impl SummaryTotals {
    pub fn add(&mut self, stat: &CollectionStat) {
        self.total_document_count += stat.document_count;
        self.total_data_size_bytes += stat.size_bytes;
        self.total_index_size_bytes += stat.total_index_size_bytes;
    }
}

/// Totals of all collections that belong to one database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseTotals {
    pub database: String,
    pub collection_count: usize,
    pub totals: SummaryTotals,
}

/// Everything a single run collected: per-collection stats and the totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedStats {
    pub stats: Vec<CollectionStat>,
    pub totals: SummaryTotals,
}

impl CollectedStats {
    pub fn push(&mut self, stat: CollectionStat) {
        self.totals.add(&stat);
        self.stats.push(stat);
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Per-database totals, ordered by first appearance.
    pub fn database_totals(&self) -> Vec<DatabaseTotals> {
        let mut grouped: Vec<DatabaseTotals> = Vec::new();
        for stat in &self.stats {
            let index = match grouped.iter().position(|group| group.database == stat.database) {
                Some(index) => index,
                None => {
                    grouped.push(DatabaseTotals {
                        database: stat.database.clone(),
                        collection_count: 0,
                        totals: SummaryTotals::default(),
                    });
                    grouped.len() - 1
                }
            };
            grouped[index].collection_count += 1;
            grouped[index].totals.add(stat);
        }
        grouped
    }
}
