use crate::{
    collectors::DatabaseHandle,
    error::StatsError,
    metrics::{
        CollectedStats,
        CollectionStat,
    },
};

/// Operational database holding replication state. Never reported.
pub const RESERVED_DATABASE: &str = "local";

/// Collects per-collection statistics and folds them into running totals
pub struct StatsCollector<'a> {
    handle: &'a dyn DatabaseHandle,
}

impl<'a> StatsCollector<'a> {
    pub fn new(handle: &'a dyn DatabaseHandle) -> Self {
        Self { handle }
    }

    /// Collect stats for `database_names`, or for every database on the
    /// deployment when the list is empty.
    ///
    /// Stops at the first failing query; no partial result is returned.
    pub async fn collect(&self, database_names: &[String]) -> Result<CollectedStats, StatsError> {
        let databases = if database_names.is_empty() {
            let names = self.handle.list_database_names().await?;
            debug!("Resolved {} databases from the deployment", names.len());
            names
        } else {
            database_names.to_vec()
        };

        let mut collected = CollectedStats::default();

        for database in databases.iter().filter(|name| name.as_str() != RESERVED_DATABASE) {
            let collections = self.handle.list_collection_names(database).await?;
            debug!("Database {} has {} collections", database, collections.len());

            for collection in &collections {
                info!("Checking DB: {}.{}", database, collection);
                let record = self.handle.collection_stats(database, collection).await?;
                collected.push(CollectionStat::from_record(database.as_str(), record));
            }
        }

        info!(
            collections = collected.stats.len(),
            documents = collected.totals.total_document_count,
            "Collection finished"
        );

        Ok(collected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        collectors::database::fake::FakeDeployment,
        metrics::SummaryTotals,
    };
    use pretty_assertions::assert_eq;

    fn deployment() -> FakeDeployment {
        FakeDeployment::new()
            .with_database("local", &[("oplog.rs", 1000, 1 << 30, Some(4096))])
            .with_database("shop", &[("orders", 30, 300, Some(64)), ("users", 10, 100, None)])
            .with_database("blog", &[("posts", 5, 50, Some(16))])
    }

    #[tokio::test]
    async fn resolves_all_databases_when_none_are_given() {
        let handle = deployment();
        let collected = StatsCollector::new(&handle).collect(&[]).await.unwrap();

        let namespaces: Vec<_> = collected.stats.iter().map(|s| s.namespace.as_str()).collect();
        assert_eq!(namespaces, vec!["shop.orders", "shop.users", "blog.posts"]);
        assert_eq!(handle.calls()[0], "listDatabases");
    }

    #[tokio::test]
    async fn never_reports_the_reserved_database() {
        let handle = deployment();
        let collected = StatsCollector::new(&handle)
            .collect(&["local".to_string(), "blog".to_string()])
            .await
            .unwrap();

        assert!(collected.stats.iter().all(|s| s.database != RESERVED_DATABASE));
        assert!(!handle.calls().iter().any(|call| call.contains("local")));
        assert_eq!(collected.stats.len(), 1);
    }

    #[tokio::test]
    async fn only_queries_the_requested_database() {
        let handle = deployment();
        let collected = StatsCollector::new(&handle)
            .collect(&["blog".to_string()])
            .await
            .unwrap();

        assert_eq!(
            handle.calls(),
            vec!["listCollections blog".to_string(), "collStats blog.posts".to_string()]
        );
        assert_eq!(collected.stats[0].namespace, "blog.posts");
    }

    #[tokio::test]
    async fn accumulates_totals_with_missing_index_sizes_as_zero() {
        let handle = deployment();
        let collected = StatsCollector::new(&handle).collect(&[]).await.unwrap();

        assert_eq!(
            collected.totals,
            SummaryTotals {
                total_document_count: 45,
                total_data_size_bytes: 450,
                total_index_size_bytes: 80,
            }
        );
        let users = &collected.stats[1];
        assert_eq!(users.index_count, 0);
        assert_eq!(users.total_index_size_bytes, 0);
        assert_eq!(users.avg_object_size_bytes, 10);
    }

    #[tokio::test]
    async fn a_failing_collection_aborts_the_run() {
        let handle = deployment().failing_on("shop.users");
        let err = StatsCollector::new(&handle).collect(&[]).await.unwrap_err();

        match err {
            StatsError::Query { namespace, .. } => assert_eq!(namespace, "shop.users"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!handle.calls().iter().any(|call| call.contains("blog")));
    }

    #[tokio::test]
    async fn an_empty_deployment_yields_zero_totals() {
        let handle = FakeDeployment::new();
        let collected = StatsCollector::new(&handle).collect(&[]).await.unwrap();

        assert!(collected.is_empty());
        assert_eq!(collected.totals, SummaryTotals::default());
    }
}
