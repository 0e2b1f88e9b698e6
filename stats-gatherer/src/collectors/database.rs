use crate::{
    error::StatsError,
    metrics::CollStatsRecord,
};
use std::{
    future::Future,
    pin::Pin,
    time::Duration,
};

pub type HandleFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StatsError>> + Send + 'a>>;

/// The queries the collector needs from a database deployment.
///
/// Connection setup and authentication are the implementor's concern.
pub trait DatabaseHandle: Send + Sync {
    /// Names of all databases on the deployment
    fn list_database_names(&self) -> HandleFuture<'_, Vec<String>>;

    /// Names of all collections in `database`
    fn list_collection_names<'a>(&'a self, database: &'a str) -> HandleFuture<'a, Vec<String>>;

    /// Run `collStats` for a single collection
    fn collection_stats<'a>(&'a self, database: &'a str, collection: &'a str) -> HandleFuture<'a, CollStatsRecord>;
}

/// Bounds every call of the wrapped handle by a fixed timeout.
///
/// A hung query would otherwise stall the whole run.
pub struct TimeoutHandle<H> {
    inner: H,
    timeout: Duration,
}

impl<H: DatabaseHandle> TimeoutHandle<H> {
    pub fn new(inner: H, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    async fn bounded<T>(
        &self,
        operation: impl FnOnce() -> String,
        future: HandleFuture<'_, T>,
    ) -> Result<T, StatsError> {
        match tokio::time::timeout(self.timeout, future).await {
            Ok(result) => result,
            Err(_) => Err(StatsError::Timeout {
                operation: operation(),
                after: self.timeout,
            }),
        }
    }
}

impl<H: DatabaseHandle> DatabaseHandle for TimeoutHandle<H> {
    fn list_database_names(&self) -> HandleFuture<'_, Vec<String>> {
        Box::pin(self.bounded(|| "listDatabases".to_string(), self.inner.list_database_names()))
    }

    fn list_collection_names<'a>(&'a self, database: &'a str) -> HandleFuture<'a, Vec<String>> {
        Box::pin(self.bounded(
            move || format!("listCollections on {database}"),
            self.inner.list_collection_names(database),
        ))
    }

    fn collection_stats<'a>(&'a self, database: &'a str, collection: &'a str) -> HandleFuture<'a, CollStatsRecord> {
        Box::pin(self.bounded(
            move || format!("collStats on {database}.{collection}"),
            self.inner.collection_stats(database, collection),
        ))
    }
}
