//! # Collectors Module
//!
//! Data collection for the report.
//!
//! ## Architecture
//!
//! - **`DatabaseHandle` trait**: the queries the collector needs (list databases, list collections, `collStats`)
//! - **`MongoHandle`**: `DatabaseHandle` backed by the MongoDB driver
//! - **`TimeoutHandle`**: bounds every call of another handle by a timeout
//! - **`StatsCollector`**: walks databases and collections in order and accumulates totals
//!
//! Collection is strictly sequential: one query is in flight at a time and any
//! failure aborts the run.

pub mod database;
pub mod mongo;
pub mod stats_collector;

// Re-export the main types for easy access
pub use database::{
    DatabaseHandle,
    HandleFuture,
    TimeoutHandle,
};
pub use mongo::{
    connection_uri,
    MongoHandle,
};
pub use stats_collector::{
    StatsCollector,
    RESERVED_DATABASE,
};
