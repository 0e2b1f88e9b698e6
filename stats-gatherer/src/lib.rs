//! # Collection Stats Gatherer
//!
//! Collects size and index statistics for every collection of a MongoDB
//! deployment and renders them as a sorted table for capacity planning.
//!
//! ## Architecture
//!
//! - **`units`**: byte counts to display strings (`"1.00G"`) and back
//! - **`metrics`**: per-collection stats and running totals
//! - **`collectors`**: the `DatabaseHandle` seam, the MongoDB implementation and the `StatsCollector`
//! - **`report`**: row construction, sort keys, table and summary rendering
//! - **`host`**: memory headroom estimation when running on the database host
//!
//! Collection and rendering are two passes: percentages are relative to the
//! grand total, which is only final once every collection was queried.

#[macro_use]
extern crate tracing;

pub mod collectors;
pub mod error;
pub mod host;
pub mod metrics;
pub mod report;
pub mod units;

pub use collectors::*;
pub use error::StatsError;
pub use host::{
    is_loopback_host,
    Headroom,
    HostMemory,
    MemoryProvider,
    SystemMemory,
};
pub use metrics::*;
pub use report::Column;
