use std::time::Duration;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while gathering or rendering collection statistics.
///
/// Every variant is fatal for the run: there are no retries and no partial
/// reports, since percentages require complete totals.
#[derive(thiserror::Error, Debug)]
pub enum StatsError {
    #[error("Cannot reach the database at {target}: {source}")]
    Connection {
        target: String,
        #[source]
        source: BoxError,
    },

    #[error("Query against {namespace} failed: {source}")]
    Query {
        namespace: String,
        #[source]
        source: BoxError,
    },

    #[error("Malformed {kind} value: {input:?}")]
    Format { kind: &'static str, input: String },

    #[error("{operation} did not complete within {}", humanize(.after))]
    Timeout { operation: String, after: Duration },

    #[error("Host memory statistics are unavailable: {0}")]
    HostMemory(String),
}

impl StatsError {
    pub fn connection(target: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Connection {
            target: target.into(),
            source: source.into(),
        }
    }

    pub fn query(namespace: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Query {
            namespace: namespace.into(),
            source: source.into(),
        }
    }

    pub(crate) fn format(kind: &'static str, input: &str) -> Self {
        Self::Format {
            kind,
            input: input.to_string(),
        }
    }
}

fn humanize(duration: &Duration) -> String {
    format!("{:.1}s", duration.as_secs_f64())
}
