use crate::{
    collectors::database::{
        DatabaseHandle,
        HandleFuture,
    },
    error::StatsError,
    metrics::CollStatsRecord,
};
use mongodb::{
    bson::{
        doc,
        from_document,
    },
    Client,
};
use url::Url;

/// Build the connection URI for `host:port`.
///
/// Credentials are only added when both user and password are given. They are
/// percent-encoded by [`Url`]. Reads prefer secondaries so the scan stays off
/// the primary where possible.
pub fn connection_uri(host: &str, port: u16, user: Option<&str>, password: Option<&str>) -> Result<Url, StatsError> {
    let host = if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]")
    } else {
        host.to_string()
    };

    let mut uri = Url::parse(&format!("mongodb://{host}:{port}/"))
        .map_err(|e| StatsError::connection(format!("{host}:{port}"), e))?;

    if let (Some(user), Some(password)) = (user, password) {
        if !user.is_empty() && !password.is_empty() {
            let credentials = uri
                .set_username(user)
                .and_then(|()| uri.set_password(Some(password)));
            if credentials.is_err() {
                return Err(StatsError::connection(
                    format!("{host}:{port}"),
                    "credentials cannot be added to the connection URI",
                ));
            }
        }
    }

    uri.query_pairs_mut()
        .append_pair("readPreference", "secondaryPreferred");

    Ok(uri)
}

/// [`DatabaseHandle`] backed by the official MongoDB driver
pub struct MongoHandle {
    client: Client,
}

impl MongoHandle {
    /// Connect and verify the deployment answers a `ping`.
    pub async fn connect(uri: &Url) -> Result<Self, StatsError> {
        let target = redacted(uri);
        debug!("Connecting to {}", target);

        let client = Client::with_uri_str(uri.as_str())
            .await
            .map_err(|e| StatsError::connection(&target, e))?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StatsError::connection(&target, e))?;

        info!("Connected to {}", target);
        Ok(Self { client })
    }
}

impl DatabaseHandle for MongoHandle {
    fn list_database_names(&self) -> HandleFuture<'_, Vec<String>> {
        Box::pin(async move {
            self.client
                .list_database_names()
                .await
                .map_err(|e| StatsError::query("admin", e))
        })
    }

    fn list_collection_names<'a>(&'a self, database: &'a str) -> HandleFuture<'a, Vec<String>> {
        Box::pin(async move {
            // Views are listed too but cannot answer collStats.
            self.client
                .database(database)
                .list_collection_names()
                .filter(doc! { "type": "collection" })
                .await
                .map_err(|e| StatsError::query(database, e))
        })
    }

    fn collection_stats<'a>(&'a self, database: &'a str, collection: &'a str) -> HandleFuture<'a, CollStatsRecord> {
        Box::pin(async move {
            let namespace = format!("{database}.{collection}");
            let reply = self
                .client
                .database(database)
                .run_command(doc! { "collStats": collection })
                .await
                .map_err(|e| StatsError::query(&namespace, e))?;

            from_document(reply).map_err(|e| StatsError::query(namespace, e))
        })
    }
}

/// URI without credentials, safe to log
fn redacted(uri: &Url) -> String {
    let mut uri = uri.clone();
    let _ = uri.set_password(None);
    let _ = uri.set_username("");
    uri.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builds_uri_without_credentials() {
        let uri = connection_uri("db.internal", 27017, None, None).unwrap();
        assert_eq!(uri.as_str(), "mongodb://db.internal:27017/?readPreference=secondaryPreferred");
    }

    #[test]
    fn requires_both_user_and_password() {
        let uri = connection_uri("localhost", 27018, Some("admin"), None).unwrap();
        assert_eq!(uri.username(), "");

        let uri = connection_uri("localhost", 27018, Some("admin"), Some("")).unwrap();
        assert_eq!(uri.username(), "");
    }

    #[test]
    fn percent_encodes_credentials() {
        let uri = connection_uri("localhost", 27017, Some("ops"), Some("p@ss:word")).unwrap();
        assert_eq!(uri.username(), "ops");
        assert_eq!(uri.password(), Some("p%40ss%3Aword"));
        assert_eq!(uri.host_str(), Some("localhost"));
    }

    #[test]
    fn brackets_ipv6_hosts() {
        let uri = connection_uri("::1", 27017, None, None).unwrap();
        assert_eq!(uri.host_str(), Some("[::1]"));
        assert_eq!(uri.port(), Some(27017));
    }

    #[test]
    fn redacts_credentials_for_logging() {
        let uri = connection_uri("localhost", 27017, Some("ops"), Some("secret")).unwrap();
        let shown = redacted(&uri);
        assert!(!shown.contains("secret"));
        assert!(!shown.contains("ops"));
    }
}
