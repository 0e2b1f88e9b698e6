use clap::Parser;
use collection_stats_gatherer::Column;
use std::path::PathBuf;

/// Prints size and index statistics for every collection of a MongoDB deployment.
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version = version(), about, long_about = None)]
pub struct Args {
    /// MongoDB host
    #[clap(short = 'H', long, env = "MONGO_HOST", value_name = "HOST")]
    pub host: Option<String>,

    /// MongoDB port
    #[clap(short = 'p', long, env = "MONGO_PORT", value_name = "PORT")]
    pub port: Option<u16>,

    /// Target database to generate statistics for. All if omitted.
    #[clap(short = 'd', long, value_name = "DATABASE")]
    pub database: Option<String>,

    /// Admin username if authentication is enabled
    #[clap(short = 'u', long, env = "MONGO_USER", value_name = "USER")]
    pub user: Option<String>,

    /// Admin password if authentication is enabled
    #[clap(long, env = "MONGO_PASSWORD", value_name = "PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Column to sort the table by
    #[clap(short = 's', long = "sort", value_name = "COLUMN", ignore_case = true)]
    pub sort: Option<Column>,

    /// Sort descending
    #[clap(short = 'r', long = "reverse", action)]
    pub descending: bool,

    /// Abort when a single database call takes longer than this (e.g. "30s", "2m")
    #[clap(long, value_name = "DURATION")]
    pub query_timeout: Option<String>,

    /// Additionally print totals per database
    #[clap(long, action)]
    pub by_database: bool,

    /// Read settings from this file instead of the default config directory
    #[clap(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[clap(short = 'v', long, action)]
    pub verbose: bool,
}

mod config_ext {
    use super::*;
    use config::{
        Map,
        Source,
        Value,
    };
    use std::collections::HashMap;

    impl Source for Args {
        fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
            Box::new((*self).clone())
        }

        fn collect(&self) -> Result<Map<String, Value>, config::ConfigError> {
            let mut cache = HashMap::<String, Value>::new();
            if let Some(host) = &self.host {
                cache.insert("host".to_string(), host.clone().into());
            }
            if let Some(port) = self.port {
                cache.insert("port".to_string(), i64::from(port).into());
            }
            if let Some(database) = &self.database {
                cache.insert("database".to_string(), database.clone().into());
            }
            if let Some(user) = &self.user {
                cache.insert("user".to_string(), user.clone().into());
            }
            if let Some(password) = &self.password {
                cache.insert("password".to_string(), password.clone().into());
            }
            if let Some(sort) = self.sort {
                cache.insert("sort".to_string(), sort.to_string().into());
            }
            if self.descending {
                cache.insert("descending".to_string(), true.into());
            }
            if let Some(query_timeout) = &self.query_timeout {
                cache.insert("query_timeout".to_string(), query_timeout.clone().into());
            }
            if self.by_database {
                cache.insert("by_database".to_string(), true.into());
            }
            Ok(cache)
        }
    }
}

pub fn version() -> String {
    let author = clap::crate_authors!();
    let config_dir_path = crate::get_config_dir().display().to_string();

    format!(
        "{}

Authors: {author}

Config directory: {config_dir_path}",
        clap::crate_version!()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_short_flags() {
        let args = Args::try_parse_from([
            "collection-stats",
            "-H",
            "db.internal",
            "-p",
            "27018",
            "-d",
            "shop",
            "-s",
            "index size",
            "-r",
        ])
        .unwrap();

        assert_eq!(args.host.as_deref(), Some("db.internal"));
        assert_eq!(args.port, Some(27018));
        assert_eq!(args.database.as_deref(), Some("shop"));
        assert_eq!(args.sort, Some(Column::IndexSize));
        assert!(args.descending);
    }

    #[test]
    fn rejects_unknown_sort_columns() {
        let result = Args::try_parse_from(["collection-stats", "--sort", "Size"]);
        assert!(result.is_err());
    }
}
