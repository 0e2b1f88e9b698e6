#[macro_use]
extern crate tracing;

mod app_config;
mod args;

use app_config::AppConfig;
pub use app_config::get_config_dir;
pub use args::Args;
use collection_stats_gatherer::{
    is_loopback_host,
    Column,
};
use color_eyre::Result;
use eyre::Context as _;
use serde::{
    Deserialize,
    Serialize,
};
use std::{
    path::Path,
    time::Duration,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(flatten, skip_serializing)]
    app_config: AppConfig,
    pub host: String,
    pub port: u16,
    /// Restrict the report to one database; all databases when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    #[serde(default)]
    pub sort: Column,
    #[serde(default)]
    pub descending: bool,
    pub query_timeout: String,
    #[serde(default)]
    pub by_database: bool,
}

const DEFAULT_CONFIG: &str = include_str!("default-config.yaml");

impl Default for Config {
    fn default() -> Self {
        serde_yml::from_str(DEFAULT_CONFIG).expect("Failed to parse default config")
    }
}

impl Config {
    /// Layer the embedded defaults, the config file and the command line, in
    /// increasing precedence.
    ///
    /// The config file is `config.yaml` in [`get_config_dir`] unless `--config`
    /// names one explicitly, in which case it must exist.
    pub fn new(args: Args) -> Result<Self, config::ConfigError> {
        let config_dir = get_config_dir();
        let mut builder = config::Config::builder()
            .set_default("config_dir", config_dir.to_string_lossy().to_string())?
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Yaml));

        let file = match &args.config {
            Some(path) => config::File::from(path.as_path()).required(true),
            None => config::File::from(config_dir.join("config.yaml")).required(false),
        };
        builder = builder.add_source(file.format(config::FileFormat::Yaml));

        builder = builder.add_source(args);

        let cfg: Self = builder.build()?.try_deserialize()?;
        debug!(host = %cfg.host, port = cfg.port, sort = %cfg.sort, "Configuration loaded");

        Ok(cfg)
    }

    pub fn config_dir(&self) -> &Path {
        &self.app_config.config_dir
    }

    pub fn query_timeout(&self) -> Result<Duration> {
        humantime::parse_duration(&self.query_timeout)
            .wrap_err_with(|| format!("Invalid query timeout '{}'", self.query_timeout))
    }

    /// Databases to report on. Empty means all.
    pub fn database_names(&self) -> Vec<String> {
        self.database
            .iter()
            .filter(|name| !name.is_empty())
            .cloned()
            .collect()
    }

    /// Credentials are only used when both user and password are set.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.user.as_deref(), self.password.as_deref()) {
            (Some(user), Some(password)) if !user.is_empty() && !password.is_empty() => Some((user, password)),
            _ => None,
        }
    }

    /// Memory headroom is only meaningful when the database runs on this host.
    pub fn is_loopback_host(&self) -> bool {
        is_loopback_host(&self.host)
    }
}
