use collection_stats_config::Config;
use collection_stats_gatherer::{
    connection_uri,
    report,
    CollectedStats,
    Headroom,
    MemoryProvider,
    MongoHandle,
    StatsCollector,
    StatsError,
    SystemMemory,
    TimeoutHandle,
};
use eyre::{
    Context as _,
    Result,
};

pub struct App {
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn run(self) -> Result<()> {
        let timeout = self.config.query_timeout()?;
        let credentials = self.config.credentials();
        let uri = connection_uri(
            &self.config.host,
            self.config.port,
            credentials.map(|(user, _)| user),
            credentials.map(|(_, password)| password),
        )?;

        info!("Connecting to {}:{}", self.config.host, self.config.port);
        let handle = tokio::time::timeout(timeout, MongoHandle::connect(&uri))
            .await
            .map_err(|_| StatsError::Timeout {
                operation: format!("Connecting to {}:{}", self.config.host, self.config.port),
                after: timeout,
            })??;
        let handle = TimeoutHandle::new(handle, timeout);

        let collected = StatsCollector::new(&handle)
            .collect(&self.config.database_names())
            .await
            .wrap_err("Collecting collection statistics failed")?;

        let memory = self.config.is_loopback_host().then_some(&SystemMemory as &dyn MemoryProvider);
        println!();
        println!("{}", self.report(&collected, memory)?);

        Ok(())
    }

    /// Collection table, summary, optional per-database totals and, when a
    /// memory provider is given, the memory headroom estimate.
    fn report(&self, collected: &CollectedStats, memory: Option<&dyn MemoryProvider>) -> Result<String> {
        let mut output = report::render(
            &collected.stats,
            &collected.totals,
            self.config.sort,
            self.config.descending,
        )?;

        if self.config.by_database {
            output.push_str("\n\n");
            output.push_str(&report::render_database_breakdown(collected));
        }

        if let Some(provider) = memory {
            match provider.host_memory() {
                Ok(memory) => {
                    let headroom = Headroom::estimate(&memory, collected.totals.total_index_size_bytes);
                    output.push_str("\n\n");
                    output.push_str(&headroom.render());
                }
                Err(e) => warn!("Skipping memory headroom estimate: {}", e),
            }
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collection_stats_gatherer::{
        CollectionStat,
        Column,
        HostMemory,
    };

    const GIB: u64 = 1 << 30;

    struct FixedMemory(Option<HostMemory>);

    impl MemoryProvider for FixedMemory {
        fn host_memory(&self) -> Result<HostMemory, StatsError> {
            self.0
                .ok_or_else(|| StatsError::HostMemory("not available in tests".to_string()))
        }
    }

    fn collected() -> CollectedStats {
        let mut collected = CollectedStats::default();
        for (database, name, size, index_size) in [
            ("shop", "orders", 300, GIB),
            ("shop", "users", 100, 0),
            ("blog", "posts", 0, 0),
        ] {
            collected.push(CollectionStat {
                database: database.to_string(),
                namespace: format!("{database}.{name}"),
                document_count: 1,
                size_bytes: size,
                avg_object_size_bytes: size,
                index_count: 1,
                total_index_size_bytes: index_size,
            });
        }
        collected
    }

    fn app(configure: impl FnOnce(&mut Config)) -> App {
        let mut config = Config::default();
        configure(&mut config);
        App::new(config)
    }

    #[test]
    fn report_without_memory_ends_with_the_summary() {
        let output = app(|_| {}).report(&collected(), None).unwrap();

        assert!(output.ends_with("Total Index Size: 1.00G"));
        assert!(!output.contains("RAM Headroom"));
    }

    #[test]
    fn report_sorts_by_the_configured_column() {
        let output = app(|config| {
            config.sort = Column::SizePercent;
            config.descending = true;
        })
        .report(&collected(), None)
        .unwrap();

        let orders = output.find("shop.orders").unwrap();
        let users = output.find("shop.users").unwrap();
        let posts = output.find("blog.posts").unwrap();
        assert!(orders < users && users < posts);
        assert!(output.contains("75.0%"));
    }

    #[test]
    fn report_appends_headroom_when_memory_is_known() {
        let memory = FixedMemory(Some(HostMemory::from_total_and_free(16 * GIB, 4 * GIB)));
        let output = app(|_| {}).report(&collected(), Some(&memory)).unwrap();

        assert!(output.ends_with(
            "RAM Headroom: 3.00G\n\
             RAM Used: 12.00G (75.0%)\n\
             Available RAM Headroom: 768.00M"
        ));
    }

    #[test]
    fn report_skips_headroom_when_memory_is_unavailable() {
        let output = app(|_| {}).report(&collected(), Some(&FixedMemory(None))).unwrap();
        assert!(!output.contains("RAM Headroom"));
    }

    #[test]
    fn report_includes_database_breakdown_on_request() {
        let output = app(|config| config.by_database = true)
            .report(&collected(), None)
            .unwrap();

        assert!(output.contains("Database"));
        assert!(output.contains("Collections"));
    }
}
