use clap::Parser;
use collection_stats::{
    init_errors,
    init_logging,
    App,
};
use collection_stats_config::{
    Args,
    Config,
};
use color_eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    init_errors()?;
    let args = Args::parse();
    init_logging(args.verbose)?;
    App::new(Config::new(args)?).run().await
}
