use clap::Parser;
use env_logger::Env;
use yield_keywords::report::Reporter;
use yield_keywords::{Harvest, HarvestConfig, HarvestError};

mod args;
use args::Args;

/// Log level when RUST_LOG is unset; per-URL failures are logged at `warn`
const DEFAULT_LOG_FILTER: &str = "warn";

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(Env::default().default_filter_or(DEFAULT_LOG_FILTER)).init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        ::log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), HarvestError> {
    let mut config = match &args.config {
        Some(path) => HarvestConfig::from_file(path)?,
        None => HarvestConfig::default(),
    };
    args.apply(&mut config);
    config.apply_env();
    config.validate()?;

    ::log::info!("Starting keyword harvest for query: {}", config.query);
    let report_config = config.report.clone();
    let harvest = Harvest::with_config(config);

    let start_time = std::time::Instant::now();
    let search_results = harvest.search().await?;
    println!("Found {} search results.\n", search_results.len());

    let results = harvest.process(search_results).await?;
    ::log::info!(
        "Harvest complete - processed {} pages in {:.2} seconds",
        results.urls_processed,
        start_time.elapsed().as_secs_f64()
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    Reporter::new(report_config).report(&results)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, LevelFilter};

    #[test]
    fn test_default_filter_shows_skipped_urls() {
        // a variable no one sets stands in for an empty RUST_LOG
        let env = Env::new()
            .filter("YIELD_KEYWORDS_TEST_LOG_UNSET")
            .default_filter_or(DEFAULT_LOG_FILTER);
        let logger = env_logger::Builder::from_env(env).build();

        assert_eq!(logger.filter(), LevelFilter::Warn);
        assert!(Level::Warn <= logger.filter());
    }
}
