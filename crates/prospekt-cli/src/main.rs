mod output;
mod pipeline;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use prospekt_core::OrchestratorConfig;

#[derive(Debug, Parser)]
#[command(name = "prospekt")]
#[command(about = "Collect currently valid hypermarket brochures from prospektmaschine.de")]
struct Cli {
    /// Number of concurrent requests
    #[arg(
        short = 'c',
        long,
        env = "PROSPEKT_CONCURRENT",
        default_value_t = 5,
        value_parser = clap::value_parser!(i64).range(1..)
    )]
    concurrent: i64,

    /// Number of attempts for each request
    #[arg(
        short = 'r',
        long,
        env = "PROSPEKT_RETRIES",
        default_value_t = 3,
        value_parser = clap::value_parser!(i64).range(1..)
    )]
    retries: i64,

    /// Request timeout in seconds (0 disables the deadline)
    #[arg(
        short = 't',
        long,
        env = "PROSPEKT_TIMEOUT",
        default_value_t = 5.0,
        allow_hyphen_values = true,
        value_parser = parse_non_negative_secs
    )]
    timeout: f64,

    /// Delay between retries in seconds
    #[arg(
        short = 'd',
        long,
        env = "PROSPEKT_DELAY",
        default_value_t = 1.0,
        allow_hyphen_values = true,
        value_parser = parse_non_negative_secs
    )]
    delay: f64,

    /// Output file for the brochure JSON
    #[arg(short = 'o', long, env = "PROSPEKT_OUTPUT", default_value = "output.json")]
    output: PathBuf,

    /// Catalog base URL; overrides PROSPEKT_BASE_URL
    #[arg(long)]
    base_url: Option<String>,
}

fn parse_non_negative_secs(raw: &str) -> Result<f64, String> {
    let secs: f64 = raw
        .parse()
        .map_err(|_| format!("\"{raw}\" is not a number of seconds"))?;
    if !secs.is_finite() || secs < 0.0 {
        return Err("must be a non-negative number".to_string());
    }
    Ok(secs)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = prospekt_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let fetch_config =
        OrchestratorConfig::from_secs(cli.concurrent, cli.retries, cli.timeout, cli.delay)?;
    if let Some(base_url) = cli.base_url {
        config.base_url = prospekt_core::parse_base_url(&base_url)?;
    }

    let summary = pipeline::run(&config, fetch_config, &cli.output).await?;
    println!(
        "wrote {} brochures from {}/{} shops to {}",
        summary.records,
        summary.fetched,
        summary.shops,
        cli.output.display()
    );
    if !summary.skipped.is_empty() {
        println!("skipped shops: {}", summary.skipped.join(", "));
    }

    Ok(())
}
