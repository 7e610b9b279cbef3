//! Elastic Alert CLI
//!
//! Compiles one alert from a request file and prints the resulting message.

use std::path::PathBuf;

use clap::Parser;
use elastic_alert::{load_config, load_request, Config};
use tracing::Level;

#[derive(Parser)]
#[command(name = "elastic-alert")]
#[command(about = "Compile matched Elasticsearch hits into an alert receiver payload")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the compile request (rule, match, sample, timestamps)
    #[arg(short, long)]
    input: PathBuf,

    /// Generator URL (overrides config file)
    #[arg(long)]
    generator_url: Option<String>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, input={:?}, log_level={:?}",
        args.config,
        args.input,
        args.log_level
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    if let Some(generator_url) = args.generator_url {
        config.generator_url = generator_url;
    }

    let request = load_request(&args.input)?;
    tracing::info!(
        "Compiling alert for rule '{}' from index '{}'",
        request.rule.unique_id,
        request.sample.index
    );

    let output = elastic_alert::run(&config, &request).await?;
    println!("{}", serde_json::to_string(&output)?);

    Ok(())
}
