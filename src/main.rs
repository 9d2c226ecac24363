//! Weather Advisor entry point.
//!
//! Loads `.env` and the TOML config, applies environment overrides once,
//! initialises structured logging, builds the advisor and hands control
//! to the CLI.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use weather_advisor::advisor::Advisor;
use weather_advisor::config::AppConfig;
use weather_advisor::data::wttr::WttrClient;
use weather_advisor::data::ForecastProvider;
use weather_advisor::intent::IntentParser;

mod cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let cli = cli::Cli::parse();
    init_logging();

    let mut cfg = AppConfig::load_or_default(&cli.config)?;
    cfg.apply_env_overrides(|key| std::env::var(key).ok());

    let parser = IntentParser::from_config(&cfg.llm)?;
    let provider = WttrClient::new(&cfg.forecast)?;
    info!(
        extractors = ?parser.extractor_names(),
        forecast = %provider.source(),
        llm_model = %cfg.llm.model,
        default_location = cfg.advisor.default_location.as_deref().unwrap_or("-"),
        "Weather Advisor ready"
    );

    let advisor = Advisor::new(parser, Box::new(provider));
    cli.run(&advisor, &cfg).await
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("weather_advisor=info"));

    let json_logging = std::env::var("WEATHER_ADVISOR_LOG_JSON").is_ok();

    // Answers go to stdout; keep logs on stderr.
    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
