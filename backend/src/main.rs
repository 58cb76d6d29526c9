//! Crop insurance claim evaluator - command line entry point
//!
//! Reads an insured land description, evaluates it against historical weather and
//! prints the verdict. Failures are logged and reported through the exit code.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crop_claim_backend::cli::{Cli, OutputFormat};
use crop_claim_backend::external::{GeocodingClient, IdealProfileClient, WeatherHistoryClient};
use crop_claim_backend::services::{ClaimEvaluator, EvaluationOptions};
use crop_claim_backend::{AppError, AppResult, Config};
use shared::InsuredLand;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "claim_eval=info,crop_claim_backend=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        tracing::error!(code = err.code(), "claim evaluation failed: {}", err);
        std::process::exit(err.exit_code());
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let mut config = Config::load()?;
    if let Some(check_intervals) = cli.check_intervals {
        config.evaluation.check_intervals = check_intervals;
    }
    config.validate()?;

    tracing::info!("Environment: {}", config.environment);

    let land: InsuredLand = serde_json::from_str(&std::fs::read_to_string(&cli.claim)?)?;
    land.validate()
        .map_err(|e| AppError::invalid_claim("land", format!("{}: {}", cli.claim.display(), e)))?;

    let evaluator = ClaimEvaluator::new(
        GeocodingClient::new(
            config.geocoding.api_endpoint.clone(),
            config.geocoding.api_key.clone(),
        ),
        WeatherHistoryClient::new(
            config.weather.api_key.clone(),
            config.weather.api_endpoint.clone(),
        ),
        IdealProfileClient::new(config.profiles.catalog_url.clone()),
        EvaluationOptions::from(&config.evaluation),
    );

    let assessment = evaluator.evaluate(&land).await?;

    match cli.format {
        OutputFormat::Text => println!("{}", assessment.summary()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&assessment)?),
    }

    Ok(())
}
