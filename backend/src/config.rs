//! Configuration management for the claim evaluator
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with CLAIM_ prefix

use std::time::Duration;

use config::{ConfigError, Environment, File};
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Weather history API configuration
    pub weather: WeatherConfig,

    /// Reverse geocoding API configuration
    pub geocoding: GeocodingConfig,

    /// Ideal profile catalog configuration
    pub profiles: ProfilesConfig,

    /// Evaluation tuning
    pub evaluation: EvaluationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Weather history API base URL
    pub api_endpoint: String,

    /// Weather history API key
    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeocodingConfig {
    /// Reverse geocoding API base URL
    pub api_endpoint: String,

    /// Optional API key, sent as `api_key` when present
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProfilesConfig {
    /// URL returning the full ideal profile catalog
    pub catalog_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EvaluationConfig {
    /// Sliding window size, in samples
    pub check_intervals: usize,

    /// Pause before each weather history request, in milliseconds
    pub request_delay_ms: u64,

    /// Probability at or below which a claim is valid
    pub validity_threshold: f64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("CLAIM_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("weather.api_endpoint", "https://api.weatherapi.com/v1")?
            .set_default("geocoding.api_endpoint", "https://geocode.maps.co")?
            .set_default(
                "profiles.catalog_url",
                "https://api.npoint.io/8fb36c3096dbc24926a7",
            )?
            .set_default("evaluation.check_intervals", 5)?
            .set_default("evaluation.request_delay_ms", 100)?
            .set_default("evaluation.validity_threshold", 70.0)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CLAIM_ prefix)
            .add_source(
                Environment::with_prefix("CLAIM")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Reject a blank credential or an unusable evaluation setting
    pub fn validate(&self) -> AppResult<()> {
        if self.weather.api_key.trim().is_empty() {
            return Err(AppError::Configuration(
                "weather.api_key is required (set CLAIM_WEATHER__API_KEY)".to_string(),
            ));
        }
        shared::validate_check_intervals(self.evaluation.check_intervals)
            .map_err(|e| AppError::Configuration(e.to_string()))?;
        shared::validate_threshold(self.evaluation.validity_threshold)
            .map_err(|e| AppError::Configuration(e.to_string()))?;
        Ok(())
    }
}

impl EvaluationConfig {
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            check_intervals: 5,
            request_delay_ms: 100,
            validity_threshold: shared::DEFAULT_VALIDITY_THRESHOLD,
        }
    }
}
