//! Error handling for the claim evaluator
//!
//! Every failure is surfaced to the entry point as a typed error with its own
//! process exit code. Nothing in the pipeline is retried or swallowed.

use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Input and configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid claim ({field}): {message}")]
    InvalidClaim { field: String, message: String },

    // External service errors
    #[error("{service} service error: {message}")]
    Collaborator { service: String, message: String },

    // Evaluation errors
    #[error("No ideal profile matches crop '{0}'")]
    NoMatchingProfile(String),

    #[error("Insufficient weather data: {0}")]
    InsufficientData(String),

    // Claim file errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Build a collaborator error for `service`
    pub fn collaborator(service: &str, message: impl Into<String>) -> Self {
        AppError::Collaborator {
            service: service.to_string(),
            message: message.into(),
        }
    }

    /// Build a claim validation error
    pub fn invalid_claim(field: &str, message: impl Into<String>) -> Self {
        AppError::InvalidClaim {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::InvalidClaim { .. } => "INVALID_CLAIM",
            AppError::Collaborator { .. } => "COLLABORATOR_ERROR",
            AppError::NoMatchingProfile(_) => "NO_MATCHING_PROFILE",
            AppError::InsufficientData(_) => "INSUFFICIENT_DATA",
            AppError::Io(_) => "IO_ERROR",
            AppError::Json(_) => "JSON_ERROR",
        }
    }

    /// Process exit code reported by `claim-eval`
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Configuration(_) => 2,
            AppError::InvalidClaim { .. } => 3,
            AppError::Collaborator { .. } => 4,
            AppError::NoMatchingProfile(_) => 5,
            AppError::InsufficientData(_) => 6,
            AppError::Io(_) | AppError::Json(_) => 7,
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

/// Result type alias for the evaluator
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_and_nonzero() {
        let errors = [
            AppError::Configuration("missing key".into()),
            AppError::invalid_claim("insuredFrom", "after insuredTo"),
            AppError::collaborator("geocoding", "timeout"),
            AppError::NoMatchingProfile("ragi".into()),
            AppError::InsufficientData("no samples".into()),
        ];
        let mut codes: Vec<i32> = errors.iter().map(AppError::exit_code).collect();
        assert!(codes.iter().all(|c| *c != 0));
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            AppError::collaborator("weather-history", "HTTP 401").to_string(),
            "weather-history service error: HTTP 401"
        );
        assert_eq!(
            AppError::NoMatchingProfile("ragi".into()).to_string(),
            "No ideal profile matches crop 'ragi'"
        );
        assert_eq!(AppError::InsufficientData("x".into()).code(), "INSUFFICIENT_DATA");
    }
}
