//! External API integrations
//!
//! The evaluator talks to three services through the traits below; the HTTP
//! clients in this module are the production implementations.

use std::future::Future;

use chrono::NaiveDate;
use shared::{GpsCoordinates, IdealProfile, WeatherSample};

use crate::error::AppResult;

pub mod geocoding;
pub mod profiles;
pub mod weather;

pub use geocoding::GeocodingClient;
pub use profiles::IdealProfileClient;
pub use weather::WeatherHistoryClient;

/// Turns coordinates into a region name the weather service understands
pub trait ReverseGeocoder {
    fn region_name(&self, location: &GpsCoordinates) -> impl Future<Output = AppResult<String>> + Send;
}

/// Hourly weather history for one region and one past day
pub trait WeatherHistory {
    fn hourly_samples(
        &self,
        region: &str,
        date: NaiveDate,
    ) -> impl Future<Output = AppResult<Vec<WeatherSample>>> + Send;
}

/// Catalog of ideal growing conditions, one entry per supported crop
pub trait IdealProfileCatalog {
    fn ideal_profiles(&self) -> impl Future<Output = AppResult<Vec<IdealProfile>>> + Send;
}

/// Turn a non-success response into a collaborator error carrying status and body
pub(crate) async fn ensure_success(
    service: &str,
    response: reqwest::Response,
) -> AppResult<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(crate::error::AppError::collaborator(
        service,
        format!("HTTP {} - {}", status, body),
    ))
}
