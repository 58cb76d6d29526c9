//! Weather history API client
//!
//! Integrates with WeatherAPI.com's `history.json` endpoint, one calendar day per
//! request, and converts its hourly observations into [`WeatherSample`]s.

use chrono::NaiveDate;
use reqwest::{Client, Request};
use serde::Deserialize;
use shared::{format_date, WeatherSample};

use super::{ensure_success, WeatherHistory};
use crate::error::{AppError, AppResult};

const SERVICE: &str = "weather-history";

/// Weather history API client
#[derive(Clone)]
pub struct WeatherHistoryClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// WeatherAPI.com history response
#[derive(Debug, Deserialize)]
struct HistoryResponse {
    forecast: HistoryForecast,
}

#[derive(Debug, Deserialize)]
struct HistoryForecast {
    #[serde(default)]
    forecastday: Vec<HistoryDay>,
}

#[derive(Debug, Deserialize)]
struct HistoryDay {
    #[serde(default)]
    hour: Vec<HourlyObservation>,
}

/// One hourly observation as returned by the API
#[derive(Debug, Default, Deserialize)]
struct HourlyObservation {
    temp_c: Option<f64>,
    temp_f: Option<f64>,
    wind_mph: Option<f64>,
    wind_kph: Option<f64>,
    precip_mm: Option<f64>,
    precip_in: Option<f64>,
    snow_cm: Option<f64>,
    humidity: Option<f64>,
    vis_km: Option<f64>,
    vis_miles: Option<f64>,
    will_it_rain: Option<f64>,
    chance_of_rain: Option<f64>,
    will_it_snow: Option<f64>,
    chance_of_snow: Option<f64>,
    uv: Option<f64>,
}

impl From<HourlyObservation> for WeatherSample {
    fn from(h: HourlyObservation) -> Self {
        // a single hourly reading is its own min, max and average
        WeatherSample {
            crop: None,
            maxtemp_c: h.temp_c,
            maxtemp_f: h.temp_f,
            mintemp_c: h.temp_c,
            mintemp_f: h.temp_f,
            avgtemp_c: h.temp_c,
            avgtemp_f: h.temp_f,
            maxwind_mph: h.wind_mph,
            maxwind_kph: h.wind_kph,
            totalprecip_mm: h.precip_mm,
            totalprecip_in: h.precip_in,
            totalsnow_cm: h.snow_cm,
            avgvis_km: h.vis_km,
            avgvis_miles: h.vis_miles,
            avghumidity: h.humidity,
            daily_will_it_rain: h.will_it_rain,
            daily_chance_of_rain: h.chance_of_rain,
            daily_will_it_snow: h.will_it_snow,
            daily_chance_of_snow: h.chance_of_snow,
            uv: h.uv,
        }
    }
}

impl HistoryResponse {
    /// Hourly samples of every returned day, in response order
    fn into_samples(self) -> Vec<WeatherSample> {
        self.forecast
            .forecastday
            .into_iter()
            .flat_map(|day| day.hour)
            .map(WeatherSample::from)
            .collect()
    }
}

impl WeatherHistoryClient {
    /// Create a new WeatherHistoryClient against `base_url`
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    /// Build the `history.json` request for `location` on `date`
    fn history_request(&self, location: &str, date: NaiveDate) -> AppResult<Request> {
        let url = format!("{}/history.json", self.base_url.trim_end_matches('/'));
        let dt = format_date(date);

        self.client
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("q", location), ("dt", dt.as_str())])
            .build()
            .map_err(|e| AppError::collaborator(SERVICE, format!("invalid request: {}", e)))
    }

    /// Fetch the hourly history for `location` on `date`
    pub async fn get_history(&self, location: &str, date: NaiveDate) -> AppResult<Vec<WeatherSample>> {
        let request = self.history_request(location, date)?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| AppError::collaborator(SERVICE, format!("request failed: {}", e)))?;

        let data: HistoryResponse = ensure_success(SERVICE, response)
            .await?
            .json()
            .await
            .map_err(|e| AppError::collaborator(SERVICE, format!("failed to parse history response: {}", e)))?;

        Ok(data.into_samples())
    }
}

impl WeatherHistory for WeatherHistoryClient {
    async fn hourly_samples(&self, region: &str, date: NaiveDate) -> AppResult<Vec<WeatherSample>> {
        self.get_history(region, date).await
    }
}
