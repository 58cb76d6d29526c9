//! Reverse geocoding client
//!
//! Resolves insured land coordinates to a region name through a Nominatim-style
//! `/reverse` endpoint.

use reqwest::{Client, Request};
use serde::Deserialize;
use shared::GpsCoordinates;

use super::{ensure_success, ReverseGeocoder};
use crate::error::{AppError, AppResult};

const SERVICE: &str = "geocoding";

/// Reverse geocoding API client
#[derive(Clone)]
pub struct GeocodingClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

/// Reverse geocoding response
#[derive(Debug, Deserialize)]
pub struct ReverseGeocodeResponse {
    #[serde(default)]
    pub address: Address,
}

/// Address components; only the ones used for region fallback are kept
#[derive(Debug, Default, Deserialize)]
pub struct Address {
    pub state: Option<String>,
    pub state_district: Option<String>,
    pub country: Option<String>,
}

impl Address {
    /// First non-empty of state, state district and country
    pub fn region_name(&self) -> Option<&str> {
        [&self.state, &self.state_district, &self.country]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .map(str::trim)
            .find(|part| !part.is_empty())
    }
}

impl GeocodingClient {
    /// Create a new GeocodingClient
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    /// Build the `/reverse` request; `api_key` is only sent when configured
    fn reverse_request(&self, location: &GpsCoordinates) -> AppResult<Request> {
        let url = format!("{}/reverse", self.base_url.trim_end_matches('/'));

        let mut query = vec![
            ("lat", location.latitude.to_string()),
            ("lon", location.longitude.to_string()),
        ];
        if let Some(key) = &self.api_key {
            query.push(("api_key", key.clone()));
        }

        self.client
            .get(&url)
            .query(&query)
            .build()
            .map_err(|e| AppError::collaborator(SERVICE, format!("invalid request: {}", e)))
    }

    /// Fetch the address for a coordinate pair
    pub async fn reverse(&self, location: &GpsCoordinates) -> AppResult<Address> {
        let request = self.reverse_request(location)?;
        tracing::debug!(lat = %location.latitude, lon = %location.longitude, "reverse geocoding");

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| AppError::collaborator(SERVICE, format!("request failed: {}", e)))?;

        let data: ReverseGeocodeResponse = ensure_success(SERVICE, response)
            .await?
            .json()
            .await
            .map_err(|e| AppError::collaborator(SERVICE, format!("failed to parse response: {}", e)))?;

        Ok(data.address)
    }
}

impl ReverseGeocoder for GeocodingClient {
    async fn region_name(&self, location: &GpsCoordinates) -> AppResult<String> {
        let address = self.reverse(location).await?;
        address
            .region_name()
            .map(str::to_string)
            .ok_or_else(|| {
                AppError::collaborator(SERVICE, "address has no state, state_district or country")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Address {
        serde_json::from_str::<ReverseGeocodeResponse>(json)
            .unwrap()
            .address
    }

    #[test]
    fn test_region_prefers_state() {
        let address = parse(
            r#"{"address": {"state": "Jammu and Kashmir", "state_district": "Kishtwar", "country": "India"}}"#,
        );
        assert_eq!(address.region_name(), Some("Jammu and Kashmir"));
    }

    #[test]
    fn test_region_falls_back_to_state_district() {
        let address = parse(r#"{"address": {"state": "", "state_district": "Ladakh", "country": "India"}}"#);
        assert_eq!(address.region_name(), Some("Ladakh"));
    }

    #[test]
    fn test_region_falls_back_to_country() {
        let address = parse(r#"{"address": {"country": "India", "postcode": "182204"}}"#);
        assert_eq!(address.region_name(), Some("India"));
    }

    fn location() -> GpsCoordinates {
        GpsCoordinates::new("33.2778".parse().unwrap(), "75.34125".parse().unwrap())
    }

    fn query_pairs(request: &Request) -> Vec<(String, String)> {
        request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_reverse_request_without_api_key() {
        let client = GeocodingClient::new("https://geocode.test".to_string(), None);
        let request = client.reverse_request(&location()).unwrap();

        assert_eq!(request.url().path(), "/reverse");
        assert_eq!(
            query_pairs(&request),
            [
                ("lat".to_string(), "33.2778".to_string()),
                ("lon".to_string(), "75.34125".to_string()),
            ]
        );
    }

    #[test]
    fn test_reverse_request_with_api_key() {
        let client = GeocodingClient::new("https://geocode.test/".to_string(), Some("k123".to_string()));
        let request = client.reverse_request(&location()).unwrap();

        let pairs = query_pairs(&request);
        assert_eq!(pairs.len(), 3);
        assert!(pairs.contains(&("api_key".to_string(), "k123".to_string())));
        assert_eq!(request.url().path(), "/reverse");
    }

    #[test]
    fn test_region_missing() {
        assert_eq!(parse(r#"{"address": {}}"#).region_name(), None);
        assert_eq!(parse(r#"{"error": "Unable to geocode"}"#).region_name(), None);
    }
}
