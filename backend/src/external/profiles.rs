//! Ideal profile catalog client

use reqwest::Client;
use shared::IdealProfile;

use super::{ensure_success, IdealProfileCatalog};
use crate::error::{AppError, AppResult};

const SERVICE: &str = "ideal-profiles";

/// Client for the ideal crop condition catalog
#[derive(Clone)]
pub struct IdealProfileClient {
    client: Client,
    catalog_url: String,
}

impl IdealProfileClient {
    pub fn new(catalog_url: String) -> Self {
        Self {
            client: Client::new(),
            catalog_url,
        }
    }

    /// Fetch every profile in the catalog
    pub async fn fetch_catalog(&self) -> AppResult<Vec<IdealProfile>> {
        let response = self
            .client
            .get(&self.catalog_url)
            .send()
            .await
            .map_err(|e| AppError::collaborator(SERVICE, format!("request failed: {}", e)))?;

        let body = ensure_success(SERVICE, response)
            .await?
            .text()
            .await
            .map_err(|e| AppError::collaborator(SERVICE, format!("failed to read response: {}", e)))?;

        parse_catalog(&body)
    }
}

impl IdealProfileCatalog for IdealProfileClient {
    async fn ideal_profiles(&self) -> AppResult<Vec<IdealProfile>> {
        self.fetch_catalog().await
    }
}

fn parse_catalog(body: &str) -> AppResult<Vec<IdealProfile>> {
    serde_json::from_str(body)
        .map_err(|e| AppError::collaborator(SERVICE, format!("failed to parse catalog: {}", e)))
}
