use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::{
    Coordinate, LocationDetails, LookupError,
    model::AddressComponents,
    provider::{ReverseGeocoder, truncate_body},
};

const DEFAULT_BASE_URL: &str = "https://api.opencagedata.com";

#[derive(Debug, Clone)]
pub struct OpenCageClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenCageClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, LookupError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[derive(Debug, Deserialize)]
struct OcResult {
    #[serde(default)]
    components: AddressComponents,
}

#[derive(Debug, Deserialize)]
struct OcStatus {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OcResponse {
    #[serde(default)]
    results: Vec<OcResult>,
}

#[derive(Debug, Deserialize)]
struct OcErrorResponse {
    status: Option<OcStatus>,
}

impl OcResponse {
    fn into_details(self) -> Result<LocationDetails, LookupError> {
        self.results
            .into_iter()
            .next()
            .map(|first| LocationDetails::from(first.components))
            .ok_or(LookupError::NoResults)
    }
}

fn provider_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<OcErrorResponse>(body)
        .ok()
        .and_then(|e| e.status)
        .and_then(|s| s.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string())
}

#[async_trait]
impl ReverseGeocoder for OpenCageClient {
    async fn fetch_location_details(
        &self,
        coordinate: Coordinate,
    ) -> Result<LocationDetails, LookupError> {
        let url = format!("{}/geocode/v1/json", self.base_url);
        // Space-separated pair; it goes out on the wire as `lat+lon`.
        let query = format!("{} {}", coordinate.lat, coordinate.lng);
        tracing::debug!(lat = coordinate.lat, lng = coordinate.lng, "reverse geocoding");

        let res = self
            .http
            .get(&url)
            .query(&[("q", query.as_str()), ("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| LookupError::Network(e.to_string()))?;

        if !status.is_success() {
            tracing::debug!(%status, body = %truncate_body(&body), "OpenCage rejected request");
            return Err(LookupError::provider(provider_message(status, &body)));
        }

        let parsed: OcResponse = serde_json::from_str(&body)?;
        parsed.into_details()
    }
}
