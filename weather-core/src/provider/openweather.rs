use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::{
    Coordinate, LookupError, WeatherSnapshot,
    icon::resolve_icon,
    provider::{WeatherLookup, truncate_body},
};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
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
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    #[serde(alias = "lng")]
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    /// Shift from UTC in seconds.
    timezone: i32,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    coord: OwCoord,
}

#[derive(Debug, Deserialize)]
struct OwErrorResponse {
    message: Option<String>,
}

impl OwCurrentResponse {
    fn into_snapshot(self) -> Result<WeatherSnapshot, LookupError> {
        let code = self
            .weather
            .first()
            .map(|w| w.icon.as_str())
            .ok_or_else(|| LookupError::UnexpectedParse("response has no weather entry".into()))?;

        Ok(WeatherSnapshot {
            temperature: self.main.temp.floor() as i32,
            humidity_pct: self.main.humidity,
            wind_speed_kmh: self.wind.speed,
            icon: resolve_icon(code),
            place_name: self.name,
            utc_offset_seconds: self.timezone,
            coordinate: Coordinate::new(self.coord.lat, self.coord.lon),
        })
    }
}

/// The provider's own `message`, or the HTTP reason phrase when it sent none.
fn provider_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<OwErrorResponse>(body)
        .ok()
        .and_then(|e| e.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string())
}

#[async_trait]
impl WeatherLookup for OpenWeatherClient {
    async fn fetch_weather(&self, place_name: &str) -> Result<WeatherSnapshot, LookupError> {
        let place_name = place_name.trim();
        if place_name.is_empty() {
            return Err(LookupError::UserInput);
        }

        let url = format!("{}/data/2.5/weather", self.base_url);
        tracing::debug!(%place_name, "requesting current weather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", place_name),
                ("units", "metric"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| LookupError::Network(e.to_string()))?;

        if !status.is_success() {
            tracing::debug!(%status, body = %truncate_body(&body), "OpenWeather rejected request");
            return Err(LookupError::provider(provider_message(status, &body)));
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;
        parsed.into_snapshot()
    }
}
