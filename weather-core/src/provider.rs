use crate::{
    Config, Coordinate, LocationDetails, LookupError, WeatherSnapshot,
    provider::{opencage::OpenCageClient, openweather::OpenWeatherClient},
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug, sync::Arc};

pub mod opencage;
pub mod openweather;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenWeather,
    OpenCage,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "openweather",
            ProviderId::OpenCage => "opencage",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::OpenWeather, ProviderId::OpenCage]
    }

    /// Environment variable that can inject this provider's credential.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "OPENWEATHER_API_KEY",
            ProviderId::OpenCage => "OPENCAGE_API_KEY",
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "openweather" => Ok(ProviderId::OpenWeather),
            "opencage" => Ok(ProviderId::OpenCage),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: openweather, opencage."
            )),
        }
    }
}

/// Current conditions by free-text place name.
#[async_trait]
pub trait WeatherLookup: Send + Sync + Debug {
    async fn fetch_weather(&self, place_name: &str) -> Result<WeatherSnapshot, LookupError>;
}

/// Administrative region for a coordinate.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync + Debug {
    async fn fetch_location_details(
        &self,
        coordinate: Coordinate,
    ) -> Result<LocationDetails, LookupError>;
}

fn require_api_key(id: ProviderId, config: &Config) -> anyhow::Result<String> {
    config.provider_api_key(id).map(str::to_owned).ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for provider '{id}'.\n\
                 Hint: run `cityweather configure {id}` or set {}.",
            id.api_key_env()
        )
    })
}

/// Construct the weather client from config.
pub fn weather_lookup_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherLookup>> {
    let id = ProviderId::OpenWeather;
    let api_key = require_api_key(id, config)?;

    let mut client = OpenWeatherClient::new(api_key, config.request_timeout())?;
    if let Some(base_url) = config.provider_base_url(id) {
        client = client.with_base_url(base_url);
    }

    Ok(Arc::new(client))
}

/// Construct the reverse geocoder from config.
pub fn reverse_geocoder_from_config(config: &Config) -> anyhow::Result<Arc<dyn ReverseGeocoder>> {
    let id = ProviderId::OpenCage;
    let api_key = require_api_key(id, config)?;

    let mut client = OpenCageClient::new(api_key, config.request_timeout())?;
    if let Some(base_url) = config.provider_base_url(id) {
        client = client.with_base_url(base_url);
    }

    Ok(Arc::new(client))
}

/// Cap a response body for log output.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = (0..=MAX).rev().find(|i| body.is_char_boundary(*i)).unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn provider_id_as_str_roundtrip() {
        for id in ProviderId::all() {
            let s = id.as_str();
            let parsed = ProviderId::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*id, parsed);
        }
    }

    #[test]
    fn provider_id_parsing_ignores_case() {
        let parsed = ProviderId::try_from("OpenCage").unwrap();
        assert_eq!(parsed, ProviderId::OpenCage);
    }

    #[test]
    fn unknown_provider_error() {
        let err = ProviderId::try_from("weatherapi").unwrap_err();
        assert!(err.to_string().contains("Unknown provider"));
    }

    #[test]
    fn weather_lookup_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = weather_lookup_from_config(&cfg).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No API key configured for provider 'openweather'"));
        assert!(msg.contains("Hint: run `cityweather configure openweather`"));
        assert!(msg.contains("OPENWEATHER_API_KEY"));
    }

    #[test]
    fn reverse_geocoder_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = reverse_geocoder_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("'opencage'"));
    }

    #[test]
    fn clients_build_when_configured() {
        let mut cfg = Config::default();
        cfg.upsert_provider_api_key(ProviderId::OpenWeather, "KEY".to_string());
        cfg.upsert_provider_api_key(ProviderId::OpenCage, "KEY".to_string());

        assert!(weather_lookup_from_config(&cfg).is_ok());
        assert!(reverse_geocoder_from_config(&cfg).is_ok());
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "é".repeat(150);
        let out = truncate_body(&body);
        assert!(out.ends_with("..."));
        assert!(out.len() <= 203);
    }
}
