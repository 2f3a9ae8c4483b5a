//! Display-ready projection of the widget state.

use serde::Serialize;

use crate::{Coordinate, LocationDetails, WeatherIcon, WeatherSnapshot};

pub const MAP_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const MAP_ZOOM: u8 = 10;

/// Shown in place of an absent district or state.
const MISSING: &str = "NA";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub center: Coordinate,
    pub zoom: u8,
    pub tile_url: &'static str,
    /// Marker popup text.
    pub popup: String,
    /// Recentre the map whenever this changes.
    pub key: f64,
}

impl MapMarker {
    pub fn new(center: Coordinate, popup: impl Into<String>) -> Self {
        Self {
            center,
            zoom: MAP_ZOOM,
            tile_url: MAP_TILE_URL,
            popup: popup.into(),
            key: center.map_key(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherView {
    pub time_label: String,
    pub temperature: String,
    pub location: String,
    pub humidity: String,
    pub wind_speed: String,
    pub icon: WeatherIcon,
    pub icon_asset: &'static str,
    pub region: String,
    pub capital: String,
    pub map: MapMarker,
}

impl WeatherView {
    pub fn new(
        weather: &WeatherSnapshot,
        details: &LocationDetails,
        display_time: &str,
        coordinate: Coordinate,
    ) -> Self {
        let district = details.district.as_deref().unwrap_or(MISSING);
        let state = details.state.as_deref().unwrap_or(MISSING);

        Self {
            time_label: format!("Date and Time: {display_time}"),
            temperature: format!("{}°c", weather.temperature),
            location: weather.place_name.clone(),
            humidity: format!("{} %", weather.humidity_pct),
            wind_speed: format!("{} km/h", weather.wind_speed_kmh),
            icon: weather.icon,
            icon_asset: weather.icon.asset(),
            region: format!(
                "District: {district}, State: {state}, Country: {}",
                details.country
            ),
            capital: details.capital.clone(),
            map: MapMarker::new(coordinate, weather.place_name.clone()),
        }
    }
}
