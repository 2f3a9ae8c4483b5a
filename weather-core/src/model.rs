use serde::{Deserialize, Serialize};

/// Value used for any geocoding field that has no usable fallback.
pub const NOT_AVAILABLE: &str = "Not Available";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Map centre shown before any search has completed.
    pub const FALLBACK: Coordinate = Coordinate { lat: 51.505, lng: -0.09 };

    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Identity the map is keyed by; a change forces it to recentre.
    pub fn map_key(&self) -> f64 {
        self.lat + self.lng
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        Self::FALLBACK
    }
}

/// Display asset for a provider condition code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherIcon {
    Clear,
    Cloud,
    Drizzle,
    Rain,
    Snow,
}

impl WeatherIcon {
    pub fn asset(&self) -> &'static str {
        match self {
            WeatherIcon::Clear => "clear.png",
            WeatherIcon::Cloud => "cloud.png",
            WeatherIcon::Drizzle => "drizzle.png",
            WeatherIcon::Rain => "rain.png",
            WeatherIcon::Snow => "snow.png",
        }
    }
}

/// Current conditions for one successful search. Replaced wholesale on the
/// next search, never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Degrees Celsius, floored.
    pub temperature: i32,
    pub humidity_pct: u8,
    /// Wind speed as reported by the provider in metric units, shown as km/h.
    pub wind_speed_kmh: f64,
    pub place_name: String,
    pub utc_offset_seconds: i32,
    pub icon: WeatherIcon,
    pub coordinate: Coordinate,
}

/// Administrative region for a coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationDetails {
    pub country: String,
    pub state: Option<String>,
    pub district: Option<String>,
    pub capital: String,
}

/// Raw address fields as a geocoder reports them, before fallbacks apply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AddressComponents {
    pub country: Option<String>,
    pub state: Option<String>,
    pub region: Option<String>,
    pub county: Option<String>,
    pub state_district: Option<String>,
    pub state_capital: Option<String>,
    pub country_capital: Option<String>,
}

impl From<AddressComponents> for LocationDetails {
    fn from(c: AddressComponents) -> Self {
        let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        LocationDetails {
            country: present(c.country).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            state: present(c.state).or_else(|| present(c.region)),
            district: present(c.county).or_else(|| present(c.state_district)),
            capital: present(c.state_capital)
                .or_else(|| present(c.country_capital))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn fallback_coordinate_is_central_london() {
        let c = Coordinate::default();
        assert_eq!(c, Coordinate::new(51.505, -0.09));
    }

    #[test]
    fn state_falls_back_to_region() {
        let details = LocationDetails::from(AddressComponents {
            country: some("France"),
            region: some("Metropolitan France"),
            ..Default::default()
        });

        assert_eq!(details.state.as_deref(), Some("Metropolitan France"));
    }

    #[test]
    fn district_prefers_county_over_state_district() {
        let details = LocationDetails::from(AddressComponents {
            county: some("Greater London"),
            state_district: some("Inner London"),
            ..Default::default()
        });
        assert_eq!(details.district.as_deref(), Some("Greater London"));

        let details = LocationDetails::from(AddressComponents {
            state_district: some("Inner London"),
            ..Default::default()
        });
        assert_eq!(details.district.as_deref(), Some("Inner London"));
    }

    #[test]
    fn capital_chain_ends_in_not_available() {
        let details = LocationDetails::from(AddressComponents {
            country: some("United Kingdom"),
            state: some("England"),
            ..Default::default()
        });
        assert_eq!(details.capital, "Not Available");

        let details = LocationDetails::from(AddressComponents {
            country_capital: some("London"),
            ..Default::default()
        });
        assert_eq!(details.capital, "London");

        let details = LocationDetails::from(AddressComponents {
            state_capital: some("Sacramento"),
            country_capital: some("Washington"),
            ..Default::default()
        });
        assert_eq!(details.capital, "Sacramento");
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let details = LocationDetails::from(AddressComponents {
            state: some(""),
            region: some("Kanto"),
            ..Default::default()
        });
        assert_eq!(details.state.as_deref(), Some("Kanto"));
    }

    #[test]
    fn icon_serializes_as_lowercase_name() {
        let json = serde_json::to_string(&WeatherIcon::Drizzle).unwrap();
        assert_eq!(json, "\"drizzle\"");
        assert_eq!(WeatherIcon::Drizzle.asset(), "drizzle.png");
    }
}
