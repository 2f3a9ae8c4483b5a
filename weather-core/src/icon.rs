use crate::model::WeatherIcon;

/// Map a provider condition code (e.g. `"10n"`) to its display asset.
///
/// Total: codes outside the table resolve to [`WeatherIcon::Clear`].
pub fn resolve_icon(code: &str) -> WeatherIcon {
    match code {
        "01d" | "01n" => WeatherIcon::Clear,
        "02d" | "02n" | "03d" | "03n" => WeatherIcon::Cloud,
        "04d" | "04n" => WeatherIcon::Drizzle,
        "09d" | "09n" | "10d" | "10n" => WeatherIcon::Rain,
        "13d" | "13n" => WeatherIcon::Snow,
        _ => WeatherIcon::Clear,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_codes_day_and_night() {
        let cases = [
            ("01d", WeatherIcon::Clear),
            ("02n", WeatherIcon::Cloud),
            ("03d", WeatherIcon::Cloud),
            ("04n", WeatherIcon::Drizzle),
            ("09d", WeatherIcon::Rain),
            ("10n", WeatherIcon::Rain),
            ("13d", WeatherIcon::Snow),
        ];

        for (code, expected) in cases {
            assert_eq!(resolve_icon(code), expected, "code {code}");
        }
    }

    #[test]
    fn unknown_codes_fall_back_to_clear() {
        assert_eq!(resolve_icon("99x"), WeatherIcon::Clear);
        assert_eq!(resolve_icon("11d"), WeatherIcon::Clear);
        assert_eq!(resolve_icon(""), WeatherIcon::Clear);
    }
}
