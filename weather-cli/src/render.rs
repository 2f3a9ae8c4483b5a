//! Terminal rendering of the controller state.

use cityweather_core::{LookupError, ViewState, WeatherView};

/// Blocking-style message for a rejected search.
pub fn alert(err: &LookupError) {
    eprintln!("! {err}");
}

/// Alert on a failed search and pass the failure on, so callers still exit non-zero.
pub fn alerted<T>(result: Result<T, LookupError>) -> anyhow::Result<T> {
    result.map_err(|err| {
        alert(&err);
        anyhow::Error::new(err)
    })
}

pub fn print_state(state: &ViewState) {
    for line in state_lines(state) {
        println!("{line}");
    }
}

pub fn print_json(state: &ViewState) -> anyhow::Result<()> {
    let doc = serde_json::json!({
        "phase": state.phase(),
        "coordinate": state.coordinate(),
        "view": state.view(),
    });
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn view_lines(view: &WeatherView) -> Vec<String> {
    vec![
        view.time_label.clone(),
        format!("[{}] {}  {}", view.icon_asset, view.temperature, view.location),
        format!("Humidity: {}   Wind Speed: {}", view.humidity, view.wind_speed),
        view.region.clone(),
        format!("Capital: {}", view.capital),
        format!(
            "Map: {:.4}, {:.4} (zoom {}) \"{}\"",
            view.map.center.lat, view.map.center.lng, view.map.zoom, view.map.popup
        ),
    ]
}

fn state_lines(state: &ViewState) -> Vec<String> {
    if let Some(view) = state.view() {
        return view_lines(&view);
    }

    match state.weather() {
        Some(weather) => vec![format!("Location details unavailable for {}", weather.place_name)],
        None => Vec::new(),
    }
}
