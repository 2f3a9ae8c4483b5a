//! Search orchestration: weather by name, then region details by coordinate.
//!
//! The controller owns a [`ViewState`] and is the only thing that mutates it.
//! The geocode half of a search runs as a spawned task; its result comes back
//! tagged with the [`SearchToken`] of the search that started it and is
//! applied only if no newer search has begun since.

use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinSet;

use crate::{
    Config, Coordinate, LocationDetails, LookupError, WeatherSnapshot,
    config::DEFAULT_CITY,
    local_time::format_local_time,
    provider::{
        ReverseGeocoder, WeatherLookup, reverse_geocoder_from_config, weather_lookup_from_config,
    },
    view::WeatherView,
};

/// Monotonic id of a search; later searches compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct SearchToken(u64);

impl SearchToken {
    fn next(self) -> Self {
        SearchToken(self.0 + 1)
    }
}

impl std::fmt::Display for SearchToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Nothing searched yet.
    #[default]
    Idle,
    /// Weather lookup in flight.
    Loading,
    /// Weather known, region details pending or unavailable.
    PartiallyReady,
    /// Weather and region details both known.
    Ready,
    /// Last weather lookup failed; no snapshot is shown.
    Failed,
}

/// Everything the presentation layer reads.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    phase: Phase,
    weather: Option<WeatherSnapshot>,
    location: Option<LocationDetails>,
    coordinate: Coordinate,
    display_time: Option<String>,
    latest: SearchToken,
    last_error: Option<LookupError>,
}

impl ViewState {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn weather(&self) -> Option<&WeatherSnapshot> {
        self.weather.as_ref()
    }

    pub fn location(&self) -> Option<&LocationDetails> {
        self.location.as_ref()
    }

    /// Map centre: the last successful search, or [`Coordinate::FALLBACK`].
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn display_time(&self) -> Option<&str> {
        self.display_time.as_deref()
    }

    pub fn latest_token(&self) -> SearchToken {
        self.latest
    }

    /// Error of the most recent failed weather lookup.
    pub fn last_error(&self) -> Option<&LookupError> {
        self.last_error.as_ref()
    }

    /// Weather section is shown only when both halves are present.
    pub fn is_renderable(&self) -> bool {
        self.weather.is_some() && self.location.is_some()
    }

    pub fn view(&self) -> Option<WeatherView> {
        let weather = self.weather.as_ref()?;
        let location = self.location.as_ref()?;
        let display_time = self.display_time.as_deref().unwrap_or_default();

        Some(WeatherView::new(weather, location, display_time, self.coordinate))
    }

    /// Start a new search cycle, superseding every earlier one.
    pub fn begin_search(&mut self) -> SearchToken {
        self.latest = self.latest.next();
        self.phase = Phase::Loading;
        self.last_error = None;
        self.latest
    }

    /// Drop the snapshot after a failed weather lookup. Region details are
    /// left as they were.
    pub fn fail_weather(&mut self, token: SearchToken, error: LookupError) -> bool {
        if token != self.latest {
            return false;
        }

        self.weather = None;
        self.display_time = None;
        self.last_error = Some(error);
        self.phase = Phase::Failed;
        true
    }

    pub fn apply_weather(
        &mut self,
        token: SearchToken,
        snapshot: WeatherSnapshot,
        display_time: String,
    ) -> bool {
        if token != self.latest {
            return false;
        }

        self.coordinate = snapshot.coordinate;
        self.weather = Some(snapshot);
        self.display_time = Some(display_time);
        // Details of the previous place no longer describe this one.
        self.location = None;
        self.phase = Phase::PartiallyReady;
        true
    }

    /// Record the outcome of a reverse geocode. Results from superseded
    /// searches are discarded and `false` is returned.
    pub fn apply_location_details(
        &mut self,
        token: SearchToken,
        details: Option<LocationDetails>,
    ) -> bool {
        if token != self.latest {
            tracing::debug!(%token, latest = %self.latest, "discarding stale location details");
            return false;
        }

        self.location = details;
        if self.is_renderable() {
            self.phase = Phase::Ready;
        }
        true
    }
}

#[derive(Debug)]
struct GeocodeCompletion {
    token: SearchToken,
    result: Result<LocationDetails, LookupError>,
}

#[derive(Debug)]
pub struct ViewStateController {
    weather: Arc<dyn WeatherLookup>,
    geocoder: Arc<dyn ReverseGeocoder>,
    default_city: String,
    state: ViewState,
    pending: JoinSet<GeocodeCompletion>,
}

impl ViewStateController {
    pub fn new(weather: Arc<dyn WeatherLookup>, geocoder: Arc<dyn ReverseGeocoder>) -> Self {
        Self {
            weather,
            geocoder,
            default_city: DEFAULT_CITY.to_string(),
            state: ViewState::default(),
            pending: JoinSet::new(),
        }
    }

    /// Build both provider clients from config.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let weather = weather_lookup_from_config(config)?;
        let geocoder = reverse_geocoder_from_config(config)?;

        Ok(Self::new(weather, geocoder).with_default_city(config.default_city()))
    }

    pub fn with_default_city(mut self, city: impl Into<String>) -> Self {
        self.default_city = city.into();
        self
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn default_city(&self) -> &str {
        &self.default_city
    }

    /// Number of geocode lookups not yet applied.
    pub fn pending_lookups(&self) -> usize {
        self.pending.len()
    }

    /// Initial search for the default city.
    pub async fn mount(&mut self) -> Result<Phase, LookupError> {
        let city = self.default_city.clone();
        self.search(&city).await
    }

    /// Look up `name`. Returns once the weather half is resolved; region
    /// details follow through [`next_completion`](Self::next_completion).
    ///
    /// An empty name is rejected without touching state or the network.
    pub async fn search(&mut self, name: &str) -> Result<Phase, LookupError> {
        let name = name.trim();
        if name.is_empty() {
            tracing::info!("rejected empty search");
            return Err(LookupError::UserInput);
        }

        let token = self.state.begin_search();
        tracing::info!(%token, city = %name, "search started");

        match self.weather.fetch_weather(name).await {
            Ok(snapshot) => {
                let display_time = format_local_time(snapshot.utc_offset_seconds);
                let coordinate = snapshot.coordinate;
                tracing::info!(
                    %token,
                    place = %snapshot.place_name,
                    lat = coordinate.lat,
                    lng = coordinate.lng,
                    "weather resolved"
                );

                self.state.apply_weather(token, snapshot, display_time);
                self.spawn_geocode(token, coordinate);
                Ok(self.state.phase())
            }
            Err(err) => {
                tracing::warn!(%token, error = %err, "Error in fetching weather data");
                self.state.fail_weather(token, err.clone());
                Err(err)
            }
        }
    }

    fn spawn_geocode(&mut self, token: SearchToken, coordinate: Coordinate) {
        let geocoder = Arc::clone(&self.geocoder);
        self.pending.spawn(async move {
            let result = geocoder.fetch_location_details(coordinate).await;
            GeocodeCompletion { token, result }
        });
    }

    fn apply_completion(&mut self, completion: GeocodeCompletion) {
        let GeocodeCompletion { token, result } = completion;

        let details = match result {
            Ok(details) => Some(details),
            Err(err) if !err.is_fatal_to_search() => {
                tracing::info!(%token, error = %err, "no location details for coordinate");
                None
            }
            Err(err) => {
                tracing::warn!(%token, error = %err, "Error in fetching location details");
                None
            }
        };

        if self.state.apply_location_details(token, details) {
            tracing::info!(%token, phase = ?self.state.phase(), "location details applied");
        }
    }

    /// Wait for the next geocode lookup to finish and apply it. `None` when
    /// nothing is outstanding.
    pub async fn next_completion(&mut self) -> Option<Phase> {
        match self.pending.join_next().await? {
            Ok(completion) => self.apply_completion(completion),
            Err(err) => tracing::warn!(error = %err, "location lookup task did not complete"),
        }
        Some(self.state.phase())
    }

    /// Apply lookups that have already finished without waiting on the rest.
    pub fn drain_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Some(joined) = self.pending.try_join_next() {
            match joined {
                Ok(completion) => self.apply_completion(completion),
                Err(err) => tracing::warn!(error = %err, "location lookup task did not complete"),
            }
            applied += 1;
        }
        applied
    }

    /// Apply every outstanding lookup.
    pub async fn settle(&mut self) -> Phase {
        while self.next_completion().await.is_some() {}
        self.state.phase()
    }
}
