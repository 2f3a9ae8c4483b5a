//! Core library for the `cityweather` lookup widget.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Weather and reverse-geocoding provider clients
//! - The view-state controller that chains them into one display state
//! - Shared domain models and display projection
//!
//! It is used by `cityweather-cli`, but any front-end that can drive an async
//! runtime can host the controller.

pub mod config;
pub mod controller;
pub mod error;
pub mod icon;
pub mod local_time;
pub mod model;
pub mod provider;
pub mod view;

pub use config::{Config, ProviderConfig};
pub use controller::{Phase, SearchToken, ViewState, ViewStateController};
pub use error::LookupError;
pub use icon::resolve_icon;
pub use local_time::format_local_time;
pub use model::{Coordinate, LocationDetails, WeatherIcon, WeatherSnapshot};
pub use provider::{ProviderId, ReverseGeocoder, WeatherLookup};
pub use view::{MapMarker, WeatherView};
