//! Core library for the `skycast` weather app.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The upstream weather provider and its error taxonomy
//! - The location-tracker boundary used for device position
//! - The state controller that publishes permission and app state
//!   to the presentation layer
//!
//! It is used by `skycast-cli`, but can also be reused by other frontends.

pub mod config;
pub mod controller;
pub mod error;
pub mod location;
pub mod model;
pub mod provider;

pub use config::Config;
pub use controller::WeatherController;
pub use error::{FetchError, LocationError};
pub use location::LocationTracker;
pub use model::{AppState, Coordinate, PermissionState, WeatherSnapshot};
pub use provider::{WeatherProvider, provider_from_config};
