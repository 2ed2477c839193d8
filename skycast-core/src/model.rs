use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const KELVIN_OFFSET: f64 = 273.15;

/// Latitude/longitude pair. Produced once per location-based fetch and not
/// persisted, except as the optional "home" location in the CLI config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// An immutable weather reading at one instant for one location.
///
/// Each fetch produces a fresh snapshot that fully replaces the previous one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location_name: String,
    /// ISO country code reported by upstream, when present.
    pub country: Option<String>,
    /// Primary condition label, e.g. "Clouds".
    pub condition: String,
    /// Longer condition description, e.g. "overcast clouds".
    pub description: String,
    /// Upstream reports kelvin; see [`Self::temperature_celsius`].
    pub temperature_k: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub observed_at: DateTime<Utc>,
}

impl WeatherSnapshot {
    pub fn temperature_celsius(&self) -> f64 {
        self.temperature_k - KELVIN_OFFSET
    }

    /// Rounded value shown to the user.
    pub fn temperature_celsius_rounded(&self) -> i64 {
        self.temperature_celsius().round() as i64
    }

    /// "London, GB" when the country code is known, plain name otherwise.
    pub fn display_name(&self) -> String {
        match &self.country {
            Some(country) => format!("{}, {}", self.location_name, country),
            None => self.location_name.clone(),
        }
    }
}

/// Status of the location permission, owned by the controller.
///
/// `Denied` is recoverable by asking again; `DeniedAlways` can only be undone
/// outside the app (a settings hand-off).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionState {
    #[default]
    NotDetermined,
    Granted,
    Denied,
    DeniedAlways,
}

/// The single published application state. Exactly one variant is current at
/// any time; `Loading` is the initial value, so observers never see an
/// uninitialized state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AppState {
    #[default]
    Loading,
    Error(String),
    Success(WeatherSnapshot),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(temperature_k: f64) -> WeatherSnapshot {
        WeatherSnapshot {
            location_name: "London".to_owned(),
            country: Some("GB".to_owned()),
            condition: "Clouds".to_owned(),
            description: "overcast clouds".to_owned(),
            temperature_k,
            humidity_pct: 76,
            wind_speed_mps: 4.1,
            observed_at: Utc::now(),
        }
    }

    #[test]
    fn kelvin_converts_to_celsius() {
        let snap = snapshot(283.15);
        assert!((snap.temperature_celsius() - 10.0).abs() < 1e-9);
        assert_eq!(snap.temperature_celsius_rounded(), 10);
    }

    #[test]
    fn rounding_goes_to_nearest_degree() {
        assert_eq!(snapshot(283.64).temperature_celsius_rounded(), 10);
        assert_eq!(snapshot(283.66).temperature_celsius_rounded(), 11);
        assert_eq!(snapshot(272.15).temperature_celsius_rounded(), -1);
    }

    #[test]
    fn display_name_appends_country_when_known() {
        assert_eq!(snapshot(283.15).display_name(), "London, GB");

        let mut snap = snapshot(283.15);
        snap.country = None;
        assert_eq!(snap.display_name(), "London");
    }

    #[test]
    fn loading_is_the_default_app_state() {
        assert_eq!(AppState::default(), AppState::Loading);
    }
}
