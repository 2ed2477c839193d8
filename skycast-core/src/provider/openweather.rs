use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::{
    error::FetchError,
    model::{Coordinate, WeatherSnapshot},
};

use super::WeatherProvider;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Result<Self, FetchError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_owned())
    }

    /// Point the provider at a different endpoint, e.g. a local stub server
    /// in tests.
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            api_key,
            base_url,
            http,
        })
    }

    async fn fetch_current(&self, query: &[(&str, String)]) -> Result<WeatherSnapshot, FetchError> {
        let url = format!("{}/weather", self.base_url);
        debug!("requesting current weather from {url}");

        let res = self
            .http
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Upstream {
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;

        Ok(parsed.into_snapshot())
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_by_city(&self, city: &str) -> Result<WeatherSnapshot, FetchError> {
        self.fetch_current(&[("q", city.to_owned())]).await
    }

    async fn current_by_coordinates(
        &self,
        coordinate: Coordinate,
    ) -> Result<WeatherSnapshot, FetchError> {
        self.fetch_current(&[
            ("lat", coordinate.latitude.to_string()),
            ("lon", coordinate.longitude.to_string()),
        ])
        .await
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    sys: Option<OwSys>,
}

impl OwCurrentResponse {
    fn into_snapshot(self) -> WeatherSnapshot {
        let observed_at = unix_to_utc(self.dt).unwrap_or_else(Utc::now);

        let (condition, description) = self
            .weather
            .into_iter()
            .next()
            .map(|w| (w.main, w.description))
            .unwrap_or_else(|| ("Unknown".to_string(), String::new()));

        WeatherSnapshot {
            location_name: self.name,
            country: self.sys.and_then(|sys| sys.country),
            condition,
            description,
            temperature_k: self.main.temp,
            humidity_pct: self.main.humidity,
            wind_speed_mps: self.wind.speed,
            observed_at,
        }
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        // Walk back to a char boundary; slicing mid-character would panic.
        let mut cut = MAX;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}
