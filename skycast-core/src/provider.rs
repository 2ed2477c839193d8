use crate::{
    Config,
    error::FetchError,
    model::{Coordinate, WeatherSnapshot},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Abstraction over the upstream weather API.
///
/// Both operations are read-only and idempotent; each call is a single
/// attempt with no retries and no caching.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_by_city(&self, city: &str) -> Result<WeatherSnapshot, FetchError>;

    async fn current_by_coordinates(
        &self,
        coordinate: Coordinate,
    ) -> Result<WeatherSnapshot, FetchError>;
}

/// Construct the provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key()?;
    let provider = OpenWeatherProvider::new(api_key.to_owned())?;

    Ok(Box::new(provider))
}
