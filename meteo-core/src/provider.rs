use crate::{
    Config, Location, WeatherSnapshot, error::Result, provider::open_meteo::OpenMeteoProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod open_meteo;

/// Source of locations and forecasts.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Resolve a place name to its first geocoding match. `Ok(None)` means
    /// nothing matched.
    async fn resolve(&self, query: &str) -> Result<Option<Location>>;

    /// Fetch and normalize the forecast for a coordinate pair. The returned
    /// snapshot has an empty `location_name`.
    async fn forecast(&self, latitude: f64, longitude: f64) -> Result<WeatherSnapshot>;
}

/// Construct the provider described by `config`.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn WeatherProvider>> {
    Ok(Box::new(OpenMeteoProvider::from_config(config)?))
}
