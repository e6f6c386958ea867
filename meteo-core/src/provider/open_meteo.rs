use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    config::{Config, Endpoints},
    error::{Result, WeatherError},
    model::{Location, WeatherSnapshot},
    normalize::{self, CURRENT_VARIABLES, DAILY_VARIABLES, ForecastPayload, HOURLY_VARIABLES},
};

use super::WeatherProvider;

const GEOCODING: &str = "geocoding";
const FORECAST: &str = "forecast";

/// Open-Meteo geocoding + forecast client. No API key required.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    endpoints: Endpoints,
    timezone: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(endpoints: Endpoints, timezone: impl Into<String>) -> Self {
        Self { endpoints, timezone: timezone.into(), http: Client::new() }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(WeatherError::Client)?;

        Ok(Self { endpoints: config.endpoints.clone(), timezone: config.timezone.clone(), http })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        tracing::debug!(endpoint, url, ?query, "sending request");

        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|source| WeatherError::Request { endpoint, source })?;

        let status = res.status();
        let body = res.text().await.map_err(|source| WeatherError::Request { endpoint, source })?;

        if !status.is_success() {
            return Err(WeatherError::Status { endpoint, status, body: truncate_body(&body) });
        }

        serde_json::from_str(&body).map_err(|source| WeatherError::Decode { endpoint, source })
    }
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    #[serde(default)]
    results: Option<Vec<GeoResult>>,
}

#[derive(Debug, Deserialize)]
struct GeoResult {
    latitude: f64,
    longitude: f64,
    name: String,
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn resolve(&self, query: &str) -> Result<Option<Location>> {
        let parsed: GeoResponse = self
            .get_json(
                GEOCODING,
                &self.endpoints.geocoding,
                &[("name", query.to_string()), ("count", "1".to_string())],
            )
            .await?;

        let location = parsed.results.and_then(|results| results.into_iter().next()).map(|r| {
            Location { latitude: r.latitude, longitude: r.longitude, name: r.name }
        });

        match &location {
            Some(loc) => tracing::info!(
                query,
                name = %loc.name,
                latitude = loc.latitude,
                longitude = loc.longitude,
                "resolved location"
            ),
            None => tracing::info!(query, "no location matched"),
        }

        Ok(location)
    }

    async fn forecast(&self, latitude: f64, longitude: f64) -> Result<WeatherSnapshot> {
        let params = [
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("current", CURRENT_VARIABLES.join(",")),
            ("hourly", HOURLY_VARIABLES.join(",")),
            ("daily", DAILY_VARIABLES.join(",")),
            ("timezone", self.timezone.clone()),
            ("timeformat", "unixtime".to_string()),
        ];

        let payload: ForecastPayload =
            self.get_json(FORECAST, &self.endpoints.forecast, &params).await?;

        let snapshot = normalize::normalize(&payload)?;
        tracing::debug!(
            hourly = snapshot.hourly.len(),
            daily = snapshot.daily.len(),
            utc_offset_seconds = payload.utc_offset_seconds,
            "normalized forecast"
        );

        Ok(snapshot)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_bodies_are_kept() {
        assert_eq!(truncate_body("oops"), "oops");
    }

    #[test]
    fn long_bodies_are_truncated_on_char_boundary() {
        let body = "é".repeat(300);
        let out = truncate_body(&body);

        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 203);
    }

    #[test]
    fn geocoding_results_may_be_absent() {
        let parsed: GeoResponse = serde_json::from_str(r#"{"generationtime_ms":0.5}"#).unwrap();
        assert!(parsed.results.is_none());
    }
}
