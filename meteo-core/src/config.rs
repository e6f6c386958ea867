use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    error::{Result, WeatherError},
    units::UnitSystem,
};

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_TIMEZONE: &str = "auto";

/// Base URLs of the two Open-Meteo endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub geocoding: String,
    pub forecast: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            geocoding: DEFAULT_GEOCODING_URL.to_string(),
            forecast: DEFAULT_FORECAST_URL.to_string(),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// units = "imperial"
/// timezone = "auto"
/// request_timeout_secs = 10
///
/// [endpoints]
/// geocoding = "https://geocoding-api.open-meteo.com/v1/search"
/// forecast = "https://api.open-meteo.com/v1/forecast"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Unit system a new session starts with.
    pub units: UnitSystem,

    /// Timezone passed to the forecast endpoint; "auto" resolves it from the
    /// coordinates.
    pub timezone: String,

    pub request_timeout_secs: Option<u64>,

    pub endpoints: Endpoints,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            units: UnitSystem::default(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            request_timeout_secs: None,
            endpoints: Endpoints::default(),
        }
    }
}

impl Config {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Load config from the platform location, or return defaults if it
    /// doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, use defaults.
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|source| WeatherError::ConfigIo { path: path.to_path_buf(), source })?;

        toml::from_str(&contents)
            .map_err(|source| WeatherError::ConfigParse { path: path.to_path_buf(), source })
    }

    /// Save config to the platform location, creating parent directories as
    /// needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|source| WeatherError::ConfigIo { path: parent.to_path_buf(), source })?;
        }

        let toml = toml::to_string_pretty(self)?;

        fs::write(path, toml)
            .map_err(|source| WeatherError::ConfigIo { path: path.to_path_buf(), source })
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "meteo", "meteo-cli").ok_or(WeatherError::NoConfigDir)?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_open_meteo() {
        let cfg = Config::default();

        assert_eq!(cfg.units, UnitSystem::Metric);
        assert_eq!(cfg.timezone, "auto");
        assert_eq!(cfg.endpoints.geocoding, DEFAULT_GEOCODING_URL);
        assert_eq!(cfg.endpoints.forecast, DEFAULT_FORECAST_URL);
        assert_eq!(cfg.request_timeout(), None);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            units = "imperial"

            [endpoints]
            forecast = "http://localhost:8080/v1/forecast"
            "#,
        )
        .expect("partial config should parse");

        assert_eq!(cfg.units, UnitSystem::Imperial);
        assert_eq!(cfg.timezone, DEFAULT_TIMEZONE);
        assert_eq!(cfg.endpoints.geocoding, DEFAULT_GEOCODING_URL);
        assert_eq!(cfg.endpoints.forecast, "http://localhost:8080/v1/forecast");
    }

    #[test]
    fn timeout_converts_to_duration() {
        let cfg = Config { request_timeout_secs: Some(7), ..Config::default() };
        assert_eq!(cfg.request_timeout(), Some(Duration::from_secs(7)));
    }

    #[test]
    fn unknown_unit_system_is_a_parse_error() {
        let result: std::result::Result<Config, _> = toml::from_str(r#"units = "kelvin""#);
        assert!(result.is_err());
    }
}
