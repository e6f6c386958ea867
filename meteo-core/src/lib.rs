//! Core library for the `meteo` CLI.
//!
//! This crate defines:
//! - Configuration handling
//! - The provider abstraction and the Open-Meteo geocoding/forecast client
//! - Normalization of columnar forecast payloads into per-record models
//! - Unit conversion, weather icons, search history and the search session
//!
//! It is used by `meteo-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod history;
pub mod icon;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod session;
pub mod units;

pub use config::{Config, Endpoints};
pub use error::{Result, WeatherError};
pub use history::SearchHistory;
pub use icon::WeatherIcon;
pub use model::{CurrentConditions, DailyRecord, HourlyRecord, Location, WeatherSnapshot};
pub use provider::{WeatherProvider, open_meteo::OpenMeteoProvider, provider_from_config};
pub use session::{SearchOutcome, SearchStatus, Session};
pub use units::{PrecipitationUnit, TemperatureUnit, UnitSystem, Units, WindSpeedUnit};
