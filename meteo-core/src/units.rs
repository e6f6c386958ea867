//! Display units and the conversions between them.
//!
//! All snapshot values are stored in metric (°C, km/h, mm); these helpers turn
//! them into display text for whatever units the user picked.

use serde::{Deserialize, Serialize};

const MM_PER_INCH: f64 = 25.4;
const KM_PER_MILE: f64 = 1.609;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [UnitSystem] {
        &[UnitSystem::Metric, UnitSystem::Imperial]
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrecipitationUnit {
    Millimeters,
    Inches,
}

impl PrecipitationUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            PrecipitationUnit::Millimeters => "mm",
            PrecipitationUnit::Inches => "in",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindSpeedUnit {
    KilometersPerHour,
    MilesPerHour,
}

impl WindSpeedUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            WindSpeedUnit::KilometersPerHour => "km/h",
            WindSpeedUnit::MilesPerHour => "mph",
        }
    }
}

/// The three display units currently in effect.
///
/// `system` tracks which bundle was last applied with [`Units::toggle`];
/// setting a single unit leaves it untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Units {
    pub system: UnitSystem,
    pub temperature: TemperatureUnit,
    pub precipitation: PrecipitationUnit,
    pub wind_speed: WindSpeedUnit,
}

impl Units {
    pub const fn metric() -> Self {
        Self {
            system: UnitSystem::Metric,
            temperature: TemperatureUnit::Celsius,
            precipitation: PrecipitationUnit::Millimeters,
            wind_speed: WindSpeedUnit::KilometersPerHour,
        }
    }

    pub const fn imperial() -> Self {
        Self {
            system: UnitSystem::Imperial,
            temperature: TemperatureUnit::Fahrenheit,
            precipitation: PrecipitationUnit::Inches,
            wind_speed: WindSpeedUnit::MilesPerHour,
        }
    }

    pub const fn for_system(system: UnitSystem) -> Self {
        match system {
            UnitSystem::Metric => Self::metric(),
            UnitSystem::Imperial => Self::imperial(),
        }
    }

    /// Switch to the other bundle, replacing all three units at once.
    pub fn toggle(&mut self) {
        *self = match self.system {
            UnitSystem::Metric => Self::imperial(),
            UnitSystem::Imperial => Self::metric(),
        };
    }

    pub fn temperature(&self, celsius: f64) -> String {
        format_temperature(celsius, self.temperature)
    }

    pub fn precipitation(&self, millimeters: f64) -> String {
        format_precipitation(millimeters, self.precipitation)
    }

    pub fn wind_speed(&self, kmh: f64) -> String {
        format_wind_speed(kmh, self.wind_speed)
    }
}

impl Default for Units {
    fn default() -> Self {
        Self::metric()
    }
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

/// One decimal place followed by a degree mark, e.g. `"21.5°"`.
pub fn format_temperature(celsius: f64, unit: TemperatureUnit) -> String {
    let value = match unit {
        TemperatureUnit::Celsius => celsius,
        TemperatureUnit::Fahrenheit => celsius_to_fahrenheit(celsius),
    };
    format!("{value:.1}°")
}

/// Rounded to the nearest whole number.
pub fn format_precipitation(millimeters: f64, unit: PrecipitationUnit) -> String {
    let value = match unit {
        PrecipitationUnit::Millimeters => millimeters,
        PrecipitationUnit::Inches => millimeters / MM_PER_INCH,
    };
    format_rounded(value)
}

/// Rounded to the nearest whole number.
pub fn format_wind_speed(kmh: f64, unit: WindSpeedUnit) -> String {
    let value = match unit {
        WindSpeedUnit::KilometersPerHour => kmh,
        WindSpeedUnit::MilesPerHour => kmh / KM_PER_MILE,
    };
    format_rounded(value)
}

fn format_rounded(value: f64) -> String {
    // `{:.0}` rounds half to even; the display wants half away from zero.
    let rounded = value.round();
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{rounded:.0}")
    }
}
