use serde::{Deserialize, Serialize};

/// Icon category for a WMO weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeatherIcon {
    #[default]
    Clear,
    PartlyCloudy,
    Overcast,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Storm,
}

impl WeatherIcon {
    /// Map an integer WMO code. Codes outside the known groups fall back to
    /// [`WeatherIcon::Clear`].
    /// See: https://open-meteo.com/en/docs#weathervariables
    pub fn from_wmo_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1 | 2 => Self::PartlyCloudy,
            3 => Self::Overcast,
            45 | 48 => Self::Fog,
            51 | 53 | 55 => Self::Drizzle,
            61 | 63 | 65 => Self::Rain,
            71 | 73 | 75 => Self::Snow,
            95 | 96 | 99 => Self::Storm,
            _ => Self::Clear,
        }
    }

    /// The API reports codes as floats; truncate toward zero before mapping.
    pub fn from_code(code: f64) -> Self {
        // `as` saturates and maps NaN to 0
        Self::from_wmo_code(code.trunc() as i32)
    }

    pub const fn all() -> &'static [WeatherIcon] {
        &[
            Self::Clear,
            Self::PartlyCloudy,
            Self::Overcast,
            Self::Fog,
            Self::Drizzle,
            Self::Rain,
            Self::Snow,
            Self::Storm,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::PartlyCloudy => "Partly cloudy",
            Self::Overcast => "Overcast",
            Self::Fog => "Fog",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Storm => "Storm",
        }
    }

    /// File name of the bundled image asset.
    pub fn asset_name(&self) -> &'static str {
        match self {
            Self::Clear => "icon-sunny.webp",
            Self::PartlyCloudy => "icon-partly-cloudy.webp",
            Self::Overcast => "icon-overcast.webp",
            Self::Fog => "icon-fog.webp",
            Self::Drizzle => "icon-drizzle.webp",
            Self::Rain => "icon-rain.webp",
            Self::Snow => "icon-snow.webp",
            Self::Storm => "icon-storm.webp",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Clear => "☀",
            Self::PartlyCloudy => "⛅",
            Self::Overcast => "☁",
            Self::Fog => "🌫",
            Self::Drizzle => "🌦",
            Self::Rain => "🌧",
            Self::Snow => "❄",
            Self::Storm => "⛈",
        }
    }
}

impl std::fmt::Display for WeatherIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
