use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::icon::WeatherIcon;

/// A geocoded place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
}

/// Conditions at the time of the forecast run. Times are local to the
/// forecast location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub time: NaiveDateTime,
    /// Millimeters.
    pub precipitation: f64,
    /// Kilometers per hour.
    pub wind_speed: f64,
    pub apparent_temperature: f64,
    pub temperature: f64,
    /// Percent.
    pub relative_humidity: f64,
    pub weather_code: i32,
    pub is_day: bool,
}

impl CurrentConditions {
    pub fn icon(&self) -> WeatherIcon {
        WeatherIcon::from_wmo_code(self.weather_code)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyRecord {
    pub time: NaiveDateTime,
    pub temperature: f64,
    pub weather_code: i32,
}

impl HourlyRecord {
    pub fn icon(&self) -> WeatherIcon {
        WeatherIcon::from_wmo_code(self.weather_code)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// Start of the local day.
    pub time: NaiveDateTime,
    pub temperature_max: f64,
    pub temperature_min: f64,
    pub weather_code: i32,
}

impl DailyRecord {
    pub fn date(&self) -> NaiveDate {
        self.time.date()
    }

    pub fn icon(&self) -> WeatherIcon {
        WeatherIcon::from_wmo_code(self.weather_code)
    }
}

/// Everything shown for one search. Replaced as a whole on every search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location_name: String,
    pub current: CurrentConditions,
    pub hourly: Vec<HourlyRecord>,
    pub daily: Vec<DailyRecord>,
}

impl WeatherSnapshot {
    /// Hourly records falling on the same calendar day as `day`, from
    /// 00:00:00.000 through 23:59:59.999 inclusive, in their original order.
    pub fn hourly_for_day(&self, day: NaiveDateTime) -> Vec<&HourlyRecord> {
        let date = day.date();
        let start = date.and_time(NaiveTime::MIN);
        let Some(end) = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).map(|t| date.and_time(t))
        else {
            return Vec::new();
        };

        self.hourly
            .iter()
            .filter(|hour| hour.time >= start && hour.time <= end)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
    }

    fn hour(s: &str, temperature: f64) -> HourlyRecord {
        HourlyRecord { time: at(s), temperature, weather_code: 0 }
    }

    fn snapshot(hourly: Vec<HourlyRecord>) -> WeatherSnapshot {
        WeatherSnapshot {
            location_name: "Test".into(),
            current: CurrentConditions {
                time: at("2024-01-01T08:00"),
                precipitation: 0.0,
                wind_speed: 0.0,
                apparent_temperature: 0.0,
                temperature: 0.0,
                relative_humidity: 0.0,
                weather_code: 0,
                is_day: true,
            },
            hourly,
            daily: Vec::new(),
        }
    }

    #[test]
    fn day_filter_keeps_only_selected_day() {
        let snap = snapshot(vec![
            hour("2024-01-01T00:00", 1.0),
            hour("2024-01-01T12:00", 2.0),
            hour("2024-01-02T00:00", 3.0),
        ]);

        let hours = snap.hourly_for_day(at("2024-01-01T08:00"));

        assert_eq!(hours.len(), 2);
        assert_eq!(hours[0].temperature, 1.0);
        assert_eq!(hours[1].temperature, 2.0);
    }

    #[test]
    fn day_filter_includes_last_second_of_day() {
        let last = NaiveDateTime::parse_from_str("2024-01-01T23:59:59", "%Y-%m-%dT%H:%M:%S").unwrap();
        let snap = snapshot(vec![
            hour("2023-12-31T23:00", 0.0),
            HourlyRecord { time: last, temperature: 9.0, weather_code: 0 },
        ]);

        let hours = snap.hourly_for_day(at("2024-01-01T00:00"));

        assert_eq!(hours.len(), 1);
        assert_eq!(hours[0].temperature, 9.0);
    }

    #[test]
    fn day_filter_with_no_matching_hours_is_empty() {
        let snap = snapshot(vec![hour("2024-01-01T00:00", 1.0)]);
        assert!(snap.hourly_for_day(at("2024-03-01T00:00")).is_empty());
    }

    #[test]
    fn record_icons_follow_weather_code() {
        let rec = HourlyRecord { time: at("2024-01-01T00:00"), temperature: 0.0, weather_code: 73 };
        assert_eq!(rec.icon(), WeatherIcon::Snow);
    }
}
