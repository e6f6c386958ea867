//! Reshaping of the forecast endpoint's columnar payload into per-record
//! values.
//!
//! The forecast API returns each series as one flat array per variable plus a
//! time axis. Timestamps are rebuilt arithmetically as
//! `start + i * interval + utc_offset_seconds`, so the current, hourly and
//! daily blocks always share one local-time frame.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;

use crate::{
    error::{Result, WeatherError},
    model::{CurrentConditions, DailyRecord, HourlyRecord, WeatherSnapshot},
};

pub const PRECIPITATION: &str = "precipitation";
pub const WIND_SPEED_10M: &str = "wind_speed_10m";
pub const IS_DAY: &str = "is_day";
pub const APPARENT_TEMPERATURE: &str = "apparent_temperature";
pub const TEMPERATURE_2M: &str = "temperature_2m";
pub const RELATIVE_HUMIDITY_2M: &str = "relative_humidity_2m";
pub const WEATHER_CODE: &str = "weather_code";
pub const TEMPERATURE_2M_MAX: &str = "temperature_2m_max";
pub const TEMPERATURE_2M_MIN: &str = "temperature_2m_min";

/// Variables requested for the `current` block, in request order.
pub const CURRENT_VARIABLES: &[&str] = &[
    PRECIPITATION,
    WIND_SPEED_10M,
    IS_DAY,
    APPARENT_TEMPERATURE,
    TEMPERATURE_2M,
    RELATIVE_HUMIDITY_2M,
    WEATHER_CODE,
];

/// Variables requested for the `hourly` block. The first one sizes the series.
pub const HOURLY_VARIABLES: &[&str] = &[TEMPERATURE_2M, WEATHER_CODE];

pub const DAILY_VARIABLES: &[&str] = &[TEMPERATURE_2M_MAX, TEMPERATURE_2M_MIN, WEATHER_CODE];

pub const HOURLY_INTERVAL_SECS: i64 = 3_600;
pub const DAILY_INTERVAL_SECS: i64 = 86_400;

/// Decoded forecast body (`timeformat=unixtime`).
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastPayload {
    #[serde(default)]
    pub utc_offset_seconds: i64,
    pub current: Option<CurrentBlock>,
    pub hourly: Option<SeriesBlock>,
    pub daily: Option<SeriesBlock>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentBlock {
    pub time: i64,
    #[serde(default)]
    pub interval: Option<i64>,
    #[serde(flatten)]
    pub values: HashMap<String, Option<f64>>,
}

impl CurrentBlock {
    fn value(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied().flatten()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeriesBlock {
    #[serde(default)]
    pub time: Vec<i64>,
    #[serde(flatten)]
    pub values: HashMap<String, Vec<Option<f64>>>,
}

/// A series block reduced to its time axis description and value columns.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesColumns<'a> {
    pub start: i64,
    pub end: i64,
    pub interval: i64,
    values: &'a HashMap<String, Vec<Option<f64>>>,
}

impl<'a> SeriesColumns<'a> {
    /// Derive `start`, `end` and `interval` from the block's timestamps. The
    /// interval falls back to `default_interval` when fewer than two
    /// timestamps are present.
    pub fn from_block(block: &'a SeriesBlock, default_interval: i64) -> Result<Self> {
        let start = block.time.first().copied().unwrap_or_default();
        let interval = match block.time.as_slice() {
            [first, second, ..] => second.checked_sub(*first).unwrap_or_default(),
            _ => default_interval,
        };
        if interval <= 0 {
            return Err(WeatherError::Malformed(format!(
                "non-positive series interval {interval}"
            )));
        }

        let steps = i64::try_from(block.time.len())
            .map_err(|_| WeatherError::Malformed("series too long".into()))?;
        let end = steps
            .checked_mul(interval)
            .and_then(|span| start.checked_add(span))
            .ok_or_else(|| WeatherError::Malformed("series end out of range".into()))?;

        Ok(Self { start, end, interval, values: &block.values })
    }

    pub fn values(&self, name: &str) -> &'a [Option<f64>] {
        let values: &'a HashMap<String, Vec<Option<f64>>> = self.values;
        values.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Positional value, or 0 when the column is absent, short, or null.
    pub fn value_at(&self, name: &str, index: usize) -> f64 {
        self.values(name).get(index).copied().flatten().unwrap_or_default()
    }

    fn step_time(&self, index: usize, utc_offset: i64) -> Result<NaiveDateTime> {
        let offset = i64::try_from(index)
            .ok()
            .and_then(|i| i.checked_mul(self.interval))
            .ok_or_else(|| WeatherError::Malformed(format!("step {index} out of range")))?;
        let epoch = self
            .start
            .checked_add(offset)
            .ok_or_else(|| WeatherError::Malformed(format!("step {index} out of range")))?;
        local_time(epoch, utc_offset)
    }
}

/// Shift an epoch timestamp into the location's wall-clock time.
pub fn local_time(epoch_secs: i64, utc_offset: i64) -> Result<NaiveDateTime> {
    epoch_secs
        .checked_add(utc_offset)
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| WeatherError::Malformed(format!("timestamp {epoch_secs} out of range")))
}

fn weather_code(raw: f64) -> i32 {
    raw.trunc() as i32
}

pub fn normalize_current(block: &CurrentBlock, utc_offset: i64) -> Result<CurrentConditions> {
    let code = block
        .value(WEATHER_CODE)
        .ok_or_else(|| WeatherError::Malformed("current block has no weather_code".into()))?;

    Ok(CurrentConditions {
        time: local_time(block.time, utc_offset)?,
        precipitation: block.value(PRECIPITATION).unwrap_or_default(),
        wind_speed: block.value(WIND_SPEED_10M).unwrap_or_default(),
        apparent_temperature: block.value(APPARENT_TEMPERATURE).unwrap_or_default(),
        temperature: block.value(TEMPERATURE_2M).unwrap_or_default(),
        relative_humidity: block.value(RELATIVE_HUMIDITY_2M).unwrap_or_default(),
        weather_code: weather_code(code),
        is_day: block.value(IS_DAY).is_some_and(|v| v != 0.0),
    })
}

/// One record per entry of the first hourly variable.
pub fn normalize_hourly(block: &SeriesBlock, utc_offset: i64) -> Result<Vec<HourlyRecord>> {
    let columns = SeriesColumns::from_block(block, HOURLY_INTERVAL_SECS)?;
    let steps = columns.values(HOURLY_VARIABLES[0]).len();
    if steps > 0 && block.time.is_empty() {
        return Err(WeatherError::Malformed("hourly block has values but no time axis".into()));
    }

    (0..steps)
        .map(|i| {
            Ok(HourlyRecord {
                time: columns.step_time(i, utc_offset)?,
                temperature: columns.value_at(TEMPERATURE_2M, i),
                weather_code: weather_code(columns.value_at(WEATHER_CODE, i)),
            })
        })
        .collect()
}

/// One record per day between the block's start and end.
pub fn normalize_daily(block: &SeriesBlock, utc_offset: i64) -> Result<Vec<DailyRecord>> {
    let columns = SeriesColumns::from_block(block, DAILY_INTERVAL_SECS)?;
    let days = usize::try_from((columns.end - columns.start) / columns.interval)
        .map_err(|_| WeatherError::Malformed("daily block ends before it starts".into()))?;

    (0..days)
        .map(|i| {
            Ok(DailyRecord {
                time: columns.step_time(i, utc_offset)?,
                temperature_max: columns.value_at(TEMPERATURE_2M_MAX, i),
                temperature_min: columns.value_at(TEMPERATURE_2M_MIN, i),
                weather_code: weather_code(columns.value_at(WEATHER_CODE, i)),
            })
        })
        .collect()
}

/// Build a snapshot from a decoded payload. The location name is left empty
/// for the caller to fill in.
pub fn normalize(payload: &ForecastPayload) -> Result<WeatherSnapshot> {
    let offset = payload.utc_offset_seconds;

    let current = payload
        .current
        .as_ref()
        .ok_or_else(|| WeatherError::Malformed("missing current block".into()))?;
    let hourly = payload
        .hourly
        .as_ref()
        .ok_or_else(|| WeatherError::Malformed("missing hourly block".into()))?;
    let daily = payload
        .daily
        .as_ref()
        .ok_or_else(|| WeatherError::Malformed("missing daily block".into()))?;

    Ok(WeatherSnapshot {
        location_name: String::new(),
        current: normalize_current(current, offset)?,
        hourly: normalize_hourly(hourly, offset)?,
        daily: normalize_daily(daily, offset)?,
    })
}
