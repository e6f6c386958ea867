//! Plain-text rendering of a loaded forecast.

use std::fmt::Write;

use chrono::NaiveDateTime;
use meteo_core::{SearchHistory, Session, Units, WeatherSnapshot};

pub fn session(session: &Session) -> String {
    match session.snapshot() {
        Some(snapshot) => self::snapshot(snapshot, session.units(), session.selected_day()),
        None => String::new(),
    }
}

pub fn snapshot(
    snapshot: &WeatherSnapshot,
    units: Units,
    selected_day: Option<NaiveDateTime>,
) -> String {
    let mut out = String::new();
    let current = &snapshot.current;

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}", snapshot.location_name);
    let _ = writeln!(
        out,
        "  {} {}  ({}, {})",
        current.icon().glyph(),
        current.icon(),
        current.time.format("%a %d %b %H:%M"),
        if current.is_day { "day" } else { "night" },
    );
    let _ = writeln!(
        out,
        "  Temperature    {}{}  feels like {}{}",
        units.temperature(current.temperature),
        units.temperature.symbol(),
        units.temperature(current.apparent_temperature),
        units.temperature.symbol(),
    );
    let _ = writeln!(out, "  Humidity       {:.0}%", current.relative_humidity);
    let _ = writeln!(
        out,
        "  Wind           {} {}",
        units.wind_speed(current.wind_speed),
        units.wind_speed.symbol()
    );
    let _ = writeln!(
        out,
        "  Precipitation  {} {}",
        units.precipitation(current.precipitation),
        units.precipitation.symbol()
    );

    if !snapshot.daily.is_empty() {
        let _ = writeln!(out, "\nDaily");
        for (i, day) in snapshot.daily.iter().enumerate() {
            let marker = if selected_day.is_some_and(|d| d.date() == day.date()) { '>' } else { ' ' };
            let _ = writeln!(
                out,
                "{marker} {i}  {}  {} {:<14} {} / {}",
                day.time.format("%a %d %b"),
                day.icon().glyph(),
                day.icon().label(),
                units.temperature(day.temperature_max),
                units.temperature(day.temperature_min),
            );
        }
    }

    if let Some(day) = selected_day {
        let hours = snapshot.hourly_for_day(day);
        let _ = writeln!(out, "\nHourly ({})", day.format("%a %d %b"));
        if hours.is_empty() {
            let _ = writeln!(out, "  no hourly data for this day");
        }
        for hour in hours {
            let _ = writeln!(
                out,
                "  {}  {} {}",
                hour.time.format("%H:%M"),
                hour.icon().glyph(),
                units.temperature(hour.temperature),
            );
        }
    }

    out
}

pub fn history(history: &SearchHistory) -> String {
    if history.is_empty() {
        return "No searches yet.\n".to_string();
    }

    history
        .iter()
        .enumerate()
        .map(|(i, query)| format!("{}. {query}\n", i + 1))
        .collect()
}
