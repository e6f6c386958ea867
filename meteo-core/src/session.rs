//! Caller-side state for a sequence of searches: the loaded snapshot, the
//! selected day, display units and the search history.

use chrono::NaiveDateTime;

use crate::{
    history::SearchHistory,
    model::{HourlyRecord, WeatherSnapshot},
    provider::WeatherProvider,
    units::{PrecipitationUnit, TemperatureUnit, Units, WindSpeedUnit},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStatus {
    #[default]
    Idle,
    Loaded,
    NoResults,
    Failed,
}

/// What a call to [`Session::search`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Blank query; nothing was requested and no state changed.
    Ignored,
    /// A location matched and its forecast is now loaded.
    Loaded { location_name: String },
    /// The geocoder found no match.
    NoResults,
    /// Either request failed. The message is for display.
    Failed { message: String },
}

/// Searches run one after another through `&mut self`, so a slow earlier
/// search can never overwrite a later one.
#[derive(Debug)]
pub struct Session<P: ?Sized = dyn WeatherProvider> {
    snapshot: Option<WeatherSnapshot>,
    history: SearchHistory,
    units: Units,
    selected_day: Option<NaiveDateTime>,
    last_search: Option<String>,
    status: SearchStatus,
    provider: Box<P>,
}

impl<P: WeatherProvider + ?Sized> Session<P> {
    pub fn new(provider: Box<P>, units: Units) -> Self {
        Self {
            snapshot: None,
            history: SearchHistory::new(),
            units,
            selected_day: None,
            last_search: None,
            status: SearchStatus::Idle,
            provider,
        }
    }

    /// Resolve `query`, then fetch its forecast.
    pub async fn search(&mut self, query: &str) -> SearchOutcome {
        if query.trim().is_empty() {
            return SearchOutcome::Ignored;
        }

        self.last_search = Some(query.to_string());

        match self.run_search(query).await {
            Ok(Some(snapshot)) => {
                let location_name = snapshot.location_name.clone();
                self.selected_day = snapshot.daily.first().map(|d| d.time);
                self.snapshot = Some(snapshot);
                self.history.push(query);
                self.status = SearchStatus::Loaded;
                SearchOutcome::Loaded { location_name }
            }
            Ok(None) => {
                self.clear_snapshot();
                self.status = SearchStatus::NoResults;
                SearchOutcome::NoResults
            }
            Err(err) => {
                tracing::warn!(query, error = %err, "weather search failed");
                self.clear_snapshot();
                self.status = SearchStatus::Failed;
                SearchOutcome::Failed { message: err.to_string() }
            }
        }
    }

    async fn run_search(&self, query: &str) -> crate::Result<Option<WeatherSnapshot>> {
        let Some(location) = self.provider.resolve(query).await? else {
            return Ok(None);
        };

        let mut snapshot = self.provider.forecast(location.latitude, location.longitude).await?;
        snapshot.location_name = location.name;
        Ok(Some(snapshot))
    }

    /// Re-run the last submitted query. Returns `None` if nothing was
    /// searched yet.
    pub async fn retry(&mut self) -> Option<SearchOutcome> {
        let query = self.last_search.clone()?;
        Some(self.search(&query).await)
    }

    fn clear_snapshot(&mut self) {
        self.snapshot = None;
        self.selected_day = None;
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    pub fn last_search(&self) -> Option<&str> {
        self.last_search.as_deref()
    }

    pub fn selected_day(&self) -> Option<NaiveDateTime> {
        self.selected_day
    }

    pub fn select_day(&mut self, day: NaiveDateTime) {
        self.selected_day = Some(day);
    }

    /// Select the `index`-th daily record. Returns false if out of range.
    pub fn select_day_index(&mut self, index: usize) -> bool {
        match self.snapshot.as_ref().and_then(|s| s.daily.get(index)) {
            Some(day) => {
                self.selected_day = Some(day.time);
                true
            }
            None => false,
        }
    }

    /// Hourly records for the selected day; empty when no day is selected or
    /// no forecast is loaded.
    pub fn hourly_for_selected_day(&self) -> Vec<&HourlyRecord> {
        match (&self.snapshot, self.selected_day) {
            (Some(snapshot), Some(day)) => snapshot.hourly_for_day(day),
            _ => Vec::new(),
        }
    }

    pub fn units(&self) -> Units {
        self.units
    }

    pub fn toggle_units(&mut self) {
        self.units.toggle();
    }

    pub fn set_temperature_unit(&mut self, unit: TemperatureUnit) {
        self.units.temperature = unit;
    }

    pub fn set_precipitation_unit(&mut self, unit: PrecipitationUnit) {
        self.units.precipitation = unit;
    }

    pub fn set_wind_speed_unit(&mut self, unit: WindSpeedUnit) {
        self.units.wind_speed = unit;
    }

    pub fn temperature_display(&self, celsius: f64) -> String {
        self.units.temperature(celsius)
    }

    /// Current precipitation in display units, or `None` without a snapshot.
    pub fn precipitation_display(&self) -> Option<String> {
        self.snapshot.as_ref().map(|s| self.units.precipitation(s.current.precipitation))
    }

    /// Current wind speed in display units, or `None` without a snapshot.
    pub fn wind_speed_display(&self) -> Option<String> {
        self.snapshot.as_ref().map(|s| self.units.wind_speed(s.current.wind_speed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::WeatherError,
        model::{CurrentConditions, DailyRecord, Location},
    };
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct FakeProvider {
        fail_forecast: bool,
        calls: Mutex<Vec<String>>,
    }

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap().and_hms_opt(hour, 0, 0).unwrap()
    }

    fn fake_snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            location_name: String::new(),
            current: CurrentConditions {
                time: at(1, 8),
                precipitation: 25.4,
                wind_speed: 16.09,
                apparent_temperature: 1.0,
                temperature: 2.0,
                relative_humidity: 70.0,
                weather_code: 3,
                is_day: true,
            },
            hourly: vec![
                HourlyRecord { time: at(1, 0), temperature: 1.0, weather_code: 0 },
                HourlyRecord { time: at(1, 12), temperature: 2.0, weather_code: 1 },
                HourlyRecord { time: at(2, 0), temperature: 3.0, weather_code: 2 },
            ],
            daily: vec![
                DailyRecord { time: at(1, 0), temperature_max: 4.0, temperature_min: 0.0, weather_code: 3 },
                DailyRecord { time: at(2, 0), temperature_max: 5.0, temperature_min: 1.0, weather_code: 61 },
            ],
        }
    }

    #[async_trait]
    impl WeatherProvider for FakeProvider {
        async fn resolve(&self, query: &str) -> crate::Result<Option<Location>> {
            self.calls.lock().unwrap().push(query.to_string());
            if query == "Nowhere" {
                return Ok(None);
            }
            Ok(Some(Location { latitude: 48.85, longitude: 2.35, name: format!("{query} (resolved)") }))
        }

        async fn forecast(&self, _latitude: f64, _longitude: f64) -> crate::Result<WeatherSnapshot> {
            if self.fail_forecast {
                return Err(WeatherError::Malformed("missing current block".into()));
            }
            Ok(fake_snapshot())
        }
    }

    fn session(fail_forecast: bool) -> Session<FakeProvider> {
        Session::new(Box::new(FakeProvider { fail_forecast, ..Default::default() }), Units::metric())
    }

    #[tokio::test]
    async fn blank_query_is_ignored() {
        let mut s = session(false);

        assert_eq!(s.search("   ").await, SearchOutcome::Ignored);
        assert_eq!(s.status(), SearchStatus::Idle);
        assert_eq!(s.last_search(), None);
        assert!(s.provider.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn successful_search_loads_snapshot_and_selects_first_day() {
        let mut s = session(false);

        let outcome = s.search("Paris").await;

        assert_eq!(outcome, SearchOutcome::Loaded { location_name: "Paris (resolved)".into() });
        assert_eq!(s.status(), SearchStatus::Loaded);
        assert_eq!(s.snapshot().unwrap().location_name, "Paris (resolved)");
        assert_eq!(s.selected_day(), Some(at(1, 0)));
        assert_eq!(s.history().to_vec(), ["Paris"]);
    }

    #[tokio::test]
    async fn no_results_clears_previous_snapshot() {
        let mut s = session(false);
        s.search("Paris").await;

        assert_eq!(s.search("Nowhere").await, SearchOutcome::NoResults);
        assert_eq!(s.status(), SearchStatus::NoResults);
        assert!(s.snapshot().is_none());
        assert!(s.hourly_for_selected_day().is_empty());
        assert_eq!(s.history().to_vec(), ["Paris"]);
    }

    #[tokio::test]
    async fn failed_forecast_is_reported_and_not_recorded() {
        let mut s = session(true);

        let outcome = s.search("Paris").await;

        match outcome {
            SearchOutcome::Failed { message } => assert!(message.contains("missing current block")),
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(s.status(), SearchStatus::Failed);
        assert!(s.snapshot().is_none());
        assert!(s.history().is_empty());
        assert_eq!(s.last_search(), Some("Paris"));
    }

    #[tokio::test]
    async fn retry_reruns_last_query() {
        let mut s = session(false);
        assert!(s.retry().await.is_none());

        s.search("Tokyo").await;
        let outcome = s.retry().await;

        assert_eq!(outcome, Some(SearchOutcome::Loaded { location_name: "Tokyo (resolved)".into() }));
        assert_eq!(*s.provider.calls.lock().unwrap(), ["Tokyo", "Tokyo"]);
    }

    #[tokio::test]
    async fn selected_day_filters_hourly_records() {
        let mut s = session(false);
        assert!(s.hourly_for_selected_day().is_empty());

        s.search("Paris").await;
        let first_day: Vec<f64> = s.hourly_for_selected_day().iter().map(|h| h.temperature).collect();
        assert_eq!(first_day, [1.0, 2.0]);

        assert!(s.select_day_index(1));
        let second_day: Vec<f64> = s.hourly_for_selected_day().iter().map(|h| h.temperature).collect();
        assert_eq!(second_day, [3.0]);

        assert!(!s.select_day_index(9));
    }

    #[tokio::test]
    async fn displays_follow_unit_toggle() {
        let mut s = session(false);
        assert_eq!(s.precipitation_display(), None);

        s.search("Paris").await;
        assert_eq!(s.precipitation_display().as_deref(), Some("25"));
        assert_eq!(s.wind_speed_display().as_deref(), Some("16"));
        assert_eq!(s.temperature_display(0.0), "0.0°");

        s.toggle_units();
        assert_eq!(s.precipitation_display().as_deref(), Some("1"));
        assert_eq!(s.wind_speed_display().as_deref(), Some("10"));
        assert_eq!(s.temperature_display(0.0), "32.0°");
    }

    #[tokio::test]
    async fn individual_units_can_be_set() {
        let mut s = session(false);
        s.set_temperature_unit(TemperatureUnit::Fahrenheit);
        s.set_precipitation_unit(PrecipitationUnit::Inches);
        s.set_wind_speed_unit(WindSpeedUnit::MilesPerHour);

        let units = s.units();
        assert_eq!(units.temperature, TemperatureUnit::Fahrenheit);
        assert_eq!(units.precipitation, PrecipitationUnit::Inches);
        assert_eq!(units.wind_speed, WindSpeedUnit::MilesPerHour);
    }
}
