//! Search state and the two-step weather → air quality lookup.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::{
    error::SearchError,
    format::{BackgroundClass, background_class_for},
    model::{AirQualityIndex, WeatherReading, normalize_query},
    provider::WeatherProvider,
    recent::RecentCities,
    storage::KeyValueStore,
};

/// Everything a view needs to draw the dashboard.
///
/// `air_quality` is only ever set while `weather` is set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub input: String,
    pub weather: Option<WeatherReading>,
    pub air_quality: Option<AirQualityIndex>,
    /// True only while a lookup pair is in flight.
    pub loading: bool,
    pub error: Option<String>,
    pub recent: RecentCities,
}

impl DashboardState {
    pub fn background_class(&self) -> Option<BackgroundClass> {
        background_class_for(self.weather.as_ref().map(|w| w.temperature_c))
    }
}

#[derive(Debug)]
pub enum SearchOutcome {
    /// Weather and air quality were both fetched.
    Found,
    /// Nothing to show; `DashboardState::error` holds the user message.
    Failed(SearchError),
    /// Another search was still running, this one was ignored.
    Busy,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found)
    }
}

/// Owns the provider, the recent-city store and the view state.
#[derive(Debug)]
pub struct Dashboard<P> {
    provider: P,
    store: Box<dyn KeyValueStore>,
    state: Mutex<DashboardState>,
}

impl<P: WeatherProvider> Dashboard<P> {
    /// Rehydrates the recent-city list from `store`.
    pub fn new(provider: P, store: Box<dyn KeyValueStore>) -> Self {
        let recent = RecentCities::load(store.as_ref());
        debug!(count = recent.len(), "loaded recent cities");

        Self {
            provider,
            store,
            state: Mutex::new(DashboardState { recent, ..DashboardState::default() }),
        }
    }

    pub fn snapshot(&self) -> DashboardState {
        self.lock().clone()
    }

    pub fn set_input(&self, text: &str) {
        self.lock().input = text.to_string();
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    /// Search for `term`, or for the current input when `term` is `None`.
    pub async fn search(&self, term: Option<&str>) -> SearchOutcome {
        let city = {
            let mut state = self.lock();
            if state.loading {
                debug!("search ignored, lookup already in flight");
                return SearchOutcome::Busy;
            }

            let raw = term.map_or_else(|| state.input.clone(), str::to_owned);
            let Some(city) = normalize_query(&raw) else {
                state.error = Some(SearchError::Validation.user_message().to_string());
                return SearchOutcome::Failed(SearchError::Validation);
            };

            state.error = None;
            state.weather = None;
            state.air_quality = None;
            state.loading = true;
            city
        };

        let result = self.lookup(&city).await;

        let mut state = self.lock();
        state.loading = false;

        match result {
            Ok(()) => SearchOutcome::Found,
            Err(e) => {
                warn!(city = %city, error = %e, "weather lookup failed");
                // One failure path for both steps: a failed air quality call
                // also hides the weather panel.
                state.weather = None;
                state.air_quality = None;
                state.error = Some(e.user_message().to_string());
                SearchOutcome::Failed(e)
            }
        }
    }

    async fn lookup(&self, city: &str) -> Result<(), SearchError> {
        let reading = self.provider.current_weather(city).await?;
        let coordinates = reading.coordinates;
        self.weather_found(city, reading);

        let aqi = self.provider.air_quality(coordinates).await?;
        info!(city = %city, aqi = aqi.value(), "lookup complete");
        self.lock().air_quality = Some(aqi);

        Ok(())
    }

    fn weather_found(&self, city: &str, reading: WeatherReading) {
        let mut state = self.lock();
        state.weather = Some(reading);
        state.input = city.to_string();

        state.recent.record(city);
        if let Err(e) = state.recent.save(self.store.as_ref()) {
            warn!(error = %e, "failed to persist recent cities");
        }
    }

    fn lock(&self) -> MutexGuard<'_, DashboardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
