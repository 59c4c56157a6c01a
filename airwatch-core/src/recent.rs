use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::storage::KeyValueStore;

/// Store key for the serialized list.
pub const RECENT_CITIES_KEY: &str = "recentCities";

pub const MAX_RECENT_CITIES: usize = 3;

/// Most-recent-first list of past successful searches, unique ignoring case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentCities(Vec<String>);

impl RecentCities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move `city` to the front, dropping any entry that differs only by case,
    /// and keep at most [`MAX_RECENT_CITIES`].
    pub fn record(&mut self, city: &str) {
        let needle = city.to_lowercase();
        self.0.retain(|c| c.to_lowercase() != needle);
        self.0.insert(0, city.to_string());
        self.0.truncate(MAX_RECENT_CITIES);
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Read the stored list. Missing or unreadable data yields an empty list.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let raw = match store.get(RECENT_CITIES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(e) => {
                warn!(error = %e, "could not read recent cities, starting empty");
                return Self::default();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(mut cities) => {
                cities.truncate(MAX_RECENT_CITIES);
                Self(cities)
            }
            Err(e) => {
                warn!(error = %e, "ignoring malformed recent cities entry");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> Result<()> {
        let json = serde_json::to_string(&self.0).context("Failed to serialize recent cities")?;
        store.set(RECENT_CITIES_KEY, &json)
    }
}

impl From<Vec<String>> for RecentCities {
    fn from(mut cities: Vec<String>) -> Self {
        cities.truncate(MAX_RECENT_CITIES);
        Self(cities)
    }
}
