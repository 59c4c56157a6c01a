//! Core library for the `airwatch` weather & air quality dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client for current weather and air pollution
//! - The recent-searches store and its key-value persistence
//! - Display formatting helpers
//! - The `Dashboard` controller tying search, lookup and state together
//!
//! It is used by `airwatch-cli`, but can also be reused by other front ends.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod model;
pub mod provider;
pub mod recent;
pub mod storage;

pub use config::Config;
pub use dashboard::{Dashboard, DashboardState, SearchOutcome};
pub use error::{LookupError, SearchError};
pub use model::{AirQualityIndex, Coordinates, WeatherReading};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use recent::RecentCities;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
