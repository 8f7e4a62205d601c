//! Core library for the `weatherboard` dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather provider behind the `WeatherProvider` trait
//! - Two-step fetch orchestration (current conditions + daily forecast)
//! - The favorites store and its snapshot persistence
//! - The dashboard controller with its single message slot
//!
//! It is used by `weatherboard-cli`, but can also back other front ends.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod fetch;
pub mod model;
pub mod provider;
pub mod snapshot;
pub mod store;

pub use config::Config;
pub use dashboard::Dashboard;
pub use error::{DashboardError, FetchError, StoreError};
pub use fetch::WeatherFetcher;
pub use model::{CityWeatherRecord, Condition, ForecastEntry, Theme, UnitSystem};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider};
pub use snapshot::{FileSnapshotStore, MemorySnapshotStore, SnapshotStore};
pub use store::FavoritesStore;
