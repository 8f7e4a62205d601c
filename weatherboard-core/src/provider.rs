use crate::{
    Config,
    error::FetchError,
    model::{CityWeatherRecord, ForecastEntry, UnitSystem},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Read-only access to a weather service.
///
/// `current` returns a record with an empty `forecast`; `forecast` returns the
/// raw, unfiltered samples.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, city: &str, unit: UnitSystem) -> Result<CityWeatherRecord, FetchError>;

    async fn forecast(&self, city: &str, unit: UnitSystem) -> Result<Vec<ForecastEntry>, FetchError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
                 Hint: run `weatherboard configure` or set OPENWEATHER_API_KEY."
        )
    })?;

    let provider = match config.base_url.as_deref() {
        Some(base) => OpenWeatherProvider::with_base_url(api_key, base),
        None => OpenWeatherProvider::new(api_key),
    };

    Ok(Box::new(provider))
}
