//! Two-step fetch: current conditions, then the forecast for the same city.

use chrono::{NaiveDate, NaiveTime};

use crate::{
    error::FetchError,
    model::{CityWeatherRecord, ForecastEntry, UnitSystem},
    provider::WeatherProvider,
};

#[derive(Debug)]
pub struct WeatherFetcher {
    provider: Box<dyn WeatherProvider>,
}

impl WeatherFetcher {
    pub fn new(provider: Box<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Fetch one city's record with its daily forecast attached.
    ///
    /// A blank city name is a no-op and yields `Ok(None)`. The forecast
    /// request is only issued once the current-conditions request succeeded;
    /// the first failure is returned as-is.
    pub async fn fetch(
        &self,
        city: &str,
        unit: UnitSystem,
    ) -> Result<Option<CityWeatherRecord>, FetchError> {
        let city = city.trim();
        if city.is_empty() {
            return Ok(None);
        }

        let mut record = self.provider.current(city, unit).await?;
        let samples = self.provider.forecast(city, unit).await?;

        record.forecast = midday_samples(samples);
        tracing::debug!(
            id = record.id,
            name = %record.name,
            days = record.forecast.len(),
            "fetched city weather"
        );

        Ok(Some(record))
    }
}

/// Keep the 12:00 sample of each calendar day, in chronological order.
pub fn midday_samples(mut samples: Vec<ForecastEntry>) -> Vec<ForecastEntry> {
    let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default();
    samples.sort_by_key(|s| s.timestamp);

    let mut last_day: Option<NaiveDate> = None;
    samples
        .into_iter()
        .filter(|s| s.timestamp.time() == noon)
        .filter(|s| {
            let day = s.timestamp.date();
            if last_day == Some(day) {
                false
            } else {
                last_day = Some(day);
                true
            }
        })
        .collect()
}
