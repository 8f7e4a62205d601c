//! The dashboard ties fetching, the favorites store, and the unit setting
//! together, and owns the single user-visible message slot.

use crate::{
    error::DashboardError,
    fetch::WeatherFetcher,
    model::{CityWeatherRecord, UnitSystem},
    store::FavoritesStore,
};

#[derive(Debug)]
pub struct Dashboard {
    fetcher: WeatherFetcher,
    store: FavoritesStore,
    unit: UnitSystem,
    message: Option<String>,
}

impl Dashboard {
    pub fn new(fetcher: WeatherFetcher, store: FavoritesStore, unit: UnitSystem) -> Self {
        Self {
            fetcher,
            store,
            unit,
            message: None,
        }
    }

    /// Fetch `city` with the current unit and add it to favorites.
    ///
    /// Returns `Ok(None)` for a blank name. Any failure replaces the message
    /// slot with its user message and is also returned typed.
    pub async fn add_city(
        &mut self,
        city: &str,
    ) -> Result<Option<&CityWeatherRecord>, DashboardError> {
        self.message = None;

        match self.try_add(city).await {
            Ok(Some(id)) => Ok(self.store.get(id)),
            Ok(None) => Ok(None),
            Err(e) => {
                tracing::debug!(error = %e, city, "add city failed");
                self.message = Some(e.user_message().to_string());
                Err(e)
            }
        }
    }

    async fn try_add(&mut self, city: &str) -> Result<Option<u64>, DashboardError> {
        let Some(record) = self.fetcher.fetch(city, self.unit).await? else {
            return Ok(None);
        };

        let id = record.id;
        self.store.add(record)?;
        Ok(Some(id))
    }

    pub fn remove_city(&mut self, id: u64) -> Result<Option<CityWeatherRecord>, DashboardError> {
        self.store.remove(id).map_err(|e| {
            let e = DashboardError::from(e);
            self.message = Some(e.user_message().to_string());
            e
        })
    }

    /// Change the unit used by later fetches. Existing records are left as
    /// fetched; no conversion happens.
    pub fn set_unit(&mut self, unit: UnitSystem) {
        self.unit = unit;
    }

    pub fn unit(&self) -> UnitSystem {
        self.unit
    }

    pub fn favorites(&self) -> &[CityWeatherRecord] {
        self.store.records()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::{FetchError, StoreError},
        model::{Condition, ForecastEntry},
        provider::WeatherProvider,
        snapshot::MemorySnapshotStore,
    };
    use async_trait::async_trait;

    /// Answers every city with an id derived from its name bytes and a
    /// temperature depending on the unit.
    #[derive(Debug)]
    struct FakeProvider;

    #[async_trait]
    impl WeatherProvider for FakeProvider {
        async fn current(
            &self,
            city: &str,
            unit: UnitSystem,
        ) -> Result<CityWeatherRecord, FetchError> {
            match city {
                "Atlantis" => Err(FetchError::CityNotFound),
                "Busy" => Err(FetchError::RateLimited),
                _ => Ok(CityWeatherRecord {
                    id: city.bytes().map(u64::from).sum(),
                    name: city.to_string(),
                    temperature: match unit {
                        UnitSystem::Metric => 20.0,
                        UnitSystem::Imperial => 68.0,
                    },
                    humidity: 40,
                    condition: Condition::unknown(),
                    unit,
                    forecast: Vec::new(),
                }),
            }
        }

        async fn forecast(
            &self,
            _city: &str,
            _unit: UnitSystem,
        ) -> Result<Vec<ForecastEntry>, FetchError> {
            Ok(Vec::new())
        }
    }

    fn dashboard() -> Dashboard {
        Dashboard::new(
            WeatherFetcher::new(Box::new(FakeProvider)),
            FavoritesStore::open(Box::new(MemorySnapshotStore::new())),
            UnitSystem::Metric,
        )
    }

    #[tokio::test]
    async fn add_city_puts_it_first() {
        let mut dash = dashboard();
        dash.add_city("Paris").await.unwrap();
        let added = dash.add_city("London").await.unwrap().expect("added");

        assert_eq!(added.name, "London");
        assert_eq!(dash.favorites()[0].name, "London");
        assert_eq!(dash.favorites().len(), 2);
        assert_eq!(dash.message(), None);
    }

    #[tokio::test]
    async fn duplicate_sets_message_and_keeps_one() {
        let mut dash = dashboard();
        dash.add_city("London").await.unwrap();

        let err = dash.add_city("London").await.unwrap_err();
        assert_eq!(err, DashboardError::Store(StoreError::Duplicate(618)));
        assert_eq!(dash.message(), Some("City already added!"));
        assert_eq!(dash.favorites().len(), 1);
    }

    #[tokio::test]
    async fn not_found_leaves_collection_unchanged() {
        let mut dash = dashboard();
        dash.add_city("London").await.unwrap();

        let err = dash.add_city("Atlantis").await.unwrap_err();
        assert_eq!(err, DashboardError::Fetch(FetchError::CityNotFound));
        assert_eq!(dash.message(), Some("City not found!"));
        assert_eq!(dash.favorites().len(), 1);
    }

    #[tokio::test]
    async fn new_message_replaces_previous_one() {
        let mut dash = dashboard();
        let _ = dash.add_city("Atlantis").await;
        let _ = dash.add_city("Busy").await;
        assert_eq!(dash.message(), Some("API limit exceeded!"));

        dash.add_city("Oslo").await.unwrap();
        assert_eq!(dash.message(), None);
    }

    #[tokio::test]
    async fn blank_city_does_nothing() {
        let mut dash = dashboard();
        assert!(dash.add_city("").await.unwrap().is_none());
        assert!(dash.favorites().is_empty());
    }

    #[tokio::test]
    async fn unit_switch_does_not_convert_existing_records() {
        let mut dash = dashboard();
        dash.add_city("London").await.unwrap();

        dash.set_unit(UnitSystem::Imperial);
        dash.add_city("Boston").await.unwrap();

        let london = dash.favorites().iter().find(|r| r.name == "London").unwrap();
        let boston = dash.favorites().iter().find(|r| r.name == "Boston").unwrap();
        assert_eq!(london.unit, UnitSystem::Metric);
        assert_eq!(london.temperature, 20.0);
        assert_eq!(boston.unit, UnitSystem::Imperial);
        assert_eq!(boston.temperature, 68.0);
    }

    #[tokio::test]
    async fn remove_city_by_id() {
        let mut dash = dashboard();
        dash.add_city("London").await.unwrap();

        let removed = dash.remove_city(618).unwrap();
        assert_eq!(removed.map(|r| r.name), Some("London".to_string()));
        assert!(dash.favorites().is_empty());
        assert_eq!(dash.remove_city(618).unwrap(), None);
    }
}
