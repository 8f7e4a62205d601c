use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Unit system sent to the provider with every request.
///
/// The setting is applied at fetch time only. Records already in the
/// favorites collection keep the values (and the `unit`) they were fetched
/// with; switching the setting never converts them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    /// Value of the provider's `units` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "°C",
            UnitSystem::Imperial => "°F",
        }
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UnitSystem {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "metric" | "c" | "celsius" => Ok(UnitSystem::Metric),
            "imperial" | "f" | "fahrenheit" => Ok(UnitSystem::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported: metric, imperial."
            )),
        }
    }
}

/// Presentation preference persisted next to the unit setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Theme {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(anyhow::anyhow!("Unknown theme '{value}'. Supported: light, dark.")),
        }
    }
}

/// Provider icon code plus human description, e.g. `10d` / "light rain".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub icon: String,
    pub description: String,
}

impl Condition {
    pub fn unknown() -> Self {
        Self {
            icon: String::new(),
            description: "Unknown".to_string(),
        }
    }
}

/// One forecast sample. After filtering, the midday sample of one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub timestamp: NaiveDateTime,
    pub temperature: f64,
    pub condition: Condition,
}

/// A fetched weather snapshot for one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityWeatherRecord {
    /// Provider-assigned city id, used as the dedupe key.
    pub id: u64,
    pub name: String,
    pub temperature: f64,
    pub humidity: u8,
    pub condition: Condition,
    /// Unit system active when this record was fetched.
    #[serde(default)]
    pub unit: UnitSystem,
    #[serde(default)]
    pub forecast: Vec<ForecastEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_system_parses_aliases() {
        assert_eq!(UnitSystem::try_from("Metric").unwrap(), UnitSystem::Metric);
        assert_eq!(UnitSystem::try_from("f").unwrap(), UnitSystem::Imperial);
        assert!(UnitSystem::try_from("kelvin").is_err());
    }

    #[test]
    fn theme_toggle_flips() {
        assert_eq!(Theme::Light.toggle(), Theme::Dark);
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
    }

    #[test]
    fn record_without_unit_or_forecast_deserializes_with_defaults() {
        let json = r#"{
            "id": 2643743,
            "name": "London",
            "temperature": 11.5,
            "humidity": 80,
            "condition": { "icon": "10d", "description": "light rain" }
        }"#;

        let record: CityWeatherRecord = serde_json::from_str(json).expect("valid record");
        assert_eq!(record.unit, UnitSystem::Metric);
        assert!(record.forecast.is_empty());
    }
}
