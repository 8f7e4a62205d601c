use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    error::FetchError,
    model::{CityWeatherRecord, Condition, ForecastEntry, UnitSystem},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

const CURRENT_PATH: &str = "/data/2.5/weather";
const FORECAST_PATH: &str = "/data/2.5/forecast";

/// Format of the forecast `dt_txt` field, e.g. `2024-05-01 12:00:00`.
const DT_TXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Point the provider at a different endpoint root (mock servers, proxies).
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        city: &str,
        unit: UnitSystem,
    ) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, city, %unit, "requesting OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", unit.as_str()),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Unknown(format!("request to {path} failed: {e}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| FetchError::Unknown(format!("failed to read {path} body: {e}")))?;

        if !status.is_success() {
            tracing::debug!(%status, body = %truncate_body(&body), "OpenWeather returned an error");
            return Err(classify_status(status, &body));
        }

        serde_json::from_str(&body)
            .map_err(|e| FetchError::Unknown(format!("failed to parse {path} JSON: {e}")))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, city: &str, unit: UnitSystem) -> Result<CityWeatherRecord, FetchError> {
        let parsed: OwCurrentResponse = self.get_json(CURRENT_PATH, city, unit).await?;

        Ok(CityWeatherRecord {
            id: parsed.id,
            name: parsed.name,
            temperature: parsed.main.temp,
            humidity: parsed.main.humidity,
            condition: first_condition(parsed.weather),
            unit,
            forecast: Vec::new(),
        })
    }

    async fn forecast(&self, city: &str, unit: UnitSystem) -> Result<Vec<ForecastEntry>, FetchError> {
        let parsed: OwForecastResponse = self.get_json(FORECAST_PATH, city, unit).await?;

        parsed
            .list
            .into_iter()
            .map(|entry| {
                let timestamp = NaiveDateTime::parse_from_str(&entry.dt_txt, DT_TXT_FORMAT)
                    .map_err(|e| {
                        FetchError::Unknown(format!("bad forecast timestamp '{}': {e}", entry.dt_txt))
                    })?;

                Ok(ForecastEntry {
                    timestamp,
                    temperature: entry.main.temp,
                    condition: first_condition(entry.weather),
                })
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    icon: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    id: u64,
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt_txt: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

fn first_condition(weather: Vec<OwWeather>) -> Condition {
    weather
        .into_iter()
        .next()
        .map(|w| Condition {
            icon: w.icon,
            description: w.description,
        })
        .unwrap_or_else(Condition::unknown)
}

fn classify_status(status: StatusCode, body: &str) -> FetchError {
    match status {
        StatusCode::NOT_FOUND => FetchError::CityNotFound,
        StatusCode::TOO_MANY_REQUESTS => FetchError::RateLimited,
        _ => FetchError::Unknown(format!(
            "OpenWeather responded with status {}: {}",
            status,
            truncate_body(body)
        )),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
