//! wttr.in forecast provider.
//!
//! Uses the free wttr.in JSON format (`?format=j1`, no key required),
//! which returns today's conditions plus a three-day forecast with
//! three-hourly steps.
//!
//! API: `https://wttr.in/{location}?format=j1`
//! Auth: None required.

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

use super::{ForecastError, ForecastProvider};
use crate::config::ForecastConfig;
use crate::intent::sanitize::{display_case, sanitize_location};
use crate::types::{
    CurrentConditions, DailyRecord, ForecastBundle, HourlyRecord, DEFAULT_FORECAST_DAYS,
    MAX_FORECAST_DAYS, MIN_FORECAST_DAYS,
};

// ---------------------------------------------------------------------------
// wttr.in response types
// ---------------------------------------------------------------------------

/// wttr.in sends numbers as strings; accept either and keep the text.
fn numeric_like<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// `weatherDesc` is normally `[{"value": "Sunny"}]`; tolerate a bare string.
fn description_like<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .first()
            .and_then(|item| item.get("value"))
            .and_then(Value::as_str)
            .map(str::to_string),
        Some(Value::String(s)) => Some(s),
        _ => None,
    };
    Ok(text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()))
}

#[derive(Debug, Deserialize)]
struct WttrResponse {
    #[serde(default)]
    current_condition: Vec<WttrCurrent>,
    #[serde(default)]
    weather: Vec<WttrDay>,
}

#[derive(Debug, Deserialize)]
struct WttrCurrent {
    #[serde(rename = "temp_C", default, deserialize_with = "numeric_like")]
    temp_c: Option<String>,
    #[serde(rename = "FeelsLikeC", default, deserialize_with = "numeric_like")]
    feels_like_c: Option<String>,
    #[serde(default, deserialize_with = "numeric_like")]
    humidity: Option<String>,
    #[serde(rename = "windspeedKmph", default, deserialize_with = "numeric_like")]
    wind_speed_kmph: Option<String>,
    #[serde(rename = "weatherDesc", default, deserialize_with = "description_like")]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WttrDay {
    #[serde(default, deserialize_with = "numeric_like")]
    date: Option<String>,
    #[serde(rename = "mintempC", default, deserialize_with = "numeric_like")]
    min_temp_c: Option<String>,
    #[serde(rename = "avgtempC", default, deserialize_with = "numeric_like")]
    avg_temp_c: Option<String>,
    #[serde(rename = "maxtempC", default, deserialize_with = "numeric_like")]
    max_temp_c: Option<String>,
    #[serde(default)]
    hourly: Vec<WttrHour>,
}

#[derive(Debug, Deserialize)]
struct WttrHour {
    #[serde(default, deserialize_with = "numeric_like")]
    time: Option<String>,
    #[serde(rename = "chanceofrain", default, deserialize_with = "numeric_like")]
    chance_of_rain: Option<String>,
    #[serde(rename = "windspeedKmph", default, deserialize_with = "numeric_like")]
    wind_speed_kmph: Option<String>,
    #[serde(default, deserialize_with = "numeric_like")]
    humidity: Option<String>,
    #[serde(rename = "weatherDesc", default, deserialize_with = "description_like")]
    description: Option<String>,
}

impl From<WttrCurrent> for CurrentConditions {
    fn from(c: WttrCurrent) -> Self {
        Self {
            temp_c: c.temp_c,
            feels_like_c: c.feels_like_c,
            humidity: c.humidity,
            wind_speed_kmph: c.wind_speed_kmph,
            description: c.description,
        }
    }
}

impl From<WttrHour> for HourlyRecord {
    fn from(h: WttrHour) -> Self {
        Self {
            time: h.time,
            chance_of_rain: h.chance_of_rain,
            wind_speed_kmph: h.wind_speed_kmph,
            humidity: h.humidity,
            description: h.description,
        }
    }
}

impl From<WttrDay> for DailyRecord {
    fn from(d: WttrDay) -> Self {
        Self {
            date: d.date,
            min_temp_c: d.min_temp_c,
            avg_temp_c: d.avg_temp_c,
            max_temp_c: d.max_temp_c,
            hourly: d.hourly.into_iter().map(HourlyRecord::from).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Provider
// ---------------------------------------------------------------------------

pub struct WttrClient {
    http: Client,
    base_url: String,
    max_days: u32,
}

impl WttrClient {
    pub fn new(config: &ForecastConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .user_agent(concat!("weather-advisor/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build wttr.in HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_days: config.max_days.clamp(MIN_FORECAST_DAYS, MAX_FORECAST_DAYS),
        })
    }

    pub fn url_for(&self, location: &str) -> String {
        format!("{}/{}?format=j1", self.base_url, urlencoding::encode(location))
    }

    /// Requested days, with 0 meaning "the default window".
    fn window(&self, days: u32) -> u32 {
        let days = if days == 0 { DEFAULT_FORECAST_DAYS } else { days };
        days.clamp(MIN_FORECAST_DAYS, self.max_days)
    }

    fn into_bundle(location: &str, resp: WttrResponse, days: u32) -> ForecastBundle {
        let current = resp
            .current_condition
            .into_iter()
            .next()
            .map(CurrentConditions::from)
            .unwrap_or_default();

        let forecast = resp
            .weather
            .into_iter()
            .take(days as usize)
            .map(DailyRecord::from)
            .collect();

        ForecastBundle::new(display_case(location), current, forecast)
    }
}

#[async_trait]
impl ForecastProvider for WttrClient {
    async fn fetch(&self, location: &str, days: u32) -> Result<ForecastBundle, ForecastError> {
        let cleaned = sanitize_location(location);
        if cleaned.is_empty() {
            return Err(ForecastError::InvalidLocation(location.to_string()));
        }
        let days = self.window(days);

        let url = self.url_for(&cleaned);
        debug!(location = %cleaned, days, %url, "Fetching forecast");

        let resp = self.http.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ForecastError::Status {
                location: cleaned,
                status: status.as_u16(),
            });
        }

        let body = resp.text().await?;
        let parsed: WttrResponse =
            serde_json::from_str(&body).map_err(|e| ForecastError::Decode {
                location: cleaned.clone(),
                message: e.to_string(),
            })?;

        let bundle = Self::into_bundle(&cleaned, parsed, days);
        info!(
            location = %bundle.location,
            days = bundle.forecast.len(),
            fetched_at = %bundle.fetched_at.to_rfc3339(),
            "Forecast fetched"
        );
        Ok(bundle)
    }

    fn source(&self) -> String {
        format!("wttr.in ({})", self.base_url)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
