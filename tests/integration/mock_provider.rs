//! Mock forecast provider for integration testing.
//!
//! Provides a deterministic `ForecastProvider` that serves canned
//! forecasts per location and records every request, all in-memory
//! with no external dependencies.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use weather_advisor::data::{ForecastError, ForecastProvider};
use weather_advisor::intent::sanitize::display_case;
use weather_advisor::types::{CurrentConditions, DailyRecord, ForecastBundle, HourlyRecord};

/// One day's canned figures.
#[derive(Debug, Clone, Copy)]
pub struct DaySpec {
    pub avg: i32,
    pub rain: u32,
    pub wind: u32,
    pub humidity: u32,
}

impl DaySpec {
    pub const fn new(avg: i32, rain: u32, wind: u32, humidity: u32) -> Self {
        Self { avg, rain, wind, humidity }
    }
}

pub struct MockForecast {
    days: HashMap<String, Vec<DaySpec>>,
    /// (location, days) for every fetch, in call order.
    requests: Arc<Mutex<Vec<(String, u32)>>>,
    /// If set, all fetches fail with HTTP 503.
    force_error: Arc<Mutex<bool>>,
}

impl MockForecast {
    pub fn new() -> Self {
        Self {
            days: HashMap::new(),
            requests: Arc::new(Mutex::new(Vec::new())),
            force_error: Arc::new(Mutex::new(false)),
        }
    }

    /// Serve `days` for `location` (matched case-insensitively).
    pub fn with_location(mut self, location: &str, days: &[DaySpec]) -> Self {
        self.days.insert(location.to_lowercase(), days.to_vec());
        self
    }

    pub fn set_error(&self) {
        *self.force_error.lock().unwrap() = true;
    }

    pub fn requests(&self) -> Arc<Mutex<Vec<(String, u32)>>> {
        Arc::clone(&self.requests)
    }

    fn record(index: usize, spec: &DaySpec) -> DailyRecord {
        let hour = |time: &str, desc: &str| HourlyRecord {
            time: Some(time.to_string()),
            chance_of_rain: Some(spec.rain.to_string()),
            wind_speed_kmph: Some(spec.wind.to_string()),
            humidity: Some(spec.humidity.to_string()),
            description: Some(desc.to_string()),
        };
        DailyRecord {
            date: Some(format!("2026-10-{:02}", 14 + index)),
            min_temp_c: Some((spec.avg - 4).to_string()),
            avg_temp_c: Some(spec.avg.to_string()),
            max_temp_c: Some((spec.avg + 4).to_string()),
            hourly: vec![hour("0", "Clear"), hour("1200", "Partly cloudy")],
        }
    }
}

#[async_trait]
impl ForecastProvider for MockForecast {
    async fn fetch(&self, location: &str, days: u32) -> Result<ForecastBundle, ForecastError> {
        self.requests.lock().unwrap().push((location.to_string(), days));

        if *self.force_error.lock().unwrap() {
            return Err(ForecastError::Status {
                location: location.to_string(),
                status: 503,
            });
        }

        let specs = self
            .days
            .get(&location.to_lowercase())
            .ok_or_else(|| ForecastError::Status {
                location: location.to_string(),
                status: 404,
            })?;

        let forecast = specs
            .iter()
            .take(days as usize)
            .enumerate()
            .map(|(i, spec)| Self::record(i, spec))
            .collect();

        let current = CurrentConditions {
            temp_c: specs.first().map(|s| s.avg.to_string()),
            description: Some("Partly cloudy".to_string()),
            ..CurrentConditions::default()
        };

        Ok(ForecastBundle::new(display_case(location), current, forecast))
    }

    fn source(&self) -> String {
        "mock".to_string()
    }
}
