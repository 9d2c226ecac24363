//! Question answering, end to end.
//!
//! The `Advisor` ties the intent parser to a forecast provider:
//! parse → fill in a default location → fetch → select → answer.
//! Provider failures never escape; they become the apology text.

pub mod metrics;
pub mod response;
pub mod slice;

use tracing::{info, warn};

use crate::data::ForecastProvider;
use crate::intent::{sanitize_location, IntentParser};
use crate::types::{CurrentConditions, ForecastBundle, ParsedIntent, When};

use metrics::day_brief;
use response::{generate_weather_response, APOLOGY};

/// Returned when neither the question nor the caller names a place.
pub const NEED_LOCATION: &str = "Please include a location in your question or set a default location.";

const NOT_AVAILABLE: &str = "N/A";

pub struct Advisor {
    parser: IntentParser,
    provider: Box<dyn ForecastProvider>,
}

impl Advisor {
    pub fn new(parser: IntentParser, provider: Box<dyn ForecastProvider>) -> Self {
        Self { parser, provider }
    }

    /// Answer a free-text question.
    ///
    /// `default_location` is used only when the question names no place.
    pub async fn ask(&self, question: &str, default_location: Option<&str>) -> String {
        let intent = self.interpret(question, default_location).await;
        self.answer(&intent).await
    }

    /// Parse a question and fill in the fallback location.
    pub async fn interpret(&self, question: &str, default_location: Option<&str>) -> ParsedIntent {
        self.parser
            .parse(question)
            .await
            .or_location(default_location.map(sanitize_location))
    }

    /// Fetch and answer for an already-parsed intent.
    pub async fn answer(&self, intent: &ParsedIntent) -> String {
        let Some(location) = intent.location.as_deref() else {
            return NEED_LOCATION.to_string();
        };
        info!(%intent, "Question parsed");

        // "Tomorrow" is the second daily record, so fetch at least two.
        let fetch_days = match intent.when {
            When::Tomorrow => intent.days.max(2),
            When::Today | When::NextNDays => intent.days,
        };

        match self.provider.fetch(location, fetch_days).await {
            Ok(bundle) => generate_weather_response(intent, Some(&bundle)),
            Err(e) => {
                warn!(source = %self.provider.source(), %location, error = %e, "Forecast unavailable");
                APOLOGY.to_string()
            }
        }
    }

    /// Fetch a forecast and render the plain listing.
    pub async fn forecast_listing(&self, location: &str, days: u32) -> String {
        match self.provider.fetch(location, days).await {
            Ok(bundle) => plain_listing(&bundle),
            Err(e) => {
                warn!(source = %self.provider.source(), %location, error = %e, "Forecast unavailable");
                APOLOGY.to_string()
            }
        }
    }
}

/// Current conditions followed by one indented brief per day.
pub fn plain_listing(bundle: &ForecastBundle) -> String {
    let temp = bundle.current.temp_c.as_deref().unwrap_or(NOT_AVAILABLE);
    let desc = bundle.current.description.as_deref().unwrap_or(NOT_AVAILABLE);

    let mut lines = vec![format!("Current weather in {}: {temp}°C, {desc}", bundle.location)];
    if let Some(details) = current_details(&bundle.current) {
        lines.push(details);
    }
    lines.push(String::new());
    lines.push("Forecast:".to_string());
    lines.extend(bundle.forecast.iter().map(|d| format!("  {}", day_brief(d))));
    lines.join("\n")
}

/// Feels-like, humidity and wind, whichever the provider reported.
fn current_details(current: &CurrentConditions) -> Option<String> {
    let parts: Vec<String> = [
        current.feels_like_c.as_deref().map(|v| format!("Feels like {v}°C")),
        current.humidity.as_deref().map(|v| format!("humidity {v}%")),
        current.wind_speed_kmph.as_deref().map(|v| format!("wind {v} km/h")),
    ]
    .into_iter()
    .flatten()
    .collect();

    (!parts.is_empty()).then(|| parts.join(", "))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
