//! Deterministic, keyword-driven intent extraction.
//!
//! Always produces an answer, so it sits last in the extractor cascade.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use super::sanitize::sanitize_location;
use super::{ExtractedIntent, IntentExtractor};
use crate::types::{clamp_days, Attribute, When, DEFAULT_FORECAST_DAYS};

static LOCATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:in|at|for)\s+(\p{L}[\p{L}\s\-']{0,59})").expect("valid regex")
});

static NEXT_DAYS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bnext\s+(\d{1,3})\s+day").expect("valid regex"));

// Attribute keyword groups, in priority order. Plain substring matches,
// so "raining" and "precipitation" both count as rain.
const RAIN_WORDS: &[&str] = &["rain", "umbrella", "precip"];
const WIND_WORDS: &[&str] = &["windy", "wind"];
const HUMIDITY_WORDS: &[&str] = &["humid", "humidity"];
const TEMPERATURE_WORDS: &[&str] = &["hot", "cold", "warm", "temp", "temperature"];

const ATTRIBUTE_PRIORITY: &[(Attribute, &[&str])] = &[
    (Attribute::Precipitation, RAIN_WORDS),
    (Attribute::Wind, WIND_WORDS),
    (Attribute::Humidity, HUMIDITY_WORDS),
    (Attribute::Temperature, TEMPERATURE_WORDS),
];

/// First "in/at/for <place>" phrase that still names something after
/// sanitizing.
pub fn extract_location(question: &str) -> Option<String> {
    LOCATION_RE
        .captures_iter(question)
        .filter_map(|caps| caps.get(1))
        .map(|m| sanitize_location(m.as_str()))
        .find(|loc| !loc.is_empty())
}

/// Time window from "tomorrow", "next N days" and "weekend".
///
/// The rules are applied in that order and each one overwrites the
/// previous, so "weekend" wins over an explicit "next 2 days".
pub fn extract_window(lower: &str) -> (When, u32) {
    let mut window = (When::Today, DEFAULT_FORECAST_DAYS);

    if lower.contains("tomorrow") {
        window = (When::Tomorrow, 1);
    }
    if let Some(caps) = NEXT_DAYS_RE.captures(lower) {
        let n = caps[1].parse::<i64>().unwrap_or(i64::from(DEFAULT_FORECAST_DAYS));
        window = (When::NextNDays, clamp_days(n));
    }
    if lower.contains("weekend") {
        window = (When::NextNDays, 3);
    }

    window
}

/// The single highest-priority attribute mentioned, or `Summary`.
pub fn extract_attribute(lower: &str) -> Attribute {
    ATTRIBUTE_PRIORITY
        .iter()
        .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
        .map(|(attr, _)| *attr)
        .unwrap_or(Attribute::Summary)
}

/// Run every rule over the question.
pub fn extract_rules(question: &str) -> ExtractedIntent {
    let lower = question.to_lowercase();
    let (when, days) = extract_window(&lower);

    ExtractedIntent {
        location: extract_location(question),
        days,
        when,
        attribute: extract_attribute(&lower),
    }
}

/// The rule-based stage of the extractor cascade.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleBasedExtractor;

#[async_trait]
impl IntentExtractor for RuleBasedExtractor {
    async fn extract(&self, question: &str) -> Option<ExtractedIntent> {
        Some(extract_rules(question))
    }

    fn name(&self) -> &str {
        "rules"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
