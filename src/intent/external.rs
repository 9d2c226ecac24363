//! Language-model intent extraction.
//!
//! Asks a `TextGenerator` to restate the question as JSON, then
//! validates every field before trusting it. Any failure along the way
//! (disabled, timeout, HTTP error, prose instead of JSON, a non-object
//! payload) means "no result" and the cascade moves on.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use super::sanitize::sanitize_location;
use super::{ExtractedIntent, IntentExtractor};
use crate::llm::TextGenerator;
use crate::types::{clamp_days, Attribute, When, DEFAULT_FORECAST_DAYS};

/// Instruction sent ahead of every question.
pub const INSTRUCTION: &str = "You are a weather question parser. Output JSON with keys: \
location (string|null), days (1..5), when ('today'|'tomorrow'|'next_n_days'), \
attribute ('temperature'|'rain'|'precipitation'|'wind'|'humidity'|'summary'). \
If 'this weekend' -> next_n_days + days=3. \
Default: location=null, days=3, when='today', attribute='summary'.";

pub fn build_prompt(question: &str) -> String {
    format!("{INSTRUCTION}\nUser question: {question}\nJSON:")
}

/// The text between the first `{` and the last `}`, or the whole
/// (trimmed) text when there is no such pair.
pub fn extract_json_object(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text.trim(),
    }
}

fn validate_location(value: Option<&Value>) -> Option<String> {
    let raw = value?.as_str()?;
    let loc = sanitize_location(raw);
    (!loc.is_empty()).then_some(loc)
}

fn validate_days(value: Option<&Value>) -> u32 {
    let n = match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    n.map(clamp_days).unwrap_or(DEFAULT_FORECAST_DAYS)
}

fn validate_when(value: Option<&Value>) -> When {
    value
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .unwrap_or(When::Today)
}

fn validate_attribute(value: Option<&Value>) -> Attribute {
    value
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .unwrap_or(Attribute::Summary)
}

/// Turn a model reply into a validated intent, or `None` when the reply
/// holds no JSON object.
pub fn parse_reply(text: &str) -> Option<ExtractedIntent> {
    let value: Value = serde_json::from_str(extract_json_object(text)).ok()?;
    let obj = value.as_object()?;

    Some(ExtractedIntent {
        location: validate_location(obj.get("location")),
        days: validate_days(obj.get("days")),
        when: validate_when(obj.get("when")),
        attribute: validate_attribute(obj.get("attribute")),
    })
}

/// The language-model stage of the extractor cascade.
pub struct ExternalExtractor {
    generator: Box<dyn TextGenerator>,
    enabled: bool,
}

impl ExternalExtractor {
    pub fn new(generator: Box<dyn TextGenerator>, enabled: bool) -> Self {
        Self { generator, enabled }
    }

    /// One bounded request; the raw reply narrowed to its JSON object.
    pub async fn raw_extract(&self, question: &str) -> Option<String> {
        if !self.enabled {
            debug!("External extractor disabled, skipping");
            return None;
        }

        match self.generator.generate(&build_prompt(question)).await {
            Ok(text) => Some(extract_json_object(&text).to_string()),
            Err(e) => {
                warn!(model = %self.generator.model_name(), error = %e, "External extractor unavailable");
                None
            }
        }
    }
}

#[async_trait]
impl IntentExtractor for ExternalExtractor {
    async fn extract(&self, question: &str) -> Option<ExtractedIntent> {
        let raw = self.raw_extract(question).await?;
        let parsed = parse_reply(&raw);
        if parsed.is_none() {
            debug!(reply = %raw, "Discarding malformed extractor reply");
        }
        parsed
    }

    fn name(&self) -> &str {
        "external"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
