//! Question → intent.
//!
//! Defines the `IntentExtractor` trait and the `IntentParser` that runs
//! extractors in precedence order: the language model first when it is
//! enabled, then the rule-based parser, which always answers. Nuance
//! tags are computed once per question, independently of which
//! extractor wins.

pub mod external;
pub mod rules;
pub mod sanitize;
pub mod tags;

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use crate::config::LlmConfig;
use crate::llm::ollama::OllamaClient;
use crate::llm::TextGenerator;
use crate::types::{Attribute, ParsedIntent, TagSet, When};

use external::ExternalExtractor;
use rules::RuleBasedExtractor;

pub use sanitize::sanitize_location;

/// What an extractor pulls out of a question, before tags are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedIntent {
    pub location: Option<String>,
    pub days: u32,
    pub when: When,
    pub attribute: Attribute,
}

impl ExtractedIntent {
    pub fn into_intent(self, tags: TagSet, question: &str) -> ParsedIntent {
        ParsedIntent {
            location: self.location,
            days: self.days,
            when: self.when,
            attribute: self.attribute,
            tags,
            question_text: question.to_string(),
        }
    }
}

/// A strategy for turning question text into an intent.
#[async_trait]
pub trait IntentExtractor: Send + Sync {
    /// `None` means "no usable answer"; the next extractor is tried.
    async fn extract(&self, question: &str) -> Option<ExtractedIntent>;

    /// Short identifier for logs.
    fn name(&self) -> &str;
}

/// Runs extractors in order and keeps the first answer.
pub struct IntentParser {
    extractors: Vec<Box<dyn IntentExtractor>>,
}

impl IntentParser {
    /// Rules only; no network.
    pub fn rule_based() -> Self {
        Self {
            extractors: vec![Box::new(RuleBasedExtractor)],
        }
    }

    /// The given language model first, rules second.
    pub fn with_generator(generator: Box<dyn TextGenerator>, enabled: bool) -> Self {
        let mut extractors: Vec<Box<dyn IntentExtractor>> = Vec::with_capacity(2);
        if enabled {
            extractors.push(Box::new(ExternalExtractor::new(generator, true)));
        }
        extractors.push(Box::new(RuleBasedExtractor));
        Self { extractors }
    }

    /// Build the cascade described by the config.
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        if !config.enabled {
            return Ok(Self::rule_based());
        }
        let client = OllamaClient::new(config)?;
        Ok(Self::with_generator(Box::new(client), true))
    }

    pub fn extractor_names(&self) -> Vec<&str> {
        self.extractors.iter().map(|e| e.name()).collect()
    }

    pub async fn parse(&self, question: &str) -> ParsedIntent {
        let question = question.trim();
        if question.is_empty() {
            return ParsedIntent::fallback(question);
        }

        let tags = tags::detect_tags(question);
        for extractor in &self.extractors {
            if let Some(found) = extractor.extract(question).await {
                debug!(extractor = extractor.name(), tags = %tags, "Intent extracted");
                return found.into_intent(tags, question);
            }
        }

        let mut intent = ParsedIntent::fallback(question);
        intent.tags = tags;
        intent
    }
}

/// Parse a question with the rule-based extractor alone.
///
/// Same result as an [`IntentParser`] whose language model is disabled,
/// without needing an async runtime.
pub fn parse_weather_question(question: &str) -> ParsedIntent {
    let question = question.trim();
    if question.is_empty() {
        return ParsedIntent::fallback(question);
    }
    rules::extract_rules(question).into_intent(tags::detect_tags(question), question)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
