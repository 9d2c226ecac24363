//! Text-generation backends used by the external intent extractor.
//!
//! Defines the `TextGenerator` trait and an Ollama implementation.
//! Callers treat every error as "no answer"; nothing here is retried.

pub mod ollama;

use anyhow::Result;
use async_trait::async_trait;

/// Abstraction over a prompt-in, text-out language model.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send one prompt and return the model's raw text reply.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Model identifier string.
    fn model_name(&self) -> String;
}
