//! Ollama text generation.
//!
//! Implements `TextGenerator` against a local Ollama server's
//! `/api/generate` endpoint with streaming off. The HTTP client carries
//! the configured timeout, so a slow or absent server costs at most a
//! few seconds before the caller falls back.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::TextGenerator;
use crate::config::LlmConfig;

// ---------------------------------------------------------------------------
// API types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    options: GenerateOptions,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct OllamaClient {
    http: Client,
    endpoint: String,
    model: String,
    temperature: f32,
}

impl OllamaClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .context("Failed to build Ollama HTTP client")?;

        Ok(Self {
            http,
            endpoint: format!("{}/api/generate", config.host.trim_end_matches('/')),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            options: GenerateOptions {
                temperature: self.temperature,
            },
            stream: false,
        };

        let resp = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .context("Ollama request failed")?;

        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!("Ollama API error: {status}");
        }

        let body: GenerateResponse = resp
            .json()
            .await
            .context("Failed to parse Ollama response")?;

        debug!(model = %self.model, chars = body.response.len(), "Ollama replied");
        Ok(body.response.trim().to_string())
    }

    fn model_name(&self) -> String {
        self.model.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_construction() {
        let client = OllamaClient::new(&LlmConfig::default()).unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:11434/api/generate");
        assert_eq!(client.model_name(), "llama3.1");
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let cfg = LlmConfig {
            host: "http://gpu-box:11434/".into(),
            ..LlmConfig::default()
        };
        let client = OllamaClient::new(&cfg).unwrap();
        assert_eq!(client.endpoint(), "http://gpu-box:11434/api/generate");
    }

    #[test]
    fn test_request_body_shape() {
        let req = GenerateRequest {
            model: "llama3.1",
            prompt: "hi",
            options: GenerateOptions { temperature: 0.0 },
            stream: false,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["stream"], false);
        assert_eq!(json["options"]["temperature"], 0.0);
        assert_eq!(json["prompt"], "hi");
    }
}
