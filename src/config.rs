//! Configuration loading from TOML with environment overrides.
//!
//! Reads `config.toml` into strongly-typed structs. Every section has
//! defaults, so a missing file (or a missing section) is not an error.
//! The few environment variables the advisor honours are applied once,
//! at startup, by [`AppConfig::apply_env_overrides`]; nothing downstream
//! reads process state.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::types::MAX_FORECAST_DAYS;

/// Set to "1" to skip the external intent extractor entirely.
pub const ENV_DISABLE_LLM: &str = "WEATHER_ADVISOR_DISABLE_OLLAMA";
pub const ENV_LLM_HOST: &str = "OLLAMA_HOST";
pub const ENV_LLM_MODEL: &str = "WEATHER_ADVISOR_OLLAMA_MODEL";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub advisor: AdvisorConfig,
    pub llm: LlmConfig,
    pub forecast: ForecastConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Used when a question names no location.
    pub default_location: Option<String>,
}

/// External intent extractor (a local Ollama server).
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LlmConfig {
    pub enabled: bool,
    pub host: String,
    pub model: String,
    pub timeout_secs: u64,
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: "http://127.0.0.1:11434".to_string(),
            model: "llama3.1".to_string(),
            timeout_secs: 4,
            temperature: 0.0,
        }
    }
}

/// Forecast provider (wttr.in).
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ForecastConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_days: u32,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            base_url: "https://wttr.in".to_string(),
            timeout_secs: 6,
            max_days: MAX_FORECAST_DAYS,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            info!(path, "No config file found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Apply environment overrides. `lookup` is usually `std::env::var(..).ok()`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if lookup(ENV_DISABLE_LLM).is_some_and(|v| v.trim() == "1") {
            debug!("External intent extractor disabled by environment");
            self.llm.enabled = false;
        }
        if let Some(host) = lookup(ENV_LLM_HOST).filter(|h| !h.trim().is_empty()) {
            self.llm.host = host.trim().trim_end_matches('/').to_string();
        }
        if let Some(model) = lookup(ENV_LLM_MODEL).filter(|m| !m.trim().is_empty()) {
            self.llm.model = model.trim().to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert!(cfg.llm.enabled);
        assert_eq!(cfg.llm.timeout_secs, 4);
        assert_eq!(cfg.forecast.timeout_secs, 6);
        assert_eq!(cfg.forecast.max_days, 5);
        assert!(cfg.advisor.default_location.is_none());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[advisor]\ndefault_location = \"Perth\"\n\n[llm]\nenabled = false\nmodel = \"mistral\""
        )
        .unwrap();

        let cfg = AppConfig::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.advisor.default_location.as_deref(), Some("Perth"));
        assert!(!cfg.llm.enabled);
        assert_eq!(cfg.llm.model, "mistral");
        // Untouched keys keep their defaults.
        assert_eq!(cfg.llm.host, "http://127.0.0.1:11434");
        assert_eq!(cfg.forecast.base_url, "https://wttr.in");
    }

    #[test]
    fn test_load_malformed_file_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[llm\nenabled = ").unwrap();
        let err = AppConfig::load(file.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let cfg = AppConfig::load_or_default("/definitely/not/here/config.toml").unwrap();
        assert!(cfg.llm.enabled);
    }

    #[test]
    fn test_env_disable_flag() {
        let mut cfg = AppConfig::default();
        cfg.apply_env_overrides(env(&[(ENV_DISABLE_LLM, "1")]));
        assert!(!cfg.llm.enabled);

        let mut cfg = AppConfig::default();
        cfg.apply_env_overrides(env(&[(ENV_DISABLE_LLM, "0")]));
        assert!(cfg.llm.enabled);
    }

    #[test]
    fn test_env_host_and_model() {
        let mut cfg = AppConfig::default();
        cfg.apply_env_overrides(env(&[
            (ENV_LLM_HOST, "http://gpu-box:11434/"),
            (ENV_LLM_MODEL, "qwen2.5"),
        ]));
        assert_eq!(cfg.llm.host, "http://gpu-box:11434");
        assert_eq!(cfg.llm.model, "qwen2.5");
    }

    #[test]
    fn test_env_blank_values_ignored() {
        let mut cfg = AppConfig::default();
        cfg.apply_env_overrides(env(&[(ENV_LLM_HOST, "  "), (ENV_LLM_MODEL, "")]));
        assert_eq!(cfg.llm.model, "llama3.1");
    }
}
