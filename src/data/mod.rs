//! Forecast data providers.
//!
//! Defines the `ForecastProvider` trait and its error type. The
//! advisor treats every provider failure as "no data" and answers with
//! an apology instead of surfacing the error.

pub mod wttr;

use async_trait::async_trait;

use crate::types::ForecastBundle;

/// Why a forecast could not be produced.
#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    #[error("Not a usable location: {0:?}")]
    InvalidLocation(String),

    #[error("Forecast request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Forecast API error ({location}): HTTP {status}")]
    Status { location: String, status: u16 },

    #[error("Could not decode forecast for {location}: {message}")]
    Decode { location: String, message: String },
}

/// Abstraction over short-range forecast sources.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Fetch up to `days` daily records for a location.
    async fn fetch(&self, location: &str, days: u32) -> Result<ForecastBundle, ForecastError>;

    /// Source identifier for logs.
    fn source(&self) -> String;
}
