//! Forecast window selection.

use crate::types::{DailyRecord, When};

/// The contiguous run of daily records a question's window covers.
///
/// `Tomorrow` needs at least two records; with fewer the slice is empty.
/// `NextNDays` takes the first `days` records, or all of them when fewer
/// exist.
pub fn select_days(forecast: &[DailyRecord], when: When, days: u32) -> &[DailyRecord] {
    if forecast.is_empty() {
        return forecast;
    }
    match when {
        When::Today => &forecast[..1],
        When::Tomorrow => forecast.get(1..2).unwrap_or(&[]),
        When::NextNDays => {
            let n = (days as usize).min(forecast.len());
            &forecast[..n]
        }
    }
}
