//! Per-day figures derived from the hourly breakdown.
//!
//! Every extractor treats a missing or non-numeric hourly reading as 0
//! (or skips it, for averages), so a day with no usable hours still
//! yields a figure.

use crate::types::DailyRecord;

/// Shown when no hour carries a description.
pub const NO_DESCRIPTION: &str = "—";
const NO_DATE: &str = "Unknown date";
const NO_READING: &str = "?";

/// Time codes treated as "midday-ish".
const MIDDAY_CODES: &[&str] = &["900", "1200", "1500"];

pub fn max_rain_chance(day: &DailyRecord) -> u32 {
    day.hourly
        .iter()
        .map(|h| h.rain_chance().unwrap_or(0))
        .max()
        .unwrap_or(0)
}

pub fn max_wind_kmph(day: &DailyRecord) -> u32 {
    day.hourly
        .iter()
        .map(|h| h.wind_kmph().unwrap_or(0))
        .max()
        .unwrap_or(0)
}

/// Mean humidity over the hours that report one, rounded to the nearest
/// whole percent.
pub fn avg_humidity(day: &DailyRecord) -> u32 {
    let readings: Vec<u32> = day.hourly.iter().filter_map(|h| h.humidity_pct()).collect();
    if readings.is_empty() {
        return 0;
    }
    let sum: u64 = readings.iter().map(|&v| u64::from(v)).sum();
    (sum as f64 / readings.len() as f64).round() as u32
}

/// Description of the first midday-ish hour, if that hour has one;
/// otherwise of the first hour that has any.
pub fn representative_description(day: &DailyRecord) -> &str {
    let midday = day
        .hourly
        .iter()
        .find(|h| h.time.as_deref().is_some_and(|t| MIDDAY_CODES.contains(&t.trim())))
        .and_then(|h| h.description());

    midday
        .or_else(|| day.hourly.iter().find_map(|h| h.description()))
        .unwrap_or(NO_DESCRIPTION)
}

/// Whole degrees print without a decimal point; anything else keeps one.
pub fn format_temp(value: f64) -> String {
    if (value - value.round()).abs() < 0.05 {
        format!("{}", value.round() as i64)
    } else {
        format!("{value:.1}")
    }
}

/// A raw temperature reading as the provider sent it, or "?".
pub fn raw_reading(raw: Option<&str>) -> &str {
    raw.map(str::trim).filter(|r| !r.is_empty()).unwrap_or(NO_READING)
}

/// One-line summary of a day, used in the forecast block and the plain
/// listing.
pub fn day_brief(day: &DailyRecord) -> String {
    let date = day.date.as_deref().map(str::trim).filter(|d| !d.is_empty()).unwrap_or(NO_DATE);
    format!(
        "{date}: ~{avg}°C (min {min}°C / max {max}°C), rain up to {rain}%, {desc}",
        avg = format_temp(day.avg_temp()),
        min = raw_reading(day.min_temp_c.as_deref()),
        max = raw_reading(day.max_temp_c.as_deref()),
        rain = max_rain_chance(day),
        desc = representative_description(day),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
