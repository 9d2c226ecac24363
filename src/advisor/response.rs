//! Human-first answers.
//!
//! An answer is a lead sentence that replies to what was actually asked,
//! a blank line, and a bulleted forecast block for the selected window.
//! The lead is picked by a fixed precedence over nuance tags and the
//! parsed attribute; the first matching rule wins. Figures in the lead
//! come from the first selected day.

use once_cell::sync::Lazy;
use regex::Regex;

use super::metrics::{
    avg_humidity, day_brief, format_temp, max_rain_chance, max_wind_kmph, raw_reading,
};
use super::slice::select_days;
use crate::types::{Attribute, DailyRecord, ForecastBundle, NuanceTag, ParsedIntent, When};

/// Returned when no forecast could be fetched.
pub const APOLOGY: &str = "Sorry, I couldn't retrieve weather data right now.";

const BULLET: &str = "• ";

// Thresholds (°C, %, km/h).
const COLD_MAX_C: f64 = 16.0;
const WARM_MIN_C: f64 = 27.0;
const RAIN_LIKELY: u32 = 60;
const RAIN_POSSIBLE: u32 = 30;
const WIND_STRONG: u32 = 60;
const WIND_FAIR: u32 = 40;
const MUGGY_HUMIDITY: u32 = 70;
const UNPLEASANT_COLD_C: f64 = 10.0;
const UNPLEASANT_HOT_C: f64 = 33.0;
const UNPLEASANT_HUMIDITY: u32 = 85;

static YES_NO_OPENING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:do|should|will|is|can|are|am)\b").expect("valid regex"));

/// The figures a lead sentence is built from.
#[derive(Debug, Clone, PartialEq)]
pub struct DayMetrics {
    pub avg_c: f64,
    pub min: String,
    pub max: String,
    pub rain_chance: u32,
    pub wind_kmph: u32,
    pub humidity: u32,
}

impl DayMetrics {
    pub fn of(day: &DailyRecord) -> Self {
        Self {
            avg_c: day.avg_temp(),
            min: raw_reading(day.min_temp_c.as_deref()).to_string(),
            max: raw_reading(day.max_temp_c.as_deref()).to_string(),
            rain_chance: max_rain_chance(day),
            wind_kmph: max_wind_kmph(day),
            humidity: avg_humidity(day),
        }
    }

    fn avg(&self) -> String {
        format_temp(self.avg_c)
    }
}

/// Is it a nice time to be outside?
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    No(String),
    Maybe(String),
    Yes,
}

/// First disqualifying condition wins: rain, wind, temperature, humidity.
pub fn pleasantness(m: &DayMetrics) -> Verdict {
    if m.rain_chance >= RAIN_LIKELY {
        return Verdict::No(format!("up to {}% chance of rain", m.rain_chance));
    }
    if m.wind_kmph >= WIND_STRONG {
        return Verdict::No(format!("strong winds up to ~{} km/h", m.wind_kmph));
    }
    if m.avg_c <= UNPLEASANT_COLD_C {
        return Verdict::No(format!("quite cold at around {}°C", m.avg()));
    }
    if m.avg_c >= UNPLEASANT_HOT_C {
        return Verdict::No(format!("very hot at around {}°C", m.avg()));
    }
    if m.humidity >= UNPLEASANT_HUMIDITY {
        return Verdict::No(format!("very humid at around {}%", m.humidity));
    }
    if (RAIN_POSSIBLE..RAIN_LIKELY).contains(&m.rain_chance) {
        return Verdict::Maybe(format!("up to {}% chance of rain", m.rain_chance));
    }
    if (WIND_FAIR..WIND_STRONG).contains(&m.wind_kmph) {
        return Verdict::Maybe(format!("breezy with winds up to ~{} km/h", m.wind_kmph));
    }
    Verdict::Yes
}

fn verdict_sentence(m: &DayMetrics, place: &str) -> String {
    match pleasantness(m) {
        Verdict::No(reason) => format!("No, not ideal {place}: {reason}."),
        Verdict::Maybe(reason) => format!("Maybe, conditions are mixed {place}: {reason}."),
        Verdict::Yes => format!(
            "Yes, pleasant {place}: around {}°C with up to {}% chance of rain.",
            m.avg(),
            m.rain_chance
        ),
    }
}

fn is_yes_no_question(question: &str) -> bool {
    YES_NO_OPENING.is_match(&question.trim().to_lowercase())
}

/// The lead sentence for the first selected day.
pub fn lead_sentence(intent: &ParsedIntent, location: &str, m: &DayMetrics) -> String {
    let tags = &intent.tags;
    let label = match intent.when {
        When::Tomorrow => "tomorrow",
        When::Today | When::NextNDays => "today",
    };
    let place = format!("in {location} {label}");
    let avg = m.avg();

    if tags.contains(NuanceTag::FeelCold) {
        return if m.avg_c <= COLD_MAX_C {
            format!("Yes, it'll feel cold {place} (around {avg}°C), so bring a warm layer.")
        } else {
            format!("No, it shouldn't feel cold {place} (around {avg}°C).")
        };
    }

    if tags.contains_any(&[NuanceTag::FeelWarm, NuanceTag::FeelHot]) {
        let word = if tags.contains(NuanceTag::FeelHot) { "hot" } else { "warm" };
        return if m.avg_c >= WARM_MIN_C {
            format!("Yes, it'll feel {word} {place} (around {avg}°C).")
        } else {
            format!("No, it shouldn't feel too {word} {place} (around {avg}°C).")
        };
    }

    if tags.contains(NuanceTag::Umbrella) || intent.attribute.is_wet() {
        let c = m.rain_chance;
        return if c >= RAIN_LIKELY {
            format!("Yes, bring an umbrella: up to {c}% chance of rain {place}.")
        } else if c >= RAIN_POSSIBLE {
            format!("Maybe, pack one just in case: up to {c}% chance of rain {place}.")
        } else {
            format!("Probably not, rain chance is low ({c}% {place}).")
        };
    }

    if tags.contains(NuanceTag::Windy) || intent.attribute == Attribute::Wind {
        let w = m.wind_kmph;
        return if w >= WIND_STRONG {
            format!("Yes, it'll be very windy {place} (gusts up to ~{w} km/h).")
        } else if w >= WIND_FAIR {
            format!("Somewhat, it'll be fairly windy {place} (up to ~{w} km/h).")
        } else {
            format!("No, expect light winds {place} (up to ~{w} km/h).")
        };
    }

    if tags.contains(NuanceTag::Humid) || intent.attribute == Attribute::Humidity {
        let h = m.humidity;
        return if h >= MUGGY_HUMIDITY {
            format!("Yes, it'll feel muggy {place} (humidity around {h}%).")
        } else {
            format!("No, humidity should be manageable {place} (around {h}%).")
        };
    }

    if tags.contains(NuanceTag::Clothing) {
        return if m.avg_c <= COLD_MAX_C {
            format!("It'll be cool {place} (around {avg}°C), so a jacket is a good idea.")
        } else if m.avg_c >= WARM_MIN_C {
            format!("It'll be warm {place} (around {avg}°C), so skip the heavy layers.")
        } else {
            format!("It'll be mild {place} (around {avg}°C), so a light layer should do.")
        };
    }

    if tags.contains_any(&[NuanceTag::Safety, NuanceTag::Outdoors])
        || is_yes_no_question(&intent.question_text)
    {
        return verdict_sentence(m, &place);
    }

    format!(
        "In {location} {label}, expect about {avg}°C (min {}°C / max {}°C) with up to {}% chance of rain.",
        m.min, m.max, m.rain_chance
    )
}

fn forecast_header(location: &str, when: When, days: &[DailyRecord]) -> String {
    match (days.len(), when) {
        (1, When::Tomorrow) => format!("Forecast for {location} — Tomorrow:"),
        (1, _) => format!("Forecast for {location} — Today:"),
        (n, _) => format!("Forecast for {location} — next {n} days:"),
    }
}

/// Compose the full answer for a question.
///
/// An absent bundle yields the fixed apology; a window with no matching
/// days yields a short "not found" line naming the place.
pub fn generate_weather_response(intent: &ParsedIntent, bundle: Option<&ForecastBundle>) -> String {
    let Some(bundle) = bundle else {
        return APOLOGY.to_string();
    };

    let location = bundle.location.as_str();
    let days = select_days(&bundle.forecast, intent.when, intent.days);
    let Some(first) = days.first() else {
        return format!("Sorry, I couldn't find a forecast for {location}.");
    };

    let lead = lead_sentence(intent, location, &DayMetrics::of(first));

    let mut lines = vec![lead, String::new(), forecast_header(location, intent.when, days)];
    lines.extend(days.iter().map(|d| format!("{BULLET}{}", day_brief(d))));
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
