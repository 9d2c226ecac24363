//! Shared types for the weather advisor.
//!
//! The intent model produced by the question parsers and the forecast
//! records consumed by the response generator. Both are plain values:
//! built once per question, owned by the call that built them, and
//! never shared across questions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Forecast window limits
// ---------------------------------------------------------------------------

pub const MIN_FORECAST_DAYS: u32 = 1;
pub const MAX_FORECAST_DAYS: u32 = 5;
pub const DEFAULT_FORECAST_DAYS: u32 = 3;

/// Clamp any requested day count into the supported forecast window.
pub fn clamp_days(days: i64) -> u32 {
    days.clamp(i64::from(MIN_FORECAST_DAYS), i64::from(MAX_FORECAST_DAYS)) as u32
}

// ---------------------------------------------------------------------------
// Intent enums
// ---------------------------------------------------------------------------

/// The time window a question asks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum When {
    Today,
    Tomorrow,
    NextNDays,
}

impl When {
    pub const ALL: &'static [When] = &[When::Today, When::Tomorrow, When::NextNDays];

    pub fn as_str(&self) -> &'static str {
        match self {
            When::Today => "today",
            When::Tomorrow => "tomorrow",
            When::NextNDays => "next_n_days",
        }
    }
}

impl fmt::Display for When {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for When {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        When::ALL
            .iter()
            .copied()
            .find(|w| w.as_str() == lower)
            .ok_or_else(|| anyhow::anyhow!("Unknown time window: {s}"))
    }
}

/// The weather attribute a question is primarily about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Temperature,
    Precipitation,
    Rain,
    Wind,
    Humidity,
    Summary,
}

impl Attribute {
    pub const ALL: &'static [Attribute] = &[
        Attribute::Temperature,
        Attribute::Precipitation,
        Attribute::Rain,
        Attribute::Wind,
        Attribute::Humidity,
        Attribute::Summary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Temperature => "temperature",
            Attribute::Precipitation => "precipitation",
            Attribute::Rain => "rain",
            Attribute::Wind => "wind",
            Attribute::Humidity => "humidity",
            Attribute::Summary => "summary",
        }
    }

    /// Rain and precipitation are answered the same way.
    pub fn is_wet(&self) -> bool {
        matches!(self, Attribute::Rain | Attribute::Precipitation)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Attribute {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Attribute::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == lower)
            .ok_or_else(|| anyhow::anyhow!("Unknown weather attribute: {s}"))
    }
}

/// A facet of the question that shapes how the answer is phrased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NuanceTag {
    Umbrella,
    FeelCold,
    FeelWarm,
    FeelHot,
    Windy,
    Humid,
    Clothing,
    Outdoors,
    Safety,
}

impl NuanceTag {
    pub const ALL: &'static [NuanceTag] = &[
        NuanceTag::Umbrella,
        NuanceTag::FeelCold,
        NuanceTag::FeelWarm,
        NuanceTag::FeelHot,
        NuanceTag::Windy,
        NuanceTag::Humid,
        NuanceTag::Clothing,
        NuanceTag::Outdoors,
        NuanceTag::Safety,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NuanceTag::Umbrella => "umbrella",
            NuanceTag::FeelCold => "feel_cold",
            NuanceTag::FeelWarm => "feel_warm",
            NuanceTag::FeelHot => "feel_hot",
            NuanceTag::Windy => "windy",
            NuanceTag::Humid => "humid",
            NuanceTag::Clothing => "clothing",
            NuanceTag::Outdoors => "outdoors",
            NuanceTag::Safety => "safety",
        }
    }
}

impl fmt::Display for NuanceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered, duplicate-free set of nuance tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(BTreeSet<NuanceTag>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tag: NuanceTag) -> bool {
        self.0.insert(tag)
    }

    pub fn contains(&self, tag: NuanceTag) -> bool {
        self.0.contains(&tag)
    }

    pub fn contains_any(&self, tags: &[NuanceTag]) -> bool {
        tags.iter().any(|t| self.0.contains(t))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = NuanceTag> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<NuanceTag> for TagSet {
    fn from_iter<I: IntoIterator<Item = NuanceTag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "none");
        }
        let names: Vec<&str> = self.iter().map(|t| t.as_str()).collect();
        write!(f, "{}", names.join(", "))
    }
}

// ---------------------------------------------------------------------------
// Parsed intent
// ---------------------------------------------------------------------------

/// The structured interpretation of a free-text weather question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedIntent {
    /// Sanitized place name; never `Some("")`.
    pub location: Option<String>,
    /// Always within `MIN_FORECAST_DAYS..=MAX_FORECAST_DAYS`.
    pub days: u32,
    pub when: When,
    pub attribute: Attribute,
    pub tags: TagSet,
    /// The literal question, kept for later re-inspection.
    pub question_text: String,
}

impl ParsedIntent {
    /// The intent used when nothing more specific can be extracted.
    pub fn fallback(question: &str) -> Self {
        Self {
            location: None,
            days: DEFAULT_FORECAST_DAYS,
            when: When::Today,
            attribute: Attribute::Summary,
            tags: TagSet::new(),
            question_text: question.to_string(),
        }
    }

    /// Fill in a location only when parsing found none.
    pub fn or_location(mut self, location: Option<String>) -> Self {
        if self.location.is_none() {
            self.location = location.filter(|l| !l.is_empty());
        }
        self
    }
}

impl fmt::Display for ParsedIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "location={} when={} days={} attribute={} tags=[{}]",
            self.location.as_deref().unwrap_or("?"),
            self.when,
            self.days,
            self.attribute,
            self.tags,
        )
    }
}

// ---------------------------------------------------------------------------
// Forecast records
// ---------------------------------------------------------------------------

/// Parse a whole-number reading such as a percentage or a wind speed.
/// Missing or non-numeric text yields `None`.
pub fn parse_whole(raw: Option<&str>) -> Option<u32> {
    raw?.trim().parse::<u32>().ok()
}

/// Parse a temperature-like reading. Missing or non-numeric text yields `None`.
pub fn parse_decimal(raw: Option<&str>) -> Option<f64> {
    raw?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// One hour (in practice a three-hour step) of a daily forecast.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlyRecord {
    /// Time-of-day code such as "0", "900", "1200".
    pub time: Option<String>,
    pub chance_of_rain: Option<String>,
    pub wind_speed_kmph: Option<String>,
    pub humidity: Option<String>,
    pub description: Option<String>,
}

impl HourlyRecord {
    pub fn rain_chance(&self) -> Option<u32> {
        parse_whole(self.chance_of_rain.as_deref())
    }

    pub fn wind_kmph(&self) -> Option<u32> {
        parse_whole(self.wind_speed_kmph.as_deref())
    }

    pub fn humidity_pct(&self) -> Option<u32> {
        parse_whole(self.humidity.as_deref())
    }

    /// The description, if the hour carries a non-blank one.
    pub fn description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

/// One day's forecast: summary temperatures plus the hourly breakdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: Option<String>,
    pub min_temp_c: Option<String>,
    pub avg_temp_c: Option<String>,
    pub max_temp_c: Option<String>,
    #[serde(default)]
    pub hourly: Vec<HourlyRecord>,
}

impl DailyRecord {
    pub fn min_temp(&self) -> Option<f64> {
        parse_decimal(self.min_temp_c.as_deref())
    }

    pub fn max_temp(&self) -> Option<f64> {
        parse_decimal(self.max_temp_c.as_deref())
    }

    /// Average temperature in °C.
    ///
    /// Falls back to the midpoint of min/max when the average is missing,
    /// and to 0.0 when neither is numeric.
    pub fn avg_temp(&self) -> f64 {
        if let Some(avg) = parse_decimal(self.avg_temp_c.as_deref()) {
            return avg;
        }
        match (self.min_temp(), self.max_temp()) {
            (Some(lo), Some(hi)) => (lo + hi) / 2.0,
            _ => 0.0,
        }
    }

    /// Build a record for tests with an hourly list.
    #[cfg(test)]
    pub fn sample(date: &str, min: &str, avg: &str, max: &str, hourly: Vec<HourlyRecord>) -> Self {
        Self {
            date: Some(date.to_string()),
            min_temp_c: Some(min.to_string()),
            avg_temp_c: Some(avg.to_string()),
            max_temp_c: Some(max.to_string()),
            hourly,
        }
    }
}

#[cfg(test)]
impl HourlyRecord {
    pub fn sample(time: &str, rain: &str, wind: &str, humidity: &str, desc: &str) -> Self {
        Self {
            time: Some(time.to_string()),
            chance_of_rain: Some(rain.to_string()),
            wind_speed_kmph: Some(wind.to_string()),
            humidity: Some(humidity.to_string()),
            description: Some(desc.to_string()),
        }
    }
}

/// Today's observed conditions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temp_c: Option<String>,
    pub feels_like_c: Option<String>,
    pub humidity: Option<String>,
    pub wind_speed_kmph: Option<String>,
    pub description: Option<String>,
}

/// Everything the forecast provider returns for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastBundle {
    /// Display-cased place name.
    pub location: String,
    pub current: CurrentConditions,
    /// Up to `MAX_FORECAST_DAYS` daily records, nearest first.
    pub forecast: Vec<DailyRecord>,
    pub fetched_at: DateTime<Utc>,
}

impl ForecastBundle {
    pub fn new(location: impl Into<String>, current: CurrentConditions, forecast: Vec<DailyRecord>) -> Self {
        Self {
            location: location.into(),
            current,
            forecast,
            fetched_at: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
