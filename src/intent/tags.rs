//! Nuance-tag detection.
//!
//! Tags are declared as a table: each tag lists one or more keyword
//! groups, and the tag fires when every group has at least one
//! whole-word match in the lower-cased question. Tags are independent;
//! a question can carry any subset of them.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{NuanceTag, TagSet};

/// Verbs and phrasings that turn "cold" into "will it feel cold".
const FEELING: &[&str] = &[
    "feel", "feels", "feeling", "be", "get", "gets", "getting", "is it", "will it",
];

/// A tag and the keyword groups that must all match for it to fire.
#[derive(Debug, Clone, Copy)]
pub struct TagRule {
    pub tag: NuanceTag,
    pub groups: &'static [&'static [&'static str]],
}

pub const TAG_RULES: &[TagRule] = &[
    TagRule {
        tag: NuanceTag::Umbrella,
        groups: &[&["umbrella", "umbrellas", "raincoat", "brolly"]],
    },
    TagRule {
        tag: NuanceTag::FeelCold,
        groups: &[&["cold", "chilly", "freezing"], FEELING],
    },
    TagRule {
        tag: NuanceTag::FeelWarm,
        groups: &[&["warm"], FEELING],
    },
    TagRule {
        tag: NuanceTag::FeelHot,
        groups: &[&["hot", "boiling", "scorching", "sweltering"], FEELING],
    },
    TagRule {
        tag: NuanceTag::Windy,
        groups: &[&["wind", "winds", "windy", "breeze", "breezy", "gust", "gusts", "gusty"]],
    },
    TagRule {
        tag: NuanceTag::Humid,
        groups: &[&["humid", "humidity", "muggy", "sticky", "damp"]],
    },
    TagRule {
        tag: NuanceTag::Clothing,
        groups: &[&[
            "wear", "wearing", "jacket", "coat", "sweater", "jumper", "hoodie", "scarf", "shorts",
            "layer", "layers", "clothes", "clothing", "outfit", "dress",
        ]],
    },
    TagRule {
        tag: NuanceTag::Outdoors,
        groups: &[&[
            "outside", "outdoors", "outdoor", "picnic", "hike", "hiking", "walk", "run", "running",
            "jog", "jogging", "cycle", "cycling", "bike", "beach", "swim", "swimming", "bbq",
            "barbecue", "park", "golf", "camping", "garden",
        ]],
    },
    TagRule {
        tag: NuanceTag::Safety,
        groups: &[&[
            "safe", "unsafe", "danger", "dangerous", "risky", "risk", "cancel", "cancelled",
            "canceled", "postpone", "storm", "storms", "warning",
        ]],
    },
];

/// One whole-word alternation per keyword group, compiled once.
static COMPILED: Lazy<Vec<(NuanceTag, Vec<Regex>)>> = Lazy::new(|| {
    TAG_RULES
        .iter()
        .map(|rule| {
            let groups = rule.groups.iter().map(|words| group_regex(words)).collect();
            (rule.tag, groups)
        })
        .collect()
});

fn group_regex(words: &[&str]) -> Regex {
    let alternation = words
        .iter()
        .map(|w| regex::escape(w).replace(' ', r"\s+"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?:{alternation})\b")).expect("keyword table builds valid regex")
}

/// Scan a question once and return every tag whose groups all match.
pub fn detect_tags(question: &str) -> TagSet {
    let q = question.to_lowercase();
    COMPILED
        .iter()
        .filter(|(_, groups)| groups.iter().all(|re| re.is_match(&q)))
        .map(|(tag, _)| *tag)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
