//! Location sanitizer.
//!
//! Users paste whole phrases where a place name is expected
//! ("Perth tomorrow", "in Sydney next 3 days"). The forecast provider
//! rejects those, so every piece of user-supplied location text goes
//! through [`sanitize_location`] first.

/// Words that describe a time window rather than a place.
const TIME_WORDS: &[&str] = &[
    "today", "tomorrow", "tonight", "weekend", "morning", "afternoon", "evening",
    "next", "day", "days", "week", "weeks", "month", "months",
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
    "this",
];

/// Prepositions that tend to get pasted in with the place name.
const PREPOSITIONS: &[&str] = &["in", "at", "on", "for"];

fn is_kept_char(c: char) -> bool {
    c.is_alphabetic() || c.is_whitespace() || matches!(c, '-' | '\'' | ',')
}

fn is_noise_token(token: &str) -> bool {
    let lower = token.to_lowercase();
    TIME_WORDS.contains(&lower.as_str())
        || PREPOSITIONS.contains(&lower.as_str())
        || token.chars().all(|c| c.is_ascii_digit())
        // A lone "-" or "'" left over from punctuation is not a name.
        || !token.chars().any(char::is_alphabetic)
}

/// Strip time words, prepositions and stray numbers from a location phrase.
///
/// Letters, hyphens and apostrophes survive, so names like "O'Connor" or
/// "Stratford-upon-Avon" come through untouched. The result may be empty.
pub fn sanitize_location(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .map(|c| if is_kept_char(c) { c } else { ' ' })
        .collect();

    let kept: Vec<&str> = cleaned
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .filter(|t| !is_noise_token(t))
        .collect();

    kept.join(" ").trim_matches(|c| c == ',' || c == ' ').to_string()
}

/// Title-case a sanitized name for display ("new york" → "New York").
pub fn display_case(location: &str) -> String {
    let mut out = String::with_capacity(location.len());
    let mut start_of_word = true;
    for c in location.chars() {
        if start_of_word {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        start_of_word = c.is_whitespace() || c == '-';
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_strips_trailing_time_word() {
        assert_eq!(sanitize_location("Perth Tomorrow"), "Perth");
        assert_eq!(sanitize_location("perth tomorrow"), "perth");
    }

    #[test]
    fn test_strips_prepositions_and_numbers() {
        assert_eq!(sanitize_location("in Sydney for the next 3 days"), "Sydney the");
        assert_eq!(sanitize_location("at Melbourne 2"), "Melbourne");
    }

    #[test]
    fn test_time_words_anywhere_and_any_case() {
        assert_eq!(sanitize_location("THIS Weekend Brisbane MONDAY"), "Brisbane");
    }

    #[test]
    fn test_keeps_apostrophes_and_hyphens() {
        assert_eq!(sanitize_location("O'Connor"), "O'Connor");
        assert_eq!(sanitize_location("St John's, tomorrow"), "St John's");
        assert_eq!(sanitize_location("Stratford-upon-Avon!"), "Stratford-upon-Avon");
    }

    #[test]
    fn test_commas_become_separators() {
        assert_eq!(sanitize_location("Paris, France"), "Paris France");
        assert_eq!(sanitize_location(",,Perth,,"), "Perth");
    }

    #[test]
    fn test_junk_only_is_empty() {
        assert_eq!(sanitize_location(""), "");
        assert_eq!(sanitize_location("   "), "");
        assert_eq!(sanitize_location("next 3 days"), "");
        assert_eq!(sanitize_location("12345 ?? - '"), "");
    }

    #[test]
    fn test_display_case() {
        assert_eq!(display_case("new york"), "New York");
        assert_eq!(display_case("PERTH"), "Perth");
        assert_eq!(display_case("o'connor"), "O'connor");
        assert_eq!(display_case("stratford-upon-avon"), "Stratford-Upon-Avon");
    }

    fn is_forbidden(token: &str) -> bool {
        let lower = token.to_lowercase();
        TIME_WORDS.contains(&lower.as_str())
            || PREPOSITIONS.contains(&lower.as_str())
            || token.chars().all(|c| c.is_ascii_digit())
    }

    proptest! {
        #[test]
        fn sanitized_output_has_no_forbidden_tokens(raw in "[A-Za-z0-9 ,'!?-]{0,40}") {
            let out = sanitize_location(&raw);
            for token in out.split_whitespace() {
                prop_assert!(!is_forbidden(token), "token {token:?} survived in {out:?}");
            }
        }

        #[test]
        fn sanitize_is_idempotent(raw in "\\PC{0,40}") {
            let once = sanitize_location(&raw);
            prop_assert_eq!(sanitize_location(&once), once);
        }

        #[test]
        fn sanitize_drops_mixed_phrases(
            place in "[A-Z][a-z]{3,10}",
            noise in prop::sample::select(vec!["Tomorrow", "next", "IN", "this", "Weekend", "7", "at"]),
        ) {
            prop_assume!(!is_forbidden(&place));
            let out = sanitize_location(&format!("{noise} {place} {noise}"));
            prop_assert_eq!(out, place);
        }
    }
}
