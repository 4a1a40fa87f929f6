//! Numeric text normalisation for the counters shown on trending listings.

use once_cell::sync::Lazy;
use regex::Regex;

static NUMBER_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\d,.]+").expect("number pattern is valid"));

static STARS_TODAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+(?:,\d+)*)\s+stars?\s+today").expect("stars today pattern is valid")
});

/// Parse a human formatted counter such as `"1,234"` or `" 56 "` into an integer.
///
/// Only the integer part of the first numeric run is used, so `"1.5k"` yields `1`.
/// Empty, unparseable or non-numeric input yields `0`.
pub fn parse_number(text: &str) -> u64 {
    let cleaned = text.replace(',', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return 0;
    }

    let Some(found) = NUMBER_RUN.find(cleaned) else {
        return 0;
    };

    let digits: String = found
        .as_str()
        .replace(',', "")
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();

    digits.parse().unwrap_or(0)
}

/// Pull the "N stars today" counter out of a stats line; `0` when absent.
pub fn extract_stars_today(text: &str) -> u64 {
    STARS_TODAY
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map_or(0, |count| parse_number(count.as_str()))
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
