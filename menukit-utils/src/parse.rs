//! Pure parser helpers, usable as command argument parsers or prompt answer parsers.

use std::{sync::OnceLock, time::Duration};

use regex::Regex;
use thiserror::Error;
use twilight_model::id::{Id, marker::UserMarker};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid duration {0:?}, expected <number>[s|m|h|d|w]")]
    InvalidDuration(String),

    #[error("{0:?} is not a valid month")]
    InvalidMonth(String),
}

/// Parse a target user from a raw argument (`<@id>`, `<@!id>`, or raw ID).
pub fn parse_target_user_id(raw: &str) -> Option<Id<UserMarker>> {
    let trimmed = raw.trim();

    let numeric = if trimmed.starts_with("<@") && trimmed.ends_with('>') {
        let without_wrappers = trimmed.strip_prefix("<@")?.strip_suffix('>')?;
        without_wrappers
            .strip_prefix('!')
            .unwrap_or(without_wrappers)
    } else {
        trimmed
    };

    let id = numeric.parse::<u64>().ok()?;

    Id::new_checked(id)
}

fn duration_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*([smhdw])").expect("duration pattern is valid")
    })
}

/// Parse a compound duration such as `2h30m`, `1.5d` or `1w 2d`.
///
/// Units: `s`, `m`, `h`, `d`, `w`, case-insensitive. A unit given twice keeps its last
/// amount. Anything that contains no `<number><unit>` group is rejected.
pub fn parse_duration(raw: &str) -> Result<Duration, ParseError> {
    let mut amounts: [Option<f64>; 5] = [None; 5];

    for captures in duration_pattern().captures_iter(raw) {
        let amount: f64 = captures[1]
            .parse()
            .map_err(|_| ParseError::InvalidDuration(raw.to_owned()))?;
        let slot = match captures[2].to_ascii_lowercase().as_str() {
            "s" => 0,
            "m" => 1,
            "h" => 2,
            "d" => 3,
            _ => 4,
        };
        amounts[slot] = Some(amount);
    }

    if amounts.iter().all(Option::is_none) {
        return Err(ParseError::InvalidDuration(raw.to_owned()));
    }

    const UNIT_SECS: [f64; 5] = [1.0, 60.0, 3600.0, 86_400.0, 604_800.0];
    let seconds: f64 = amounts
        .iter()
        .zip(UNIT_SECS)
        .map(|(amount, unit)| amount.unwrap_or(0.0) * unit)
        .sum();

    Duration::try_from_secs_f64(seconds).map_err(|_| ParseError::InvalidDuration(raw.to_owned()))
}

const MONTHS: [(&str, &str); 12] = [
    ("january", "jan"),
    ("february", "feb"),
    ("march", "mar"),
    ("april", "apr"),
    ("may", "may"),
    ("june", "jun"),
    ("july", "jul"),
    ("august", "aug"),
    ("september", "sep"),
    ("october", "oct"),
    ("november", "nov"),
    ("december", "dec"),
];

/// Parse a month given as its number, full name or three-letter name. Returns 1-12.
pub fn parse_month(raw: &str) -> Result<u8, ParseError> {
    let value = raw.trim();

    if let Ok(number) = value.parse::<u8>() {
        return if (1..=12).contains(&number) {
            Ok(number)
        } else {
            Err(ParseError::InvalidMonth(raw.to_owned()))
        };
    }

    let lowered = value.to_lowercase();
    MONTHS
        .iter()
        .position(|(full, short)| lowered == *full || lowered == *short)
        .map(|index| index as u8 + 1)
        .ok_or_else(|| ParseError::InvalidMonth(raw.to_owned()))
}

/// Shortens strings to fit a maximum length, marking the cut with an end sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trimmer {
    pub max_length: usize,
    pub end_sequence: String,
}

impl Trimmer {
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            end_sequence: "...".to_owned(),
        }
    }

    pub fn with_end_sequence(mut self, end_sequence: impl Into<String>) -> Self {
        self.end_sequence = end_sequence.into();
        self
    }

    /// Trim surrounding whitespace, then cut so the result fits in `max_length` characters.
    pub fn trim(&self, raw: &str) -> String {
        let value = raw.trim();
        if value.chars().count() <= self.max_length {
            return value.to_owned();
        }

        let keep = self
            .max_length
            .saturating_sub(self.end_sequence.chars().count());
        let head: String = value.chars().take(keep).collect();
        format!("{}{}", head.trim_end(), self.end_sequence)
    }
}

/// Alternate lower and upper case, starting lower.
pub fn to_spongebob_case(raw: &str) -> String {
    raw.chars()
        .enumerate()
        .flat_map(|(index, letter)| {
            let converted: Vec<char> = if index % 2 == 1 {
                letter.to_uppercase().collect()
            } else {
                letter.to_lowercase().collect()
            };
            converted
        })
        .collect()
}
