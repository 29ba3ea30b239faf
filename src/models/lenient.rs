//! Forgiving decoders for hand-entered roster fields.
//!
//! Scores and ages come from form inputs and spreadsheets, so they may be
//! numbers, numeric strings, `MM:SS` text, or junk. None of these ever fails a
//! record: unusable values collapse to "no value".

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

use crate::time::parse_duration;

#[derive(Deserialize)]
#[serde(untagged)]
enum Raw {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

/// Normalize a raw score: non-finite or negative values mean "no result".
pub fn sanitize_score(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Interpret score text. `MM:SS` goes through the time codec, anything else
/// must be a plain number.
pub fn parse_score_text(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.contains(':') {
        return f64::from(parse_duration(trimmed));
    }
    trimmed.parse::<f64>().map(sanitize_score).unwrap_or(0.0)
}

/// Interpret age text; `None` when it is not a whole non-negative number.
pub fn parse_age_text(text: &str) -> Option<u32> {
    text.trim().parse::<u32>().ok()
}

pub fn score<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Raw> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(Raw::Number(n)) => sanitize_score(n),
        Some(Raw::Text(s)) => parse_score_text(&s),
        Some(Raw::Other(_)) | None => 0.0,
    })
}

pub fn tiebreak<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Raw> = Option::deserialize(deserializer)?;
    let seconds = match raw {
        Some(Raw::Number(n)) => sanitize_score(n).round() as u32,
        Some(Raw::Text(s)) => parse_duration(&s),
        Some(Raw::Other(_)) | None => 0,
    };
    Ok((seconds > 0).then_some(seconds))
}

pub fn age<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Raw> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(Raw::Number(n)) if n.is_finite() && n >= 0.0 => Some(n.trunc() as u32),
        Some(Raw::Text(s)) => parse_age_text(&s),
        _ => None,
    })
}
