//! `MM:SS` duration text codec.
//!
//! Durations travel between the engine and its callers as whole seconds, and
//! as `M:SS` text at the edges. Minutes take one to three digits, seconds
//! exactly two. Every function here is total: bad input becomes `0` (or `""`)
//! rather than an error.

use std::sync::LazyLock;

use regex::Regex;

static DURATION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{1,3}):([0-9]{2})$").expect("valid duration pattern"));

/// Parse `MM:SS` (or bare seconds) into total seconds.
///
/// Returns `0` for empty, malformed, or out-of-range input.
pub fn parse_duration(text: &str) -> u32 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0;
    }

    if !trimmed.contains(':') {
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return 0;
        }
        return trimmed.parse().unwrap_or(0);
    }

    let Some(caps) = DURATION_PATTERN.captures(trimmed) else {
        return 0;
    };
    let (Ok(minutes), Ok(seconds)) = (caps[1].parse::<u32>(), caps[2].parse::<u32>()) else {
        return 0;
    };
    if seconds >= 60 {
        return 0;
    }
    minutes * 60 + seconds
}

/// Render seconds as `M:SS`.
///
/// Absent, zero, negative, and non-finite values render as `""`, which is the
/// "no result" encoding. Fractional seconds are truncated.
pub fn format_duration(seconds: Option<f64>) -> String {
    match seconds {
        Some(s) if s.is_finite() && s >= 1.0 => clock(s.trunc() as u64),
        _ => String::new(),
    }
}

/// Render an event cap. Unlike [`format_duration`] a zero cap still renders.
pub fn format_time_cap(seconds: u32) -> String {
    clock(u64::from(seconds))
}

/// Grammar check for duration text. Blank text is valid and means "no result".
pub fn is_valid_duration_text(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return true;
    }
    DURATION_PATTERN
        .captures(trimmed)
        .and_then(|caps| caps[2].parse::<u32>().ok())
        .is_some_and(|seconds| seconds < 60)
}

fn clock(total: u64) -> String {
    format!("{}:{:02}", total / 60, total % 60)
}
