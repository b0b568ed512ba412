//! Time-valued command arguments
//!
//! A time is a decimal number with an optional sign and unit suffix: no
//! suffix or `s` for seconds, `m` for minutes. The result is always in
//! seconds. Out-of-range values saturate; the setters clamp them.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("empty time value")]
    Empty,

    #[error("invalid time unit '{unit}' in {input} (expected s or m)")]
    InvalidUnit { input: String, unit: char },

    #[error("invalid number in time value {0}")]
    InvalidNumber(String),
}

/// Parse a time argument into seconds
///
/// ```
/// use htt_util::time::parse_time;
/// assert_eq!(parse_time("5m"), Ok(300));
/// assert_eq!(parse_time("45"), Ok(45));
/// assert_eq!(parse_time("-5"), Ok(-5));
/// assert!(parse_time("5x").is_err());
/// ```
pub fn parse_time(input: &str) -> Result<i64, TimeParseError> {
    let last = input.chars().last().ok_or(TimeParseError::Empty)?;
    let (number, multiplier) = match last {
        'm' => (&input[..input.len() - 1], 60),
        's' => (&input[..input.len() - 1], 1),
        c if c.is_ascii_digit() => (input, 1),
        unit => {
            return Err(TimeParseError::InvalidUnit {
                input: input.to_string(),
                unit,
            })
        }
    };
    let value = parse_saturating(number)
        .ok_or_else(|| TimeParseError::InvalidNumber(input.to_string()))?;
    Ok(value.saturating_mul(multiplier))
}

/// Parse an optionally negative decimal integer, saturating at the `i64` bounds
///
/// Returns `None` unless `text` is a `-` followed by one or more ASCII digits,
/// or just the digits.
pub fn parse_saturating(text: &str) -> Option<i64> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(text.parse().unwrap_or(if negative { i64::MIN } else { i64::MAX }))
}
