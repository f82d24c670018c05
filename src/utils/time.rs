//! Time utilities: parsing HH:MM clock values.

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    if let Some(s) = input {
        let t = parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
        Ok(Some(t))
    } else {
        Ok(None)
    }
}

/// Parse `input`, falling back to `default` (both HH:MM).
pub fn time_or_default(input: Option<&String>, default: &str) -> AppResult<NaiveTime> {
    match parse_optional_time(input)? {
        Some(t) => Ok(t),
        None => parse_time(default).ok_or_else(|| AppError::InvalidTime(default.to_string())),
    }
}
