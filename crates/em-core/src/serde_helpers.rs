//! Shared serde helper functions for grid (CSV) rows.

use serde::{Deserialize, Deserializer};

/// Serde default function that returns `true`.
///
/// Used for flags that a freshly added grid row should have switched on.
pub fn default_true() -> bool {
    true
}

/// Serde default for a new row's version number.
pub fn default_version() -> i64 {
    1
}

/// Deserialize a boolean cell leniently.
///
/// Grid editors write flags as `true`/`false`, `TRUE`/`FALSE`, `1`/`0` or
/// `yes`/`no`. A blank cell falls back to `true`, matching the default
/// of a newly added employee row.
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    parse_flag(Option::<String>::deserialize(deserializer)?, true)
}

/// Like [`lenient_bool`] but a blank cell means `false` (an unticked box).
pub fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    parse_flag(Option::<String>::deserialize(deserializer)?, false)
}

fn parse_flag<E: serde::de::Error>(raw: Option<String>, blank: bool) -> Result<bool, E> {
    let Some(raw) = raw else {
        return Ok(blank);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "" => Ok(blank),
        "true" | "t" | "yes" | "y" | "1" => Ok(true),
        "false" | "f" | "no" | "n" | "0" => Ok(false),
        other => Err(E::custom(format!("invalid boolean value '{other}'"))),
    }
}

/// Deserialize a version cell, treating blanks or junk as version 1.
pub fn lenient_version<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|s| s.trim().parse::<f64>().ok())
        .map(|v| v as i64)
        .unwrap_or(1))
}

