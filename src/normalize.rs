use crate::error::{Error, Result};
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::LazyLock;

// ECMAScript whitespace: Unicode White_Space plus the BOM, minus NEL.
static RE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[[\s\x{FEFF}]--\x{85}]+").unwrap());

const ACCENT_PAIRS: &[(char, char)] = &[
    ('á', 'a'),
    ('é', 'e'),
    ('í', 'i'),
    ('ó', 'o'),
    ('ú', 'u'),
    ('Á', 'a'),
    ('É', 'e'),
    ('Í', 'i'),
    ('Ó', 'o'),
    ('Ú', 'u'),
];

static ACCENT_MAP: LazyLock<HashMap<char, char>> =
    LazyLock::new(|| ACCENT_PAIRS.iter().copied().collect());

/// Canonical comparison key: whitespace removed, accented vowels mapped to
/// their plain form, then lowercased.
pub fn normalize(input: &str) -> String {
    let compact = RE_WHITESPACE.replace_all(input, "");
    let unaccented: String = compact
        .chars()
        .map(|c| ACCENT_MAP.get(&c).copied().unwrap_or(c))
        .collect();
    // whole-string lowercasing, so final sigma becomes ς
    unaccented.to_lowercase()
}

/// Normalize a dynamically typed value. Anything but a JSON string is
/// rejected before any transformation runs.
pub fn normalize_value(input: &Value) -> Result<String> {
    match input {
        Value::String(s) => Ok(normalize(s)),
        _ => Err(Error::InvalidInputType),
    }
}

pub fn matches(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

pub fn contains(haystack: &str, needle: &str) -> bool {
    normalize(haystack).contains(&normalize(needle))
}
