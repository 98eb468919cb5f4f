//! Decoding for 64-bit ids.
//!
//! The backend renders integers outside the JavaScript safe range
//! (`±(2^53 - 1)`) as decimal strings so browsers do not lose precision.
//! Fields that may carry such values accept both encodings.

use serde::{Deserialize, Deserializer};

pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;
pub const MIN_SAFE_INTEGER: i64 = -9_007_199_254_740_991;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(i64),
    Text(String),
}

impl NumberOrString {
    fn into_i64<E: serde::de::Error>(self) -> Result<i64, E> {
        match self {
            NumberOrString::Number(n) => Ok(n),
            NumberOrString::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|e| E::custom(format!("invalid 64-bit integer {s:?}: {e}"))),
        }
    }
}

/// `#[serde(deserialize_with = "kxy_types::int64::lenient")]`
pub fn lenient<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    NumberOrString::deserialize(deserializer)?.into_i64()
}

/// Optional variant of [`lenient`]; pair it with `#[serde(default)]`.
pub fn lenient_opt<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<NumberOrString>::deserialize(deserializer)?
        .map(NumberOrString::into_i64)
        .transpose()
}

pub fn is_js_safe(value: i64) -> bool {
    (MIN_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(&value)
}
