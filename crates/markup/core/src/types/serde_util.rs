//! Deserialization helpers for loosely-typed configuration records.
//!
//! Stored tactics carry operand keys and action names in whatever form the
//! authoring tool wrote them. [`RawKey`] accepts any of those forms so that a
//! malformed value degrades one step instead of rejecting the whole record.

use serde::Deserialize;
use serde::de::IgnoredAny;

/// A scalar as authored: `2`, `1.5`, `"1,5"`, or anything else.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawKey {
    Integer(i64),
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

impl RawKey {
    /// Numeric value; text may use `,` as its decimal separator.
    pub(crate) fn as_number(&self) -> Option<f64> {
        match self {
            RawKey::Integer(value) => Some(*value as f64),
            RawKey::Number(value) => Some(*value),
            RawKey::Text(text) => text.trim().replace(',', ".").parse().ok(),
            RawKey::Other(_) => None,
        }
    }

    /// Integral value that fits an `i32`; `"-1"` and `-1.0` are accepted.
    pub(crate) fn as_index(&self) -> Option<i32> {
        match self {
            RawKey::Integer(value) => i32::try_from(*value).ok(),
            RawKey::Number(value) => {
                let in_range = value.fract() == 0.0
                    && *value >= f64::from(i32::MIN)
                    && *value <= f64::from(i32::MAX);
                in_range.then_some(*value as i32)
            }
            RawKey::Text(text) => text.trim().parse().ok(),
            RawKey::Other(_) => None,
        }
    }

    /// Non-empty text.
    pub(crate) fn as_name(&self) -> Option<&str> {
        match self {
            RawKey::Text(text) if !text.trim().is_empty() => Some(text.as_str()),
            _ => None,
        }
    }
}

impl core::fmt::Display for RawKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RawKey::Integer(value) => write!(f, "{value}"),
            RawKey::Number(value) => write!(f, "{value}"),
            RawKey::Text(text) => write!(f, "{text}"),
            RawKey::Other(_) => write!(f, "<non-scalar>"),
        }
    }
}
