//! Operand descriptors: where the right-hand side of an operation comes from.

use crate::config::EngineConfig;
use crate::eval::OperandError;

/// How a percentage parameter is turned into a multiplier.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum OperandFormat {
    /// `1 + p/100`, an additive markup multiplier (10% → 1.1).
    Factor,
    /// `p/100`, the bare fraction (10% → 0.1).
    #[default]
    PercentDirect,
}

impl OperandFormat {
    /// Converts a percentage into the operand value for this format.
    #[inline]
    pub fn convert(self, percent: f64) -> f64 {
        match self {
            OperandFormat::Factor => 1.0 + percent / 100.0,
            OperandFormat::PercentDirect => percent / 100.0,
        }
    }
}

/// Source of an operand value.
///
/// Wire form is `{ "kind": ..., "key": ..., "format"? }`. Records that cannot
/// be read as one of the three kinds load as [`OperandRef::Invalid`] and fail
/// only the step that uses them.
#[derive(Clone, Debug, PartialEq)]
pub enum OperandRef {
    /// A named percentage from the tender's parameter set.
    Parameter { key: String, format: OperandFormat },

    /// The result of an earlier step, or the original base amount for
    /// [`EngineConfig::BASE_AMOUNT_INDEX`].
    Step { index: i32 },

    /// A constant used as-is.
    Literal { value: f64 },

    /// A malformed operand record; resolving it yields `reason`.
    Invalid { reason: OperandError },
}

impl OperandRef {
    /// Parameter operand converted with `format`.
    pub fn parameter(key: impl Into<String>, format: OperandFormat) -> Self {
        Self::Parameter {
            key: key.into(),
            format,
        }
    }

    /// Parameter operand used as an additive multiplier (`1 + p/100`).
    pub fn factor(key: impl Into<String>) -> Self {
        Self::parameter(key, OperandFormat::Factor)
    }

    /// Parameter operand used as a bare fraction (`p/100`).
    pub fn percent(key: impl Into<String>) -> Self {
        Self::parameter(key, OperandFormat::PercentDirect)
    }

    /// Reference to the result of step `index`.
    pub const fn step(index: i32) -> Self {
        Self::Step { index }
    }

    /// Reference to the original, un-overridden base amount.
    pub const fn base_amount() -> Self {
        Self::Step {
            index: EngineConfig::BASE_AMOUNT_INDEX,
        }
    }

    pub const fn literal(value: f64) -> Self {
        Self::Literal { value }
    }

    /// Parameter name, if this operand reads one.
    pub fn parameter_key(&self) -> Option<&str> {
        match self {
            OperandRef::Parameter { key, .. } => Some(key),
            _ => None,
        }
    }
}

impl core::fmt::Display for OperandRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            OperandRef::Parameter { key, format } => match format {
                OperandFormat::Factor => write!(f, "(1 + {key}%)"),
                OperandFormat::PercentDirect => write!(f, "{key}%"),
            },
            OperandRef::Step { index } if *index == EngineConfig::BASE_AMOUNT_INDEX => {
                write!(f, "base")
            }
            OperandRef::Step { index } => write!(f, "step[{}]", index + 1),
            OperandRef::Literal { value } => write!(f, "{value}"),
            OperandRef::Invalid { reason } => write!(f, "<{reason}>"),
        }
    }
}

// ============================================================================
// Wire Format
// ============================================================================

#[cfg(feature = "serde")]
mod wire {
    use std::str::FromStr;

    use serde::de::IgnoredAny;
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{OperandFormat, OperandRef};
    use crate::eval::OperandError;
    use crate::types::serde_util::RawKey;

    #[derive(Deserialize)]
    struct RawOperand {
        #[serde(default)]
        kind: Option<RawKey>,
        #[serde(default)]
        key: Option<RawKey>,
        #[serde(default)]
        format: Option<RawKey>,
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawValue {
        Record(RawOperand),
        Other(IgnoredAny),
    }

    impl RawOperand {
        fn into_operand(self) -> OperandRef {
            let kind = self.kind.map(|kind| kind.to_string()).unwrap_or_default();
            if !matches!(kind.as_str(), "parameter" | "step" | "literal") {
                return invalid(OperandError::UnrecognizedKind(kind));
            }
            let Some(key) = self.key else {
                return invalid(OperandError::MissingKey { kind });
            };

            let read = match kind.as_str() {
                "parameter" => key.as_name().map(|name| OperandRef::Parameter {
                    key: name.to_string(),
                    // anything but `factor` reads as a bare fraction
                    format: self
                        .format
                        .as_ref()
                        .and_then(RawKey::as_name)
                        .and_then(|format| OperandFormat::from_str(format.trim()).ok())
                        .unwrap_or_default(),
                }),
                "step" => key.as_index().map(OperandRef::step),
                _ => key.as_number().map(OperandRef::literal),
            };

            read.unwrap_or_else(|| {
                invalid(OperandError::InvalidKey {
                    key: key.to_string(),
                    kind,
                })
            })
        }
    }

    fn invalid(reason: OperandError) -> OperandRef {
        OperandRef::Invalid { reason }
    }

    impl<'de> Deserialize<'de> for OperandRef {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            Ok(match RawValue::deserialize(deserializer)? {
                RawValue::Record(raw) => raw.into_operand(),
                RawValue::Other(_) => invalid(OperandError::UnrecognizedKind(String::new())),
            })
        }
    }

    impl Serialize for OperandRef {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(None)?;
            match self {
                OperandRef::Parameter { key, format } => {
                    map.serialize_entry("kind", "parameter")?;
                    map.serialize_entry("key", key)?;
                    map.serialize_entry("format", format)?;
                }
                OperandRef::Step { index } => {
                    map.serialize_entry("kind", "step")?;
                    map.serialize_entry("key", index)?;
                }
                OperandRef::Literal { value } => {
                    map.serialize_entry("kind", "literal")?;
                    map.serialize_entry("key", value)?;
                }
                // reloads as an unrecognized kind
                OperandRef::Invalid { reason } => {
                    map.serialize_entry("kind", "invalid")?;
                    map.serialize_entry("reason", &reason.to_string())?;
                }
            }
            map.end()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factor_and_percent_conversion() {
        assert!((OperandFormat::Factor.convert(10.0) - 1.1).abs() < 1e-12);
        assert!((OperandFormat::PercentDirect.convert(10.0) - 0.1).abs() < 1e-12);
        assert_eq!(OperandFormat::default(), OperandFormat::PercentDirect);
    }

    #[test]
    fn display_is_readable() {
        assert_eq!(OperandRef::factor("margin").to_string(), "(1 + margin%)");
        assert_eq!(OperandRef::percent("vat").to_string(), "vat%");
        assert_eq!(OperandRef::base_amount().to_string(), "base");
        assert_eq!(OperandRef::step(0).to_string(), "step[1]");
        assert_eq!(OperandRef::literal(2.5).to_string(), "2.5");
        let invalid = OperandRef::Invalid {
            reason: OperandError::UnrecognizedKind("formula".into()),
        };
        assert_eq!(invalid.to_string(), "<unrecognized operand kind 'formula'>");
        assert_eq!(invalid.parameter_key(), None);
    }
}
