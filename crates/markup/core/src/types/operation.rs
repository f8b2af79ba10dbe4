//! Binary arithmetic operations of the markup language.

use crate::eval::StepError;

/// One arithmetic operation applied to the running value of a step.
///
/// The set is closed: adding a new operation is a compiler-checked change
/// to every `match` over this enum.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Operation {
    /// `value * operand`
    Multiply,
    /// `value / operand`, rejects a zero operand
    Divide,
    /// `value + operand`
    Add,
    /// `value - operand`
    Subtract,
}

impl Operation {
    /// Applies this operation to the running `value`.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::DivideByZero`] when dividing by an operand equal to zero.
    pub fn apply(self, value: f64, operand: f64) -> Result<f64, StepError> {
        match self {
            Operation::Multiply => Ok(value * operand),
            Operation::Divide => {
                if operand == 0.0 {
                    return Err(StepError::DivideByZero);
                }
                Ok(value / operand)
            }
            Operation::Add => Ok(value + operand),
            Operation::Subtract => Ok(value - operand),
        }
    }

    /// Infix symbol used when rendering a step for humans.
    pub const fn symbol(self) -> char {
        match self {
            Operation::Multiply => '×',
            Operation::Divide => '÷',
            Operation::Add => '+',
            Operation::Subtract => '−',
        }
    }
}

/// Action of an operation slot as authored.
///
/// Configuration may name an operation this engine does not implement. Such a
/// slot is kept so the step fails on its own at run time and the rest of the
/// tactic stays usable.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SlotAction {
    Known(Operation),
    Unrecognized(String),
}

impl SlotAction {
    pub fn operation(&self) -> Option<Operation> {
        match self {
            SlotAction::Known(operation) => Some(*operation),
            SlotAction::Unrecognized(_) => None,
        }
    }

    /// Applies the action, or fails with [`StepError::UnrecognizedAction`] at `position`.
    pub fn apply(&self, position: usize, value: f64, operand: f64) -> Result<f64, StepError> {
        match self {
            SlotAction::Known(operation) => operation.apply(value, operand),
            SlotAction::Unrecognized(name) => Err(StepError::UnrecognizedAction {
                position,
                name: name.clone(),
            }),
        }
    }
}

impl From<Operation> for SlotAction {
    fn from(operation: Operation) -> Self {
        SlotAction::Known(operation)
    }
}

impl core::fmt::Display for SlotAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SlotAction::Known(operation) => write!(f, "{}", operation.symbol()),
            SlotAction::Unrecognized(name) => write!(f, "<{name}>"),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SlotAction {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SlotAction::Known(operation) => operation.serialize(serializer),
            SlotAction::Unrecognized(name) => serializer.serialize_str(name),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SlotAction {
    /// Never fails on content: unknown names and non-string values become
    /// [`SlotAction::Unrecognized`].
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use crate::types::serde_util::RawKey;
        use std::str::FromStr;

        let action = match RawKey::deserialize(deserializer)? {
            RawKey::Text(name) => match Operation::from_str(name.trim()) {
                Ok(operation) => SlotAction::Known(operation),
                Err(_) => SlotAction::Unrecognized(name),
            },
            other => SlotAction::Unrecognized(other.to_string()),
        };
        Ok(action)
    }
}
