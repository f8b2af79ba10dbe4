//! Step evaluation errors.

use crate::error::{ErrorSeverity, MarkupError};

// ============================================================================
// Operand Errors
// ============================================================================

/// Errors raised while resolving an operand to a number.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OperandError {
    /// Parameter key absent from the parameter set.
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    /// Step reference outside the already computed results.
    #[error("step reference {index} out of range ({available} computed)")]
    StepOutOfRange { index: i32, available: usize },

    /// Operand `kind` is not one of `parameter`, `step` or `literal`.
    #[error("unrecognized operand kind '{0}'")]
    UnrecognizedKind(String),

    /// Operand has no `key`.
    #[error("{kind} operand has no key")]
    MissingKey { kind: String },

    /// Operand `key` cannot be read for its kind.
    #[error("invalid {kind} key '{key}'")]
    InvalidKey { kind: String, key: String },
}

impl MarkupError for OperandError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownParameter(_) => "OPERAND_UNKNOWN_PARAMETER",
            Self::StepOutOfRange { .. } => "OPERAND_STEP_OUT_OF_RANGE",
            Self::UnrecognizedKind(_) => "OPERAND_UNRECOGNIZED_KIND",
            Self::MissingKey { .. } => "OPERAND_MISSING_KEY",
            Self::InvalidKey { .. } => "OPERAND_INVALID_KEY",
        }
    }
}

// ============================================================================
// Step Errors
// ============================================================================

/// Errors raised while evaluating a single step.
///
/// Division by zero and an unknown parameter are deliberately distinct:
/// the first means a parameter or literal resolved to `0`, the second that
/// the parameter does not exist at all.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepError {
    /// `base_index` is neither the base-amount sentinel nor a computed step.
    #[error("invalid base index {index} ({available} computed)")]
    InvalidBaseIndex { index: i32, available: usize },

    /// Operation 1 is missing its action or its operand.
    #[error("missing mandatory first operation")]
    MissingFirstOperation,

    /// An operand could not be resolved.
    #[error("operand {position}: {source}")]
    Operand {
        position: usize,
        #[source]
        source: OperandError,
    },

    /// Action name the engine does not implement.
    #[error("unrecognized operation '{name}' at operation {position}")]
    UnrecognizedAction { position: usize, name: String },

    /// Divide with an operand equal to zero.
    #[error("division by zero")]
    DivideByZero,

    /// More chained operations than the language allows.
    #[error("more than {max} operations in one step")]
    TooManyOperations { max: usize },
}

impl StepError {
    pub(crate) fn operand(position: usize, source: OperandError) -> Self {
        Self::Operand { position, source }
    }
}

impl MarkupError for StepError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DivideByZero => ErrorSeverity::Recoverable,
            Self::Operand { source, .. } => source.severity(),
            Self::InvalidBaseIndex { .. }
            | Self::MissingFirstOperation
            | Self::UnrecognizedAction { .. }
            | Self::TooManyOperations { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidBaseIndex { .. } => "STEP_INVALID_BASE_INDEX",
            Self::MissingFirstOperation => "STEP_MISSING_FIRST_OPERATION",
            Self::Operand { source, .. } => source.error_code(),
            Self::UnrecognizedAction { .. } => "STEP_UNRECOGNIZED_ACTION",
            Self::DivideByZero => "STEP_DIVIDE_BY_ZERO",
            Self::TooManyOperations { .. } => "STEP_TOO_MANY_OPERATIONS",
        }
    }
}
