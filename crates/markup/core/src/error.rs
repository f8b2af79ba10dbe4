//! Common error infrastructure for markup-core.
//!
//! Domain errors (`OperandError`, `StepError`, `CalculationIssue`,
//! `ValidationIssue`) live next to the code that produces them. All of them
//! implement [`MarkupError`] so hosts can classify failures uniformly when
//! surfacing diagnostics to sequence authors.
//!
//! Nothing in this crate propagates an error past [`crate::run`]: runtime
//! failures are recorded in the result, static problems are returned as a list.

/// Severity level of an error, used for categorization and reporting.
///
/// - **Recoverable**: the calculation continued and produced a usable value
/// - **Validation**: the configuration is malformed and should be fixed by its author
/// - **Fatal**: no meaningful result could be produced
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable: a step was skipped or a value was flagged.
    ///
    /// Examples: division by a zero-valued parameter, negative base cost
    Recoverable,

    /// Validation: invalid configuration.
    ///
    /// Examples: forward step reference, missing first operation
    Validation,

    /// Fatal: nothing could be computed.
    ///
    /// Examples: no sequence supplied
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if the configuration author has to act.
    pub const fn needs_author(&self) -> bool {
        matches!(self, Self::Validation | Self::Fatal)
    }
}

/// Common trait for all markup-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for the Display/Error impl
/// - Error codes are stable identifiers, safe to match on in host applications
pub trait MarkupError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
