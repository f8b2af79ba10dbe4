use crate::error::{ErrorSeverity, MarkupError};
use crate::eval::StepError;
use crate::format::percentage_markup;
use crate::validate::ValidationIssue;

/// Problem recorded while running a sequence.
///
/// None of these abort a calculation; they travel with the result so the host
/// can surface them next to the line item.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CalculationIssue {
    #[error("sequence not defined")]
    SequenceNotDefined,

    #[error("sequence empty")]
    SequenceEmpty,

    #[error("base cost negative")]
    NegativeBaseCost,

    /// A step failed; its slot carries the previous running value.
    #[error("step {step}: {error}")]
    StepFailed { step: usize, error: StepError },

    /// The sequence was refused before evaluation (`fail_on_validation`).
    #[error("sequence rejected: {} problem(s), first: {}", .problems.len(), first_problem(.problems))]
    SequenceRejected { problems: Vec<ValidationIssue> },
}

fn first_problem(problems: &[ValidationIssue]) -> String {
    problems
        .first()
        .map(ToString::to_string)
        .unwrap_or_default()
}

impl MarkupError for CalculationIssue {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SequenceNotDefined | Self::SequenceEmpty => ErrorSeverity::Fatal,
            Self::NegativeBaseCost => ErrorSeverity::Recoverable,
            Self::StepFailed { error, .. } => error.severity(),
            Self::SequenceRejected { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::SequenceNotDefined => "CALC_SEQUENCE_NOT_DEFINED",
            Self::SequenceEmpty => "CALC_SEQUENCE_EMPTY",
            Self::NegativeBaseCost => "CALC_NEGATIVE_BASE_COST",
            Self::StepFailed { error, .. } => error.error_code(),
            Self::SequenceRejected { .. } => "CALC_SEQUENCE_REJECTED",
        }
    }
}

/// Output of a markup calculation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CalculationResult {
    pub commercial_cost: f64,

    /// `commercial_cost / base_amount` when the base amount is positive, else `1`.
    pub markup_coefficient: f64,

    /// One entry per step, including carried-forward values of failed steps.
    pub step_results: Vec<f64>,

    /// `None` unless at least one issue was recorded.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub errors: Option<Vec<CalculationIssue>>,
}

impl CalculationResult {
    /// Result that leaves `cost` untouched.
    pub(crate) fn unchanged(cost: f64, issue: Option<CalculationIssue>) -> Self {
        Self {
            commercial_cost: cost,
            markup_coefficient: 1.0,
            step_results: Vec::new(),
            errors: issue.map(|issue| vec![issue]),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_none()
    }

    pub fn issues(&self) -> &[CalculationIssue] {
        self.errors.as_deref().unwrap_or_default()
    }

    /// Issues rendered as human-readable strings.
    pub fn error_messages(&self) -> Vec<String> {
        self.issues().iter().map(ToString::to_string).collect()
    }

    /// Markup over `base_amount` in percent.
    pub fn percentage_markup(&self, base_amount: f64) -> f64 {
        percentage_markup(base_amount, self.commercial_cost)
    }
}
