//! Static sequence validation.
//!
//! Runs once when a sequence is authored or edited, independent of any line
//! item's numbers. A sequence that passes [`validate`] can only fail at run
//! time on data: an unknown parameter or a division by zero.

use std::collections::BTreeSet;

use crate::config::EngineConfig;
use crate::error::{ErrorSeverity, MarkupError};
use crate::eval::OperandError;
use crate::types::{MarkupStep, OperandRef, ParameterSet, SlotAction};

/// A structural problem found in a sequence. Step and operand numbers are 1-based.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationIssue {
    #[error("invalid baseIndex at step {step}")]
    InvalidBaseIndex { step: usize },

    #[error("missing mandatory first operation at step {step}")]
    MissingFirstOperation { step: usize },

    #[error("invalid step reference at step {step}, operand {operand}")]
    InvalidStepReference { step: usize, operand: usize },

    #[error("unrecognized operation '{name}' at step {step}, operation {operation}")]
    UnrecognizedAction {
        step: usize,
        operation: usize,
        name: String,
    },

    #[error("invalid operand at step {step}, operand {operand}: {reason}")]
    InvalidOperand {
        step: usize,
        operand: usize,
        reason: OperandError,
    },

    #[error("unknown parameter '{key}' at step {step}, operand {operand}")]
    UnknownParameter {
        step: usize,
        operand: usize,
        key: String,
    },
}

impl ValidationIssue {
    /// 1-based number of the offending step.
    pub fn step(&self) -> usize {
        match self {
            Self::InvalidBaseIndex { step }
            | Self::MissingFirstOperation { step }
            | Self::InvalidStepReference { step, .. }
            | Self::UnrecognizedAction { step, .. }
            | Self::InvalidOperand { step, .. }
            | Self::UnknownParameter { step, .. } => *step,
        }
    }
}

impl MarkupError for ValidationIssue {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidBaseIndex { .. } => "SEQUENCE_INVALID_BASE_INDEX",
            Self::MissingFirstOperation { .. } => "SEQUENCE_MISSING_FIRST_OPERATION",
            Self::InvalidStepReference { .. } => "SEQUENCE_INVALID_STEP_REFERENCE",
            Self::UnrecognizedAction { .. } => "SEQUENCE_UNRECOGNIZED_ACTION",
            Self::InvalidOperand { .. } => "SEQUENCE_INVALID_OPERAND",
            Self::UnknownParameter { .. } => "SEQUENCE_UNKNOWN_PARAMETER",
        }
    }
}

/// Checks a sequence for forward/self references, missing first operations
/// and records that could not be read.
///
/// Returns an empty list for a valid sequence. For the step at position `i`:
/// - `base_index` must satisfy `-1 <= base_index < i`
/// - operation 1 must have both its action and its operand
/// - every action must name a known operation
/// - every operand must be readable, and every `Step` operand must be `-1`
///   or satisfy `0 <= index < i`
pub fn validate(sequence: &[MarkupStep]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for (i, step) in sequence.iter().enumerate() {
        let number = i + 1;

        if !references_earlier(step.base_index, i) {
            issues.push(ValidationIssue::InvalidBaseIndex { step: number });
        }

        if step.first_operation().is_none() {
            issues.push(ValidationIssue::MissingFirstOperation { step: number });
        }

        for (position, slot) in step.slots().iter().enumerate() {
            if let Some(SlotAction::Unrecognized(name)) = &slot.action {
                issues.push(ValidationIssue::UnrecognizedAction {
                    step: number,
                    operation: position + 1,
                    name: name.clone(),
                });
            }
        }

        for (position, operand) in step.operands() {
            match operand {
                OperandRef::Step { index } if !references_earlier(*index, i) => {
                    issues.push(ValidationIssue::InvalidStepReference {
                        step: number,
                        operand: position,
                    });
                }
                OperandRef::Invalid { reason } => {
                    issues.push(ValidationIssue::InvalidOperand {
                        step: number,
                        operand: position,
                        reason: reason.clone(),
                    });
                }
                _ => {}
            }
        }
    }

    issues
}

/// Checks that every parameter operand exists in `parameters`.
///
/// Complements [`validate`] when the tender's parameter set is known at
/// authoring time.
pub fn validate_parameters(
    sequence: &[MarkupStep],
    parameters: &ParameterSet,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for (i, step) in sequence.iter().enumerate() {
        for (position, operand) in step.operands() {
            let Some(key) = operand.parameter_key() else {
                continue;
            };
            if !parameters.contains(key) {
                issues.push(ValidationIssue::UnknownParameter {
                    step: i + 1,
                    operand: position,
                    key: key.to_string(),
                });
            }
        }
    }
    issues
}

/// Parameter names a sequence reads, sorted and de-duplicated.
pub fn referenced_parameters(sequence: &[MarkupStep]) -> Vec<&str> {
    sequence
        .iter()
        .flat_map(|step| step.operands().filter_map(|(_, operand)| operand.parameter_key()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// `-1` (the base amount) or an index of an already computed step.
fn references_earlier(index: i32, position: usize) -> bool {
    if index == EngineConfig::BASE_AMOUNT_INDEX {
        return true;
    }
    usize::try_from(index).is_ok_and(|index| index < position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Operation, OperationSlot};

    fn margin_step() -> MarkupStep {
        MarkupStep::from_base(Operation::Multiply, OperandRef::factor("margin"))
    }

    #[test]
    fn single_base_step_is_valid() {
        assert!(validate(&[margin_step()]).is_empty());
    }

    #[test]
    fn self_reference_is_rejected() {
        let step = MarkupStep::new(0, Operation::Multiply, OperandRef::factor("margin"));
        assert_eq!(
            validate(&[step]),
            vec![ValidationIssue::InvalidBaseIndex { step: 1 }]
        );
    }

    #[test]
    fn base_index_below_sentinel_is_rejected() {
        let steps = [
            margin_step(),
            MarkupStep::new(-2, Operation::Add, OperandRef::literal(1.0)),
        ];
        assert_eq!(
            validate(&steps),
            vec![ValidationIssue::InvalidBaseIndex { step: 2 }]
        );
    }

    #[test]
    fn missing_first_operation_is_reported() {
        let step = MarkupStep::from_slots(
            -1,
            [
                OperationSlot {
                    action: Some(Operation::Add.into()),
                    operand: None,
                },
                OperationSlot::new(Operation::Add, OperandRef::literal(1.0)),
            ],
        )
        .unwrap();

        let issues = validate(&[step]);
        assert_eq!(issues, vec![ValidationIssue::MissingFirstOperation { step: 1 }]);
        assert_eq!(
            issues[0].to_string(),
            "missing mandatory first operation at step 1"
        );
    }

    #[test]
    fn step_operands_must_point_backwards() {
        let steps = [
            margin_step(),
            MarkupStep::new(0, Operation::Add, OperandRef::step(0))
                .then(Operation::Subtract, OperandRef::base_amount())
                .then(Operation::Multiply, OperandRef::step(1))
                .then(Operation::Divide, OperandRef::step(7)),
        ];

        let issues = validate(&steps);
        assert_eq!(
            issues,
            vec![
                ValidationIssue::InvalidStepReference {
                    step: 2,
                    operand: 3
                },
                ValidationIssue::InvalidStepReference {
                    step: 2,
                    operand: 4
                },
            ]
        );
        assert_eq!(
            issues[0].to_string(),
            "invalid step reference at step 2, operand 3"
        );
    }

    #[test]
    fn unreadable_records_are_reported() {
        let step = MarkupStep::from_slots(
            -1,
            [
                OperationSlot {
                    action: Some(SlotAction::Unrecognized("power".into())),
                    operand: Some(OperandRef::literal(2.0)),
                },
                OperationSlot::new(
                    Operation::Add,
                    OperandRef::Invalid {
                        reason: OperandError::UnrecognizedKind("formula".into()),
                    },
                ),
            ],
        )
        .unwrap();

        let issues = validate(&[step]);
        assert_eq!(
            issues,
            vec![
                ValidationIssue::UnrecognizedAction {
                    step: 1,
                    operation: 1,
                    name: "power".into()
                },
                ValidationIssue::InvalidOperand {
                    step: 1,
                    operand: 2,
                    reason: OperandError::UnrecognizedKind("formula".into()),
                },
            ]
        );
        assert_eq!(
            issues[1].to_string(),
            "invalid operand at step 1, operand 2: unrecognized operand kind 'formula'"
        );
    }

    #[test]
    fn parameter_checks_and_listing() {
        let steps = [
            margin_step(),
            MarkupStep::new(0, Operation::Multiply, OperandRef::factor("overhead"))
                .then(Operation::Add, OperandRef::percent("margin")),
        ];
        let params = ParameterSet::new().with("margin", 10.0);

        assert_eq!(
            validate_parameters(&steps, &params),
            vec![ValidationIssue::UnknownParameter {
                step: 2,
                operand: 1,
                key: "overhead".into()
            }]
        );
        assert_eq!(referenced_parameters(&steps), vec!["margin", "overhead"]);
    }
}
