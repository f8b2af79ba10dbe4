//! Operand resolution.

use crate::config::EngineConfig;
use crate::eval::OperandError;
use crate::types::{OperandRef, ParameterSet};

/// Resolves an operand to its numeric value.
///
/// ## Sources
/// - `Parameter`: percentage from `parameters`, converted by its format
/// - `Step { -1 }`: the original `base_amount`, never the override
/// - `Step { i }`: `step_results[i]`
/// - `Literal`: the value itself
/// - `Invalid`: always fails with the recorded reason
///
/// ## Errors
/// - `UnknownParameter` if the key is absent from `parameters`
/// - `StepOutOfRange` if the index is not yet computed
/// - `UnrecognizedKind`, `MissingKey` or `InvalidKey` for a malformed record
pub fn resolve(
    operand: &OperandRef,
    parameters: &ParameterSet,
    step_results: &[f64],
    base_amount: f64,
) -> Result<f64, OperandError> {
    match operand {
        OperandRef::Parameter { key, format } => parameters
            .get(key)
            .map(|percent| format.convert(percent))
            .ok_or_else(|| OperandError::UnknownParameter(key.clone())),

        OperandRef::Step { index } if *index == EngineConfig::BASE_AMOUNT_INDEX => Ok(base_amount),

        OperandRef::Step { index } => usize::try_from(*index)
            .ok()
            .and_then(|i| step_results.get(i).copied())
            .ok_or(OperandError::StepOutOfRange {
                index: *index,
                available: step_results.len(),
            }),

        OperandRef::Literal { value } => Ok(*value),

        OperandRef::Invalid { reason } => Err(reason.clone()),
    }
}
