//! Single-step evaluation.

use crate::config::EngineConfig;
use crate::eval::{EvalContext, StepError, resolve};
use crate::types::{MarkupStep, OperandRef, SlotAction};

/// Evaluates one step against the results computed so far.
///
/// ## Algorithm
/// 1. Pick the base value: `starting_value` for `-1`, else `step_results[base_index]`
/// 2. Apply operation 1 (mandatory)
/// 3. Apply operations 2..=5 in order, skipping incomplete slots
///
/// ## Errors
/// - `InvalidBaseIndex` for a base index that is not yet computed
/// - `MissingFirstOperation` if slot 1 lacks its action or operand
/// - `Operand` wrapping any operand resolution failure
/// - `UnrecognizedAction` for an action name the engine does not implement
/// - `DivideByZero` from a divide operation
pub fn evaluate_step(step: &MarkupStep, ctx: &EvalContext<'_>) -> Result<f64, StepError> {
    let mut value = base_value(step.base_index, ctx)?;

    let (action, operand) = step
        .first_operation()
        .ok_or(StepError::MissingFirstOperation)?;
    value = apply_at(1, action, operand, value, ctx)?;

    for (position, slot) in step.slots().iter().enumerate().skip(1) {
        let Some((action, operand)) = slot.complete() else {
            continue;
        };
        value = apply_at(position + 1, action, operand, value, ctx)?;
    }

    Ok(value)
}

fn base_value(base_index: i32, ctx: &EvalContext<'_>) -> Result<f64, StepError> {
    if base_index == EngineConfig::BASE_AMOUNT_INDEX {
        return Ok(ctx.starting_value);
    }
    usize::try_from(base_index)
        .ok()
        .and_then(|i| ctx.step_results.get(i).copied())
        .ok_or(StepError::InvalidBaseIndex {
            index: base_index,
            available: ctx.step_results.len(),
        })
}

fn apply_at(
    position: usize,
    action: &SlotAction,
    operand: &OperandRef,
    value: f64,
    ctx: &EvalContext<'_>,
) -> Result<f64, StepError> {
    let rhs = resolve(operand, ctx.parameters, ctx.step_results, ctx.base_amount)
        .map_err(|source| StepError::operand(position, source))?;
    action.apply(position, value, rhs)
}
