//! Evaluation of operands and single steps.
//!
//! The sequence runner in [`crate::engine`] drives these functions once per
//! step; they know nothing about error accumulation and simply return
//! `Result`s.

mod error;
mod operand;
mod step;

pub use error::{OperandError, StepError};
pub use operand::resolve;
pub use step::evaluate_step;

use crate::types::ParameterSet;

/// Inputs visible to a step while it is evaluated.
#[derive(Clone, Copy, Debug)]
pub struct EvalContext<'a> {
    /// The item's original base amount; what a `step -1` operand reads.
    pub base_amount: f64,

    /// Value selected by `base_index == -1`: the override if one was given,
    /// otherwise the base amount.
    pub starting_value: f64,

    pub parameters: &'a ParameterSet,

    /// Results of the steps before the one being evaluated.
    pub step_results: &'a [f64],
}
