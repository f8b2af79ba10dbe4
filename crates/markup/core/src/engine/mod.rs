//! Sequence runner.
//!
//! [`run`] is the top-level entry point of the engine. It never fails: every
//! problem ends up in [`CalculationResult::errors`], and a malformed step
//! only costs its own contribution.
//!
//! ## Skip and carry forward
//!
//! When step `i` fails, `step_results[i]` receives the running value from
//! before the step. Index alignment is preserved, so later steps that point
//! at `i` still resolve, and the rest of the sequence keeps running.

mod context;
mod result;

pub use context::CalculationContext;
pub use result::{CalculationIssue, CalculationResult};

use crate::config::EngineConfig;
use crate::eval::{EvalContext, evaluate_step};
use crate::format::format_currency_with;
use crate::validate::validate;

/// Runs a calculation context through its step sequence.
pub fn run(ctx: &CalculationContext<'_>) -> CalculationResult {
    let Some(sequence) = ctx.sequence else {
        return CalculationResult::unchanged(
            ctx.base_amount,
            Some(CalculationIssue::SequenceNotDefined),
        );
    };
    if sequence.is_empty() {
        return CalculationResult::unchanged(ctx.base_amount, Some(CalculationIssue::SequenceEmpty));
    }

    let starting_value = ctx.starting_value();
    if starting_value <= 0.0 {
        // A zero base has nothing to mark up and is not an error.
        let issue = (starting_value < 0.0).then_some(CalculationIssue::NegativeBaseCost);
        if issue.is_some() {
            tracing::warn!(
                base_cost = starting_value,
                item_type = %ctx.item_type,
                "negative base cost, markup skipped"
            );
        }
        return CalculationResult::unchanged(starting_value, issue);
    }

    let mut current = starting_value;
    let mut step_results = Vec::with_capacity(sequence.len());
    let mut errors = Vec::new();

    for (i, step) in sequence.iter().enumerate() {
        let eval = EvalContext {
            base_amount: ctx.base_amount,
            starting_value,
            parameters: ctx.parameters,
            step_results: &step_results,
        };

        match evaluate_step(step, &eval) {
            Ok(value) => {
                tracing::trace!(step = i + 1, value, "step evaluated");
                current = value;
            }
            Err(error) => {
                tracing::warn!(
                    step = i + 1,
                    carried = current,
                    item_type = %ctx.item_type,
                    "markup step failed: {error}"
                );
                errors.push(CalculationIssue::StepFailed { step: i + 1, error });
            }
        }
        step_results.push(current);
    }

    let markup_coefficient = if ctx.base_amount > 0.0 {
        current / ctx.base_amount
    } else {
        1.0
    };

    tracing::debug!(
        base_amount = ctx.base_amount,
        commercial_cost = current,
        markup_coefficient,
        failed_steps = errors.len(),
        "markup calculated"
    );

    CalculationResult {
        commercial_cost: current,
        markup_coefficient,
        step_results,
        errors: (!errors.is_empty()).then_some(errors),
    }
}

/// Runs independent contexts in input order.
pub fn run_batch<'a>(
    contexts: impl IntoIterator<Item = CalculationContext<'a>>,
) -> Vec<CalculationResult> {
    contexts.into_iter().map(|ctx| run(&ctx)).collect()
}

/// Markup engine bound to an [`EngineConfig`].
///
/// Adds the configured policies around [`run`]: optional refusal of sequences
/// that fail static validation, and presentation formatting.
#[derive(Clone, Debug, Default)]
pub struct MarkupEngine {
    config: EngineConfig,
}

impl MarkupEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs one context, honoring `fail_on_validation`.
    pub fn run(&self, ctx: &CalculationContext<'_>) -> CalculationResult {
        if let (true, Some(sequence)) = (self.config.fail_on_validation, ctx.sequence) {
            let problems = validate(sequence);
            if !problems.is_empty() {
                tracing::warn!(
                    problems = problems.len(),
                    item_type = %ctx.item_type,
                    "sequence rejected by validation"
                );
                return CalculationResult::unchanged(
                    ctx.base_amount,
                    Some(CalculationIssue::SequenceRejected { problems }),
                );
            }
        }
        run(ctx)
    }

    pub fn run_batch<'a>(
        &self,
        contexts: impl IntoIterator<Item = CalculationContext<'a>>,
    ) -> Vec<CalculationResult> {
        contexts.into_iter().map(|ctx| self.run(&ctx)).collect()
    }

    /// Formats a monetary value with the configured decimals and locale.
    pub fn format_cost(&self, value: f64) -> String {
        format_currency_with(value, self.config.currency_decimals, self.config.locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::{OperandError, StepError};
    use crate::types::{ItemType, MarkupStep, OperandRef, Operation, ParameterSet};

    fn margin_sequence() -> Vec<MarkupStep> {
        vec![MarkupStep::from_base(
            Operation::Multiply,
            OperandRef::factor("margin"),
        )]
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn missing_sequence_keeps_base_amount() {
        let params = ParameterSet::new();
        let ctx = CalculationContext::new(1000.0, ItemType::Work, &params).with_override(10.0);

        let result = run(&ctx);
        assert_eq!(result.commercial_cost, 1000.0);
        assert_eq!(result.markup_coefficient, 1.0);
        assert!(result.step_results.is_empty());
        assert_eq!(result.error_messages(), vec!["sequence not defined"]);
    }

    #[test]
    fn empty_sequence_is_reported() {
        let params = ParameterSet::new();
        let ctx = CalculationContext::new(250.0, ItemType::Material, &params).with_sequence(&[]);

        let result = run(&ctx);
        assert_eq!(result.commercial_cost, 250.0);
        assert_eq!(result.errors, Some(vec![CalculationIssue::SequenceEmpty]));
    }

    #[test]
    fn zero_base_is_not_an_error() {
        let params = ParameterSet::new().with("margin", 10.0);
        let sequence = margin_sequence();
        let ctx = CalculationContext::new(0.0, ItemType::Work, &params).with_sequence(&sequence);

        let result = run(&ctx);
        assert_eq!(result.commercial_cost, 0.0);
        assert_eq!(result.markup_coefficient, 1.0);
        assert!(result.is_clean());
    }

    #[test]
    fn negative_override_is_flagged() {
        let params = ParameterSet::new().with("margin", 10.0);
        let sequence = margin_sequence();
        let ctx = CalculationContext::new(100.0, ItemType::Work, &params)
            .with_sequence(&sequence)
            .with_override(-5.0);

        let result = run(&ctx);
        assert_eq!(result.commercial_cost, -5.0);
        assert_eq!(result.markup_coefficient, 1.0);
        assert_eq!(result.errors, Some(vec![CalculationIssue::NegativeBaseCost]));
    }

    #[test]
    fn override_feeds_first_step_but_not_coefficient() {
        let params = ParameterSet::new().with("margin", 10.0);
        let sequence = margin_sequence();
        let ctx = CalculationContext::new(1000.0, ItemType::Work, &params)
            .with_sequence(&sequence)
            .with_override(500.0);

        let result = run(&ctx);
        assert!(approx(result.commercial_cost, 550.0));
        assert!(approx(result.markup_coefficient, 0.55));
    }

    #[test]
    fn failed_step_carries_previous_value() {
        let params = ParameterSet::new().with("margin", 10.0);
        let sequence = vec![
            MarkupStep::from_base(Operation::Multiply, OperandRef::factor("margin")),
            MarkupStep::new(0, Operation::Multiply, OperandRef::factor("unknown")),
            MarkupStep::new(1, Operation::Add, OperandRef::step(0)),
        ];
        let ctx = CalculationContext::new(100.0, ItemType::SubWork, &params).with_sequence(&sequence);

        let result = run(&ctx);
        assert_eq!(result.step_results.len(), 3);
        assert!(approx(result.step_results[0], 110.0));
        assert_eq!(result.step_results[1], result.step_results[0]);
        assert!(approx(result.commercial_cost, 220.0));
        assert_eq!(
            result.errors,
            Some(vec![CalculationIssue::StepFailed {
                step: 2,
                error: StepError::Operand {
                    position: 1,
                    source: OperandError::UnknownParameter("unknown".into()),
                },
            }])
        );
        assert_eq!(
            result.error_messages(),
            vec!["step 2: operand 1: unknown parameter 'unknown'"]
        );
    }

    #[test]
    fn unreadable_operand_is_isolated_to_its_step() {
        let params = ParameterSet::new().with("margin", 10.0);
        let sequence = [
            MarkupStep::from_base(Operation::Multiply, OperandRef::factor("margin")),
            MarkupStep::new(
                0,
                Operation::Multiply,
                OperandRef::Invalid {
                    reason: OperandError::UnrecognizedKind("formula".into()),
                },
            ),
            MarkupStep::new(1, Operation::Add, OperandRef::literal(10.0)),
        ];
        let ctx = CalculationContext::new(1000.0, ItemType::Work, &params).with_sequence(&sequence);

        let result = run(&ctx);
        assert_eq!(result.step_results.len(), 3);
        assert_eq!(result.step_results[1], result.step_results[0]);
        assert!(approx(result.commercial_cost, 1110.0));
        assert_eq!(
            result.error_messages(),
            vec!["step 2: operand 1: unrecognized operand kind 'formula'"]
        );
    }

    #[test]
    fn engine_can_refuse_invalid_sequences() {
        let params = ParameterSet::new().with("margin", 10.0);
        let sequence = vec![MarkupStep::new(
            0,
            Operation::Multiply,
            OperandRef::factor("margin"),
        )];
        let ctx = CalculationContext::new(100.0, ItemType::Work, &params).with_sequence(&sequence);

        let lenient = MarkupEngine::default().run(&ctx);
        assert_eq!(lenient.step_results, vec![100.0]);
        assert!(!lenient.is_clean());

        let strict = MarkupEngine::new(EngineConfig::new().with_fail_on_validation(true)).run(&ctx);
        assert!(strict.step_results.is_empty());
        assert_eq!(strict.commercial_cost, 100.0);
        assert!(matches!(
            strict.issues(),
            [CalculationIssue::SequenceRejected { problems }] if problems.len() == 1
        ));
    }

    #[test]
    fn batch_preserves_order() {
        let params = ParameterSet::new().with("margin", 10.0);
        let sequence = margin_sequence();
        let contexts = [100.0, 0.0, 300.0].map(|base| {
            CalculationContext::new(base, ItemType::Material, &params).with_sequence(&sequence)
        });

        let costs: Vec<f64> = run_batch(contexts)
            .into_iter()
            .map(|r| r.commercial_cost)
            .collect();
        assert!(approx(costs[0], 110.0));
        assert_eq!(costs[1], 0.0);
        assert!(approx(costs[2], 330.0));
    }
}
