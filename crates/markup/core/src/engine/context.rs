use crate::types::{ItemType, MarkupStep, ParameterSet};

/// Per-invocation input of a markup calculation.
///
/// Borrows the sequence and parameters so a whole batch of line items can
/// share one tactic without cloning it.
#[derive(Clone, Copy, Debug)]
pub struct CalculationContext<'a> {
    /// The item's raw direct cost; denominator of the markup coefficient.
    pub base_amount: f64,

    /// Carried for the caller's bookkeeping; not used by the arithmetic.
    pub item_type: ItemType,

    /// Resolved, ordered step sequence. `None` when the tactic defines none.
    pub sequence: Option<&'a [MarkupStep]>,

    pub parameters: &'a ParameterSet,

    /// Replaces `base_amount` as the value fed into `base_index == -1`.
    pub base_cost_override: Option<f64>,
}

impl<'a> CalculationContext<'a> {
    pub fn new(base_amount: f64, item_type: ItemType, parameters: &'a ParameterSet) -> Self {
        Self {
            base_amount,
            item_type,
            sequence: None,
            parameters,
            base_cost_override: None,
        }
    }

    pub fn with_sequence(mut self, sequence: &'a [MarkupStep]) -> Self {
        self.sequence = Some(sequence);
        self
    }

    pub fn with_override(mut self, base_cost: f64) -> Self {
        self.base_cost_override = Some(base_cost);
        self
    }

    /// Value the first step starts from: the override if given, else the base amount.
    pub fn starting_value(&self) -> f64 {
        self.base_cost_override.unwrap_or(self.base_amount)
    }
}
