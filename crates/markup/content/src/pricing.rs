//! Pricing of line items with a tactic and a parameter set.

use markup_core::{
    CalculationContext, CalculationResult, ItemType, MarkupEngine, MarkupError, ParameterSet,
};
use serde::{Deserialize, Serialize};

use crate::tactic::MarkupTactic;

/// A bill-of-quantities line item as exported by the tender application.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub item_type: ItemType,
    pub base_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_cost_override: Option<f64>,
}

impl LineItem {
    pub fn new(item_type: ItemType, base_amount: f64) -> Self {
        Self {
            id: None,
            item_type,
            base_amount,
            base_cost_override: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_override(mut self, base_cost: f64) -> Self {
        self.base_cost_override = Some(base_cost);
        self
    }

    /// Builds the calculation context for this item under `tactic`.
    pub fn context<'a>(
        &self,
        tactic: &'a MarkupTactic,
        parameters: &'a ParameterSet,
    ) -> CalculationContext<'a> {
        let mut ctx = CalculationContext::new(self.base_amount, self.item_type, parameters);
        ctx.sequence = tactic.sequence_for(self.item_type);
        ctx.base_cost_override = self.base_cost_override;
        ctx
    }
}

/// A line item together with its calculation result.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedItem {
    #[serde(flatten)]
    pub item: LineItem,
    pub result: CalculationResult,
}

/// Prices every item, in input order. Items never fail; issues stay in each result.
pub fn price_items(
    engine: &MarkupEngine,
    tactic: &MarkupTactic,
    parameters: &ParameterSet,
    items: &[LineItem],
) -> Vec<PricedItem> {
    let priced: Vec<PricedItem> = items
        .iter()
        .map(|item| PricedItem {
            item: item.clone(),
            result: engine.run(&item.context(tactic, parameters)),
        })
        .collect();

    let with_issues = priced.iter().filter(|p| !p.result.is_clean()).count();
    tracing::info!(
        tactic = %tactic.name,
        items = priced.len(),
        with_issues,
        "priced line items"
    );
    priced
}

/// Totals over a priced batch.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingSummary {
    pub items: usize,
    pub items_with_issues: usize,
    /// Items with at least one issue the tactic author has to fix.
    pub items_needing_author: usize,
    pub base_total: f64,
    pub commercial_total: f64,
}

impl PricingSummary {
    pub fn from_priced(priced: &[PricedItem]) -> Self {
        priced.iter().fold(Self::default(), |mut acc, p| {
            acc.items += 1;
            acc.items_with_issues += usize::from(!p.result.is_clean());
            acc.items_needing_author += usize::from(
                p.result
                    .issues()
                    .iter()
                    .any(|issue| issue.severity().needs_author()),
            );
            acc.base_total += p.item.base_amount;
            acc.commercial_total += p.result.commercial_cost;
            acc
        })
    }

    /// Overall markup over the base total in percent.
    pub fn percentage_markup(&self) -> f64 {
        markup_core::percentage_markup(self.base_total, self.commercial_total)
    }
}
