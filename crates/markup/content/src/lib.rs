//! Data-driven markup content and loaders.
//!
//! This crate holds the authored side of markup calculation and reads it from files:
//! - Markup tactics (per item-type step sequences, JSON)
//! - Parameter sets (named percentages, TOML)
//! - Engine configuration (TOML)
//! - Line items to price (JSON)
//!
//! Everything here is input to [`markup_core`]; the engine itself never touches the filesystem.

pub mod loaders;
pub mod pricing;
pub mod tactic;

pub use loaders::{
    ConfigLoader, ContentFactory, ItemLoader, LoadResult, NamedParameters, ParameterLoader,
    TacticLoader,
};
pub use pricing::{LineItem, PricedItem, PricingSummary, price_items};
pub use tactic::{MarkupTactic, TacticProblem, TacticRegistry};
