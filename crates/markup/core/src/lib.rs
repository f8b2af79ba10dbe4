//! Deterministic markup calculation for tender line items.
//!
//! `markup-core` turns a line item's direct cost into a commercial price by
//! interpreting a configurable sequence of arithmetic steps (a "markup
//! tactic"). Operands come from named percentage parameters, from earlier
//! step results, or from literals. The engine is a pure function of its
//! inputs: [`run`] never fails and reports problems as data, while
//! [`validate`] checks a sequence statically when it is authored.
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod format;
pub mod types;
pub mod validate;

pub use config::EngineConfig;
pub use engine::{
    CalculationContext, CalculationIssue, CalculationResult, MarkupEngine, run, run_batch,
};
pub use error::{ErrorSeverity, MarkupError};
pub use eval::{EvalContext, OperandError, StepError, evaluate_step, resolve};
pub use format::{NumberLocale, format_currency, format_currency_with, percentage_markup};
pub use types::{
    ItemType, MarkupStep, OperandFormat, OperandRef, Operation, OperationSlot, OperationSlots,
    ParameterSet, SlotAction,
};
pub use validate::{ValidationIssue, referenced_parameters, validate, validate_parameters};
