//! Data model of the markup language.
//!
//! Sequences are flat arenas of [`MarkupStep`]s; every cross-reference is an
//! integer index that points strictly backwards, so a well-formed sequence is
//! acyclic by construction.

mod item;
mod operand;
mod operation;
mod parameters;
mod step;

#[cfg(feature = "serde")]
pub(crate) mod serde_util;

pub use item::ItemType;
pub use operand::{OperandFormat, OperandRef};
pub use operation::{Operation, SlotAction};
pub use parameters::ParameterSet;
pub use step::{MarkupStep, OperationSlot, OperationSlots};
