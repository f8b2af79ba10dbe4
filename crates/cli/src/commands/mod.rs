//! Command implementations for the markup CLI
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod calc;
mod inspect;
mod validate;

pub use calc::Calc;
pub use inspect::Inspect;
pub use validate::Validate;
