//! Markup steps: one node of a calculation sequence.
//!
//! A step picks a base value (the item's base amount or an earlier step's
//! result) and folds up to [`EngineConfig::MAX_OPERATIONS`] chained
//! operations onto it. Steps refer to each other only by index into the
//! flat sequence, and only backwards.

use arrayvec::ArrayVec;

use crate::config::EngineConfig;
use crate::eval::StepError;
use crate::types::{OperandRef, Operation, SlotAction};

/// One `(action, operand)` position in a step's operation chain.
///
/// Both halves are optional because configuration is authored externally;
/// only complete slots are ever applied.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OperationSlot {
    pub action: Option<SlotAction>,
    pub operand: Option<OperandRef>,
}

impl OperationSlot {
    pub fn new(action: Operation, operand: OperandRef) -> Self {
        Self {
            action: Some(action.into()),
            operand: Some(operand),
        }
    }

    /// Returns the action and operand if both are present.
    pub fn complete(&self) -> Option<(&SlotAction, &OperandRef)> {
        match (self.action.as_ref(), self.operand.as_ref()) {
            (Some(action), Some(operand)) => Some((action, operand)),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.action.is_none() && self.operand.is_none()
    }
}

/// Ordered, capped list of operation slots.
pub type OperationSlots = ArrayVec<OperationSlot, { EngineConfig::MAX_OPERATIONS }>;

/// One node in the computation sequence.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "StepRecord", into = "StepRecord"))]
pub struct MarkupStep {
    /// Optional label shown to sequence authors.
    pub name: Option<String>,

    /// `-1` selects the item's base amount, `0..i` an earlier step's result.
    pub base_index: i32,

    /// `slots[0]` is the mandatory first operation, `slots[1..]` the chained ones.
    slots: OperationSlots,
}

impl MarkupStep {
    /// Creates a step with its mandatory first operation.
    pub fn new(base_index: i32, action: Operation, operand: OperandRef) -> Self {
        let mut slots = OperationSlots::new();
        slots.push(OperationSlot::new(action, operand));
        Self {
            name: None,
            base_index,
            slots,
        }
    }

    /// Creates a step starting from the item's base amount.
    pub fn from_base(action: Operation, operand: OperandRef) -> Self {
        Self::new(EngineConfig::BASE_AMOUNT_INDEX, action, operand)
    }

    /// Creates a step from raw slots, as read from configuration.
    ///
    /// Trailing empty slots are dropped; empty slots in the middle are kept so
    /// that slot positions match the authored operation numbers.
    pub fn from_slots(
        base_index: i32,
        slots: impl IntoIterator<Item = OperationSlot>,
    ) -> Result<Self, StepError> {
        let mut step = Self {
            name: None,
            base_index,
            slots: OperationSlots::new(),
        };
        for slot in slots {
            step.try_push(slot)?;
        }
        while step.slots.len() > 1 && step.slots.last().is_some_and(OperationSlot::is_empty) {
            step.slots.pop();
        }
        Ok(step)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Appends a chained operation (builder pattern).
    ///
    /// # Errors
    ///
    /// [`StepError::TooManyOperations`] once the step holds
    /// [`EngineConfig::MAX_OPERATIONS`] operations.
    pub fn try_then(mut self, action: Operation, operand: OperandRef) -> Result<Self, StepError> {
        self.try_push(OperationSlot::new(action, operand))?;
        Ok(self)
    }

    /// Infallible form of [`MarkupStep::try_then`] for hand-written sequences.
    ///
    /// # Panics
    ///
    /// Panics if the step already holds [`EngineConfig::MAX_OPERATIONS`] operations.
    pub fn then(self, action: Operation, operand: OperandRef) -> Self {
        match self.try_then(action, operand) {
            Ok(step) => step,
            Err(err) => panic!("cannot chain {action}: {err}"),
        }
    }

    /// Appends a slot, failing once the five-operation ceiling is reached.
    pub fn try_push(&mut self, slot: OperationSlot) -> Result<(), StepError> {
        self.slots
            .try_push(slot)
            .map_err(|_| StepError::TooManyOperations {
                max: EngineConfig::MAX_OPERATIONS,
            })
    }

    /// All slots in authored order.
    pub fn slots(&self) -> &[OperationSlot] {
        &self.slots
    }

    /// Slot at 1-based operation `position`.
    pub fn slot(&self, position: usize) -> Option<&OperationSlot> {
        position.checked_sub(1).and_then(|i| self.slots.get(i))
    }

    /// The mandatory first operation, if it is complete.
    pub fn first_operation(&self) -> Option<(&SlotAction, &OperandRef)> {
        self.slots.first().and_then(OperationSlot::complete)
    }

    /// Iterates over `(position, operand)` for every present operand.
    pub fn operands(&self) -> impl Iterator<Item = (usize, &OperandRef)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.operand.as_ref().map(|operand| (i + 1, operand)))
    }

    pub fn starts_from_base(&self) -> bool {
        self.base_index == EngineConfig::BASE_AMOUNT_INDEX
    }
}

impl core::fmt::Display for MarkupStep {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.starts_from_base() {
            write!(f, "base")?;
        } else {
            write!(f, "step[{}]", self.base_index + 1)?;
        }
        for slot in &self.slots {
            if let Some((action, operand)) = slot.complete() {
                write!(f, " {} {}", action, operand)?;
            }
        }
        Ok(())
    }
}

// ============================================================================
// Wire Format
// ============================================================================

/// Flat record form of a step, as stored by the tender application.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct StepRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    base_index: i32,
    #[serde(default)]
    action1: Option<SlotAction>,
    #[serde(default)]
    operand1: Option<OperandRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    action2: Option<SlotAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    operand2: Option<OperandRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    action3: Option<SlotAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    operand3: Option<OperandRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    action4: Option<SlotAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    operand4: Option<OperandRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    action5: Option<SlotAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    operand5: Option<OperandRef>,
}

#[cfg(feature = "serde")]
impl From<StepRecord> for MarkupStep {
    fn from(record: StepRecord) -> Self {
        let pairs = [
            (record.action1, record.operand1),
            (record.action2, record.operand2),
            (record.action3, record.operand3),
            (record.action4, record.operand4),
            (record.action5, record.operand5),
        ];
        let mut slots = OperationSlots::new();
        for (action, operand) in pairs {
            slots.push(OperationSlot { action, operand });
        }
        while slots.len() > 1 && slots.last().is_some_and(OperationSlot::is_empty) {
            slots.pop();
        }
        MarkupStep {
            name: record.name,
            base_index: record.base_index,
            slots,
        }
    }
}

#[cfg(feature = "serde")]
impl From<MarkupStep> for StepRecord {
    fn from(step: MarkupStep) -> Self {
        let mut pairs: [(Option<SlotAction>, Option<OperandRef>); EngineConfig::MAX_OPERATIONS] =
            Default::default();
        for (pair, slot) in pairs.iter_mut().zip(step.slots) {
            *pair = (slot.action, slot.operand);
        }
        let [p1, p2, p3, p4, p5] = pairs;
        StepRecord {
            name: step.name,
            base_index: step.base_index,
            action1: p1.0,
            operand1: p1.1,
            action2: p2.0,
            operand2: p2.1,
            action3: p3.0,
            operand3: p3.1,
            action4: p4.0,
            operand4: p4.1,
            action5: p5.0,
            operand5: p5.1,
        }
    }
}
