//! Markup tactics: named sets of step sequences, one per line-item type.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use markup_core::{ItemType, MarkupStep, ParameterSet, ValidationIssue, validate};
use serde::{Deserialize, Serialize};

/// A markup tactic as authored in the tender application.
///
/// Each line-item type may have its own sequence; types without one are
/// evaluated with no sequence and keep their base amount.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkupTactic {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub sequences: BTreeMap<ItemType, Vec<MarkupStep>>,
}

/// A validation problem tied to the sequence it was found in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TacticProblem {
    pub item_type: ItemType,
    pub issue: ValidationIssue,
}

impl std::fmt::Display for TacticProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.item_type, self.issue)
    }
}

impl MarkupTactic {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the sequence for `item_type` (builder pattern).
    pub fn with_sequence(mut self, item_type: ItemType, steps: Vec<MarkupStep>) -> Self {
        self.sequences.insert(item_type, steps);
        self
    }

    pub fn sequence_for(&self, item_type: ItemType) -> Option<&[MarkupStep]> {
        self.sequences.get(&item_type).map(Vec::as_slice)
    }

    pub fn item_types(&self) -> impl Iterator<Item = ItemType> + '_ {
        self.sequences.keys().copied()
    }

    /// Statically validates every sequence of the tactic.
    pub fn validate(&self) -> Vec<TacticProblem> {
        self.sequences
            .iter()
            .flat_map(|(item_type, steps)| {
                validate(steps).into_iter().map(|issue| TacticProblem {
                    item_type: *item_type,
                    issue,
                })
            })
            .collect()
    }

    /// Reports every parameter operand that `parameters` does not define.
    pub fn validate_parameters(&self, parameters: &ParameterSet) -> Vec<TacticProblem> {
        self.sequences
            .iter()
            .flat_map(|(item_type, steps)| {
                markup_core::validate_parameters(steps, parameters)
                    .into_iter()
                    .map(|issue| TacticProblem {
                        item_type: *item_type,
                        issue,
                    })
            })
            .collect()
    }

    /// Parameter names read by any sequence, sorted and de-duplicated.
    pub fn referenced_parameters(&self) -> Vec<&str> {
        self.sequences
            .values()
            .flat_map(|steps| markup_core::referenced_parameters(steps))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Registry of tactics by name.
#[derive(Clone, Debug, Default)]
pub struct TacticRegistry {
    tactics: HashMap<String, MarkupTactic>,
}

impl TacticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tactic, replacing any tactic with the same name.
    pub fn add(&mut self, tactic: MarkupTactic) -> Option<MarkupTactic> {
        self.tactics.insert(tactic.name.clone(), tactic)
    }

    pub fn get(&self, name: &str) -> Option<&MarkupTactic> {
        self.tactics.get(name)
    }

    /// Tactic names in alphabetical order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tactics.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.tactics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tactics.is_empty()
    }
}
