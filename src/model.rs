use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named values supplied by the caller for each evaluation, e.g. the "M" memory slot.
pub type Variables = BTreeMap<String, f64>;

/// One recorded input of the calculator history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entry {
    Operand(f64),
    /// Key into the operation registry; unknown symbols are kept and ignored on replay
    Operator(String),
    /// Late-bound named value, resolved against the bindings passed to `evaluate`
    Variable(String),
}

impl std::fmt::Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entry::Operand(value) => write!(f, "{}", value),
            Entry::Operator(symbol) => write!(f, "{}", symbol),
            Entry::Variable(name) => write!(f, "@{}", name),
        }
    }
}

/// Outcome of folding the history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Final value; absent when nothing was entered or a binary operation awaits its operand
    pub result: Option<f64>,
    /// Current accumulator value, present even while an operation is pending
    pub operand: Option<f64>,
    pub is_pending: bool,
    pub description: String,
}

impl Evaluation {
    /// True when neither a value nor a description was produced
    pub fn is_empty(&self) -> bool {
        self.operand.is_none() && self.description.is_empty() && !self.is_pending
    }
}

/// Textual rendering of a number inside a description or on the display.
///
/// Very large and very small magnitudes switch to exponent form.
pub fn operand_text(value: f64) -> String {
    let magnitude = value.abs();
    if value.is_finite() && value != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        format!("{:e}", value)
    } else {
        value.to_string()
    }
}
