//! Display and report formatting for the shell.

use serde::Serialize;

use crate::model::{operand_text, Evaluation};

/// Marker appended to a description whose binary operation is still open
pub const PENDING_MARKER: &str = "…";
/// Marker appended to a complete description
pub const COMPLETE_MARKER: &str = "=";

/// Format a display number
pub fn display_value(value: f64) -> String {
    operand_text(value)
}

/// Description with its pending/complete marker. An empty description
/// renders as a single space so the line never collapses.
pub fn description_line(evaluation: &Evaluation) -> String {
    if evaluation.description.is_empty() {
        " ".to_string()
    } else if evaluation.is_pending {
        format!("{}{}", evaluation.description, PENDING_MARKER)
    } else {
        format!("{}{}", evaluation.description, COMPLETE_MARKER)
    }
}

/// Everything the shell shows after a step, in serializable form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    #[serde(flatten)]
    pub evaluation: Evaluation,
    pub display: f64,
}

impl Report {
    pub fn new(evaluation: Evaluation, display: f64) -> Self {
        Self {
            evaluation,
            display,
        }
    }

    /// Two lines: the display value, then the marked description
    pub fn to_text(&self) -> String {
        format!(
            "{}\n{}",
            display_value(self.display),
            description_line(&self.evaluation)
        )
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
