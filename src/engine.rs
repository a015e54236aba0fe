//! Evaluation engine.
//!
//! The engine only records what was entered. Every call to [`Engine::evaluate`]
//! replays the whole history against the operation registry, so undo is a plain
//! truncation and there is no cached state to keep in sync.

use tracing::{debug, trace};

use crate::model::{operand_text, Entry, Evaluation, Variables};
use crate::random::{FastRandom, RandomSource};
use crate::registry::{self, Operation};

#[derive(Debug)]
pub struct Engine {
    history: Vec<Entry>,
    random: Box<dyn RandomSource>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::with_random(Box::new(FastRandom::new()))
    }

    /// Engine whose `Rand` key draws from the given source
    pub fn with_random(random: Box<dyn RandomSource>) -> Self {
        Self {
            history: Vec::new(),
            random,
        }
    }

    pub fn append_operand(&mut self, value: f64) {
        self.history.push(Entry::Operand(value));
    }

    /// Record a key press. The symbol is not validated here; unknown symbols
    /// are skipped when the history is replayed.
    pub fn append_operator(&mut self, symbol: &str) {
        self.history.push(Entry::Operator(symbol.to_string()));
    }

    pub fn append_variable(&mut self, name: &str) {
        self.history.push(Entry::Variable(name.to_string()));
    }

    pub fn append(&mut self, entry: Entry) {
        self.history.push(entry);
    }

    /// Drop the most recent entry. Does nothing on an empty history.
    pub fn undo(&mut self) {
        self.history.pop();
    }

    pub fn history(&self) -> &[Entry] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Fold the history into a result and a description.
    ///
    /// Names missing from `variables` evaluate to 0. Nothing here fails:
    /// unknown symbols and operators without an operand are skipped, and
    /// floating-point errors come through as infinity or NaN.
    pub fn evaluate(&self, variables: &Variables) -> Evaluation {
        let mut fold = Fold::default();

        for entry in &self.history {
            trace!(%entry, "replay");
            match entry {
                Entry::Operand(value) => fold.set(*value, operand_text(*value)),
                Entry::Operator(symbol) => self.apply(&mut fold, symbol),
                Entry::Variable(name) => {
                    let value = variables.get(name).copied().unwrap_or_else(|| {
                        debug!(name = %name, "unbound variable, using 0");
                        0.0
                    });
                    fold.set(value, name.clone());
                }
            }
        }

        fold.finish()
    }

    /// Result against empty bindings
    pub fn result(&self) -> Option<f64> {
        self.evaluate(&Variables::new()).result
    }

    pub fn is_pending(&self) -> bool {
        self.evaluate(&Variables::new()).is_pending
    }

    pub fn description(&self) -> String {
        self.evaluate(&Variables::new()).description
    }

    fn apply(&self, fold: &mut Fold, symbol: &str) {
        let Some(operation) = registry::lookup(symbol) else {
            debug!(symbol, "unknown operator ignored");
            return;
        };
        trace!(symbol, kind = %operation.kind(), "apply");

        match operation {
            Operation::Constant(value) => fold.set(value, symbol.to_string()),
            Operation::Niladic { compute, label } => {
                fold.set(compute(self.random.as_ref()), label.to_string())
            }
            Operation::Unary { compute, describe } => match fold.accumulator.as_mut() {
                Some(acc) => {
                    acc.value = compute(acc.value);
                    acc.text = describe(&acc.text);
                }
                None => debug!(symbol, "unary operator without operand ignored"),
            },
            Operation::Binary { compute, describe } => {
                fold.resolve_pending();
                match fold.accumulator.take() {
                    Some(first) => {
                        fold.pending = Some(PendingBinary {
                            compute,
                            describe,
                            first,
                        })
                    }
                    None => debug!(symbol, "binary operator without operand ignored"),
                }
            }
            Operation::Equals => fold.resolve_pending(),
        }
    }
}

#[derive(Debug, Clone)]
struct Accumulator {
    value: f64,
    text: String,
}

struct PendingBinary {
    compute: fn(f64, f64) -> f64,
    describe: fn(&str, &str) -> String,
    first: Accumulator,
}

impl PendingBinary {
    fn perform(&self, second: &Accumulator) -> Accumulator {
        Accumulator {
            value: (self.compute)(self.first.value, second.value),
            text: (self.describe)(&self.first.text, &second.text),
        }
    }
}

/// Evaluation-local state. At most one binary operation is pending.
#[derive(Default)]
struct Fold {
    accumulator: Option<Accumulator>,
    pending: Option<PendingBinary>,
}

impl Fold {
    /// Replace the accumulator; a pending operation stays pending.
    fn set(&mut self, value: f64, text: String) {
        self.accumulator = Some(Accumulator { value, text });
    }

    fn resolve_pending(&mut self) {
        match (self.pending.take(), self.accumulator.take()) {
            (Some(pending), Some(second)) => self.accumulator = Some(pending.perform(&second)),
            (pending, accumulator) => {
                self.pending = pending;
                self.accumulator = accumulator;
            }
        }
    }

    fn finish(self) -> Evaluation {
        let operand = self.accumulator.as_ref().map(|acc| acc.value);
        match &self.pending {
            Some(pending) => {
                let second = self.accumulator.as_ref().map_or("", |acc| acc.text.as_str());
                Evaluation {
                    result: None,
                    operand,
                    is_pending: true,
                    description: (pending.describe)(&pending.first.text, second),
                }
            }
            None => Evaluation {
                result: operand,
                operand,
                is_pending: false,
                description: self.accumulator.map(|acc| acc.text).unwrap_or_default(),
            },
        }
    }
}
