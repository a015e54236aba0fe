//! Interactive calculator session: one engine, the memory table, and the
//! number currently on the display.

use tracing::{debug, info};

use crate::engine::Engine;
use crate::model::{Entry, Evaluation, Variables};
use crate::output::Report;
use crate::random::{FastRandom, RandomSource};
use crate::token::Token;

#[derive(Debug)]
pub struct Session {
    engine: Engine,
    variables: Variables,
    /// Last evaluation, so `Rand` is drawn once per step
    current: Evaluation,
    display: f64,
    seed: Option<u64>,
}

impl Session {
    /// `seed` pins the `Rand` key; without it every evaluation draws fresh values
    pub fn new(variables: Variables, seed: Option<u64>) -> Self {
        Self {
            engine: Engine::with_random(random_source(seed)),
            variables,
            current: Evaluation::default(),
            display: 0.0,
            seed,
        }
    }

    pub fn apply(&mut self, token: Token) {
        match token {
            Token::Entry(entry) => {
                debug!(%entry, "append");
                self.engine.append(entry);
            }
            Token::Undo => self.engine.undo(),
            Token::Clear => {
                info!("clearing session");
                self.engine = Engine::with_random(random_source(self.seed));
                self.variables.clear();
                self.display = 0.0;
            }
            Token::Store(name) => {
                debug!(name = %name, value = self.display, "store");
                self.variables.insert(name, self.display);
            }
        }
        self.refresh();
    }

    pub fn apply_all<I: IntoIterator<Item = Token>>(&mut self, tokens: I) {
        for token in tokens {
            self.apply(token);
        }
    }

    pub fn evaluation(&self) -> Evaluation {
        self.current.clone()
    }

    pub fn report(&self) -> Report {
        Report::new(self.evaluation(), self.display)
    }

    pub fn display(&self) -> f64 {
        self.display
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn history(&self) -> &[Entry] {
        self.engine.history()
    }

    /// The display follows the accumulator and keeps its last value while a
    /// binary operation waits for its second operand.
    fn refresh(&mut self) {
        self.current = self.engine.evaluate(&self.variables);
        if let Some(value) = self.current.operand {
            self.display = value;
        }
    }
}

fn random_source(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(FastRandom::seeded(seed)),
        None => Box::new(FastRandom::new()),
    }
}
