//! Calculator evaluation engine.
//!
//! An [`Engine`] records operands, operator keys and variable references as
//! they are entered and folds them into a result and a readable description
//! on demand. The [`session`] module adds the memory table and display state
//! of a calculator front end on top of it.

pub mod engine;
pub mod model;
pub mod output;
pub mod random;
pub mod registry;
pub mod session;
pub mod token;
pub mod variables;

pub use engine::Engine;
pub use model::{Entry, Evaluation, Variables};
pub use random::{FastRandom, FixedRandom, RandomSource};
pub use registry::{lookup, Operation, OperationKind};
