//! # dfatrace-core
//!
//! Deterministic finite automaton model for dfatrace.
//!
//! This crate provides:
//! - Symbol range expansion (`a-z, 0-9, _`)
//! - The read-only automaton model and its builder
//! - String validation with execution traces
//! - Loading and writing the definition DSL

pub mod automaton;
pub mod error;
pub mod loader;
pub mod range;
pub mod trace;

pub use automaton::{Automaton, AutomatonBuilder, State, TransitionTable};
pub use error::{CoreError, ErrorKind};
pub use loader::{load, load_file, load_str, to_dsl, RawDefinition};
pub use range::{expand, SymbolSet};
pub use trace::{ExecutionTrace, Step, Validation, Verdict};
