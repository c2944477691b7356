//! Deterministic finite automaton model.
//!
//! An [`Automaton`] is assembled once through [`AutomatonBuilder`] (or the
//! DSL loader) and is read-only afterwards, so a single instance can be
//! shared between threads and validated against concurrently.

use crate::error::CoreError;
use crate::range::SymbolSet;
use crate::trace::{ExecutionTrace, Step, Validation, Verdict};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A state in the automaton.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State(pub String);

impl State {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for State {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for State {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&State> for State {
    fn from(s: &State) -> Self {
        s.clone()
    }
}

/// Transition table: (state, symbol) -> next state.
pub type TransitionTable = BTreeMap<(State, char), State>;

/// A validated deterministic finite automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    states: BTreeSet<State>,
    alphabet: SymbolSet,
    transitions: TransitionTable,
    initial: State,
    finals: BTreeSet<State>,
}

impl Automaton {
    /// Starts building an automaton.
    pub fn builder() -> AutomatonBuilder {
        AutomatonBuilder::new()
    }

    pub fn states(&self) -> &BTreeSet<State> {
        &self.states
    }

    pub fn alphabet(&self) -> &SymbolSet {
        &self.alphabet
    }

    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    pub fn initial(&self) -> &State {
        &self.initial
    }

    pub fn finals(&self) -> &BTreeSet<State> {
        &self.finals
    }

    /// Returns true if the state is accepting.
    pub fn is_final(&self, state: &State) -> bool {
        self.finals.contains(state)
    }

    /// Looks up the destination for the given state and symbol.
    pub fn next(&self, state: &State, symbol: char) -> Option<&State> {
        self.transitions.get(&(state.clone(), symbol))
    }

    /// Checks that every symbol of the input belongs to the alphabet.
    ///
    /// Offending symbols are reported once each, in order of appearance.
    pub fn check_alphabet(&self, input: &[char]) -> Result<(), CoreError> {
        let mut offending = Vec::new();
        for symbol in input {
            if !self.alphabet.contains(symbol) && !offending.contains(symbol) {
                offending.push(*symbol);
            }
        }

        if offending.is_empty() {
            Ok(())
        } else {
            Err(CoreError::SymbolsNotInAlphabet { symbols: offending })
        }
    }

    /// Runs the automaton over a string, recording the execution trace.
    pub fn validate(&self, input: &str) -> Result<Validation, CoreError> {
        let symbols: Vec<char> = input.chars().collect();
        self.validate_symbols(&symbols)
    }

    /// Runs the automaton over a symbol sequence, recording the execution trace.
    ///
    /// Out-of-alphabet input is an error and no trace is produced for it. A
    /// missing transition stops the run with [`Verdict::DeadState`] and the
    /// trace of the consumed prefix.
    pub fn validate_symbols(&self, input: &[char]) -> Result<Validation, CoreError> {
        self.check_alphabet(input)?;

        let mut current = &self.initial;
        let mut trace = ExecutionTrace::start(current.clone());

        for (position, &symbol) in input.iter().enumerate() {
            let Some(next) = self.next(current, symbol) else {
                tracing::debug!(
                    "dead state: no transition from '{}' on {:?} at position {}",
                    current,
                    symbol,
                    position
                );
                return Ok(Validation {
                    verdict: Verdict::DeadState {
                        position,
                        state: current.clone(),
                        symbol,
                    },
                    trace,
                });
            };

            trace.push(Step {
                from: current.clone(),
                to: next.clone(),
                symbol,
            });
            current = next;
        }

        let verdict = if self.is_final(current) {
            Verdict::Accepted
        } else {
            Verdict::Rejected
        };

        Ok(Validation { verdict, trace })
    }
}

/// Collects the parts of an automaton and checks them on [`build`](Self::build).
///
/// Defining a transition twice for the same (state, symbol) keeps the last
/// destination.
#[derive(Debug, Clone, Default)]
pub struct AutomatonBuilder {
    states: BTreeSet<State>,
    alphabet: SymbolSet,
    transitions: TransitionTable,
    initial: Option<State>,
    finals: BTreeSet<State>,
}

impl AutomatonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds states.
    pub fn states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<State>,
    {
        self.states.extend(states.into_iter().map(Into::into));
        self
    }

    /// Adds symbols to the alphabet.
    pub fn alphabet<I>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        self.alphabet.extend(symbols);
        self
    }

    /// Sets the initial state.
    pub fn initial(mut self, state: impl Into<State>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Adds accepting states.
    pub fn finals<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<State>,
    {
        self.finals.extend(states.into_iter().map(Into::into));
        self
    }

    /// Adds a transition, replacing any earlier one for the same state and symbol.
    pub fn transition(mut self, from: impl Into<State>, symbol: char, to: impl Into<State>) -> Self {
        insert_transition(&mut self.transitions, from.into(), symbol, to.into());
        self
    }

    /// Adds one transition per symbol, all to the same destination.
    pub fn transitions_on<I>(mut self, from: impl Into<State>, symbols: I, to: impl Into<State>) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        let from = from.into();
        let to = to.into();
        for symbol in symbols {
            insert_transition(&mut self.transitions, from.clone(), symbol, to.clone());
        }
        self
    }

    /// Checks consistency and produces the automaton.
    ///
    /// Checks run in order: required parts present, initial state defined,
    /// final states defined, then every transition's source, destination and
    /// symbol. The first failure is returned.
    pub fn build(self) -> Result<Automaton, CoreError> {
        if self.alphabet.is_empty() {
            return Err(CoreError::MissingField { key: "ALPHABET" });
        }
        if self.states.is_empty() {
            return Err(CoreError::MissingField { key: "STATES" });
        }
        let Some(initial) = self.initial else {
            return Err(CoreError::MissingField {
                key: "INITIAL_STATE",
            });
        };

        check_initial(&self.states, &initial)?;
        check_finals(&self.states, &self.finals)?;
        for ((from, symbol), to) in &self.transitions {
            check_transition(&self.states, &self.alphabet, from, *symbol, to)?;
        }

        tracing::debug!(
            "built automaton: {} states, {} symbols, {} transitions",
            self.states.len(),
            self.alphabet.len(),
            self.transitions.len()
        );

        Ok(Automaton {
            states: self.states,
            alphabet: self.alphabet,
            transitions: self.transitions,
            initial,
            finals: self.finals,
        })
    }
}

fn insert_transition(table: &mut TransitionTable, from: State, symbol: char, to: State) {
    if let Some(previous) = table.insert((from, symbol), to) {
        tracing::debug!("transition on {:?} overwrites destination '{}'", symbol, previous);
    }
}

pub(crate) fn check_initial(states: &BTreeSet<State>, initial: &State) -> Result<(), CoreError> {
    if states.contains(initial) {
        Ok(())
    } else {
        Err(CoreError::UnknownInitialState {
            state: initial.0.clone(),
        })
    }
}

pub(crate) fn check_finals(
    states: &BTreeSet<State>,
    finals: &BTreeSet<State>,
) -> Result<(), CoreError> {
    let unknown: Vec<String> = finals
        .difference(states)
        .map(|s| s.0.clone())
        .collect();

    if unknown.is_empty() {
        Ok(())
    } else {
        Err(CoreError::UnknownFinalStates { states: unknown })
    }
}

pub(crate) fn check_transition(
    states: &BTreeSet<State>,
    alphabet: &SymbolSet,
    from: &State,
    symbol: char,
    to: &State,
) -> Result<(), CoreError> {
    if !states.contains(from) {
        return Err(CoreError::UnknownSource {
            state: from.0.clone(),
        });
    }
    if !states.contains(to) {
        return Err(CoreError::UnknownDestination {
            state: to.0.clone(),
        });
    }
    if !alphabet.contains(&symbol) {
        return Err(CoreError::UnknownTransitionSymbol {
            state: from.0.clone(),
            symbol,
        });
    }
    Ok(())
}
