//! Automaton definition files.
//!
//! Definitions use a line-oriented DSL:
//!
//! ```text
//! # Binary strings with an odd number of ones
//! ALPHABET: 0-1
//! STATES: q0 q1
//! INITIAL_STATE: q0
//! FINAL_STATES: q1
//! TRANSITIONS:
//! q0 0 q0
//! q0 1 q1
//! q1 0 q1
//! q1 1 q0
//! ```
//!
//! Blank lines and lines starting with `#` are ignored. Keys are
//! case-insensitive. After `TRANSITIONS:` every remaining line is a
//! `source input destination` triple, where `input` is a symbol
//! specification (see [`crate::range`]), so `q0 a-z q1` defines 26 entries.

use crate::automaton::{check_finals, check_initial, check_transition, Automaton, State};
use crate::error::CoreError;
use crate::range::{self, SymbolSet};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// A value together with the 1-based line that defined it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned<T> {
    pub value: T,
    pub line: usize,
}

impl<T> Spanned<T> {
    fn new(value: T, line: usize) -> Self {
        Self { value, line }
    }
}

/// Parsed but not yet validated definition.
#[derive(Debug, Clone, Default)]
pub struct RawDefinition {
    pub alphabet: Option<Spanned<SymbolSet>>,
    pub states: Option<Spanned<BTreeSet<State>>>,
    pub initial: Option<Spanned<State>>,
    pub finals: Option<Spanned<BTreeSet<State>>>,
    /// (source, symbol) -> destination; later lines replace earlier ones.
    pub transitions: BTreeMap<(State, char), Spanned<State>>,
}

enum Section {
    Header,
    Transitions,
}

impl RawDefinition {
    /// Parses definition lines without checking cross references.
    pub fn parse<I, S>(lines: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut raw = Self::default();
        let mut section = Section::Header;

        for (index, line) in lines.into_iter().enumerate() {
            let line_num = index + 1;
            let line = line.as_ref().trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match section {
                Section::Header => {
                    if raw.parse_header(line, line_num)? {
                        section = Section::Transitions;
                    }
                }
                Section::Transitions => raw.parse_transition(line, line_num)?,
            }
        }

        Ok(raw)
    }

    /// Handles a `KEY: value` line. Returns true when the transitions section starts.
    fn parse_header(&mut self, line: &str, line_num: usize) -> Result<bool, CoreError> {
        let Some((key, value)) = line.split_once(':') else {
            return Err(malformed(
                format!("expected 'KEY: value', found '{}'", line),
                line_num,
            ));
        };
        let key = key.trim().to_uppercase();
        let value = value.trim();

        match key.as_str() {
            "ALPHABET" => {
                let symbols = range::expand(value).map_err(|e| e.at_line(line_num))?;
                self.alphabet = Some(Spanned::new(symbols, line_num));
            }
            "STATES" => {
                self.states = Some(Spanned::new(state_set(value), line_num));
            }
            "INITIAL_STATE" => {
                self.initial = Some(Spanned::new(State::from(value), line_num));
            }
            "FINAL_STATES" => {
                self.finals = Some(Spanned::new(state_set(value), line_num));
            }
            "TRANSITIONS" => {
                if !value.is_empty() {
                    return Err(malformed(
                        format!("unexpected '{}' after TRANSITIONS:", value),
                        line_num,
                    ));
                }
                return Ok(true);
            }
            _ => {
                return Err(malformed(format!("unknown key '{}'", key), line_num));
            }
        }

        Ok(false)
    }

    fn parse_transition(&mut self, line: &str, line_num: usize) -> Result<(), CoreError> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let [source, input, destination] = parts.as_slice() else {
            return Err(malformed(
                format!(
                    "invalid transition format, expected 'source input destination', found {} field(s)",
                    parts.len()
                ),
                line_num,
            ));
        };

        let symbols = range::expand(input).map_err(|e| e.at_line(line_num))?;
        if symbols.is_empty() {
            return Err(malformed(
                format!("transition input '{}' denotes no symbols", input),
                line_num,
            ));
        }

        for symbol in symbols {
            let key = (State::from(*source), symbol);
            let value = Spanned::new(State::from(*destination), line_num);
            if let Some(previous) = self.transitions.insert(key, value) {
                tracing::debug!(
                    "line {}: transition '{}' on {:?} replaces line {}",
                    line_num,
                    source,
                    symbol,
                    previous.line
                );
            }
        }

        Ok(())
    }

    /// Checks the definition and produces the automaton.
    ///
    /// Required keys are checked first, then the initial state, the final
    /// states, and finally each transition in line order. The first failure
    /// aborts the load.
    pub fn into_automaton(self) -> Result<Automaton, CoreError> {
        let alphabet = match self.alphabet {
            Some(a) if !a.value.is_empty() => a,
            _ => return Err(CoreError::MissingField { key: "ALPHABET" }),
        };
        let states = match self.states {
            Some(s) if !s.value.is_empty() => s,
            _ => return Err(CoreError::MissingField { key: "STATES" }),
        };
        let initial = match self.initial {
            Some(i) if !i.value.as_str().is_empty() => i,
            _ => {
                return Err(CoreError::MissingField {
                    key: "INITIAL_STATE",
                })
            }
        };
        let finals = self.finals.unwrap_or_else(|| Spanned::new(BTreeSet::new(), 0));

        check_initial(&states.value, &initial.value).map_err(|e| e.at_line(initial.line))?;
        check_finals(&states.value, &finals.value).map_err(|e| e.at_line(finals.line))?;

        let mut entries: Vec<_> = self.transitions.iter().collect();
        entries.sort_by_key(|((_, symbol), to)| (to.line, *symbol));
        for ((from, symbol), to) in entries {
            check_transition(&states.value, &alphabet.value, from, *symbol, &to.value)
                .map_err(|e| e.at_line(to.line))?;
        }

        let mut builder = Automaton::builder()
            .alphabet(alphabet.value)
            .states(states.value)
            .initial(initial.value)
            .finals(finals.value);
        for ((from, symbol), to) in self.transitions {
            builder = builder.transition(from, symbol, to.value);
        }

        builder.build()
    }
}

/// Loads an automaton from definition lines.
pub fn load<I, S>(lines: I) -> Result<Automaton, CoreError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    RawDefinition::parse(lines)?.into_automaton()
}

/// Loads an automaton from definition text.
pub fn load_str(text: &str) -> Result<Automaton, CoreError> {
    load(text.lines())
}

/// Loads an automaton from a UTF-8 definition file.
pub fn load_file(path: impl AsRef<Path>) -> Result<Automaton, CoreError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let automaton = load_str(&text)?;
    tracing::info!(
        "loaded {}: {} states, {} symbols, {} transitions",
        path.display(),
        automaton.states().len(),
        automaton.alphabet().len(),
        automaton.transitions().len()
    );
    Ok(automaton)
}

/// Writes an automaton as definition text that [`load_str`] reads back.
///
/// Transitions sharing a source and destination are written on one line
/// with a compact symbol specification. Fails if a symbol is a comma or
/// whitespace that cannot be expressed in a specification token.
pub fn to_dsl(automaton: &Automaton) -> Result<String, CoreError> {
    let mut out = String::new();

    out.push_str(&format!("ALPHABET: {}\n", symbol_spec(automaton.alphabet())?));
    out.push_str(&format!("STATES: {}\n", join_states(automaton.states())));
    out.push_str(&format!("INITIAL_STATE: {}\n", automaton.initial()));
    out.push_str(&format!("FINAL_STATES: {}\n", join_states(automaton.finals())));
    out.push_str("TRANSITIONS:\n");

    let mut grouped: BTreeMap<(&State, &State), SymbolSet> = BTreeMap::new();
    for ((from, symbol), to) in automaton.transitions() {
        grouped.entry((from, to)).or_default().insert(*symbol);
    }
    for ((from, to), symbols) in grouped {
        out.push_str(&format!("{} {} {}\n", from, symbol_spec(&symbols)?, to));
    }

    Ok(out)
}

fn symbol_spec(symbols: &SymbolSet) -> Result<String, CoreError> {
    let tokens = range::compact(symbols);
    if let Some(bad) = tokens.iter().find(|t| t.chars().any(range::is_separator)) {
        return Err(CoreError::Malformed {
            reason: format!("symbol token {:?} cannot be written as a specification", bad),
        });
    }
    Ok(tokens.join(","))
}

fn join_states(states: &BTreeSet<State>) -> String {
    states
        .iter()
        .map(State::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

fn state_set(value: &str) -> BTreeSet<State> {
    value.split_whitespace().map(State::from).collect()
}

fn malformed(reason: String, line: usize) -> CoreError {
    CoreError::Malformed { reason }.at_line(line)
}
