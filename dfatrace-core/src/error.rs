//! Core error types.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Broad classification of a [`CoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Inverted or malformed character range.
    Range,
    /// Symbol outside the automaton's alphabet.
    Alphabet,
    /// Malformed DSL line or missing required field.
    Format,
    /// A state referenced somewhere it is not defined.
    Reference,
    /// The definition file could not be read.
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Range => "range error",
            ErrorKind::Alphabet => "alphabet error",
            ErrorKind::Format => "format error",
            ErrorKind::Reference => "reference error",
            ErrorKind::Io => "io error",
        };
        f.write_str(name)
    }
}

/// Errors from range expansion, automaton construction, loading and validation.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid range '{token}': start '{start}' is greater than end '{end}'")]
    InvalidRange { token: String, start: char, end: char },

    #[error("symbols not in alphabet: {}", format_symbols(.symbols))]
    SymbolsNotInAlphabet { symbols: Vec<char> },

    #[error("missing {key} definition")]
    MissingField { key: &'static str },

    #[error("{reason}")]
    Malformed { reason: String },

    #[error("initial state '{state}' is not in defined states")]
    UnknownInitialState { state: String },

    #[error("final states {} are not in defined states", format_states(.states))]
    UnknownFinalStates { states: Vec<String> },

    #[error("transition source '{state}' is not in defined states")]
    UnknownSource { state: String },

    #[error("transition destination '{state}' is not in defined states")]
    UnknownDestination { state: String },

    #[error("transition symbol '{symbol}' from '{state}' is not in alphabet")]
    UnknownTransitionSymbol { state: String, symbol: char },

    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<CoreError>,
    },

    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CoreError {
    /// Attaches a 1-based source line number to this error.
    pub fn at_line(self, line: usize) -> Self {
        CoreError::AtLine {
            line,
            source: Box::new(self),
        }
    }

    /// Returns the line this error was reported at, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            CoreError::AtLine { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Returns the kind of this error, looking through line annotations.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::InvalidRange { .. } => ErrorKind::Range,
            CoreError::SymbolsNotInAlphabet { .. } => ErrorKind::Alphabet,
            CoreError::UnknownTransitionSymbol { .. } => ErrorKind::Alphabet,
            CoreError::MissingField { .. } => ErrorKind::Format,
            CoreError::Malformed { .. } => ErrorKind::Format,
            CoreError::UnknownInitialState { .. } => ErrorKind::Reference,
            CoreError::UnknownFinalStates { .. } => ErrorKind::Reference,
            CoreError::UnknownSource { .. } => ErrorKind::Reference,
            CoreError::UnknownDestination { .. } => ErrorKind::Reference,
            CoreError::AtLine { source, .. } => source.kind(),
            CoreError::Io { .. } => ErrorKind::Io,
        }
    }

    /// Returns an error code suitable for machine-readable output.
    pub fn error_code(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Range => "RANGE_ERROR",
            ErrorKind::Alphabet => "ALPHABET_ERROR",
            ErrorKind::Format => "FORMAT_ERROR",
            ErrorKind::Reference => "REFERENCE_ERROR",
            ErrorKind::Io => "IO_ERROR",
        }
    }
}

fn format_symbols(symbols: &[char]) -> String {
    symbols
        .iter()
        .map(|c| format!("'{}'", c.escape_debug()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_states(states: &[String]) -> String {
    states
        .iter()
        .map(|s| format!("'{}'", s))
        .collect::<Vec<_>>()
        .join(", ")
}
