//! Interactive automaton builder.
//!
//! Walks through the alphabet, states, initial and final states and the
//! transitions, re-prompting until each answer is valid.

use crate::config::Config;
use colored::Colorize;
use dfatrace_core::{expand, Automaton, State, SymbolSet};
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::collections::BTreeSet;
use std::path::Path;

/// Source of answers to prompts.
pub trait Prompter {
    /// Reads one line. `None` means the user gave up (EOF or Ctrl+C).
    fn ask(&mut self, prompt: &str) -> Option<String>;
}

impl Prompter for Editor<(), DefaultHistory> {
    fn ask(&mut self, prompt: &str) -> Option<String> {
        self.readline(prompt).ok()
    }
}

#[derive(Debug)]
struct Cancelled;

impl std::fmt::Display for Cancelled {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("operation cancelled by user")
    }
}

impl std::error::Error for Cancelled {}

type PromptResult<T> = Result<T, Box<dyn std::error::Error>>;

fn ask(prompter: &mut dyn Prompter, prompt: &str) -> PromptResult<String> {
    prompter
        .ask(prompt)
        .map(|line| line.trim().to_string())
        .ok_or_else(|| Cancelled.into())
}

fn warn(message: impl std::fmt::Display) {
    println!("  {} {}", "[!]".yellow(), message);
}

fn section(title: &str) {
    println!("{}", "-".repeat(60).dimmed());
    println!("{}", title.bold());
}

/// Builds an automaton from prompted answers.
pub fn build(prompter: &mut dyn Prompter) -> PromptResult<Automaton> {
    let alphabet = prompt_alphabet(prompter)?;
    let states = prompt_states(prompter)?;
    let (initial, finals) = prompt_initial_and_finals(prompter, &states)?;

    let mut builder = Automaton::builder()
        .alphabet(alphabet.iter().copied())
        .states(states.iter())
        .initial(initial)
        .finals(finals);

    section("4: Define transitions");
    println!("  Format: source input target (e.g. 'q0 0 q1' or 'q0 a-z q1')");
    println!("  Type 'done' to finish");

    loop {
        let entry = ask(prompter, "  >> Transition: ")?;
        if entry.eq_ignore_ascii_case("done") {
            break;
        }

        let parts: Vec<&str> = entry.split_whitespace().collect();
        let [source, input, target] = parts.as_slice() else {
            warn("Invalid format. Expected: <source> <input> <target>");
            continue;
        };

        let source = State::from(*source);
        let target = State::from(*target);
        if !states.contains(&source) {
            warn(format!("Source state '{}' invalid", source));
            continue;
        }
        if !states.contains(&target) {
            warn(format!("Target state '{}' invalid", target));
            continue;
        }

        let symbols = match expand(input) {
            Ok(symbols) if !symbols.is_empty() => symbols,
            Ok(_) => {
                warn("Input denotes no symbols");
                continue;
            }
            Err(e) => {
                warn(format!("Error parsing input range: {}", e));
                continue;
            }
        };
        let foreign: Vec<String> = symbols.difference(&alphabet).map(char::to_string).collect();
        if !foreign.is_empty() {
            warn(format!("Symbols {} not in alphabet", foreign.join(", ")));
            continue;
        }

        builder = builder.transitions_on(source, symbols, target);
    }

    Ok(builder.build()?)
}

fn prompt_alphabet(prompter: &mut dyn Prompter) -> PromptResult<SymbolSet> {
    section("1: Define alphabet");
    println!("  Examples: '0-1', 'a-z', 'a b c'");

    loop {
        let raw = ask(prompter, "  >> Alphabet: ")?;
        if raw.is_empty() {
            warn("Alphabet cannot be empty");
            continue;
        }

        match expand(&raw) {
            Ok(alphabet) if !alphabet.is_empty() => {
                println!("  -> Alphabet set ({} symbols)", alphabet.len());
                return Ok(alphabet);
            }
            Ok(_) => warn("Alphabet cannot be empty"),
            Err(e) => warn(format!("Error parsing alphabet: {}", e)),
        }
    }
}

fn prompt_states(prompter: &mut dyn Prompter) -> PromptResult<Vec<State>> {
    section("2: Define states");

    let count = loop {
        let raw = ask(prompter, "  >> Number of states (N): ")?;
        match raw.parse::<usize>() {
            Ok(n) if n > 0 => break n,
            Ok(_) => warn("Please enter a number greater than 0"),
            Err(_) => warn("Invalid input. Please enter an integer"),
        }
    };

    let states: Vec<State> = (0..count).map(|i| State::new(format!("q{}", i))).collect();
    println!(
        "  -> Generated states: {}",
        states
            .iter()
            .map(State::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(states)
}

fn prompt_initial_and_finals(
    prompter: &mut dyn Prompter,
    states: &[State],
) -> PromptResult<(State, BTreeSet<State>)> {
    section("3: Initial and final states");

    let initial = loop {
        let state = State::from(ask(prompter, "  >> Initial state: ")?);
        if states.contains(&state) {
            break state;
        }
        warn(format!("State '{}' is not valid", state));
    };

    let finals = loop {
        let raw = ask(prompter, "  >> Final states (space separated): ")?;
        let finals: BTreeSet<State> = raw.split_whitespace().map(State::from).collect();
        if finals.iter().all(|s| states.contains(s)) {
            break finals;
        }
        warn("One or more states are invalid");
    };

    Ok((initial, finals))
}

/// Runs the builder on the terminal, optionally saves it, then starts a session.
pub fn run(config: &Config, save: Option<&Path>) -> PromptResult<()> {
    println!("{}", "Interactive creation mode".bold().cyan());

    let mut editor: Editor<(), DefaultHistory> = Editor::new()?;
    let automaton = build(&mut editor)?;
    println!("\n{}", "-> DFA created successfully".green());

    if let Some(path) = save {
        let dsl = dfatrace_core::to_dsl(&automaton)?;
        std::fs::write(path, dsl)?;
        println!("-> Saved definition to {}", path.display());
    }

    crate::repl::run(&automaton, config, "interactive_model")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct Scripted(VecDeque<&'static str>);

    impl Prompter for Scripted {
        fn ask(&mut self, _prompt: &str) -> Option<String> {
            self.0.pop_front().map(String::from)
        }
    }

    fn scripted(lines: &[&'static str]) -> Scripted {
        Scripted(lines.iter().copied().collect())
    }

    #[test]
    fn test_build_with_retries() {
        let mut prompter = scripted(&[
            "",         // empty alphabet
            "z-a",      // inverted range
            "0-1",
            "zero",     // not a number
            "0",        // not positive
            "2",
            "q5",       // unknown initial
            "q0",
            "q1 q9",    // unknown final
            "q1",
            "q0 1",     // two fields
            "q0 2 q1",  // not in alphabet
            "q0 0 q7",  // unknown target
            "q0 0 q0",
            "q0 1 q1",
            "q1 0-1 q1",
            "done",
        ]);

        let dfa = build(&mut prompter).unwrap();
        assert_eq!(dfa.states().len(), 2);
        assert_eq!(dfa.initial().as_str(), "q0");
        assert!(dfa.is_final(&State::from("q1")));
        assert_eq!(dfa.transitions().len(), 4);
        assert!(dfa.validate("001").unwrap().accepted());
        assert!(!dfa.validate("000").unwrap().accepted());
    }

    #[test]
    fn test_no_final_states() {
        let mut prompter = scripted(&["a", "1", "q0", "", "DONE"]);
        let dfa = build(&mut prompter).unwrap();
        assert!(dfa.finals().is_empty());
        assert!(dfa.transitions().is_empty());
    }

    #[test]
    fn test_cancel() {
        let mut prompter = scripted(&["a-c", "3"]);
        let err = build(&mut prompter).unwrap_err();
        assert_eq!(err.to_string(), "operation cancelled by user");
    }
}
