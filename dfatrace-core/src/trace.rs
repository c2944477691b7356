//! Execution traces produced by string validation.

use crate::automaton::State;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single transition taken while consuming input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Step {
    pub from: State,
    pub to: State,
    pub symbol: char,
}

/// Ordered record of the states visited and transitions taken for one input.
///
/// `states` always holds one more entry than `steps`: the initial state
/// followed by the destination of every step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionTrace {
    states: Vec<State>,
    steps: Vec<Step>,
}

impl ExecutionTrace {
    pub(crate) fn start(initial: State) -> Self {
        Self {
            states: vec![initial],
            steps: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, step: Step) {
        self.states.push(step.to.clone());
        self.steps.push(step);
    }

    /// Visited states in order, starting with the initial state.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Transitions taken in order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of symbols consumed.
    pub fn consumed(&self) -> usize {
        self.steps.len()
    }

    /// The state the run ended in.
    pub fn last_state(&self) -> Option<&State> {
        self.states.last()
    }

    /// Returns true if the state was visited.
    pub fn visited(&self, state: &State) -> bool {
        self.states.contains(state)
    }

    /// Returns true if a transition `from --symbol--> to` was taken.
    pub fn took(&self, from: &State, to: &State, symbol: char) -> bool {
        self.steps
            .iter()
            .any(|s| s.symbol == symbol && &s.from == from && &s.to == to)
    }
}

impl fmt::Display for ExecutionTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self
            .states
            .iter()
            .map(State::as_str)
            .collect::<Vec<_>>()
            .join(" -> ");
        f.write_str(&path)
    }
}

/// How a validation run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Verdict {
    /// All input consumed, ending in a final state.
    Accepted,
    /// All input consumed, ending in a non-final state.
    Rejected,
    /// No transition for `symbol` from `state`; `position` is its index in the input.
    DeadState {
        position: usize,
        state: State,
        symbol: char,
    },
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Accepted => f.write_str("ACCEPTED"),
            Verdict::Rejected => f.write_str("REJECTED"),
            Verdict::DeadState {
                position,
                state,
                symbol,
            } => write!(
                f,
                "REJECTED (no transition from '{}' on '{}' at position {})",
                state,
                symbol.escape_debug(),
                position
            ),
        }
    }
}

/// Outcome of validating one input string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    pub verdict: Verdict,
    pub trace: ExecutionTrace,
}

impl Validation {
    pub fn accepted(&self) -> bool {
        self.verdict.is_accepted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(from: &str, to: &str, symbol: char) -> Step {
        Step {
            from: State::from(from),
            to: State::from(to),
            symbol,
        }
    }

    #[test]
    fn test_trace_records_states_and_steps() {
        let mut trace = ExecutionTrace::start(State::from("q0"));
        trace.push(step("q0", "q1", '1'));
        trace.push(step("q1", "q1", '0'));

        assert_eq!(trace.consumed(), 2);
        assert_eq!(trace.states().len(), 3);
        assert_eq!(trace.last_state(), Some(&State::from("q1")));
        assert!(trace.visited(&State::from("q0")));
        assert!(trace.took(&State::from("q1"), &State::from("q1"), '0'));
        assert!(!trace.took(&State::from("q0"), &State::from("q1"), '0'));
        assert_eq!(trace.to_string(), "q0 -> q1 -> q1");
    }

    #[test]
    fn test_verdict_json() {
        let verdict = Verdict::DeadState {
            position: 2,
            state: State::from("q1"),
            symbol: 'b',
        };
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["result"], "dead_state");
        assert_eq!(json["state"], "q1");
        assert_eq!(json["symbol"], "b");

        let json = serde_json::to_value(Verdict::Accepted).unwrap();
        assert_eq!(json, serde_json::json!({"result": "accepted"}));
    }
}
