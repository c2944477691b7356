//! Graph descriptions of an automaton, optionally highlighting a trace.
//!
//! Transitions that share a source and destination are grouped into one
//! edge whose label lists the symbols compactly, so `q0 a-z q1` draws a
//! single `a-z` edge rather than 26 parallel ones.

use crate::label::compact_label;
use crate::theme::{Direction, Theme};
use dfatrace_core::{Automaton, ExecutionTrace, State, SymbolSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Node shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Circle,
    DoubleCircle,
    /// Invisible node, used for the start arrow.
    None,
}

/// Stroke attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub color: String,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub shape: Shape,
    pub highlighted: bool,
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub label: String,
    pub highlighted: bool,
    pub style: Style,
}

/// Declarative graph handed to a [`Renderer`](crate::Renderer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDescription {
    pub direction: Direction,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl GraphDescription {
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, from: &str, to: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.from == from && e.to == to)
    }

    /// Returns true if any node or edge is highlighted.
    pub fn has_highlights(&self) -> bool {
        self.nodes.iter().any(|n| n.highlighted) || self.edges.iter().any(|e| e.highlighted)
    }
}

/// All symbols leading from one state to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedEdge<'a> {
    pub from: &'a State,
    pub to: &'a State,
    pub symbols: SymbolSet,
}

impl GroupedEdge<'_> {
    /// Returns true if the trace took this edge on any of its symbols.
    pub fn taken_by(&self, trace: &ExecutionTrace) -> bool {
        self.symbols
            .iter()
            .any(|symbol| trace.took(self.from, self.to, *symbol))
    }
}

/// Groups the transition table by (source, destination).
pub fn group_edges(automaton: &Automaton) -> Vec<GroupedEdge<'_>> {
    let mut groups: BTreeMap<(&State, &State), SymbolSet> = BTreeMap::new();
    for ((from, symbol), to) in automaton.transitions() {
        groups.entry((from, to)).or_default().insert(*symbol);
    }

    groups
        .into_iter()
        .map(|((from, to), symbols)| GroupedEdge { from, to, symbols })
        .collect()
}

/// Prepares a graph description with the default theme.
pub fn prepare(automaton: &Automaton, trace: Option<&ExecutionTrace>) -> GraphDescription {
    prepare_with_theme(automaton, trace, &Theme::default())
}

/// Prepares a graph description.
///
/// Without a trace nothing is highlighted. With one, visited states,
/// taken grouped edges and the start arrow are highlighted.
pub fn prepare_with_theme(
    automaton: &Automaton,
    trace: Option<&ExecutionTrace>,
    theme: &Theme,
) -> GraphDescription {
    let style = |highlighted: bool| {
        if highlighted {
            Style {
                color: theme.highlight_color.clone(),
                width: theme.highlight_width,
            }
        } else {
            Style {
                color: theme.default_color.clone(),
                width: theme.default_width,
            }
        }
    };

    let start_id = start_node_id(automaton);
    let mut nodes = Vec::with_capacity(automaton.states().len() + 1);
    let mut edges = Vec::new();

    nodes.push(Node {
        id: start_id.clone(),
        label: String::new(),
        shape: Shape::None,
        highlighted: false,
        style: Style {
            color: theme.default_color.clone(),
            width: 0.0,
        },
    });
    edges.push(Edge {
        from: start_id,
        to: automaton.initial().to_string(),
        label: String::new(),
        highlighted: trace.is_some(),
        style: style(trace.is_some()),
    });

    for state in automaton.states() {
        let highlighted = trace.is_some_and(|t| t.visited(state));
        nodes.push(Node {
            id: state.to_string(),
            label: state.to_string(),
            shape: if automaton.is_final(state) {
                Shape::DoubleCircle
            } else {
                Shape::Circle
            },
            highlighted,
            style: style(highlighted),
        });
    }

    for group in group_edges(automaton) {
        let highlighted = trace.is_some_and(|t| group.taken_by(t));
        edges.push(Edge {
            from: group.from.to_string(),
            to: group.to.to_string(),
            label: compact_label(&group.symbols),
            highlighted,
            style: style(highlighted),
        });
    }

    tracing::debug!(
        "prepared graph: {} nodes, {} edges, trace={}",
        nodes.len(),
        edges.len(),
        trace.is_some()
    );

    GraphDescription {
        direction: theme.direction,
        nodes,
        edges,
    }
}

/// Picks an id for the start node that no state uses.
fn start_node_id(automaton: &Automaton) -> String {
    let mut id = String::from("__start");
    while automaton.states().contains(&State::from(id.as_str())) {
        id.push('_');
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use dfatrace_core::load_str;

    fn identifier() -> Automaton {
        load_str(
            "\
ALPHABET: a-z 0-9 _
STATES: start ident error
INITIAL_STATE: start
FINAL_STATES: ident
TRANSITIONS:
start a-z,_ ident
start 0-9 error
ident a-z,0-9,_ ident
",
        )
        .unwrap()
    }

    #[test]
    fn test_edges_grouped() {
        let dfa = identifier();
        let groups = group_edges(&dfa);

        assert_eq!(groups.len(), 3);
        let ident_loop = groups
            .iter()
            .find(|g| g.from.as_str() == "ident" && g.to.as_str() == "ident")
            .unwrap();
        assert_eq!(ident_loop.symbols.len(), 37);
    }

    #[test]
    fn test_static_structure() {
        let graph = prepare(&identifier(), None);

        assert!(!graph.has_highlights());
        // start node + 3 states, start edge + 3 grouped edges
        assert_eq!(graph.nodes.len(), 4);
        assert_eq!(graph.edges.len(), 4);

        let start = graph.node("__start").unwrap();
        assert_eq!(start.shape, Shape::None);
        assert_eq!(graph.edge("__start", "start").unwrap().style.color, "black");

        assert_eq!(graph.node("ident").unwrap().shape, Shape::DoubleCircle);
        assert_eq!(graph.node("error").unwrap().shape, Shape::Circle);
        assert_eq!(graph.edge("ident", "ident").unwrap().label, "0-9, _, a-z");
        assert_eq!(graph.edge("start", "ident").unwrap().label, "_, a-z");
    }

    #[test]
    fn test_trace_highlighting() {
        let dfa = identifier();
        let result = dfa.validate("ab1").unwrap();
        let graph = prepare(&dfa, Some(&result.trace));

        for state in dfa.states() {
            let node = graph.node(state.as_str()).unwrap();
            assert_eq!(node.highlighted, result.trace.visited(state), "{}", state);
        }
        assert!(graph.node("start").unwrap().highlighted);
        assert!(!graph.node("error").unwrap().highlighted);
        assert!(!graph.node("__start").unwrap().highlighted);

        assert!(graph.edge("__start", "start").unwrap().highlighted);
        assert!(graph.edge("start", "ident").unwrap().highlighted);
        assert!(graph.edge("ident", "ident").unwrap().highlighted);
        assert!(!graph.edge("start", "error").unwrap().highlighted);

        let taken = graph.edge("start", "ident").unwrap();
        assert_eq!(taken.style.color, "darkgreen");
        assert_eq!(taken.style.width, 2.0);
    }

    #[test]
    fn test_dead_state_trace_highlights_prefix() {
        let dfa = identifier();
        let result = dfa.validate("9a").unwrap();
        assert!(!result.accepted());

        let graph = prepare(&dfa, Some(&result.trace));
        assert!(graph.node("error").unwrap().highlighted);
        assert!(!graph.node("ident").unwrap().highlighted);
        assert!(graph.edge("start", "error").unwrap().highlighted);
    }

    #[test]
    fn test_empty_trace_highlights_only_initial() {
        let dfa = identifier();
        let result = dfa.validate("").unwrap();
        let graph = prepare(&dfa, Some(&result.trace));

        assert!(graph.node("start").unwrap().highlighted);
        assert_eq!(graph.nodes.iter().filter(|n| n.highlighted).count(), 1);
        assert_eq!(graph.edges.iter().filter(|e| e.highlighted).count(), 1);
    }

    #[test]
    fn test_start_id_avoids_state_names() {
        let dfa = Automaton::builder()
            .alphabet(['a'])
            .states(["__start", "q"])
            .initial("__start")
            .build()
            .unwrap();

        let graph = prepare(&dfa, None);
        let start = &graph.nodes[0];
        assert_eq!(start.id, "__start_");
        assert_eq!(graph.edges[0].to, "__start");
    }

    #[test]
    fn test_theme_applied() {
        let theme = Theme {
            highlight_color: "red".to_string(),
            direction: Direction::TopToBottom,
            ..Theme::default()
        };
        let dfa = identifier();
        let result = dfa.validate("a").unwrap();
        let graph = prepare_with_theme(&dfa, Some(&result.trace), &theme);

        assert_eq!(graph.direction, Direction::TopToBottom);
        assert_eq!(graph.node("ident").unwrap().style.color, "red");
    }
}
