//! # dfatrace-render
//!
//! Diagram preparation for dfatrace.
//!
//! This crate provides:
//! - Grouping of transitions into labelled edges
//! - Highlighting of an execution trace
//! - A [`Renderer`] trait and a graphviz-backed implementation

pub mod dot;
pub mod error;
pub mod graph;
pub mod label;
pub mod theme;

pub use dot::{to_dot, DotRenderer, OutputFormat, Renderer};
pub use error::RenderError;
pub use graph::{
    group_edges, prepare, prepare_with_theme, Edge, GraphDescription, GroupedEdge, Node, Shape,
    Style,
};
pub use label::compact_label;
pub use theme::{Direction, Theme};
