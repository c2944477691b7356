//! Diagram colours, pen widths and layout direction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Graph layout direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "LR")]
    LeftToRight,
    #[serde(rename = "RL")]
    RightToLeft,
    #[serde(rename = "TB")]
    TopToBottom,
    #[serde(rename = "BT")]
    BottomToTop,
}

impl Direction {
    /// Graphviz `rankdir` value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::LeftToRight => "LR",
            Direction::RightToLeft => "RL",
            Direction::TopToBottom => "TB",
            Direction::BottomToTop => "BT",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Styling applied when preparing a graph description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Colour of visited states and taken transitions.
    pub highlight_color: String,
    /// Colour of everything else.
    pub default_color: String,
    /// Pen width of highlighted elements.
    pub highlight_width: f32,
    /// Pen width of everything else.
    pub default_width: f32,
    /// Layout direction.
    pub direction: Direction,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            highlight_color: "darkgreen".to_string(),
            default_color: "black".to_string(),
            highlight_width: 2.0,
            default_width: 1.0,
            direction: Direction::LeftToRight,
        }
    }
}
