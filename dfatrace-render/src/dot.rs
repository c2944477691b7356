//! Graphviz output.

use crate::error::RenderError;
use crate::graph::{Edge, GraphDescription, Node, Shape};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fmt;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::str::FromStr;

/// Turns a graph description into an artifact on disk.
pub trait Renderer {
    /// Renders `graph` to a file derived from `stem` and returns its path.
    fn render(&self, graph: &GraphDescription, stem: &Path) -> Result<PathBuf, RenderError>;
}

/// Artifact format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// DOT source only, no graphviz needed.
    Dot,
    #[default]
    Png,
    Svg,
    Pdf,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Dot => "dot",
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Pdf => "pdf",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dot" | "gv" => Ok(OutputFormat::Dot),
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            "pdf" => Ok(OutputFormat::Pdf),
            _ => Err(RenderError::UnknownFormat(s.to_string())),
        }
    }
}

/// Renders through the graphviz `dot` executable.
///
/// The DOT source is written next to the artifact as `<stem>.dot` and
/// removed after a successful conversion unless `keep_source` is set.
#[derive(Debug, Clone)]
pub struct DotRenderer {
    pub format: OutputFormat,
    pub dot_binary: PathBuf,
    pub keep_source: bool,
}

impl Default for DotRenderer {
    fn default() -> Self {
        Self::new(OutputFormat::default())
    }
}

impl DotRenderer {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            dot_binary: PathBuf::from("dot"),
            keep_source: false,
        }
    }

    pub fn with_dot_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.dot_binary = binary.into();
        self
    }

    pub fn with_keep_source(mut self, keep: bool) -> Self {
        self.keep_source = keep;
        self
    }

    fn convert(&self, source: &Path, output: &Path) -> Result<(), RenderError> {
        let result = Command::new(&self.dot_binary)
            .arg(format!("-T{}", self.format.extension()))
            .arg("-o")
            .arg(output)
            .arg(source)
            .output();

        let output = match result {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RenderError::DotNotFound {
                    binary: self.dot_binary.clone(),
                });
            }
            Err(e) => {
                return Err(RenderError::Io {
                    path: self.dot_binary.clone(),
                    source: e,
                });
            }
        };

        if !output.status.success() {
            return Err(RenderError::DotFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

impl Renderer for DotRenderer {
    fn render(&self, graph: &GraphDescription, stem: &Path) -> Result<PathBuf, RenderError> {
        if let Some(parent) = stem.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| RenderError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let source = with_suffix(stem, "dot");
        std::fs::write(&source, to_dot(graph)).map_err(|e| RenderError::Io {
            path: source.clone(),
            source: e,
        })?;

        if self.format == OutputFormat::Dot {
            tracing::info!("wrote {}", source.display());
            return Ok(source);
        }

        let artifact = with_suffix(stem, self.format.extension());
        self.convert(&source, &artifact)?;

        if !self.keep_source {
            if let Err(e) = std::fs::remove_file(&source) {
                tracing::warn!("failed to remove {}: {}", source.display(), e);
            }
        }

        tracing::info!("rendered {}", artifact.display());
        Ok(artifact)
    }
}

/// Appends an extension without replacing any dot already in the file name.
fn with_suffix(stem: &Path, extension: &str) -> PathBuf {
    let mut name = OsString::from(stem.as_os_str());
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// Serializes a graph description as a DOT digraph.
pub fn to_dot(graph: &GraphDescription) -> String {
    let mut out = String::new();
    out.push_str("digraph dfa {\n");
    let _ = writeln!(out, "    rankdir={};", graph.direction);

    for node in &graph.nodes {
        write_node(&mut out, node);
    }
    for edge in &graph.edges {
        write_edge(&mut out, edge);
    }

    out.push_str("}\n");
    out
}

fn write_node(out: &mut String, node: &Node) {
    if node.shape == Shape::None {
        let _ = writeln!(
            out,
            "    {} [label=\"\", shape=none, width=0, height=0];",
            quote(&node.id)
        );
        return;
    }

    let shape = match node.shape {
        Shape::DoubleCircle => "doublecircle",
        _ => "circle",
    };
    let _ = writeln!(
        out,
        "    {} [label={}, shape={}, color={}, fontcolor={}, penwidth={:.1}];",
        quote(&node.id),
        quote(&node.label),
        shape,
        quote(&node.style.color),
        quote(&node.style.color),
        node.style.width
    );
}

fn write_edge(out: &mut String, edge: &Edge) {
    let mut attrs = Vec::new();
    if !edge.label.is_empty() {
        attrs.push(format!("label={}", quote(&edge.label)));
        attrs.push(format!("fontcolor={}", quote(&edge.style.color)));
    }
    attrs.push(format!("color={}", quote(&edge.style.color)));
    attrs.push(format!("penwidth={:.1}", edge.style.width));

    let _ = writeln!(
        out,
        "    {} -> {} [{}];",
        quote(&edge.from),
        quote(&edge.to),
        attrs.join(", ")
    );
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}
