// Call graph structures for pycallgraph.
// Represents definition sites and the resolved calls between them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Text stored in [`Node::source_text`] when the defining lines cannot be read.
pub const SOURCE_NOT_AVAILABLE: &str = "Source not available";

/// Whether a definition is a free function or a method directly inside a class body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Function,
    Method,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Function => "function",
            NodeKind::Method => "method",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node in the call graph: one function or method definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,     // dotted qualified name, unique per run
    pub name: String,   // simple identifier
    pub module: String, // dotted module path
    pub package: String,
    pub kind: NodeKind,
    pub file_path: String,
    pub start_line: usize, // 1-based, inclusive
    pub end_line: usize,   // 1-based, inclusive
    pub source_text: String,
}

/// One concrete occurrence of a resolved call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSite {
    pub file_path: String,
    pub line: usize,
    pub snippet: String, // trimmed line text, empty if unreadable
}

/// A resolved call relationship. Identity is `(source, target)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub call_sites: Vec<CallSite>,
}

impl Edge {
    pub fn new(source: &str, target: &str, first_site: CallSite) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
            call_sites: vec![first_site],
        }
    }

    pub fn call_count(&self) -> usize {
        self.call_sites.len()
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// The exported call graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl CallGraph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, source: &str, target: &str) -> Option<&Edge> {
        self.edges
            .iter()
            .find(|e| e.source == source && e.target == target)
    }
}
