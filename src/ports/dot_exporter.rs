//! Call Graph DOT Exporter
//!
//! Renders a CallGraph as Graphviz DOT text.

use super::GraphExporter;
use crate::domain::callgraph::{CallGraph, Edge, Node};

pub struct DotExporter;

impl DotExporter {
    /// Convert nodes and edges to a DOT string.
    ///
    /// One statement per node (labelled with name and kind) and one per
    /// edge; edges carry a label only when they stand for more than one call.
    pub fn to_dot<'a>(
        nodes: impl IntoIterator<Item = &'a Node>,
        edges: impl IntoIterator<Item = &'a Edge>,
    ) -> String {
        let mut lines = Vec::new();

        lines.push("digraph CallGraph {".to_string());
        lines.push("    node [shape=box];".to_string());

        for node in nodes {
            lines.push(format!(
                "    \"{}\" [label=\"{}\\n({})\"];",
                Self::escape(&node.id),
                Self::escape(&node.name),
                node.kind
            ));
        }

        for edge in edges {
            let label = match edge.call_count() {
                n if n > 1 => format!(" [label=\"{}\"]", n),
                _ => String::new(),
            };
            lines.push(format!(
                "    \"{}\" -> \"{}\"{};",
                Self::escape(&edge.source),
                Self::escape(&edge.target),
                label
            ));
        }

        lines.push("}".to_string());

        lines.join("\n") + "\n"
    }

    fn escape(label: &str) -> String {
        label
            .replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('\n', "\\n")
    }
}

impl GraphExporter for DotExporter {
    fn file_name(&self) -> &'static str {
        "call_graph.dot"
    }

    fn render(&self, cg: &CallGraph) -> anyhow::Result<String> {
        Ok(Self::to_dot(&cg.nodes, &cg.edges))
    }
}
