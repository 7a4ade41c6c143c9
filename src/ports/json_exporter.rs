use super::GraphExporter;
use crate::domain::callgraph::CallGraph;

/// Writes the graph as `{"nodes": [...], "edges": [...]}`.
pub struct JsonExporter;

impl GraphExporter for JsonExporter {
    fn file_name(&self) -> &'static str {
        "call_graph.json"
    }

    fn render(&self, cg: &CallGraph) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(cg)?)
    }
}
