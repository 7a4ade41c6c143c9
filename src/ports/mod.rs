use crate::domain::callgraph::CallGraph;
use std::path::Path;

pub mod dot_exporter;
pub mod json_exporter;

pub use dot_exporter::DotExporter;
pub use json_exporter::JsonExporter;

/// Renders a call graph into one output artifact.
pub trait GraphExporter {
    /// File name the artifact is written under inside an output directory.
    fn file_name(&self) -> &'static str;

    fn render(&self, cg: &CallGraph) -> anyhow::Result<String>;

    fn export(&self, cg: &CallGraph, path: &Path) -> anyhow::Result<()> {
        let content = self.render(cg)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
