use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::GeneratorConfig;
use crate::domain::callgraph::CallGraph;
use crate::ports::GraphExporter;

pub mod generator;

pub use generator::{CallGraphGenerator, PassReport, ScanReport, SkippedFile};

/// Result of one analysis run.
pub struct AnalysisOutcome {
    pub graph: CallGraph,
    pub report: ScanReport,
    pub written: Vec<PathBuf>,
}

pub struct AnalyzeUsecase<'a> {
    pub exporters: Vec<&'a dyn GraphExporter>,
}

impl<'a> AnalyzeUsecase<'a> {
    /// Build the graph for `files` and write every export into `output_dir`.
    pub fn run(
        &self,
        config: &GeneratorConfig,
        files: &[PathBuf],
        output_dir: &Path,
    ) -> Result<AnalysisOutcome> {
        let mut generator = CallGraphGenerator::new(config.clone());
        let graph = generator.generate(files);

        fs::create_dir_all(output_dir)
            .with_context(|| format!("Cannot create output directory {}", output_dir.display()))?;

        let mut written = Vec::new();
        for exporter in &self.exporters {
            let path = output_dir.join(exporter.file_name());
            exporter
                .export(&graph, &path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote export");
            written.push(path);
        }

        Ok(AnalysisOutcome {
            graph,
            report: generator.report().clone(),
            written,
        })
    }
}
