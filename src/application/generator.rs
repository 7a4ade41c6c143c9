//! Graph Assembler
//!
//! Runs the definition pass over every file, then the call pass over every
//! file, and packages both registries as a [`CallGraph`].

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::GeneratorConfig;
use crate::domain::callgraph::CallGraph;
use crate::domain::edges::EdgeRegistry;
use crate::domain::index::SymbolIndex;
use crate::error::ScanResult;
use crate::infrastructure::{scan_calls, scan_definitions};
use crate::ports::DotExporter;

/// A file one pass could not use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of one pass over the file set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    pub scanned: usize,
    pub skipped: Vec<SkippedFile>,
}

/// Per-pass diagnostics. Skipped files never abort a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub definitions: PassReport,
    pub calls: PassReport,
}

/// Builds a call graph for one file set.
///
/// The registries are owned by the instance. Running it again on a
/// different file set accumulates into the same registries.
pub struct CallGraphGenerator {
    config: GeneratorConfig,
    index: SymbolIndex,
    edges: EdgeRegistry,
    report: ScanReport,
}

impl CallGraphGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            index: SymbolIndex::new(config.name_tie_break),
            edges: EdgeRegistry::new(),
            report: ScanReport::default(),
            config,
        }
    }

    /// Generator with default settings for `project_root`.
    pub fn for_root(project_root: impl Into<PathBuf>) -> Self {
        Self::new(GeneratorConfig::new(project_root))
    }

    /// Run both passes over `files` and return the resulting graph.
    pub fn generate(&mut self, files: &[PathBuf]) -> CallGraph {
        self.collect_definitions(files);
        self.collect_calls(files);
        self.graph()
    }

    /// DOT rendering of the graph, generating it first if nothing was collected yet.
    pub fn generate_dot(&mut self, files: &[PathBuf]) -> String {
        if self.index.is_empty() && self.edges.is_empty() {
            self.generate(files);
        }
        DotExporter::to_dot(self.index.nodes(), self.edges.edges())
    }

    /// Pass 1: register the definitions of every file.
    pub fn collect_definitions(&mut self, files: &[PathBuf]) {
        let root = self.config.project_root.clone();
        let results = self.scan_each(files, |path| scan_definitions(path, &root));

        let mut pass = PassReport::default();
        let mut registered = 0;
        for (path, result) in results {
            match result {
                Ok(nodes) => {
                    pass.scanned += 1;
                    for node in nodes {
                        if self.index.define(node) {
                            registered += 1;
                        }
                    }
                }
                Err(e) => Self::skip(&mut pass, path, e.to_string()),
            }
        }

        info!(
            files = pass.scanned,
            skipped = pass.skipped.len(),
            nodes = registered,
            total = self.index.len(),
            "definition pass complete"
        );
        self.report.definitions = pass;
    }

    /// Pass 2: resolve the calls of every file. Needs pass 1 to have run on the whole set.
    pub fn collect_calls(&mut self, files: &[PathBuf]) {
        let root = self.config.project_root.clone();
        let results = self.scan_each(files, |path| scan_calls(path, &root, &self.index));

        let mut pass = PassReport::default();
        let mut resolved = 0;
        for (path, result) in results {
            match result {
                Ok(calls) => {
                    pass.scanned += 1;
                    for call in calls {
                        resolved += 1;
                        self.edges.record(&call.source, &call.target, call.site);
                    }
                }
                Err(e) => Self::skip(&mut pass, path, e.to_string()),
            }
        }

        info!(
            files = pass.scanned,
            skipped = pass.skipped.len(),
            calls = resolved,
            edges = self.edges.len(),
            call_sites = self.edges.call_site_count(),
            "call pass complete"
        );
        self.report.calls = pass;
    }

    /// Snapshot of both registries.
    pub fn graph(&self) -> CallGraph {
        CallGraph::new(
            self.index.nodes().cloned().collect(),
            self.edges.edges().cloned().collect(),
        )
    }

    pub fn report(&self) -> &ScanReport {
        &self.report
    }

    /// Scan every file, keeping results in input order.
    fn scan_each<T, F>(&self, files: &[PathBuf], scan: F) -> Vec<(PathBuf, ScanResult<T>)>
    where
        T: Send,
        F: Fn(&Path) -> ScanResult<T> + Sync,
    {
        if self.config.parallel {
            files
                .par_iter()
                .map(|path| (path.clone(), scan(path)))
                .collect()
        } else {
            files.iter().map(|path| (path.clone(), scan(path))).collect()
        }
    }

    fn skip(pass: &mut PassReport, path: PathBuf, reason: String) {
        warn!(path = %path.display(), %reason, "skipping file");
        pass.skipped.push(SkippedFile { path, reason });
    }
}
