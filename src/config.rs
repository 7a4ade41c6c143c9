//! Configuration for a call graph run.
//!
//! Every field has a default; a TOML file may override any subset and the
//! CLI overrides the file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use crate::domain::index::NameTieBreak;
use crate::infrastructure::project_loader::DEFAULT_EXCLUDED_DIRS;

/// Settings owned by one [`CallGraphGenerator`](crate::application::CallGraphGenerator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Root used to compute dotted module paths.
    pub project_root: PathBuf,
    /// Scan files of one pass on the rayon pool.
    pub parallel: bool,
    pub name_tie_break: NameTieBreak,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            parallel: true,
            name_tie_break: NameTieBreak::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            ..Self::default()
        }
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    pub fn with_tie_break(mut self, tie_break: NameTieBreak) -> Self {
        self.name_tie_break = tie_break;
        self
    }
}

/// Which export files the CLI writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Dot,
    #[default]
    All,
}

impl OutputFormat {
    pub fn includes_json(&self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::All)
    }

    pub fn includes_dot(&self) -> bool {
        matches!(self, OutputFormat::Dot | OutputFormat::All)
    }
}

/// Full configuration of an analysis run from the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub generator: GeneratorConfig,
    pub exclude_dirs: Vec<String>,
    /// Scan threads; `None` picks half the cores.
    pub workers: Option<usize>,
    pub format: OutputFormat,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            exclude_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
            workers: None,
            format: OutputFormat::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid configuration file")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Cannot read configuration file {}", path.display()))?;
        Self::from_toml(&content)
    }
}
