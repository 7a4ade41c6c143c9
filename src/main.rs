// Command-line entry point for pycallgraph.

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use pycallgraph::application::AnalyzeUsecase;
use pycallgraph::config::{AnalysisConfig, NameTieBreak, OutputFormat};
use pycallgraph::infrastructure::concurrency;
use pycallgraph::infrastructure::ProjectLoader;
use pycallgraph::ports::{DotExporter, GraphExporter, JsonExporter};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input Python file (can specify multiple)
    #[arg(short, long, required = false)]
    input: Vec<PathBuf>,

    /// Input source folder(s), scanned recursively for .py files
    #[arg(short = 'd', long, required = false)]
    folder: Vec<PathBuf>,

    /// Project root for module paths (defaults to the first folder, else the current directory)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Scan files one at a time
    #[arg(long)]
    sequential: bool,

    /// Number of scan threads
    #[arg(long)]
    workers: Option<usize>,

    /// Which definition wins when a bare function name is defined more than once
    #[arg(long, value_enum)]
    tie_break: Option<TieBreakArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TieBreakArg {
    Last,
    Lexicographic,
}

impl From<TieBreakArg> for NameTieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::Last => NameTieBreak::LastScanned,
            TieBreakArg::Lexicographic => NameTieBreak::Lexicographic,
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_config(cli: &Cli) -> Result<AnalysisConfig> {
    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    };

    if let Some(root) = cli.root.clone().or_else(|| cli.folder.first().cloned()) {
        config.generator.project_root = root;
    }
    if cli.sequential {
        config.generator.parallel = false;
    }
    if let Some(tie_break) = cli.tie_break {
        config.generator.name_tie_break = tie_break.into();
    }
    if let Some(workers) = cli.workers {
        config.workers = Some(workers);
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    Ok(config)
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let loader = ProjectLoader::new(config.exclude_dirs.clone());
    let mut files: Vec<PathBuf> = Vec::new();

    // 1. input files
    for input_file in &cli.input {
        if input_file.is_file() {
            files.push(input_file.clone());
        } else {
            warn!(path = %input_file.display(), "cannot read input file");
        }
    }

    // 2. folders
    for folder in &cli.folder {
        files.extend(loader.collect_python_files(folder)?);
    }

    if files.is_empty() {
        bail!("No Python files found. Provide at least one --input <file> or --folder <dir>");
    }
    info!(files = files.len(), root = %config.generator.project_root.display(), "collected sources");

    if config.generator.parallel {
        concurrency::init_thread_pool(config.workers)?;
    }

    let mut exporters: Vec<&dyn GraphExporter> = Vec::new();
    if config.format.includes_json() {
        exporters.push(&JsonExporter);
    }
    if config.format.includes_dot() {
        exporters.push(&DotExporter);
    }

    let usecase = AnalyzeUsecase { exporters };
    let outcome = usecase.run(&config.generator, &files, &cli.output)?;

    let skipped = outcome.report.definitions.skipped.len();
    println!(
        "Analysis completed! {} nodes, {} edges ({} files skipped). Output written to {}",
        outcome.graph.nodes.len(),
        outcome.graph.edges.len(),
        skipped,
        cli.output.display()
    );
    Ok(())
}
