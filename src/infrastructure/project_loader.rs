use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory names skipped by default while collecting sources.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    ".git",
    "__pycache__",
    ".venv",
    "venv",
    ".tox",
    "node_modules",
    "build",
    "dist",
];

pub struct ProjectLoader {
    excluded_dirs: Vec<String>,
}

impl Default for ProjectLoader {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect())
    }
}

impl ProjectLoader {
    pub fn new(excluded_dirs: Vec<String>) -> Self {
        Self { excluded_dirs }
    }

    /// Collect every `.py` file under `root`, sorted by path.
    pub fn collect_python_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        self.collect_recursive(root, &mut files)?;

        // Sorted so the scan order (and the bare-name map) does not depend on read_dir order.
        files.sort();
        files.dedup();
        debug!(root = %root.display(), count = files.len(), "collected python files");
        Ok(files)
    }

    fn collect_recursive(&self, dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
        if !dir.exists() {
            return Ok(());
        }

        if dir.is_file() {
            // A single file given as a root
            if is_python(dir) {
                out.push(dir.to_path_buf());
            }
            return Ok(());
        }

        if self.is_excluded(dir) {
            return Ok(());
        }

        let entries =
            fs::read_dir(dir).with_context(|| format!("Failed to read directory {}", dir.display()))?;
        for entry in entries {
            let path = entry?.path();
            if path.is_dir() {
                self.collect_recursive(&path, out)?;
            } else if is_python(&path) {
                out.push(path);
            }
        }
        Ok(())
    }

    fn is_excluded(&self, dir: &Path) -> bool {
        dir.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| self.excluded_dirs.iter().any(|e| e == n))
    }
}

fn is_python(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "py")
}
