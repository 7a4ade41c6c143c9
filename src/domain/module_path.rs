//! Module Identifier Resolution
//!
//! Maps a source file to its dotted module path relative to the project root.

use std::path::{Component, Path, PathBuf};

/// Dotted module path of a file plus its top-level package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulePath {
    pub module: String,
    pub package: String,
}

impl ModulePath {
    /// Resolve `file_path` against `project_root`.
    ///
    /// `pkg/sub/mod.py` under the root becomes `pkg.sub.mod` with package `pkg`.
    /// A file that cannot be expressed relative to the root falls back to its
    /// base name, so this never fails.
    pub fn resolve(file_path: &Path, project_root: &Path) -> Self {
        let module = relative_to(file_path, project_root)
            .map(|rel| dotted(&rel))
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| base_name(file_path));
        Self::from_module(module)
    }

    pub fn from_module(module: String) -> Self {
        let package = module.split('.').next().unwrap_or(&module).to_string();
        Self { module, package }
    }
}

fn relative_to(file_path: &Path, root: &Path) -> Option<PathBuf> {
    if let Ok(rel) = file_path.strip_prefix(root) {
        return Some(rel.to_path_buf());
    }
    // Mixed relative/absolute inputs: retry on absolute forms.
    let abs_file = std::path::absolute(file_path).ok()?;
    let abs_root = std::path::absolute(root).ok()?;
    abs_file
        .strip_prefix(&abs_root)
        .ok()
        .map(Path::to_path_buf)
}

fn dotted(rel: &Path) -> String {
    let stem = rel.with_extension("");
    stem.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(".")
}

fn base_name(file_path: &Path) -> String {
    file_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_path.to_string_lossy().into_owned())
}
