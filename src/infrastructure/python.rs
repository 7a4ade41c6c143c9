//! Python parsing via tree-sitter.
//!
//! Provides the parsed tree of a file together with its text, and the line
//! and snippet accessors the scanners need.

use std::fs;
use std::path::{Path, PathBuf};
use tree_sitter::{Node as TsNode, Parser, Tree};

use crate::domain::callgraph::SOURCE_NOT_AVAILABLE;
use crate::error::{ScanError, ScanResult};

/// Python 2 statement forms the grammar still accepts but Python 3 rejects.
const LEGACY_STATEMENTS: &[&str] = &["print_statement", "exec_statement"];

/// Text of one source file, split into lines.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
    display: String,
    text: String,
    lines: Vec<String>,
}

impl SourceFile {
    /// Read `path`, failing if the file cannot be read as UTF-8.
    pub fn read(path: &Path) -> ScanResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| ScanError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_text(path, text))
    }

    pub fn from_text(path: &Path, text: String) -> Self {
        let lines = text.lines().map(str::to_string).collect();
        Self {
            path: path.to_path_buf(),
            display: path.display().to_string(),
            text,
            lines,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn display_path(&self) -> &str {
        &self.display
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Verbatim lines `start..=end` (1-based), or [`SOURCE_NOT_AVAILABLE`].
    pub fn lines(&self, start: usize, end: usize) -> String {
        if start == 0 || end < start || end > self.lines.len() {
            return SOURCE_NOT_AVAILABLE.to_string();
        }
        self.lines[start - 1..end].join("\n")
    }

    /// Trimmed text of line `line` (1-based), empty if out of range.
    pub fn line(&self, line: usize) -> String {
        line.checked_sub(1)
            .and_then(|i| self.lines.get(i))
            .map(|l| l.trim().to_string())
            .unwrap_or_default()
    }
}

/// A successfully parsed Python file.
pub struct ParsedFile {
    pub source: SourceFile,
    pub tree: Tree,
}

impl ParsedFile {
    /// Text covered by `node`.
    pub fn text_of(&self, node: &TsNode<'_>) -> &str {
        node.utf8_text(self.source.text().as_bytes())
            .unwrap_or_default()
    }
}

/// Read and parse `path`. Trees with syntax errors are rejected.
pub fn parse_file(path: &Path) -> ScanResult<ParsedFile> {
    let source = SourceFile::read(path)?;
    parse_source(source)
}

pub fn parse_source(source: SourceFile) -> ScanResult<ParsedFile> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|e| ScanError::Grammar(e.to_string()))?;

    let tree = parser.parse(source.text(), None).ok_or_else(|| ScanError::Syntax {
        path: source.path().to_path_buf(),
        line: 1,
    })?;

    let root = tree.root_node();
    let error_line = if root.has_error() {
        Some(first_error_line(root).unwrap_or(1))
    } else {
        first_legacy_statement_line(root)
    };
    if let Some(line) = error_line {
        return Err(ScanError::Syntax {
            path: source.path().to_path_buf(),
            line,
        });
    }

    Ok(ParsedFile { source, tree })
}

/// 1-based line of the node's first row.
pub fn node_line(node: &TsNode<'_>) -> usize {
    node.start_position().row + 1
}

/// 1-based line of the node's last row.
pub fn node_end_line(node: &TsNode<'_>) -> usize {
    let start = node.start_position();
    let end = node.end_position();
    // A node ending at column 0 stops before that row.
    if end.column == 0 && end.row > start.row {
        end.row
    } else {
        end.row + 1
    }
}

/// 1-based line of the last statement of a definition or compound statement.
///
/// Comments after the last statement of a block belong to the block in the
/// tree but are not part of the statement range.
pub fn statement_end_line(node: &TsNode<'_>) -> usize {
    let mut cursor = node.walk();
    let last = node
        .named_children(&mut cursor)
        .filter(|c| c.kind() != "comment")
        .last();

    match last {
        Some(child) if node.kind() == "block" || opens_block(&child) => statement_end_line(&child),
        _ => node_end_line(node),
    }
}

/// Children whose extent may end in a block: bodies, clauses and nested definitions.
fn opens_block(node: &TsNode<'_>) -> bool {
    let kind = node.kind();
    kind == "block" || kind.ends_with("_clause") || kind.ends_with("_definition")
}

fn first_error_line(node: TsNode<'_>) -> Option<usize> {
    if node.is_error() || node.is_missing() {
        return Some(node_line(&node));
    }
    let mut cursor = node.walk();
    let children: Vec<TsNode<'_>> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|c| c.has_error())
        .find_map(first_error_line)
}

fn first_legacy_statement_line(node: TsNode<'_>) -> Option<usize> {
    if LEGACY_STATEMENTS.contains(&node.kind()) {
        return Some(node_line(&node));
    }
    let mut cursor = node.walk();
    let children: Vec<TsNode<'_>> = node.named_children(&mut cursor).collect();
    children.into_iter().find_map(first_legacy_statement_line)
}
