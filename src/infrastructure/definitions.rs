//! Definition Scanner (pass 1)
//!
//! Walks a parsed file and produces one [`Node`] per function or method
//! definition, with ids synthesized from the enclosing scope.

use std::path::Path;
use tree_sitter::Node as TsNode;

use crate::domain::callgraph::{Node, NodeKind};
use crate::domain::module_path::ModulePath;
use crate::domain::scope::ScopeStack;
use crate::error::ScanResult;
use crate::infrastructure::python::{self, ParsedFile};

/// Parse `path` and collect its definitions in source order.
pub fn scan_definitions(path: &Path, project_root: &Path) -> ScanResult<Vec<Node>> {
    let parsed = python::parse_file(path)?;
    let module = ModulePath::resolve(path, project_root);
    Ok(collect_definitions(&parsed, &module))
}

pub fn collect_definitions(parsed: &ParsedFile, module: &ModulePath) -> Vec<Node> {
    let mut scanner = DefinitionScanner {
        parsed,
        module,
        found: Vec::new(),
    };
    let mut scope = ScopeStack::new();
    scanner.visit(parsed.tree.root_node(), &mut scope);
    scanner.found
}

struct DefinitionScanner<'a> {
    parsed: &'a ParsedFile,
    module: &'a ModulePath,
    found: Vec<Node>,
}

impl DefinitionScanner<'_> {
    fn visit(&mut self, node: TsNode<'_>, scope: &mut ScopeStack) {
        match node.kind() {
            "class_definition" => match self.name_of(&node) {
                Some(name) => scope.with_frame(&name, true, |s| self.visit_children(node, s)),
                None => self.visit_children(node, scope),
            },
            "function_definition" => match self.name_of(&node) {
                Some(name) => {
                    self.register(&node, &name, scope);
                    // A function body never counts as a class body for its children.
                    scope.with_frame(&name, false, |s| self.visit_children(node, s));
                }
                None => self.visit_children(node, scope),
            },
            _ => self.visit_children(node, scope),
        }
    }

    fn visit_children(&mut self, node: TsNode<'_>, scope: &mut ScopeStack) {
        let mut cursor = node.walk();
        let children: Vec<TsNode<'_>> = node.named_children(&mut cursor).collect();
        for child in children {
            self.visit(child, scope);
        }
    }

    fn name_of(&self, node: &TsNode<'_>) -> Option<String> {
        node.child_by_field_name("name")
            .map(|n| self.parsed.text_of(&n).to_string())
            .filter(|n| !n.is_empty())
    }

    fn register(&mut self, node: &TsNode<'_>, name: &str, scope: &ScopeStack) {
        let kind = if scope.in_class_body() {
            NodeKind::Method
        } else {
            NodeKind::Function
        };
        let start_line = python::node_line(node);
        let end_line = python::statement_end_line(node);
        let source = &self.parsed.source;

        self.found.push(Node {
            id: scope.qualify(&self.module.module, name),
            name: name.to_string(),
            module: self.module.module.clone(),
            package: self.module.package.clone(),
            kind,
            file_path: source.display_path().to_string(),
            start_line,
            end_line,
            source_text: source.lines(start_line, end_line),
        });
    }
}
