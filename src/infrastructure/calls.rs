//! Call Scanner (pass 2)
//!
//! Walks a parsed file, computes the calling context for every call
//! expression and resolves its target against the completed index.

use std::path::Path;
use tracing::trace;
use tree_sitter::Node as TsNode;

use crate::domain::callgraph::CallSite;
use crate::domain::index::SymbolIndex;
use crate::domain::module_path::ModulePath;
use crate::domain::resolver::{CallResolver, CallTarget};
use crate::domain::scope::ScopeStack;
use crate::error::ScanResult;
use crate::infrastructure::python::{self, ParsedFile};

/// A call whose target resolved to a registered definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCall {
    pub source: String,
    pub target: String,
    pub site: CallSite,
}

/// Parse `path` and resolve its calls in source order.
pub fn scan_calls(
    path: &Path,
    project_root: &Path,
    index: &SymbolIndex,
) -> ScanResult<Vec<ResolvedCall>> {
    let parsed = python::parse_file(path)?;
    let module = ModulePath::resolve(path, project_root);
    Ok(collect_calls(&parsed, &module, index))
}

pub fn collect_calls(
    parsed: &ParsedFile,
    module: &ModulePath,
    index: &SymbolIndex,
) -> Vec<ResolvedCall> {
    let mut scanner = CallScanner {
        parsed,
        module,
        resolver: CallResolver::new(index),
        found: Vec::new(),
    };
    let mut scope = ScopeStack::new();
    scanner.visit(parsed.tree.root_node(), &mut scope);
    scanner.found
}

struct CallScanner<'a> {
    parsed: &'a ParsedFile,
    module: &'a ModulePath,
    resolver: CallResolver<'a>,
    found: Vec<ResolvedCall>,
}

impl CallScanner<'_> {
    fn visit(&mut self, node: TsNode<'_>, scope: &mut ScopeStack) {
        match node.kind() {
            "class_definition" | "function_definition" => match self.name_of(&node) {
                Some(name) => {
                    let is_class = node.kind() == "class_definition";
                    scope.with_frame(&name, is_class, |s| self.visit_children(node, s));
                }
                None => self.visit_children(node, scope),
            },
            "decorated_definition" => self.visit_decorated(node, scope),
            "call" => {
                self.record_call(&node, scope);
                self.visit_children(node, scope);
            }
            _ => self.visit_children(node, scope),
        }
    }

    /// Decorators are visited inside the frame of the definition they decorate.
    fn visit_decorated(&mut self, node: TsNode<'_>, scope: &mut ScopeStack) {
        let Some(definition) = node.child_by_field_name("definition") else {
            return self.visit_children(node, scope);
        };
        let Some(name) = self.name_of(&definition) else {
            return self.visit_children(node, scope);
        };
        let is_class = definition.kind() == "class_definition";

        let mut cursor = node.walk();
        let decorators: Vec<TsNode<'_>> = node
            .named_children(&mut cursor)
            .filter(|c| c.kind() == "decorator")
            .collect();

        scope.with_frame(&name, is_class, |s| {
            for decorator in decorators {
                self.visit(decorator, s);
            }
            self.visit_children(definition, s);
        });
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

    fn record_call(&mut self, call: &TsNode<'_>, scope: &ScopeStack) {
        // Module-level calls have no calling definition.
        let Some(source) = scope.context_id(&self.module.module) else {
            return;
        };
        let Some(function) = call.child_by_field_name("function") else {
            return;
        };
        let Some(target) = self.call_target(&function) else {
            return;
        };
        let Some(target_id) = self.resolver.resolve(&self.module.module, scope, target) else {
            return;
        };

        let line = python::node_line(call);
        let site = CallSite {
            file_path: self.parsed.source.display_path().to_string(),
            line,
            snippet: self.parsed.source.line(line),
        };
        trace!(%source, target = %target_id, line, "resolved call");
        self.found.push(ResolvedCall {
            source,
            target: target_id,
            site,
        });
    }

    fn call_target<'t>(&'t self, function: &TsNode<'_>) -> Option<CallTarget<'t>> {
        match function.kind() {
            "identifier" => Some(CallTarget::Name(self.parsed.text_of(function))),
            "attribute" => {
                let method = function.child_by_field_name("attribute")?;
                let receiver = function
                    .child_by_field_name("object")
                    .filter(|o| o.kind() == "identifier")
                    .map(|o| self.parsed.text_of(&o));
                Some(CallTarget::Attribute {
                    receiver,
                    method: self.parsed.text_of(&method),
                })
            }
            _ => None,
        }
    }
}
