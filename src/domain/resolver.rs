//! Call Target Resolution
//!
//! Best-effort mapping from a call expression to a registered definition.
//! There is no import or type analysis; each rule below either yields a
//! registered id or defers to the next one.

use crate::domain::index::SymbolIndex;
use crate::domain::scope::ScopeStack;

/// Conventional name of the current-instance receiver.
pub const SELF_RECEIVER: &str = "self";

/// Initializer method a class-like call is mapped to.
const INITIALIZER: &str = "__init__";

/// The callee of a call expression, as far as the scanner can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallTarget<'a> {
    /// `f(...)`
    Name(&'a str),
    /// `obj.method(...)`; `receiver` is `None` when `obj` is not a plain name.
    Attribute {
        receiver: Option<&'a str>,
        method: &'a str,
    },
}

/// Resolves call targets against a completed [`SymbolIndex`].
pub struct CallResolver<'a> {
    index: &'a SymbolIndex,
}

impl<'a> CallResolver<'a> {
    pub fn new(index: &'a SymbolIndex) -> Self {
        Self { index }
    }

    /// Resolve `target` called from `scope` inside `module`.
    /// Only ids present in the index are returned.
    pub fn resolve(&self, module: &str, scope: &ScopeStack, target: CallTarget<'_>) -> Option<String> {
        let resolved = match target {
            CallTarget::Name(name) => self.resolve_name(module, name),
            CallTarget::Attribute { receiver, method } => {
                self.resolve_attribute(module, scope, receiver, method)
            }
        }?;
        self.index.contains(&resolved).then_some(resolved)
    }

    fn resolve_name(&self, module: &str, name: &str) -> Option<String> {
        let local = format!("{}.{}", module, name);
        if self.index.contains(&local) {
            return Some(local);
        }

        if let Some(id) = self.index.lookup_name(name) {
            return Some(id.to_string());
        }

        // Suffix scan: `.name`, or `.name.__init__` for class-like calls.
        let init_suffix = format!(".{}.{}", name, INITIALIZER);
        let direct = self.index.ids_named(name).first();
        let init = self
            .index
            .ids_named(INITIALIZER)
            .iter()
            .find(|id| id.ends_with(&init_suffix));

        match (direct, init) {
            (Some(d), Some(i)) => {
                if self.index.position(i) < self.index.position(d) {
                    Some(i.clone())
                } else {
                    Some(d.clone())
                }
            }
            (Some(d), None) => Some(d.clone()),
            (None, Some(i)) => Some(i.clone()),
            (None, None) => None,
        }
    }

    fn resolve_attribute(
        &self,
        module: &str,
        scope: &ScopeStack,
        receiver: Option<&str>,
        method: &str,
    ) -> Option<String> {
        if receiver == Some(SELF_RECEIVER) && scope.depth() >= 2 {
            if let Some(owner) = scope.parent_path() {
                let candidate = format!("{}.{}.{}", module, owner, method);
                if self.index.contains(&candidate) {
                    return Some(candidate);
                }
            }
        }

        let candidates = self.index.ids_named(method);
        if let [only] = candidates {
            return Some(only.clone());
        }

        // Treat the receiver name as the owning class or module segment.
        let obj = receiver?;
        let suffix = format!(".{}.{}", obj, method);
        candidates.iter().find(|id| id.ends_with(&suffix)).cloned()
    }
}
