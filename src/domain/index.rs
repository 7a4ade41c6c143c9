use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::callgraph::Node;

/// Policy for the bare-name map when two definitions share a simple name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameTieBreak {
    /// The definition scanned last wins. Depends on input file order.
    #[default]
    LastScanned,
    /// The lexicographically smallest qualified id wins, independent of order.
    Lexicographic,
}

/// Registry of every definition found in pass 1.
///
/// Nodes keep insertion order, so suffix scans are deterministic for a fixed
/// input order. A second node with an existing id is dropped.
#[derive(Debug, Default)]
pub struct SymbolIndex {
    nodes: IndexMap<String, Node>,

    // Simple name (and qualified id) -> qualified id
    names: HashMap<String, String>,

    // Acceleration map: simple name -> ids of nodes with that name, in insertion order
    by_name: HashMap<String, Vec<String>>,

    tie_break: NameTieBreak,
}

impl SymbolIndex {
    pub fn new(tie_break: NameTieBreak) -> Self {
        Self {
            tie_break,
            ..Self::default()
        }
    }

    /// Register `node` and record its names. Returns false if the id was already taken.
    pub fn define(&mut self, node: Node) -> bool {
        self.record_name(&node.name, &node.id);
        self.record_name(&node.id, &node.id);
        self.insert_if_absent(node)
    }

    fn insert_if_absent(&mut self, node: Node) -> bool {
        if self.nodes.contains_key(&node.id) {
            return false;
        }
        self.by_name
            .entry(node.name.clone())
            .or_default()
            .push(node.id.clone());
        self.nodes.insert(node.id.clone(), node);
        true
    }

    fn record_name(&mut self, key: &str, id: &str) {
        match self.tie_break {
            NameTieBreak::LastScanned => {
                self.names.insert(key.to_string(), id.to_string());
            }
            NameTieBreak::Lexicographic => {
                let slot = self.names.entry(key.to_string()).or_insert_with(|| id.to_string());
                if id < slot.as_str() {
                    *slot = id.to_string();
                }
            }
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Bare-name lookup.
    pub fn lookup_name(&self, name: &str) -> Option<&str> {
        self.names.get(name).map(String::as_str)
    }

    /// Ids ending with `.name`, in insertion order.
    pub fn ids_named(&self, name: &str) -> &[String] {
        self.by_name.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Insertion position of `id`, used to pick the earliest of several candidates.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.nodes.get_index_of(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }
}
