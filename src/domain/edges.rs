use indexmap::IndexMap;

use crate::domain::callgraph::{CallSite, Edge};

/// Edges keyed by `(source, target)`. The first resolved call creates the
/// edge, every call appends a call site.
#[derive(Debug, Default)]
pub struct EdgeRegistry {
    edges: IndexMap<(String, String), Edge>,
}

impl EdgeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one call from `source` to `target`. Returns true if a new edge was created.
    pub fn record(&mut self, source: &str, target: &str, site: CallSite) -> bool {
        let key = (source.to_string(), target.to_string());
        match self.edges.get_mut(&key) {
            Some(edge) => {
                edge.call_sites.push(site);
                false
            }
            None => {
                self.edges.insert(key, Edge::new(source, target, site));
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn call_site_count(&self) -> usize {
        self.edges.values().map(Edge::call_count).sum()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(line: usize) -> CallSite {
        CallSite {
            file_path: "m.py".to_string(),
            line,
            snippet: format!("call_{}()", line),
        }
    }

    #[test]
    fn test_repeated_calls_accumulate_sites() {
        let mut registry = EdgeRegistry::new();
        assert!(registry.record("m.f", "m.g", site(2)));
        assert!(!registry.record("m.f", "m.g", site(3)));
        assert!(!registry.record("m.f", "m.g", site(9)));

        assert_eq!(registry.len(), 1);
        let lines: Vec<usize> = registry
            .edges()
            .next()
            .unwrap()
            .call_sites
            .iter()
            .map(|s| s.line)
            .collect();
        assert_eq!(lines, vec![2, 3, 9]);
        assert_eq!(registry.call_site_count(), 3);
    }

    #[test]
    fn test_direction_matters() {
        let mut registry = EdgeRegistry::new();
        registry.record("m.f", "m.g", site(2));
        registry.record("m.g", "m.f", site(5));
        registry.record("m.f", "m.f", site(6));
        assert_eq!(registry.len(), 3);
        let loops: Vec<&Edge> = registry.edges().filter(|e| e.is_self_loop()).collect();
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].target, "m.f");
    }
}
