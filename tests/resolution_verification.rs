//! Resolution and registry behaviour of a whole generation run:
//! unresolved calls, unreadable files, call-site accumulation, recursion,
//! first-definition-wins and determinism.

use indoc::indoc;
use pretty_assertions::assert_eq;
use pycallgraph::config::NameTieBreak;
use pycallgraph::domain::callgraph::SOURCE_NOT_AVAILABLE;
use pycallgraph::ports::DotExporter;
use pycallgraph::{CallGraph, CallGraphGenerator, GeneratorConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_project(root: &Path, files: &[(&str, &str)]) -> Vec<PathBuf> {
    files
        .iter()
        .map(|(name, content)| {
            let path = root.join(name);
            fs::write(&path, content).unwrap();
            path
        })
        .collect()
}

fn sequential(root: &Path) -> CallGraphGenerator {
    CallGraphGenerator::new(GeneratorConfig::new(root).sequential())
}

fn edge_pairs(graph: &CallGraph) -> Vec<(String, String, usize)> {
    graph
        .edges
        .iter()
        .map(|e| (e.source.clone(), e.target.clone(), e.call_sites.len()))
        .collect()
}

#[test]
fn test_unresolved_library_call_creates_no_edge() {
    let dir = tempdir().unwrap();
    let files = write_project(
        dir.path(),
        &[(
            "app.py",
            indoc! {"
                import os

                def run():
                    print(os.getcwd())
                    sorted([3, 1])
            "},
        )],
    );

    let mut generator = sequential(dir.path());
    let graph = generator.generate(&files);
    assert_eq!(graph.nodes.len(), 1);
    assert!(graph.edges.is_empty());
    assert!(generator.report().calls.skipped.is_empty());
}

#[test]
fn test_file_deleted_between_passes() {
    let dir = tempdir().unwrap();
    let files = write_project(
        dir.path(),
        &[
            ("keep.py", "def stay():\n    leave()\n"),
            ("gone.py", "def leave():\n    pass\n"),
        ],
    );

    let mut generator = sequential(dir.path());
    generator.collect_definitions(&files);
    fs::remove_file(&files[1]).unwrap();
    generator.collect_calls(&files);

    // Node text was captured in pass 1, before the file disappeared.
    let graph = generator.graph();
    let leave = graph.node("gone.leave").unwrap();
    assert_eq!(leave.source_text, "def leave():\n    pass");
    assert_ne!(leave.source_text, SOURCE_NOT_AVAILABLE);
    assert_eq!(
        edge_pairs(&graph),
        vec![("keep.stay".to_string(), "gone.leave".to_string(), 1)]
    );
    let site = &graph.edges[0].call_sites[0];
    assert_eq!(site.file_path, files[0].display().to_string());
    assert_eq!(site.snippet, "leave()");

    let report = generator.report();
    assert_eq!(report.calls.scanned, 1);
    assert_eq!(report.calls.skipped.len(), 1);
    assert_eq!(report.calls.skipped[0].path, files[1]);
}

#[test]
fn test_repeated_calls_share_one_edge() {
    let dir = tempdir().unwrap();
    let files = write_project(
        dir.path(),
        &[(
            "calc.py",
            indoc! {"
                def add(a, b):
                    return a + b

                def total(xs):
                    s = add(0, 0)
                    for x in xs:
                        s = add(s, x)
                    return add(s, 0)
            "},
        )],
    );

    let graph = sequential(dir.path()).generate(&files);
    assert_eq!(graph.edges.len(), 1);
    let lines: Vec<usize> = graph.edges[0].call_sites.iter().map(|s| s.line).collect();
    assert_eq!(lines, vec![5, 7, 8]);
    assert_eq!(graph.edges[0].call_sites[1].snippet, "s = add(s, x)");
}

#[test]
fn test_recursion_is_a_self_loop() {
    let dir = tempdir().unwrap();
    let files = write_project(
        dir.path(),
        &[(
            "rec.py",
            indoc! {"
                def fact(n):
                    return 1 if n == 0 else n * fact(n - 1)

                def ping(n):
                    return pong(n - 1)

                def pong(n):
                    return ping(n - 1)
            "},
        )],
    );

    let graph = sequential(dir.path()).generate(&files);
    assert!(graph.edge("rec.fact", "rec.fact").unwrap().is_self_loop());
    assert!(graph.edge("rec.ping", "rec.pong").is_some());
    assert!(graph.edge("rec.pong", "rec.ping").is_some());
}

#[test]
fn test_first_definition_of_an_id_wins() {
    let dir = tempdir().unwrap();
    let files = write_project(
        dir.path(),
        &[("dup.py", "def f():\n    return 1\n\ndef f():\n    return 2\n")],
    );

    let graph = sequential(dir.path()).generate(&files);
    assert_eq!(graph.nodes.len(), 1);
    assert_eq!(graph.nodes[0].start_line, 1);
    assert_eq!(graph.nodes[0].source_text, "def f():\n    return 1");
}

#[test]
fn test_class_instantiation_maps_to_initializer() {
    let dir = tempdir().unwrap();
    let files = write_project(
        dir.path(),
        &[
            (
                "models.py",
                indoc! {"
                    class Account:
                        def __init__(self, owner):
                            self.owner = owner
                "},
            ),
            (
                "service.py",
                indoc! {"
                    def open_account(name):
                        return Account(name)
                "},
            ),
        ],
    );

    let graph = sequential(dir.path()).generate(&files);
    assert_eq!(
        edge_pairs(&graph),
        vec![(
            "service.open_account".to_string(),
            "models.Account.__init__".to_string(),
            1
        )]
    );
}

#[test]
fn test_receiver_name_picks_between_same_named_methods() {
    let dir = tempdir().unwrap();
    let files = write_project(
        dir.path(),
        &[
            (
                "shapes.py",
                indoc! {"
                    class Circle:
                        def area(self):
                            return 3

                    class Square:
                        def area(self):
                            return 4
                "},
            ),
            (
                "report.py",
                indoc! {"
                    def describe(Square, thing):
                        Square.area()
                        thing.area()
                "},
            ),
        ],
    );

    let graph = sequential(dir.path()).generate(&files);
    // `thing.area()` is ambiguous and stays unresolved.
    assert_eq!(
        edge_pairs(&graph),
        vec![(
            "report.describe".to_string(),
            "shapes.Square.area".to_string(),
            1
        )]
    );
}

#[test]
fn test_sequential_runs_are_identical() {
    let dir = tempdir().unwrap();
    let files = write_project(
        dir.path(),
        &[
            ("a.py", "def run():\n    step()\n\ndef step():\n    pass\n"),
            ("b.py", "def step():\n    run()\n\ndef run():\n    step()\n"),
            ("c.py", "class K:\n    def go(self):\n        self.go()\n        run()\n"),
        ],
    );

    let first = sequential(dir.path()).generate(&files);
    let second = sequential(dir.path()).generate(&files);
    assert_eq!(first, second);

    let parallel = CallGraphGenerator::for_root(dir.path()).generate(&files);
    assert_eq!(first, parallel);
}

#[test]
fn test_bare_name_tie_break() {
    let dir = tempdir().unwrap();
    let files = write_project(
        dir.path(),
        &[
            ("alpha.py", "def shared():\n    pass\n"),
            ("beta.py", "def shared():\n    pass\n"),
            ("caller.py", "def go():\n    shared()\n"),
        ],
    );
    let reversed = vec![files[1].clone(), files[0].clone(), files[2].clone()];

    let target = |tie_break: NameTieBreak, order: &[PathBuf]| {
        let config = GeneratorConfig::new(dir.path())
            .sequential()
            .with_tie_break(tie_break);
        let graph = CallGraphGenerator::new(config).generate(order);
        graph.edges[0].target.clone()
    };

    // Last scanned wins: depends on input order.
    assert_eq!(target(NameTieBreak::LastScanned, &files), "beta.shared");
    assert_eq!(target(NameTieBreak::LastScanned, &reversed), "alpha.shared");

    // Lexicographic: stable under reordering.
    assert_eq!(target(NameTieBreak::Lexicographic, &files), "alpha.shared");
    assert_eq!(target(NameTieBreak::Lexicographic, &reversed), "alpha.shared");
}

#[test]
fn test_generate_dot_on_fresh_instance_matches_rendered_graph() {
    let dir = tempdir().unwrap();
    let files = write_project(
        dir.path(),
        &[(
            "loop.py",
            indoc! {"
                def tick():
                    pass

                class Clock:
                    def run(self):
                        tick()
                        tick()
                        self.run()
            "},
        )],
    );

    let dot = sequential(dir.path()).generate_dot(&files);
    let graph = sequential(dir.path()).generate(&files);
    assert_eq!(dot, DotExporter::to_dot(&graph.nodes, &graph.edges));

    assert!(dot.contains("\"loop.Clock.run\" [label=\"run\\n(method)\"];"));
    assert!(dot.contains("\"loop.Clock.run\" -> \"loop.tick\" [label=\"2\"];"));
    assert!(dot.contains("\"loop.Clock.run\" -> \"loop.Clock.run\";"));
}

#[test]
fn test_module_paths_outside_root_fall_back_to_base_name() {
    let project = tempdir().unwrap();
    let elsewhere = tempdir().unwrap();
    let files = write_project(elsewhere.path(), &[("scratch.py", "def probe():\n    pass\n")]);

    let graph = sequential(project.path()).generate(&files);
    assert_eq!(graph.nodes[0].id, "scratch.probe");
    assert_eq!(graph.nodes[0].package, "scratch");
}
