// Main library entry point for pycallgraph.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ports;

pub use application::CallGraphGenerator;
pub use config::GeneratorConfig;
pub use domain::callgraph::{CallGraph, CallSite, Edge, Node, NodeKind};
