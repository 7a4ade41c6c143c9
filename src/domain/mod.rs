// Domain model for pycallgraph: graph types, registries, scope tracking and
// call-target resolution. Nothing here touches the filesystem or the parser.

pub mod callgraph;
pub mod edges;
pub mod index;
pub mod module_path;
pub mod resolver;
pub mod scope;
