// Infrastructure for pycallgraph: parsing, the two scan passes, source
// discovery and the scan thread pool.

pub mod calls;
pub mod concurrency;
pub mod definitions;
pub mod project_loader;
pub mod python;

pub use calls::{scan_calls, ResolvedCall};
pub use definitions::scan_definitions;
pub use project_loader::ProjectLoader;
pub use python::SourceFile;
