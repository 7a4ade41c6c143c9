//! Concurrency management for pycallgraph.
//! Configures the rayon pool used for per-file scanning within a pass.

use anyhow::{Context, Result};
use tracing::info;

/// Worker count used when none is configured: half the cores, minimum 1.
pub fn default_workers() -> usize {
    std::cmp::max(1, num_cpus::get() / 2)
}

/// Initialize the global rayon thread pool with `workers` threads
/// (or [`default_workers`] when `None`).
pub fn init_thread_pool(workers: Option<usize>) -> Result<usize> {
    let workers = workers.filter(|w| *w > 0).unwrap_or_else(default_workers);

    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("pycallgraph-scan-{}", i))
        .build_global()
        .context("Failed to initialize the scan thread pool")?;

    info!(workers, cores = num_cpus::get(), "initialized thread pool");
    Ok(workers)
}
