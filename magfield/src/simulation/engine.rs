//! Execution resource selection for the pair scan
//!
//! The offload hint picks between the global rayon pool (primary resource)
//! and an optional dedicated pool (auxiliary resource). Small scans skip the
//! thread fan-out and run on the calling thread. None of these choices change
//! what the kernel computes

use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::Result;

/// Pair count (M * N) below which the scan stays on the calling thread
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Where a parallel scan is executed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionResource {
    Primary, // global rayon pool
    Offload, // dedicated pool owned by the engine
}

#[derive(Debug, Clone)]
pub struct Engine {
    pub parallel_threshold: usize, // minimum pair count for a parallel scan
    pub sequential: bool, // force every scan onto the calling thread
    offload_pool: Option<Arc<ThreadPool>>, // auxiliary resource, if configured
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Primary resource only; the offload hint falls back to it
    pub fn new() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            sequential: false,
            offload_pool: None,
        }
    }

    /// Single-threaded engine, every scan runs in iteration order
    pub fn sequential() -> Self {
        Self {
            sequential: true,
            ..Self::new()
        }
    }

    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    /// Build the auxiliary pool used when the offload hint is set
    /// `threads == 0` lets rayon pick the thread count
    pub fn with_offload_threads(mut self, threads: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("magfield-offload-{i}"))
            .build()?;
        self.offload_pool = Some(Arc::new(pool));
        Ok(self)
    }

    /// Resource a parallel scan runs on for the given hint
    pub fn resource(&self, offload: bool) -> ExecutionResource {
        if offload && self.offload_pool.is_some() {
            ExecutionResource::Offload
        } else {
            ExecutionResource::Primary
        }
    }

    /// Whether a scan over `pairs` pairs should fan out to a pool
    pub fn is_parallel(&self, pairs: usize) -> bool {
        !self.sequential && pairs >= self.parallel_threshold
    }

    /// Run either the sequential or the parallel variant of a scan
    pub(crate) fn dispatch<R, S, P>(&self, offload: bool, pairs: usize, sequential: S, parallel: P) -> R
    where
        R: Send,
        S: FnOnce() -> R,
        P: FnOnce() -> R + Send,
    {
        if !self.is_parallel(pairs) {
            return sequential();
        }

        match (self.resource(offload), &self.offload_pool) {
            (ExecutionResource::Offload, Some(pool)) => pool.install(parallel),
            _ => parallel(),
        }
    }
}
