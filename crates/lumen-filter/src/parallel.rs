use rayon::prelude::*;
use thiserror::Error;

/// Amount of work, in output elements, from which [`ExecutionStrategy::Auto`] goes parallel.
pub const PARALLEL_THRESHOLD: usize = 100_000;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),
}

/// Controls how the filters distribute their work.
///
/// Every output element is computed by the same sequential sum whichever
/// strategy is used, so all strategies produce bit-identical results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Run sequentially on the current thread.
    Serial,

    /// Use the global Rayon thread pool, one task per row or column.
    Parallel,

    /// Parallel when the output has at least [`PARALLEL_THRESHOLD`] elements,
    /// serial otherwise.
    #[default]
    Auto,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    /// Use this primarily for benchmarking or specific isolation needs.
    Fixed(usize),
}

impl ExecutionStrategy {
    /// Whether an operation producing `work` output elements runs in parallel.
    pub fn is_parallel(&self, work: usize) -> bool {
        match self {
            ExecutionStrategy::Serial => false,
            ExecutionStrategy::Parallel | ExecutionStrategy::Fixed(_) => true,
            ExecutionStrategy::Auto => work >= PARALLEL_THRESHOLD,
        }
    }

    /// Run `op` under this strategy.
    ///
    /// `op` receives whether it should fan out over rayon. For
    /// [`ExecutionStrategy::Fixed`] it runs inside a dedicated pool so that
    /// rayon iterators started by `op` use that pool.
    pub(crate) fn run<R, F>(&self, work: usize, op: F) -> Result<R, ParallelError>
    where
        F: FnOnce(bool) -> R + Send,
        R: Send,
    {
        match *self {
            ExecutionStrategy::Fixed(0) => Err(ParallelError::InvalidThreadCount(0)),
            ExecutionStrategy::Fixed(n) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| ParallelError::BuildError(e.to_string()))?;
                Ok(pool.install(|| op(true)))
            }
            strategy => Ok(op(strategy.is_parallel(work))),
        }
    }
}

/// Evaluate `f` for every index in `0..len`, in order, optionally on rayon.
pub(crate) fn map_indices<T, F>(len: usize, parallel: bool, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Send + Sync,
{
    if parallel {
        (0..len).into_par_iter().map(f).collect()
    } else {
        (0..len).map(f).collect()
    }
}

/// Fill `dst` one chunk of `chunk_len` elements at a time, optionally on rayon.
///
/// `f` receives the chunk index and the chunk. `chunk_len` must be non zero.
pub(crate) fn for_each_chunk<F>(dst: &mut [f64], chunk_len: usize, parallel: bool, f: F)
where
    F: Fn(usize, &mut [f64]) + Send + Sync,
{
    if parallel {
        dst.par_chunks_mut(chunk_len)
            .enumerate()
            .for_each(|(i, chunk)| f(i, chunk));
    } else {
        dst.chunks_mut(chunk_len)
            .enumerate()
            .for_each(|(i, chunk)| f(i, chunk));
    }
}
