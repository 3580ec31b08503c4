//! Rayon-based parallelisation utilities.
//!
//! Grid evaluation is embarrassingly parallel: every cell is an independent
//! pure computation. These helpers switch between sequential and Rayon
//! evaluation on a work-size threshold, with identical output order.

use rayon::prelude::*;

/// Minimum items handed to one Rayon task.
pub const DEFAULT_BATCH_SIZE: usize = 4;

/// Default number of work units before parallelism pays off.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Configuration for parallel execution.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParallelConfig {
    /// Minimum items per Rayon task
    pub batch_size: usize,
    /// Minimum work units before using parallelism
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ParallelConfig {
    /// Creates a new parallel configuration.
    pub fn new(batch_size: usize, parallel_threshold: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            parallel_threshold,
        }
    }

    /// Configuration that never parallelises.
    pub fn sequential() -> Self {
        Self::new(DEFAULT_BATCH_SIZE, usize::MAX)
    }

    /// Returns whether to use parallel processing for the given amount of work.
    #[inline]
    pub fn should_parallelize(&self, work_units: usize) -> bool {
        work_units >= self.parallel_threshold
    }
}

/// Map `items` in order, in parallel when `work_units` reaches the threshold.
///
/// `work_units` lets callers weigh items unevenly (a grid row costs one unit
/// per column).
pub fn map_with_config<T, R, F>(items: &[T], work_units: usize, config: &ParallelConfig, mapper: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    if config.should_parallelize(work_units) {
        items
            .par_iter()
            .with_min_len(config.batch_size.max(1))
            .map(mapper)
            .collect()
    } else {
        items.iter().map(mapper).collect()
    }
}
