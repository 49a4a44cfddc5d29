//! Parallel processing configuration
//!
//! The composites accumulate daily slices with rayon-parallel `Zip` loops;
//! this module sizes the global Rayon pool those loops run on.

use crate::errors::{Result, SeaVisError};
use rayon::ThreadPoolBuilder;
use tracing::info;

/// Configuration for parallel processing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParallelConfig {
    pub num_threads: Option<usize>,
}

impl ParallelConfig {
    pub fn new(num_threads: Option<usize>) -> Self {
        Self { num_threads }
    }

    /// Use every available CPU core
    pub fn all_cores() -> Self {
        Self {
            num_threads: Some(num_cpus::get()),
        }
    }

    pub fn with_threads(num_threads: usize) -> Self {
        Self {
            num_threads: Some(num_threads),
        }
    }

    /// Set up the global Rayon thread pool.
    ///
    /// # Errors
    ///
    /// Returns `ThreadPoolError` for a zero thread count or if the global
    /// pool was already initialised.
    pub fn setup_global_pool(&self) -> Result<()> {
        match self.num_threads {
            Some(0) => Err(SeaVisError::ThreadPoolError(
                "thread count must be at least 1".to_string(),
            )),
            Some(num_threads) => {
                ThreadPoolBuilder::new()
                    .num_threads(num_threads)
                    .build_global()
                    .map_err(|e| {
                        SeaVisError::ThreadPoolError(format!(
                            "Failed to initialize thread pool with {num_threads} threads: {e}"
                        ))
                    })?;
                info!(threads = num_threads, "configured parallel processing");
                Ok(())
            }
            None => {
                info!(
                    threads = rayon::current_num_threads(),
                    cores = num_cpus::get(),
                    "using default thread pool"
                );
                Ok(())
            }
        }
    }
}
