//! Work-stealing thread pool backend

use super::{worker_failed, Backend, Scheduler};
use crate::error::{TriangleError, TriangleResult};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::panic::{self, AssertUnwindSafe};

/// Tasks run on a dedicated rayon pool sized to the worker count, so runs with
/// different worker counts do not share the global pool.
pub struct RayonPool {
    pool: ThreadPool,
    workers: usize,
}

impl RayonPool {
    pub fn new(workers: usize) -> TriangleResult<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("tricount-rayon-{}", i))
            .build()
            .map_err(|e| TriangleError::Runtime(format!("failed to build rayon pool: {}", e)))?;
        Ok(Self { pool, workers })
    }
}

impl Scheduler for RayonPool {
    fn backend(&self) -> Backend {
        Backend::Rayon
    }

    fn workers(&self) -> usize {
        self.workers
    }

    fn fork_join<I, O, F>(&self, inputs: Vec<I>, task: F) -> TriangleResult<Vec<O>>
    where
        I: Send + 'static,
        O: Send + 'static,
        F: Fn(I) -> O + Send + Sync + 'static,
    {
        let task = &task;
        self.pool.install(|| {
            inputs
                .into_par_iter()
                .enumerate()
                .map(|(owner, input)| {
                    panic::catch_unwind(AssertUnwindSafe(|| task(input)))
                        .map_err(|payload| worker_failed(owner, payload))
                })
                .collect()
        })
    }
}
