//! Single-threaded baseline

use super::{worker_failed, Backend, Scheduler};
use crate::error::TriangleResult;
use std::panic::{self, AssertUnwindSafe};

/// Runs every task inline, in input order
#[derive(Debug, Clone, Copy)]
pub struct Sequential {
    workers: usize,
}

impl Sequential {
    /// `workers` only sets how many partitions callers create; execution is serial.
    pub fn new(workers: usize) -> Self {
        Self { workers }
    }
}

impl Scheduler for Sequential {
    fn backend(&self) -> Backend {
        Backend::Sequential
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
        inputs
            .into_iter()
            .enumerate()
            .map(|(owner, input)| {
                panic::catch_unwind(AssertUnwindSafe(|| task(input)))
                    .map_err(|payload| worker_failed(owner, payload))
            })
            .collect()
    }
}
