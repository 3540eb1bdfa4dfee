//! Structured concurrency with scoped OS threads

use super::{worker_failed, Backend, Scheduler};
use crate::error::TriangleResult;
use std::thread;

/// Spawns one scoped thread per task and joins them in input order.
///
/// The scope guarantees no task outlives the call.
#[derive(Debug, Clone, Copy)]
pub struct ScopedThreads {
    workers: usize,
}

impl ScopedThreads {
    pub fn new(workers: usize) -> Self {
        Self { workers }
    }
}

impl Scheduler for ScopedThreads {
    fn backend(&self) -> Backend {
        Backend::Scoped
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
        thread::scope(|scope| {
            let handles: Vec<_> = inputs
                .into_iter()
                .map(|input| scope.spawn(move || task(input)))
                .collect();

            handles
                .into_iter()
                .enumerate()
                .map(|(owner, handle)| {
                    handle
                        .join()
                        .map_err(|payload| worker_failed(owner, payload))
                })
                .collect()
        })
    }
}
