//! Async task group backend
//!
//! The kernel is CPU-bound, so tasks go to tokio's blocking pool rather than
//! the async worker threads.

use super::{Backend, Scheduler};
use crate::error::{TriangleError, TriangleResult};
use std::sync::Arc;
use tokio::runtime::{Builder, Runtime};

/// Owns a multi-threaded tokio runtime; each task is a `spawn_blocking` job
/// and the handles are awaited in input order.
///
/// `fork_join` blocks on the runtime, so it must not be called from inside
/// another tokio runtime.
pub struct AsyncTasks {
    runtime: Runtime,
    workers: usize,
}

impl AsyncTasks {
    pub fn new(workers: usize) -> TriangleResult<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(workers)
            .max_blocking_threads(workers)
            .thread_name("tricount-async")
            .build()
            .map_err(|e| TriangleError::Runtime(format!("failed to build tokio runtime: {}", e)))?;
        Ok(Self { runtime, workers })
    }
}

impl Scheduler for AsyncTasks {
    fn backend(&self) -> Backend {
        Backend::Async
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
        let task = Arc::new(task);
        self.runtime.block_on(async move {
            let handles: Vec<_> = inputs
                .into_iter()
                .map(|input| {
                    let task = Arc::clone(&task);
                    tokio::task::spawn_blocking(move || task(input))
                })
                .collect();

            let mut outputs = Vec::with_capacity(handles.len());
            for (owner, handle) in handles.into_iter().enumerate() {
                let output = handle.await.map_err(|e| TriangleError::WorkerFailed {
                    owner,
                    reason: e.to_string(),
                })?;
                outputs.push(output);
            }
            Ok(outputs)
        })
    }
}
