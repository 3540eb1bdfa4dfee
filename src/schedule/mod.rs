//! Fork-join scheduling backends
//!
//! Every backend implements the same contract: run one task per input, wait
//! for all of them, and return the outputs in input order. The kernel never
//! knows which backend is driving it.

pub mod async_tasks;
pub mod rayon_pool;
pub mod scoped;
pub mod sequential;

pub use async_tasks::AsyncTasks;
pub use rayon_pool::RayonPool;
pub use scoped::ScopedThreads;
pub use sequential::Sequential;

use crate::error::{TriangleError, TriangleResult};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::str::FromStr;

/// Concurrency backend selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Tasks run one after another on the calling thread
    Sequential,
    /// Dedicated rayon thread pool
    Rayon,
    /// One scoped OS thread per task
    Scoped,
    /// Blocking jobs on a dedicated tokio runtime
    Async,
}

impl Backend {
    pub const ALL: [Backend; 4] = [
        Backend::Sequential,
        Backend::Rayon,
        Backend::Scoped,
        Backend::Async,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Sequential => "sequential",
            Backend::Rayon => "rayon",
            Backend::Scoped => "scoped",
            Backend::Async => "async",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = TriangleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" | "serial" => Ok(Backend::Sequential),
            "rayon" | "pool" => Ok(Backend::Rayon),
            "scoped" | "threads" => Ok(Backend::Scoped),
            "async" | "tokio" => Ok(Backend::Async),
            other => Err(TriangleError::Config(format!("unknown backend '{}'", other))),
        }
    }
}

/// Submit independent tasks and join them all.
pub trait Scheduler: Send + Sync {
    fn backend(&self) -> Backend;

    /// Degree of parallelism this scheduler was built for
    fn workers(&self) -> usize;

    /// Run `task` once per input and return the outputs in input order.
    ///
    /// Returns only after every task has finished. A panicking task becomes
    /// [`TriangleError::WorkerFailed`] carrying the input's position.
    fn fork_join<I, O, F>(&self, inputs: Vec<I>, task: F) -> TriangleResult<Vec<O>>
    where
        I: Send + 'static,
        O: Send + 'static,
        F: Fn(I) -> O + Send + Sync + 'static;
}

/// One concrete scheduler per [`Backend`]
pub enum Executor {
    Sequential(Sequential),
    Rayon(RayonPool),
    Scoped(ScopedThreads),
    Async(AsyncTasks),
}

impl Executor {
    pub fn new(backend: Backend, workers: usize) -> TriangleResult<Self> {
        if workers == 0 {
            return Err(TriangleError::Config("worker count must be at least 1".to_string()));
        }
        Ok(match backend {
            Backend::Sequential => Executor::Sequential(Sequential::new(workers)),
            Backend::Rayon => Executor::Rayon(RayonPool::new(workers)?),
            Backend::Scoped => Executor::Scoped(ScopedThreads::new(workers)),
            Backend::Async => Executor::Async(AsyncTasks::new(workers)?),
        })
    }
}

impl Scheduler for Executor {
    fn backend(&self) -> Backend {
        match self {
            Executor::Sequential(s) => s.backend(),
            Executor::Rayon(s) => s.backend(),
            Executor::Scoped(s) => s.backend(),
            Executor::Async(s) => s.backend(),
        }
    }

    fn workers(&self) -> usize {
        match self {
            Executor::Sequential(s) => s.workers(),
            Executor::Rayon(s) => s.workers(),
            Executor::Scoped(s) => s.workers(),
            Executor::Async(s) => s.workers(),
        }
    }

    fn fork_join<I, O, F>(&self, inputs: Vec<I>, task: F) -> TriangleResult<Vec<O>>
    where
        I: Send + 'static,
        O: Send + 'static,
        F: Fn(I) -> O + Send + Sync + 'static,
    {
        match self {
            Executor::Sequential(s) => s.fork_join(inputs, task),
            Executor::Rayon(s) => s.fork_join(inputs, task),
            Executor::Scoped(s) => s.fork_join(inputs, task),
            Executor::Async(s) => s.fork_join(inputs, task),
        }
    }
}

/// Build the `WorkerFailed` error for a caught panic payload
pub(crate) fn worker_failed(owner: usize, payload: Box<dyn Any + Send>) -> TriangleError {
    let reason = if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "task panicked".to_string()
    };
    TriangleError::WorkerFailed { owner, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parsing() {
        assert_eq!("rayon".parse::<Backend>().unwrap(), Backend::Rayon);
        assert_eq!(" Tokio ".parse::<Backend>().unwrap(), Backend::Async);
        assert_eq!("serial".parse::<Backend>().unwrap(), Backend::Sequential);
        assert!("gpu".parse::<Backend>().is_err());

        for backend in Backend::ALL {
            assert_eq!(backend.to_string().parse::<Backend>().unwrap(), backend);
        }
    }

    #[test]
    fn test_executor_rejects_zero_workers() {
        assert!(matches!(
            Executor::new(Backend::Rayon, 0),
            Err(TriangleError::Config(_))
        ));
    }

    #[test]
    fn test_every_backend_preserves_order() {
        for backend in Backend::ALL {
            let executor = Executor::new(backend, 3).unwrap();
            assert_eq!(executor.backend(), backend);
            assert_eq!(executor.workers(), 3);

            let inputs: Vec<u64> = (0..10).collect();
            let outputs = executor.fork_join(inputs, |x| x * x).unwrap();
            assert_eq!(outputs, (0..10).map(|x| x * x).collect::<Vec<u64>>());
        }
    }

    #[test]
    fn test_every_backend_reports_panics() {
        for backend in Backend::ALL {
            let executor = Executor::new(backend, 2).unwrap();
            let result = executor.fork_join(vec![1u32, 2, 3], |x| {
                if x == 2 {
                    panic!("bad partition");
                }
                x
            });
            match result {
                Err(TriangleError::WorkerFailed { owner, .. }) => assert_eq!(owner, 1, "{}", backend),
                other => panic!("{} did not report the failure: {:?}", backend, other.map(|_| ())),
            }
        }
    }

    #[test]
    fn test_empty_input() {
        for backend in Backend::ALL {
            let executor = Executor::new(backend, 1).unwrap();
            let outputs: Vec<u8> = executor.fork_join(Vec::<u8>::new(), |x| x).unwrap();
            assert!(outputs.is_empty());
        }
    }
}
