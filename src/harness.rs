//! Timing harness for comparing backends
//!
//! Every backend and worker count is timed over the same graph, and every
//! run must agree on the triangle count.

use crate::config::CountConfig;
use crate::counter::TriangleCounter;
use crate::csr::CsrStore;
use crate::error::{TriangleError, TriangleResult};
use crate::schedule::{Backend, Executor};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Which configurations to time, and how often
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchPlan {
    pub backends: Vec<Backend>,
    pub worker_counts: Vec<usize>,
    /// Timed runs per configuration, after one untimed warm-up
    pub runs: usize,
}

impl Default for BenchPlan {
    fn default() -> Self {
        Self {
            backends: Backend::ALL.to_vec(),
            worker_counts: vec![1, 2, 4, 8],
            runs: 10,
        }
    }
}

impl BenchPlan {
    /// `(backend, workers)` pairs in measurement order. Sequential is
    /// measured once with a single worker.
    pub fn configurations(&self) -> Vec<(Backend, usize)> {
        let mut configs = Vec::new();
        for &backend in &self.backends {
            if backend == Backend::Sequential {
                configs.push((backend, 1));
                continue;
            }
            for &workers in &self.worker_counts {
                configs.push((backend, workers));
            }
        }
        configs
    }
}

/// Timing for one `(backend, workers)` configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub backend: Backend,
    pub workers: usize,
    pub runs: usize,
    pub mean_micros: f64,
    pub min_micros: f64,
    pub triangles: u64,
}

/// Time every configuration in `plan` against `store`.
///
/// Worker counts larger than the graph are skipped. Fails with
/// [`TriangleError::Mismatch`] as soon as a run disagrees with the first count.
pub fn measure(store: &Arc<CsrStore>, plan: &BenchPlan) -> TriangleResult<Vec<Measurement>> {
    if plan.runs == 0 {
        return Err(TriangleError::Config("runs must be at least 1".to_string()));
    }

    let mut baseline: Option<u64> = None;
    let mut results = Vec::new();

    for (backend, workers) in plan.configurations() {
        if workers > store.size() {
            debug!("Skipping {} with {} workers: only {} rows", backend, workers, store.size());
            continue;
        }

        let executor = Executor::new(backend, workers)?;
        let counter = TriangleCounter::new(CountConfig::new(workers, backend));

        // Warm-up
        let warm = counter.run_with(&executor, store)?.total;
        let expected = *baseline.get_or_insert(warm);
        check(backend, workers, expected, warm)?;

        let mut timings = Vec::with_capacity(plan.runs);
        for _ in 0..plan.runs {
            let start = Instant::now();
            let got = counter.run_with(&executor, store)?.total;
            timings.push(start.elapsed());
            check(backend, workers, expected, got)?;
        }

        let measurement = summarize(backend, workers, &timings, expected);
        info!(
            "{} x{}: mean {:.1}us, min {:.1}us",
            backend, workers, measurement.mean_micros, measurement.min_micros
        );
        results.push(measurement);
    }

    Ok(results)
}

fn check(backend: Backend, workers: usize, expected: u64, got: u64) -> TriangleResult<()> {
    if got != expected {
        return Err(TriangleError::Mismatch {
            backend: backend.to_string(),
            workers,
            expected,
            got,
        });
    }
    Ok(())
}

fn summarize(backend: Backend, workers: usize, timings: &[Duration], triangles: u64) -> Measurement {
    let micros: Vec<f64> = timings.iter().map(|t| t.as_secs_f64() * 1e6).collect();
    let mean = micros.iter().sum::<f64>() / micros.len() as f64;
    let min = micros.iter().copied().fold(f64::INFINITY, f64::min);

    Measurement {
        backend,
        workers,
        runs: timings.len(),
        mean_micros: mean,
        min_micros: min,
        triangles,
    }
}
