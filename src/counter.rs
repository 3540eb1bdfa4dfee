//! Triangle aggregation
//!
//! Bulk-synchronous fork-join over the row partitions: every partition's
//! masked product is computed in one round, reduced to per-row counts in a
//! second round, and merged on the calling thread.

use crate::algo::{full_masked_product, partition, row_triangles, Partition, RowTriangles};
use crate::config::CountConfig;
use crate::csr::CsrStore;
use crate::error::TriangleResult;
use crate::schedule::{Backend, Executor, Scheduler};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Work done by one partition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartitionSummary {
    pub owner_id: usize,
    pub start_row: usize,
    pub end_row: usize,
    /// Stored adjacency entries in the partition's rows
    pub nonzeros: usize,
    /// Triangle incidences at the partition's vertices
    pub incidences: u64,
}

/// Result of one counting run
#[derive(Debug, Clone, Serialize)]
pub struct TriangleReport {
    pub total: u64,
    /// Triangles through each vertex, when requested
    pub per_vertex: Option<Vec<u64>>,
    pub backend: Backend,
    pub workers: usize,
    pub partitions: Vec<PartitionSummary>,
    pub elapsed: Duration,
}

/// Configurable entry point for counting runs
#[derive(Debug, Clone, Default)]
pub struct TriangleCounter {
    config: CountConfig,
}

impl TriangleCounter {
    pub fn new(config: CountConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CountConfig {
        &self.config
    }

    /// Count with a fresh executor for the configured backend.
    pub fn run(&self, store: &Arc<CsrStore>) -> TriangleResult<TriangleReport> {
        self.config.validate()?;
        // Reject impossible worker counts before spinning up any threads
        let partitions = partition(store, self.config.workers)?;
        let executor = Executor::new(self.config.backend, self.config.workers)?;
        self.aggregate(&executor, store, partitions)
    }

    /// Count on an existing scheduler, partitioning for its worker count.
    ///
    /// Lets callers reuse one pool across many runs.
    pub fn run_with<S: Scheduler>(
        &self,
        scheduler: &S,
        store: &Arc<CsrStore>,
    ) -> TriangleResult<TriangleReport> {
        let partitions = partition(store, scheduler.workers())?;
        self.aggregate(scheduler, store, partitions)
    }

    fn aggregate<S: Scheduler>(
        &self,
        scheduler: &S,
        store: &Arc<CsrStore>,
        partitions: Vec<Partition>,
    ) -> TriangleResult<TriangleReport> {
        let start = Instant::now();
        info!(
            "Counting triangles: {} vertices, {} entries, {} workers on {}",
            store.size(),
            store.nonzero_count(),
            partitions.len(),
            scheduler.backend()
        );

        let mut summaries: Vec<PartitionSummary> = partitions
            .iter()
            .map(|p| PartitionSummary {
                owner_id: p.owner_id,
                start_row: p.start_row,
                end_row: p.end_row,
                nonzeros: p.nonzero_count(),
                incidences: 0,
            })
            .collect();

        let shared = Arc::clone(store);
        let products = scheduler
            .fork_join(partitions, move |part| {
                part.masked_product(&shared)
                    .map(|product| (part.start_row, product))
            })?
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;
        debug!("Masked products joined for {} partitions", products.len());

        let reductions: Vec<(usize, RowTriangles)> = scheduler
            .fork_join(products, |(start_row, product)| {
                (start_row, row_triangles(&product))
            })?;

        let incidences: u64 = reductions.iter().map(|(_, r)| r.incidence_sum).sum();
        let total = incidences / 3;

        for (summary, (_, reduction)) in summaries.iter_mut().zip(&reductions) {
            summary.incidences = reduction.incidence_sum;
        }

        let per_vertex = self.config.per_vertex.then(|| {
            let mut counts = vec![0u64; store.size()];
            for (start_row, reduction) in &reductions {
                let rows = &mut counts[*start_row..*start_row + reduction.per_row.len()];
                rows.copy_from_slice(&reduction.per_row);
            }
            counts
        });

        let elapsed = start.elapsed();
        info!("Found {} triangles in {:?}", total, elapsed);

        Ok(TriangleReport {
            total,
            per_vertex,
            backend: scheduler.backend(),
            workers: scheduler.workers(),
            partitions: summaries,
            elapsed,
        })
    }
}

/// Single-threaded count over the whole graph. An empty graph has 0 triangles.
pub fn count_triangles(store: &CsrStore) -> u64 {
    let total = row_triangles(&full_masked_product(store)).total();
    debug!("Sequential count over {} vertices: {}", store.size(), total);
    total
}

/// Partitioned count under the given backend
pub fn count_triangles_parallel(
    store: &Arc<CsrStore>,
    workers: usize,
    backend: Backend,
) -> TriangleResult<u64> {
    TriangleCounter::new(CountConfig::new(workers, backend))
        .run(store)
        .map(|report| report.total)
}

/// Triangles through every vertex, computed in parallel
pub fn triangles_per_vertex(
    store: &Arc<CsrStore>,
    workers: usize,
    backend: Backend,
) -> TriangleResult<Vec<u64>> {
    let report = TriangleCounter::new(CountConfig::new(workers, backend).with_per_vertex(true))
        .run(store)?;
    Ok(report.per_vertex.unwrap_or_default())
}
