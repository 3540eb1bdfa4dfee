//! tricount
//!
//! Triangle counting for undirected graphs stored as sparse adjacency matrices.
//!
//! # Method
//!
//! The graph is a binary symmetric matrix `A` in Compressed Sparse Row form.
//! Entry `(i, j)` of `A²` counts the common neighbours of `i` and `j`, so the
//! Hadamard product `A ⊙ A²` keeps exactly the common-neighbour counts along
//! existing edges. Row `i` of that product sums to twice the triangles through
//! `i`, and the per-vertex counts sum to three times the triangle total.
//!
//! The masked product is evaluated directly from sparse row intersections;
//! neither `A²` nor any dense matrix is ever formed.
//!
//! # Pipeline
//!
//! - [`ingest`]: Matrix Market files and edge lists into a [`CsrStore`]
//! - [`algo::partition`]: contiguous row ranges balanced by stored entries
//! - [`algo::kernel`]: masked product and per-row reduction for one range
//! - [`schedule`]: fork-join backends (sequential, rayon, scoped threads, tokio)
//! - [`counter`]: two-phase aggregation and the public counting entry points
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use tricount::{count_triangles, count_triangles_parallel, from_edges, Backend};
//!
//! // A triangle 0-1-2 with a pendant vertex 3
//! let store = from_edges(4, &[(0, 1), (1, 2), (2, 0), (2, 3)]).unwrap();
//! assert_eq!(count_triangles(&store), 1);
//!
//! let store = Arc::new(store);
//! assert_eq!(count_triangles_parallel(&store, 2, Backend::Rayon).unwrap(), 1);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod config;
pub mod counter;
pub mod csr;
pub mod error;
pub mod generate;
pub mod harness;
pub mod ingest;
pub mod schedule;

// Re-export main types for convenience
pub use algo::{dot, local_triangles, partition, row_triangles, Partition, RowTriangles};

pub use config::CountConfig;

pub use counter::{
    count_triangles, count_triangles_parallel, triangles_per_vertex, PartitionSummary,
    TriangleCounter, TriangleReport,
};

pub use csr::{dense_triangle_count, CsrStore};

pub use error::{FormatError, IndexError, PartitionError, TriangleError, TriangleResult};

pub use harness::{measure, BenchPlan, Measurement};

pub use ingest::{build_graph, from_edges};

pub use schedule::{Backend, Executor, Scheduler};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.1.0");
    }
}
