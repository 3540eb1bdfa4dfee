//! Triangle counting kernel
//!
//! The partitioner splits rows across workers, each worker evaluates the
//! masked square for its rows, and the reduction turns that into per-vertex
//! triangle counts.

pub mod dot;
pub mod kernel;
pub mod partition;

pub use dot::dot;
pub use kernel::{full_masked_product, local_triangles, row_triangles, RowTriangles};
pub use partition::{partition, partition_ranges, Partition};
