//! Sparse matrix storage

pub mod dense;
pub mod store;

pub use dense::dense_triangle_count;
pub use store::CsrStore;
