//! Error types for triangle counting
//!
//! Ingestion, indexing and partitioning each get their own enum so callers can
//! match on the stage that failed. `TriangleError` wraps all of them.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or interpreting a Matrix Market file
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Missing %%MatrixMarket banner")]
    MissingBanner,

    #[error("Unsupported banner: {0}")]
    UnsupportedBanner(String),

    #[error("Malformed size line {line}: {content:?}")]
    MalformedSize { line: usize, content: String },

    #[error("Matrix is not square: {rows} rows, {columns} columns")]
    NotSquare { rows: usize, columns: usize },

    #[error("Malformed entry on line {line}: {content:?}")]
    MalformedEntry { line: usize, content: String },

    #[error("Entry ({row}, {column}) on line {line} is outside 1..={size}")]
    EntryOutOfRange {
        line: usize,
        row: usize,
        column: usize,
        size: usize,
    },

    #[error("Header declares {expected} entries, found {found}")]
    EntryCountMismatch { expected: usize, found: usize },

    #[error(transparent)]
    Index(#[from] IndexError),
}

/// Out-of-range access or malformed CSR parts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    #[error("Row {index} out of bounds for matrix with {rows} rows")]
    RowOutOfBounds { index: usize, rows: usize },

    #[error("Column {index} out of bounds for matrix with {cols} columns")]
    ColumnOutOfBounds { index: usize, cols: usize },

    #[error("Row range {start}..{end} invalid for matrix with {rows} rows")]
    InvalidRange { start: usize, end: usize, rows: usize },

    #[error("Edge ({u}, {v}) references a vertex outside 0..{vertices}")]
    EdgeOutOfBounds { u: usize, v: usize, vertices: usize },

    #[error("Cannot allocate a matrix with {vertices} vertices")]
    TooManyVertices { vertices: usize },

    #[error("Malformed CSR: {0}")]
    Malformed(String),
}

/// Invalid worker counts, rejected before any task is dispatched
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PartitionError {
    #[error("Worker count must be at least 1")]
    ZeroWorkers,

    #[error("Worker count {workers} exceeds row count {rows}")]
    TooManyWorkers { workers: usize, rows: usize },
}

/// Top-level error for counting runs
#[derive(Error, Debug)]
pub enum TriangleError {
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    #[error("Index error: {0}")]
    Index(#[from] IndexError),

    #[error("Partition error: {0}")]
    Partition(#[from] PartitionError),

    #[error("Worker {owner} failed: {reason}")]
    WorkerFailed { owner: usize, reason: String },

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Backends disagree: {backend} with {workers} workers counted {got}, expected {expected}")]
    Mismatch {
        backend: String,
        workers: usize,
        expected: u64,
        got: u64,
    },
}

pub type TriangleResult<T> = Result<T, TriangleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = FormatError::NotSquare { rows: 3, columns: 4 };
        assert_eq!(err.to_string(), "Matrix is not square: 3 rows, 4 columns");

        let err: TriangleError = PartitionError::TooManyWorkers { workers: 8, rows: 3 }.into();
        assert_eq!(
            err.to_string(),
            "Partition error: Worker count 8 exceeds row count 3"
        );
    }

    #[test]
    fn test_index_error_converts_into_format_error() {
        let err: FormatError = IndexError::EdgeOutOfBounds { u: 5, v: 0, vertices: 3 }.into();
        assert!(matches!(err, FormatError::Index(_)));
    }
}
