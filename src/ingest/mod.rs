//! Graph ingestion
//!
//! Turns an undirected edge list into a symmetric binary CSR adjacency matrix.

pub mod mtx;

pub use mtx::{parse_matrix_market, read_matrix_market, MatrixMarket, Symmetry};

use crate::csr::CsrStore;
use crate::error::{FormatError, IndexError};
use std::path::Path;
use tracing::{debug, info, warn};

/// Build the adjacency matrix of an undirected graph on `n` vertices.
///
/// Every edge `(u, v)` sets both `(u, v)` and `(v, u)`. Repeated edges collapse
/// to a single entry and self-loops are dropped.
pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Result<CsrStore, IndexError> {
    let too_many = || IndexError::TooManyVertices { vertices: n };

    // Growable per-row buffers; capacity doubles as rows fill up
    let mut neighbours: Vec<Vec<usize>> = Vec::new();
    neighbours.try_reserve_exact(n).map_err(|_| too_many())?;
    neighbours.resize_with(n, Vec::new);
    let mut self_loops = 0usize;

    for &(u, v) in edges {
        if u >= n || v >= n {
            return Err(IndexError::EdgeOutOfBounds { u, v, vertices: n });
        }
        if u == v {
            self_loops += 1;
            continue;
        }
        neighbours[u].push(v);
        neighbours[v].push(u);
    }

    if self_loops > 0 {
        debug!("Dropped {} self-loops", self_loops);
    }

    let mut duplicates = 0usize;
    for row in neighbours.iter_mut() {
        row.sort_unstable();
        let before = row.len();
        row.dedup();
        duplicates += before - row.len();
    }
    if duplicates > 0 {
        // Each duplicated undirected edge shows up once in each endpoint's row
        warn!("Coalesced {} duplicate edges", duplicates / 2);
    }

    // Prefix-sum the degrees, then lay the rows out in order
    let nonzeros: usize = neighbours.iter().map(Vec::len).sum();
    let mut row_index = Vec::new();
    row_index
        .try_reserve_exact(n.checked_add(1).ok_or_else(too_many)?)
        .map_err(|_| too_many())?;
    let mut col_index = Vec::with_capacity(nonzeros);

    row_index.push(0);
    for row in neighbours {
        col_index.extend(row);
        row_index.push(col_index.len());
    }
    let values = vec![1u32; nonzeros];

    Ok(CsrStore::from_parts_unchecked(n, n, row_index, col_index, values))
}

/// Read a Matrix Market file and build its symmetric adjacency matrix.
///
/// Only one triangle of a symmetric matrix needs to be listed; the mirrored
/// entry is always added.
pub fn build_graph(path: impl AsRef<Path>) -> Result<CsrStore, FormatError> {
    let path = path.as_ref();
    let mm = read_matrix_market(path)?;
    let store = from_edges(mm.size, &mm.entries)?;

    info!(
        "Loaded {:?}: {} vertices, {} stored entries",
        path,
        store.size(),
        store.nonzero_count()
    );
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_edges_symmetrizes() {
        let store = from_edges(4, &[(0, 1), (1, 2), (2, 0), (2, 3)]).unwrap();

        assert_eq!(store.size(), 4);
        assert_eq!(store.nonzero_count(), 8);
        assert_eq!(store.row_index(), &[0, 2, 4, 7, 8]);
        assert_eq!(store.col_index(), &[1, 2, 0, 2, 0, 1, 3, 2]);
        assert!(store.values().iter().all(|&v| v == 1));
        assert!(store.is_symmetric());
    }

    #[test]
    fn test_duplicates_coalesce() {
        let store = from_edges(2, &[(0, 1), (1, 0), (0, 1)]).unwrap();
        assert_eq!(store.nonzero_count(), 2);
        assert_eq!(store.get(0, 1).unwrap(), 1);
    }

    #[test]
    fn test_self_loops_dropped() {
        let store = from_edges(2, &[(0, 0), (0, 1)]).unwrap();
        assert_eq!(store.get(0, 0).unwrap(), 0);
        assert_eq!(store.nonzero_count(), 2);
    }

    #[test]
    fn test_rows_sorted_regardless_of_input_order() {
        let store = from_edges(5, &[(0, 4), (0, 2), (0, 3), (0, 1)]).unwrap();
        assert_eq!(store.row_slice(0).unwrap().0, &[1, 2, 3, 4]);
    }

    #[test]
    fn test_edge_out_of_bounds() {
        assert_eq!(
            from_edges(3, &[(0, 3)]),
            Err(IndexError::EdgeOutOfBounds { u: 0, v: 3, vertices: 3 })
        );
    }

    #[test]
    fn test_no_edges() {
        let store = from_edges(0, &[]).unwrap();
        assert_eq!(store.size(), 0);

        let store = from_edges(5, &[]).unwrap();
        assert_eq!(store.nonzero_count(), 0);
        assert_eq!(store.row_index(), &[0; 6]);
    }

    #[test]
    fn test_unallocatable_vertex_count() {
        let n = usize::MAX / 4;
        assert_eq!(from_edges(n, &[]), Err(IndexError::TooManyVertices { vertices: n }));
        assert_eq!(
            from_edges(usize::MAX, &[]),
            Err(IndexError::TooManyVertices { vertices: usize::MAX })
        );
    }
}
