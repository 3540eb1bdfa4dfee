//! Sparse row intersection
//!
//! For a symmetric matrix, row `c` doubles as column `c`, so entry `(r, c)` of
//! `A²` is the inner product of rows `r` and `c`.

use crate::csr::CsrStore;
use crate::error::IndexError;

/// Entry `(row, column)` of `A²`: the number of common neighbours of `row` and
/// `column` for a binary adjacency matrix.
pub fn dot(store: &CsrStore, row: usize, column: usize) -> Result<u32, IndexError> {
    let (a_cols, a_vals) = store.row_slice(row)?;
    let (b_cols, b_vals) = store.row_slice(column)?;
    Ok(merge_dot(a_cols, a_vals, b_cols, b_vals))
}

/// Linear merge over two strictly ascending column lists, O(|a| + |b|).
#[inline]
pub(crate) fn merge_dot(a_cols: &[usize], a_vals: &[u32], b_cols: &[usize], b_vals: &[u32]) -> u32 {
    let mut i = 0;
    let mut j = 0;
    let mut sum = 0u32;

    while i < a_cols.len() && j < b_cols.len() {
        let (a, b) = (a_cols[i], b_cols[j]);
        if a < b {
            i += 1;
        } else if a > b {
            j += 1;
        } else {
            sum += a_vals[i] * b_vals[j];
            i += 1;
            j += 1;
        }
    }

    sum
}
