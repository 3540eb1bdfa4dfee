//! Masked square and per-row triangle reduction
//!
//! `A ⊙ A²` is evaluated only where `A` already stores an entry, so the dense
//! square is never formed. For vertex `r`, entry `(r, c)` counts the common
//! neighbours of `r` and `c`; each triangle through `r` is seen once from each
//! of its two edges at `r`, so row `r` sums to twice the triangles at `r`.

use super::dot::merge_dot;
use super::partition::Partition;
use crate::csr::CsrStore;
use crate::error::IndexError;

/// Triangle counts for the rows of one local masked product
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowTriangles {
    /// Triangles through each local row
    pub per_row: Vec<u64>,
    /// Sum of `per_row`; every triangle contributes once per vertex
    pub incidence_sum: u64,
}

impl RowTriangles {
    /// Triangles in a graph whose rows are all covered by this reduction
    pub fn total(&self) -> u64 {
        self.incidence_sum / 3
    }
}

/// `(A ⊙ A²)` restricted to rows `start..end`, re-based to local row 0.
pub fn local_triangles(store: &CsrStore, start: usize, end: usize) -> Result<CsrStore, IndexError> {
    if start > end || end > store.size() {
        return Err(IndexError::InvalidRange {
            start,
            end,
            rows: store.size(),
        });
    }
    Ok(masked_square(store, start, end - start, |local| {
        store.row_unchecked(start + local).0
    }))
}

/// `A ⊙ A²` over every row of `store`
pub fn full_masked_product(store: &CsrStore) -> CsrStore {
    masked_square(store, 0, store.size(), |r| store.row_unchecked(r).0)
}

impl Partition {
    /// The masked product for this partition's rows, intersecting against the
    /// shared read-only `store`.
    ///
    /// Fails when `store` has too few rows to hold this partition.
    pub fn masked_product(&self, store: &CsrStore) -> Result<CsrStore, IndexError> {
        let rows = self.sub_matrix.size();
        let end = self.start_row.saturating_add(rows);
        if end > store.size() {
            return Err(IndexError::InvalidRange {
                start: self.start_row,
                end,
                rows: store.size(),
            });
        }
        Ok(masked_square(store, self.start_row, rows, |local| {
            self.sub_matrix.row_unchecked(local).0
        }))
    }
}

/// Shared kernel loop. `row_cols(local)` yields the stored columns of global
/// row `offset + local`; intersections always read `store`. Rows
/// `offset..offset + rows` must exist in `store`.
fn masked_square<'a, F>(store: &CsrStore, offset: usize, rows: usize, row_cols: F) -> CsrStore
where
    F: Fn(usize) -> &'a [usize],
{
    let mut row_index = Vec::with_capacity(rows + 1);
    let mut col_index = Vec::new();
    let mut values = Vec::new();

    row_index.push(0);
    for local in 0..rows {
        let (r_cols, r_vals) = store.row_unchecked(offset + local);
        for &c in row_cols(local) {
            // A column with no matching row has no neighbours to share
            if c >= store.size() {
                continue;
            }
            let (c_cols, c_vals) = store.row_unchecked(c);
            let v = merge_dot(r_cols, r_vals, c_cols, c_vals);
            if v > 0 {
                col_index.push(c);
                values.push(v);
            }
        }
        row_index.push(col_index.len());
    }

    CsrStore::from_parts_unchecked(rows, store.cols(), row_index, col_index, values)
}

/// Sum each row of a masked product and halve it.
pub fn row_triangles(local: &CsrStore) -> RowTriangles {
    let per_row: Vec<u64> = local
        .rows_iter()
        .map(|(_, _, vals)| vals.iter().map(|&v| u64::from(v)).sum::<u64>() / 2)
        .collect();
    let incidence_sum = per_row.iter().sum();

    RowTriangles {
        per_row,
        incidence_sum,
    }
}
