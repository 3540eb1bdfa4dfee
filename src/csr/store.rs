//! Compressed Sparse Row storage
//!
//! Read-only after construction. Operations that derive a new matrix (row
//! blocks, masked products) always allocate a fresh store.

use crate::error::IndexError;

/// A sparse matrix in Compressed Sparse Row (CSR) format.
///
/// Row `r` occupies `row_index[r]..row_index[r + 1]` in `col_index` and
/// `values`. Column indices are strictly ascending within each row, which the
/// merge-based intersection in [`crate::algo::dot`] relies on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrStore {
    /// Number of rows
    rows: usize,
    /// Upper bound (exclusive) on column indices
    cols: usize,
    /// Offsets into `col_index`/`values`. Size = rows + 1
    row_index: Vec<usize>,
    /// Column of every stored entry
    col_index: Vec<usize>,
    /// Value of every stored entry, aligned with `col_index`
    values: Vec<u32>,
}

impl CsrStore {
    /// An `n x n` matrix with no stored entries
    pub fn empty(n: usize) -> Self {
        Self {
            rows: n,
            cols: n,
            row_index: vec![0; n + 1],
            col_index: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Assemble a store from raw arrays, checking every structural invariant.
    pub fn from_parts(
        rows: usize,
        cols: usize,
        row_index: Vec<usize>,
        col_index: Vec<usize>,
        values: Vec<u32>,
    ) -> Result<Self, IndexError> {
        if row_index.len() != rows + 1 {
            return Err(IndexError::Malformed(format!(
                "row_index has {} entries, expected {}",
                row_index.len(),
                rows + 1
            )));
        }
        if row_index[0] != 0 {
            return Err(IndexError::Malformed("row_index[0] must be 0".to_string()));
        }
        if col_index.len() != values.len() {
            return Err(IndexError::Malformed(format!(
                "col_index has {} entries but values has {}",
                col_index.len(),
                values.len()
            )));
        }
        if row_index[rows] != col_index.len() {
            return Err(IndexError::Malformed(format!(
                "row_index[{}] = {} but {} entries are stored",
                rows,
                row_index[rows],
                col_index.len()
            )));
        }

        // With row_index[rows] == nnz, a non-decreasing row_index keeps every row slice in bounds
        if let Some(r) = row_index.windows(2).position(|w| w[0] > w[1]) {
            return Err(IndexError::Malformed(format!(
                "row_index decreases at row {}",
                r
            )));
        }

        for r in 0..rows {
            let row = &col_index[row_index[r]..row_index[r + 1]];
            if let Some(&last) = row.last() {
                if last >= cols {
                    return Err(IndexError::ColumnOutOfBounds { index: last, cols });
                }
            }
            if row.windows(2).any(|w| w[0] >= w[1]) {
                return Err(IndexError::Malformed(format!(
                    "columns of row {} are not strictly ascending",
                    r
                )));
            }
        }

        Ok(Self::from_parts_unchecked(rows, cols, row_index, col_index, values))
    }

    /// Assemble a store from arrays the caller has already laid out correctly.
    pub(crate) fn from_parts_unchecked(
        rows: usize,
        cols: usize,
        row_index: Vec<usize>,
        col_index: Vec<usize>,
        values: Vec<u32>,
    ) -> Self {
        debug_assert_eq!(row_index.len(), rows + 1);
        debug_assert_eq!(col_index.len(), values.len());
        Self {
            rows,
            cols,
            row_index,
            col_index,
            values,
        }
    }

    /// Number of rows (N for an adjacency matrix)
    pub fn size(&self) -> usize {
        self.rows
    }

    /// Column bound
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Total number of stored entries, `row_index[size]`
    pub fn nonzero_count(&self) -> usize {
        self.row_index[self.rows]
    }

    pub fn row_index(&self) -> &[usize] {
        &self.row_index
    }

    pub fn col_index(&self) -> &[usize] {
        &self.col_index
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// Column indices and values stored in row `r`
    pub fn row_slice(&self, r: usize) -> Result<(&[usize], &[u32]), IndexError> {
        if r >= self.rows {
            return Err(IndexError::RowOutOfBounds {
                index: r,
                rows: self.rows,
            });
        }
        Ok(self.row_unchecked(r))
    }

    /// Same as [`row_slice`](Self::row_slice) for callers that already hold a valid row.
    pub(crate) fn row_unchecked(&self, r: usize) -> (&[usize], &[u32]) {
        let start = self.row_index[r];
        let end = self.row_index[r + 1];
        (&self.col_index[start..end], &self.values[start..end])
    }

    /// Number of stored entries in row `r`
    pub fn degree(&self, r: usize) -> Result<usize, IndexError> {
        self.row_slice(r).map(|(cols, _)| cols.len())
    }

    /// Iterate `(row, columns, values)` in row order
    pub fn rows_iter(&self) -> impl Iterator<Item = (usize, &[usize], &[u32])> + '_ {
        (0..self.rows).map(move |r| {
            let (cols, vals) = self.row_unchecked(r);
            (r, cols, vals)
        })
    }

    /// Value at `(r, c)`, zero when nothing is stored there
    pub fn get(&self, r: usize, c: usize) -> Result<u32, IndexError> {
        if c >= self.cols {
            return Err(IndexError::ColumnOutOfBounds {
                index: c,
                cols: self.cols,
            });
        }
        let (cols, vals) = self.row_slice(r)?;
        Ok(match cols.binary_search(&c) {
            Ok(pos) => vals[pos],
            Err(_) => 0,
        })
    }

    /// True when every stored `(r, c)` has a stored `(c, r)` with the same value
    pub fn is_symmetric(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        self.rows_iter().all(|(r, cols, vals)| {
            cols.iter()
                .zip(vals)
                .all(|(&c, &v)| matches!(self.get(c, r), Ok(w) if w == v))
        })
    }

    /// Copy rows `start..end` into an independent store with the same column bound.
    pub fn row_block(&self, start: usize, end: usize) -> Result<CsrStore, IndexError> {
        if start > end || end > self.rows {
            return Err(IndexError::InvalidRange {
                start,
                end,
                rows: self.rows,
            });
        }

        Ok(self.row_block_unchecked(start, end))
    }

    /// [`row_block`](Self::row_block) for a range already known to be valid.
    pub(crate) fn row_block_unchecked(&self, start: usize, end: usize) -> CsrStore {
        let base = self.row_index[start];
        let last = self.row_index[end];
        let row_index: Vec<usize> = self.row_index[start..=end]
            .iter()
            .map(|&offset| offset - base)
            .collect();

        Self::from_parts_unchecked(
            end - start,
            self.cols,
            row_index,
            self.col_index[base..last].to_vec(),
            self.values[base..last].to_vec(),
        )
    }
}
