//! Dense conversions for small diagnostic matrices

use super::store::CsrStore;
use crate::error::IndexError;
use ndarray::Array2;

impl CsrStore {
    /// Compress a dense square matrix, keeping every nonzero cell.
    pub fn from_dense(matrix: &Array2<u32>) -> Result<Self, IndexError> {
        let (rows, cols) = matrix.dim();
        if rows != cols {
            return Err(IndexError::Malformed(format!(
                "dense matrix is {}x{}, expected square",
                rows, cols
            )));
        }

        let mut row_index = Vec::with_capacity(rows + 1);
        let mut col_index = Vec::new();
        let mut values = Vec::new();

        row_index.push(0);
        for row in matrix.rows() {
            for (c, &v) in row.iter().enumerate() {
                if v != 0 {
                    col_index.push(c);
                    values.push(v);
                }
            }
            row_index.push(col_index.len());
        }

        Ok(Self::from_parts_unchecked(rows, cols, row_index, col_index, values))
    }

    /// Expand into a dense `size x cols` matrix.
    pub fn to_dense(&self) -> Array2<u32> {
        let mut matrix = Array2::zeros((self.size(), self.cols()));
        for (r, cols, vals) in self.rows_iter() {
            for (&c, &v) in cols.iter().zip(vals) {
                matrix[[r, c]] = v;
            }
        }
        matrix
    }
}

/// Triangle count of a dense symmetric 0/1 matrix with zero diagonal, trace(A³)/6.
pub fn dense_triangle_count(matrix: &Array2<u32>) -> u64 {
    let a = matrix.mapv(u64::from);
    let cube = a.dot(&a).dot(&a);
    cube.diag().sum() / 6
}
