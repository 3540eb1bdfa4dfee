//! Row partitioning balanced by stored entries
//!
//! Kernel cost follows the number of stored entries, not the number of rows,
//! so workers receive contiguous row ranges of roughly equal nonzero count.

use crate::csr::CsrStore;
use crate::error::PartitionError;
use tracing::debug;

/// A contiguous row range owned by one worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    /// Worker index, also the partition's position in row order
    pub owner_id: usize,
    /// First row (inclusive)
    pub start_row: usize,
    /// Last row (exclusive)
    pub end_row: usize,
    /// Rows `start_row..end_row` of the parent, copied into independent storage
    pub sub_matrix: CsrStore,
}

impl Partition {
    pub fn len(&self) -> usize {
        self.end_row - self.start_row
    }

    pub fn is_empty(&self) -> bool {
        self.start_row == self.end_row
    }

    pub fn nonzero_count(&self) -> usize {
        self.sub_matrix.nonzero_count()
    }
}

/// Split `[0, size)` into `workers` non-empty, contiguous, ordered ranges.
pub fn partition(store: &CsrStore, workers: usize) -> Result<Vec<Partition>, PartitionError> {
    let ranges = partition_ranges(store, workers)?;

    Ok(ranges
        .into_iter()
        .enumerate()
        .map(|(owner_id, (start_row, end_row))| {
            let sub_matrix = store.row_block_unchecked(start_row, end_row);
            debug!(
                "Partition {}: rows {}..{} ({} entries)",
                owner_id,
                start_row,
                end_row,
                sub_matrix.nonzero_count()
            );
            Partition {
                owner_id,
                start_row,
                end_row,
                sub_matrix,
            }
        })
        .collect())
}

/// The `(start, end)` row ranges [`partition`] would produce.
pub fn partition_ranges(
    store: &CsrStore,
    workers: usize,
) -> Result<Vec<(usize, usize)>, PartitionError> {
    let size = store.size();
    if workers == 0 {
        return Err(PartitionError::ZeroWorkers);
    }
    if workers > size {
        return Err(PartitionError::TooManyWorkers {
            workers,
            rows: size,
        });
    }

    let row_index = store.row_index();
    let interval = store.nonzero_count() / workers;
    let mut ranges = Vec::with_capacity(workers);
    let mut start = 0;

    for i in 0..workers {
        let end = if i == workers - 1 {
            size
        } else {
            let target = interval * (i + 1);
            // Leave at least one row for each worker still to come
            let max_end = size - (workers - 1 - i);
            let first_over = (start + 1..=size)
                .find(|&j| row_index[j] > target)
                .unwrap_or(start + 1);
            first_over.min(max_end)
        };
        ranges.push((start, end));
        start = end;
    }

    Ok(ranges)
}
