//! A sparse table over the minima of the tour blocks. It pre-computes the minimum block in
//! intervals of 2^k blocks for all k and turns each query into two overlapping sub-queries.
//! Since it only covers one entry per block, its O(m log m) size is linear in the tour length.

use std::mem::size_of;

/// Sparse table answering range minimum queries over a small sequence of block minima in constant
/// time. Ties are resolved towards the lower index.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub(crate) struct BlockSparseTable {
    minima: Vec<usize>,

    // the j'th element of row i is the index of the minimum in [i, i + 2^j). Only entries with
    // i + 2^j <= minima.len() are meaningful, the rest stay zero. A single flat vector avoids one
    // allocation per row.
    results: Vec<usize>,
    row_length: usize,
}

impl BlockSparseTable {
    /// Builds the table over `minima` by doubling: the minimum of an interval of length 2^j is the
    /// smaller of the minima of its two halves.
    pub(crate) fn new(minima: Vec<usize>) -> Self {
        let len = minima.len();
        let row_length = if len == 0 { 0 } else { len.ilog2() as usize + 1 };
        let mut results = vec![0; len * row_length];

        for i in 0..len {
            results[i * row_length] = i;
        }

        for j in 1..row_length {
            let half = 1 << (j - 1);
            for i in 0..=len - (1 << j) {
                let left = results[i * row_length + j - 1];
                let right = results[(i + half) * row_length + j - 1];
                results[i * row_length + j] = if minima[left] <= minima[right] {
                    left
                } else {
                    right
                };
            }
        }

        Self {
            minima,
            results,
            row_length,
        }
    }

    /// Returns the index of the minimum in the inclusive range `[i, j]`, preferring the lower index
    /// on ties.
    ///
    /// # Panics
    /// Calling this function with i > j or j out of bounds will panic.
    pub(crate) fn range_min(&self, i: usize, j: usize) -> usize {
        debug_assert!(i <= j && j < self.minima.len());
        let log_span = (j - i + 1).ilog2() as usize;

        let left = self.results[i * self.row_length + log_span];
        let right = self.results[(j + 1 - (1 << log_span)) * self.row_length + log_span];

        if self.minima[right] < self.minima[left] {
            right
        } else {
            left
        }
    }

    /// Returns the number of entries the table covers.
    pub(crate) fn len(&self) -> usize {
        self.minima.len()
    }

    /// Returns the amount of memory used by the table in bytes.
    pub(crate) fn heap_size(&self) -> usize {
        (self.minima.len() + self.results.len()) * size_of::<usize>()
    }
}
