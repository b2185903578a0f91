//! The constant-time query engine over the Eulerian tour of a Cartesian tree.
//!
//! The tour is split into blocks of `floor(log2(n)) / 2` entries. A sparse table over the block
//! minima answers queries spanning whole blocks, and a lookup table over all ascend/descend shapes
//! a block can have answers queries inside a block. Any query is answered with at most one lookup
//! for each partial block at its ends and two sparse table lookups for the full blocks in between.
//! Both tables are linear in the tour length.

use std::mem::size_of;

use crate::cartesian::CartesianTree;
use crate::rmq::lookup::ShapeLookupTable;
use crate::rmq::sparse::BlockSparseTable;
use crate::RmqError;

/// Restricted range minimum query structure over the depth sequence of an Eulerian tour. Queries
/// are stated in positions of the original array and are translated into tour positions with
/// the mappings produced by [`CartesianTree`].
///
/// # Example
/// ```rust
/// use cartesian_rmq::{CartesianTree, RmqEngine};
///
/// let data = [2, 4, 3, 1, 6, 7, 8, 9, 1, 7];
/// let engine = RmqEngine::from_tree(CartesianTree::new(&data));
///
/// assert_eq!(engine.query(0, 3), Ok(3));
/// assert_eq!(engine.query(4, 9), Ok(8));
/// assert!(engine.query(2, 100).is_err());
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RmqEngine {
    tour: Vec<usize>,
    nums_to_tour: Vec<usize>,
    tour_to_nums: Vec<usize>,

    block_size: usize,

    // tour position of the minimum of each full block. A final short block has no entry, because
    // it is never covered entirely by the middle part of a query.
    block_min_indices: Vec<usize>,
    block_minima: BlockSparseTable,

    // only present for blocks larger than one entry
    lookup: Option<ShapeLookupTable>,
    block_shapes: Vec<u32>,
}

impl RmqEngine {
    /// Creates the engine from a tour of node depths and the mappings between array positions and
    /// tour positions. The tour must be a restricted sequence (neighbors differ by exactly one),
    /// `tour_to_nums` must have the same length as the tour, and `nums_to_tour` must map every
    /// array index to a tour position visiting that index.
    ///
    /// # Errors
    /// Returns [`RmqError::MappingMismatch`] if the lengths of the inputs do not agree,
    /// [`RmqError::InconsistentMapping`] if an array index is mapped to the wrong tour position,
    /// [`RmqError::IndexOutOfBounds`] if a tour position is mapped to an array index that does not
    /// exist, and [`RmqError::NotRestricted`] if two neighboring tour entries do not differ by one.
    pub fn new(
        tour: Vec<usize>,
        nums_to_tour: Vec<usize>,
        tour_to_nums: Vec<usize>,
    ) -> Result<Self, RmqError> {
        if tour_to_nums.len() != tour.len() {
            return Err(RmqError::MappingMismatch {
                tour: tour.len(),
                mapping: tour_to_nums.len(),
            });
        }

        let expected_len = (2 * nums_to_tour.len()).saturating_sub(1);
        if expected_len != tour.len() {
            return Err(RmqError::MappingMismatch {
                tour: tour.len(),
                mapping: expected_len,
            });
        }

        if let Some(index) = nums_to_tour
            .iter()
            .enumerate()
            .position(|(i, &pos)| tour_to_nums.get(pos) != Some(&i))
        {
            return Err(RmqError::InconsistentMapping { index });
        }

        let len = nums_to_tour.len();
        if let Some(position) = tour_to_nums.iter().position(|&index| index >= len) {
            return Err(RmqError::IndexOutOfBounds {
                position,
                index: tour_to_nums[position],
                len,
            });
        }

        if let Some(position) = tour.windows(2).position(|w| w[0].abs_diff(w[1]) != 1) {
            return Err(RmqError::NotRestricted { position });
        }

        Ok(Self::build(tour, nums_to_tour, tour_to_nums))
    }

    /// Creates the engine from the tour of a Cartesian tree. The tree is consumed to reuse its
    /// buffers.
    #[must_use]
    pub fn from_tree(tree: CartesianTree) -> Self {
        let (tour, nums_to_tour, tour_to_nums) = tree.into_tour_parts();
        Self::build(tour, nums_to_tour, tour_to_nums)
    }

    fn build(tour: Vec<usize>, nums_to_tour: Vec<usize>, tour_to_nums: Vec<usize>) -> Self {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("rmq_engine", tour_len = tour.len()).entered();

        let block_size = if tour.is_empty() {
            1
        } else {
            (tour.len().ilog2() as usize / 2).max(1)
        };

        let block_min_indices = tour
            .chunks_exact(block_size)
            .enumerate()
            .map(|(block, entries)| block * block_size + leftmost_min(entries))
            .collect::<Vec<_>>();

        let block_minima =
            BlockSparseTable::new(block_min_indices.iter().map(|&i| tour[i]).collect());
        debug_assert_eq!(block_minima.len(), tour.len() / block_size);

        let (lookup, block_shapes) = if block_size > 1 {
            Self::build_lookup(&tour, block_size)
        } else {
            (None, Vec::new())
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            block_size,
            full_blocks = block_min_indices.len(),
            lookup_bytes = lookup.as_ref().map_or(0, ShapeLookupTable::heap_size),
            "built block tables"
        );

        Self {
            tour,
            nums_to_tour,
            tour_to_nums,
            block_size,
            block_min_indices,
            block_minima,
            lookup,
            block_shapes,
        }
    }

    /// Builds the lookup table for all block shapes and assigns each block its shape. A final
    /// block shorter than `block_size` gets the reserved slot of the table, which is computed from
    /// its actual entries.
    #[allow(clippy::cast_possible_truncation)] // shapes have less than 32 bits
    fn build_lookup(tour: &[usize], block_size: usize) -> (Option<ShapeLookupTable>, Vec<u32>) {
        let blocks = tour.chunks_exact(block_size);
        let remainder = blocks.remainder();
        let last_block = (!remainder.is_empty()).then_some(remainder);

        let table = ShapeLookupTable::new(block_size, last_block);

        let mut block_shapes = blocks
            .map(|block| ShapeLookupTable::shape_of(block) as u32)
            .collect::<Vec<_>>();
        if last_block.is_some() {
            block_shapes.push(table.reserved_shape() as u32);
        }

        (Some(table), block_shapes)
    }

    /// Returns the array index of a minimum in the range `[a, b]` (inclusive) in O(1) time.
    /// If the minimum occurs multiple times, any one of its positions may be returned, but the
    /// same query always returns the same index.
    ///
    /// # Errors
    /// Returns [`RmqError::InvalidRange`] if `b` is out of bounds or `b < a`. This is checked
    /// before any table is accessed.
    pub fn query(&self, a: usize, b: usize) -> Result<usize, RmqError> {
        if b >= self.len() || b < a {
            return Err(RmqError::invalid_range(a, b, self.len()));
        }

        if a == b {
            return Ok(a);
        }

        let (start, end) = {
            let (x, y) = (self.nums_to_tour[a], self.nums_to_tour[b]);
            (x.min(y), x.max(y))
        };

        Ok(self.tour_to_nums[self.tour_min(start, end)])
    }

    /// Returns the tour position of a minimum of the tour in the range `[start, end]` (inclusive).
    ///
    /// # Errors
    /// Returns [`RmqError::InvalidRange`] if `end` is not a tour position or `end < start`.
    pub fn query_tour(&self, start: usize, end: usize) -> Result<usize, RmqError> {
        if end >= self.tour.len() || end < start {
            return Err(RmqError::invalid_range(start, end, self.tour.len()));
        }

        Ok(self.tour_min(start, end))
    }

    fn tour_min(&self, start: usize, end: usize) -> usize {
        if start == end {
            return start;
        }

        let block_size = self.block_size;
        let start_block = start / block_size;
        let end_block = end / block_size;

        // if the range is contained in a single block, one lookup is enough
        if start_block == end_block {
            return start_block * block_size
                + self.in_block_min(start_block, start % block_size, end % block_size);
        }

        let left_partial = (start % block_size != 0).then(|| {
            start_block * block_size
                + self.in_block_min(start_block, start % block_size, block_size - 1)
        });

        let right_partial = (end % block_size != block_size - 1)
            .then(|| end_block * block_size + self.in_block_min(end_block, 0, end % block_size));

        // full blocks strictly between the partial ends. A block without a partial end is full
        // and belongs to the middle part.
        let first_full = start_block + usize::from(left_partial.is_some());
        let last_full = end_block - usize::from(right_partial.is_some());
        let middle = (first_full <= last_full).then(|| {
            self.block_min_indices[self.block_minima.range_min(first_full, last_full)]
        });

        // earlier candidates win ties: left over right over middle
        [left_partial, right_partial, middle]
            .into_iter()
            .flatten()
            .reduce(|best, candidate| {
                if self.tour[candidate] < self.tour[best] {
                    candidate
                } else {
                    best
                }
            })
            .expect("a range spanning two blocks has at least one candidate")
    }

    /// Offset of the minimum in `[j, k]` of the given block.
    fn in_block_min(&self, block: usize, j: usize, k: usize) -> usize {
        match &self.lookup {
            Some(table) => table.offset(self.block_shapes[block] as usize, j, k),
            // blocks of a single entry
            None => j,
        }
    }

    /// Returns the number of array elements the engine answers queries for.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nums_to_tour.len()
    }

    /// Returns true if the engine was built over an empty array. Every query fails in that case.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nums_to_tour.is_empty()
    }

    /// Returns the number of tour entries per block.
    #[must_use]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Returns the amount of memory used by the engine in bytes. Does not include space allocated
    /// but not in use (e.g. unused capacity of vectors).
    #[must_use]
    pub fn heap_size(&self) -> usize {
        (self.tour.len()
            + self.nums_to_tour.len()
            + self.tour_to_nums.len()
            + self.block_min_indices.len())
            * size_of::<usize>()
            + self.block_minima.heap_size()
            + self.lookup.as_ref().map_or(0, ShapeLookupTable::heap_size)
            + self.block_shapes.len() * size_of::<u32>()
    }
}

/// Offset of the leftmost minimum of a non-empty block.
fn leftmost_min(block: &[usize]) -> usize {
    (1..block.len()).fold(0, |min, i| if block[i] < block[min] { i } else { min })
}
