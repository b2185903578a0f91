//! Lookup table for range minimum queries inside a single block of a restricted sequence.
//!
//! Since neighboring tour entries differ by exactly one, the position of the minimum in any range
//! of a block only depends on the pattern of ascents and descents in the block, not on absolute
//! values. A block of size `b` has `2^(b-1)` such shapes. The table stores, for every shape and
//! every range `[j, k]` inside a block, the offset of the (leftmost) minimum.
//!
//! A shape is encoded as an integer whose bit `i` is set if the sequence ascends from entry `i` to
//! entry `i + 1`. For example, `0b1101` is "ascend, descend, ascend, ascend" and corresponds to the
//! sequence `0, 1, 0, 1, 2`.

use std::mem::size_of;

/// Precomputed in-block minima for all ascend/descend shapes of one block size, plus an optional
/// reserved slot for a final block that is shorter than the others.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub(crate) struct ShapeLookupTable {
    block_size: usize,

    // offset of the minimum for shape s and range [j, k] at (s * block_size + j) * block_size + k.
    // Entries with k < j are unused. Block sizes are at most half the bit width of usize, so
    // offsets fit into a byte.
    offsets: Vec<u8>,
}

impl ShapeLookupTable {
    /// Builds the table for blocks of `block_size` entries. If `last_block` is given, it is the
    /// actual content of a final block shorter than `block_size`, and its answers are stored in
    /// the reserved slot (see [`reserved_shape`]).
    ///
    /// [`reserved_shape`]: ShapeLookupTable::reserved_shape
    pub(crate) fn new(block_size: usize, last_block: Option<&[usize]>) -> Self {
        debug_assert!(block_size > 1 && block_size <= u8::MAX as usize);
        debug_assert!(last_block.map_or(true, |block| block.len() < block_size));

        let shapes = 1usize << (block_size - 1);
        let slots = shapes + usize::from(last_block.is_some());
        let mut table = Self {
            block_size,
            offsets: vec![0; slots * block_size * block_size],
        };

        let mut height = vec![0isize; block_size];
        for shape in 0..shapes {
            Self::synthesize_heights(shape, &mut height);
            table.fill_slot(shape, height.as_slice());
        }

        if let Some(block) = last_block {
            table.fill_slot(shapes, block);
        }

        table
    }

    /// Generates a sequence with the given shape, starting at height zero.
    fn synthesize_heights(shape: usize, height: &mut [isize]) {
        for i in 1..height.len() {
            height[i] = if shape & (1 << (i - 1)) != 0 {
                height[i - 1] + 1
            } else {
                height[i - 1] - 1
            };
        }
    }

    /// Fills the slot `shape` with the argmin of every range of `values`. The minimum of `[j, k]`
    /// is either `k` or the minimum of `[j, k - 1]`. Only a strictly smaller value replaces the
    /// previous minimum, so the leftmost minimum is stored.
    #[allow(clippy::cast_possible_truncation)] // offsets are smaller than the block size
    fn fill_slot<T: Ord>(&mut self, shape: usize, values: &[T]) {
        let base = shape * self.block_size * self.block_size;
        for j in 0..values.len() {
            let row = base + j * self.block_size;
            self.offsets[row + j] = j as u8;
            for k in j + 1..values.len() {
                let previous = self.offsets[row + k - 1];
                self.offsets[row + k] = if values[k] < values[previous as usize] {
                    k as u8
                } else {
                    previous
                };
            }
        }
    }

    /// Returns the shape key of `block`. All blocks of full size map to one of the synthesized
    /// shapes. The block must be a restricted sequence.
    pub(crate) fn shape_of(block: &[usize]) -> usize {
        block
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| pair[1] > pair[0])
            .fold(0, |shape, (i, _)| shape | (1 << i))
    }

    /// Returns the slot reserved for the final block, if it is shorter than the others.
    pub(crate) fn reserved_shape(&self) -> usize {
        1 << (self.block_size - 1)
    }

    /// Returns the offset of the minimum in the range `[j, k]` (inclusive) of a block with the
    /// given shape.
    pub(crate) fn offset(&self, shape: usize, j: usize, k: usize) -> usize {
        debug_assert!(j <= k && k < self.block_size);
        self.offsets[(shape * self.block_size + j) * self.block_size + k] as usize
    }

    /// Returns the amount of memory used by the table in bytes.
    pub(crate) fn heap_size(&self) -> usize {
        self.offsets.len() * size_of::<u8>()
    }
}
