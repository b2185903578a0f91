//! The user-facing range minimum query structure. It owns a copy of the data and the
//! [`RmqEngine`] built over the Cartesian tree of the data.

use std::mem::size_of;
use std::ops::{Bound, Deref, RangeBounds};

use crate::cartesian::CartesianTree;
use crate::rmq::engine::RmqEngine;
use crate::RmqError;

/// A range minimum query data structure with O(n) preprocessing time and space and O(1) query
/// time. The data is reduced to the lowest common ancestor problem on its Cartesian tree, which is
/// reduced further to a restricted range minimum query on the tree's Eulerian tour.
///
/// The data cannot be modified after creation.
///
/// # Example
/// ```rust
/// use cartesian_rmq::CartesianRmq;
///
/// let rmq = CartesianRmq::from_vec(vec![4, 10, 3, 11, 2, 12]);
///
/// assert_eq!(rmq.range_min(0, 1), Ok(0));
/// assert_eq!(rmq.range_min(0, 2), Ok(2));
/// assert_eq!(rmq.range_min(0, 5), Ok(4));
/// assert!(rmq.range_min(3, 6).is_err());
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CartesianRmq {
    data: Vec<i64>,
    engine: RmqEngine,
}

impl CartesianRmq {
    /// Creates a new range minimum query data structure from the given data. Creation time and
    /// space overhead are O(n).
    #[must_use]
    pub fn from_vec(data: Vec<i64>) -> Self {
        let engine = RmqEngine::from_tree(CartesianTree::new(&data));
        Self { data, engine }
    }

    /// Returns the index of the minimum element in the range `[i, j]` in O(1) time. The range is
    /// inclusive. If the minimum occurs more than once in the range, the index of any occurrence
    /// may be returned.
    ///
    /// # Errors
    /// Returns [`RmqError::InvalidRange`] if `j` is out of bounds or `j < i`.
    pub fn range_min(&self, i: usize, j: usize) -> Result<usize, RmqError> {
        self.engine.query(i, j)
    }

    /// Like [`range_min`], but takes signed indices, as they may come from user input.
    ///
    /// # Errors
    /// Returns [`RmqError::InvalidRange`] if `i` is negative, `j` is out of bounds, or `j < i`.
    ///
    /// [`range_min`]: CartesianRmq::range_min
    pub fn range_min_signed(&self, i: i64, j: i64) -> Result<usize, RmqError> {
        match (usize::try_from(i), usize::try_from(j)) {
            (Ok(i), Ok(j)) => self.range_min(i, j),
            _ => Err(RmqError::InvalidRange {
                start: i,
                end: j,
                len: self.len(),
            }),
        }
    }

    /// Convenience function for [`range_min`] for using range operators.
    /// Unlike slicing, an unbounded end refers to the last element.
    ///
    /// # Example
    /// ```rust
    /// use cartesian_rmq::CartesianRmq;
    /// let rmq = CartesianRmq::from_vec(vec![5, 4, 3, 2, 1]);
    /// assert_eq!(rmq.range_min_with_range(0..3), Ok(2));
    /// assert_eq!(rmq.range_min_with_range(0..=3), Ok(3));
    /// assert_eq!(rmq.range_min_with_range(..), Ok(4));
    /// assert!(rmq.range_min_with_range(2..2).is_err());
    /// ```
    ///
    /// # Errors
    /// Returns [`RmqError::InvalidRange`] if the range is empty or exceeds the data. The range is
    /// not clamped.
    ///
    /// [`range_min`]: CartesianRmq::range_min
    pub fn range_min_with_range<T: RangeBounds<usize>>(&self, range: T) -> Result<usize, RmqError> {
        let start = match range.start_bound() {
            Bound::Included(&i) => Some(i),
            Bound::Excluded(&i) => i.checked_add(1),
            Bound::Unbounded => Some(0),
        };

        let end = match range.end_bound() {
            Bound::Included(&i) => Some(i),
            Bound::Excluded(&i) => i.checked_sub(1),
            Bound::Unbounded => self.len().checked_sub(1),
        };

        match (start, end) {
            (Some(start), Some(end)) => self.range_min(start, end),
            _ => Err(RmqError::invalid_range(
                start.unwrap_or(usize::MAX),
                end.unwrap_or(0),
                self.len(),
            )),
        }
    }

    /// Returns the minimum value in the range `[i, j]` (inclusive).
    ///
    /// # Errors
    /// Returns [`RmqError::InvalidRange`] if `j` is out of bounds or `j < i`.
    pub fn min_value(&self, i: usize, j: usize) -> Result<i64, RmqError> {
        self.range_min(i, j).map(|idx| self.data[idx])
    }

    /// Returns the underlying query engine.
    #[must_use]
    pub fn engine(&self) -> &RmqEngine {
        &self.engine
    }

    /// Returns the length of the RMQ data structure (i.e. the number of elements)
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the RMQ data structure is empty (i.e. contains no elements)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the amount of memory used by the RMQ data structure in bytes. Does not include
    /// space allocated but not in use (e.g. unused capacity of vectors).
    #[must_use]
    pub fn heap_size(&self) -> usize {
        self.data.len() * size_of::<i64>() + self.engine.heap_size()
    }
}

/// Implements Deref to delegate to the underlying data. This allows the user to use indexing
/// syntax on the RMQ data structure to access the data, as well as iterators, etc.
impl Deref for CartesianRmq {
    type Target = Vec<i64>;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl From<Vec<i64>> for CartesianRmq {
    fn from(data: Vec<i64>) -> Self {
        Self::from_vec(data)
    }
}

/// Creates a new range minimum query data structure from the given data.
/// The iterator is consumed and the data is stored in a vector.
///
/// See [`CartesianRmq::from_vec`] for more information.
impl FromIterator<i64> for CartesianRmq {
    fn from_iter<T: IntoIterator<Item = i64>>(iter: T) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}
