//! Error type shared by the tree builder, the query engine and the facade.

use thiserror::Error;

/// Errors reported by range minimum queries and by engine construction from raw tour data.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum RmqError {
    /// The query range is not a valid inclusive range over the data: the start is negative,
    /// the end is out of bounds, or the end lies before the start. Every query on an empty
    /// structure fails with this error.
    #[error("invalid range [{start}, {end}] for {len} elements")]
    InvalidRange {
        /// requested (inclusive) start of the range
        start: i64,
        /// requested (inclusive) end of the range
        end: i64,
        /// number of elements in the queried data
        len: usize,
    },

    /// Two adjacent tour entries do not differ by exactly one, so the tour cannot be answered
    /// by a restricted RMQ structure.
    #[error("tour entries {position} and {} do not differ by exactly one", .position + 1)]
    NotRestricted {
        /// position of the first entry of the offending pair
        position: usize,
    },

    /// The tour and its index mappings do not describe the same tour.
    #[error("tour has {tour} entries, but its index mapping implies {mapping}")]
    MappingMismatch {
        /// length of the tour
        tour: usize,
        /// length implied by the mapping
        mapping: usize,
    },

    /// The array-to-tour mapping of an array index does not point to a tour position visiting
    /// that index.
    #[error("array index {index} is not mapped to a tour position visiting it")]
    InconsistentMapping {
        /// the array index with the broken mapping
        index: usize,
    },

    /// The tour-to-array mapping holds an array index that does not exist.
    #[error("tour position {position} maps to array index {index} of only {len} elements")]
    IndexOutOfBounds {
        /// the tour position with the broken mapping
        position: usize,
        /// the array index it is mapped to
        index: usize,
        /// number of elements in the array
        len: usize,
    },
}

impl RmqError {
    /// Builds an [`InvalidRange`] error from unsigned bounds, saturating bounds that do not fit
    /// into an `i64`.
    ///
    /// [`InvalidRange`]: RmqError::InvalidRange
    pub(crate) fn invalid_range(start: usize, end: usize, len: usize) -> Self {
        Self::InvalidRange {
            start: i64::try_from(start).unwrap_or(i64::MAX),
            end: i64::try_from(end).unwrap_or(i64::MAX),
            len,
        }
    }
}
