#![warn(missing_docs)]

//! This crate provides a range minimum query data structure with O(n) preprocessing time and
//! space and O(1) query time. The data structure is static, meaning that it cannot be modified
//! after it has been created.
//!
//! # Reduction
//! A query on the input array is answered through a chain of reductions:
//!  1. The [Cartesian tree][CartesianTree] of the array turns a range minimum query into a lowest
//!     common ancestor query.
//!  2. The depth sequence of an Eulerian tour of the tree turns the lowest common ancestor query
//!     into a range minimum query on a sequence whose neighboring elements differ by exactly one.
//!  3. The [engine][RmqEngine] splits that sequence into blocks of `log(n) / 2` elements, answers
//!     queries spanning whole blocks with a sparse table over the block minima, and queries
//!     inside blocks with a lookup table over all possible block shapes.
//!
//! [`CartesianRmq`] bundles the chain and is the entry point for most uses.
//!
//! # Example
//! ```rust
//! use cartesian_rmq::CartesianRmq;
//!
//! let rmq = CartesianRmq::from_vec(vec![2, 4, 3, 1, 6, 7, 8, 9, 1, 7]);
//! assert_eq!(rmq.range_min(0, 3), Ok(3));
//! assert_eq!(rmq.range_min(4, 9), Ok(8));
//! assert!(rmq.range_min_signed(-1, 3).is_err());
//! ```
//!
//! # Features
//! - `serde`: implements `Serialize` and `Deserialize` for all data structures.
//! - `tracing`: emits `tracing` spans and events while the structures are built.
//! - `cli`: builds the `rmq` binary, which answers queries on a file of integers.

pub use cartesian::CartesianTree;
pub use error::RmqError;
pub use rmq::cartesian_rmq::CartesianRmq;
pub use rmq::engine::RmqEngine;

pub mod cartesian;
pub mod rmq;

mod error;
