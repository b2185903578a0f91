//! Range minimum query data structures. These data structures allow to calculate the index of the
//! minimum element in a range of a static array in constant time. [`CartesianRmq`] is the entry
//! point, [`RmqEngine`] answers the restricted queries on the Eulerian tour it is built on.
//!
//! [`CartesianRmq`]: cartesian_rmq::CartesianRmq
//! [`RmqEngine`]: engine::RmqEngine

pub mod cartesian_rmq;

pub mod engine;

mod lookup;
mod sparse;
