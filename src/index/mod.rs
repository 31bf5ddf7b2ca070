//! The hierarchical frame-range index.
//!
//! # Components
//! - [`RangeIndex`] - The arena-backed n-ary tree
//! - [`IndexNode`] - A node holding a value, its range and its children
//! - [`RangeValue`] / [`Capability`] - What a stored value must provide
//! - [`Entry`] - A detached `(value, range)` pair for removal and replay
//! - [`BatchReport`] - Outcome of a bulk insert
//! - [`IndexStats`] - Mutation counters

mod batch;
mod node;
mod range_index;
mod replay;
mod stats;

pub use batch::BatchReport;
pub use node::{Capability, IndexNode, RangeValue};
pub use range_index::RangeIndex;
pub use replay::Entry;
pub use stats::IndexStats;
