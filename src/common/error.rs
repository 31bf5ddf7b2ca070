//! Error types for framenest.

use thiserror::Error;

use crate::common::FrameRange;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors raised by the range index.
///
/// Every variant is a rejected operation: the index is never left in a
/// partially modified state when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The new range strictly partially overlaps a sibling at the same level.
    ///
    /// Reports both sides so the caller can show which label blocked the insert.
    #[error(
        "Cannot insert '{label}' with range {range} due to overlap with '{conflict_label}' with range {conflict_range}"
    )]
    RangeOverlap {
        label: String,
        range: FrameRange,
        conflict_label: String,
        conflict_range: FrameRange,
    },

    /// A leaf-only value would have acquired a child.
    ///
    /// `label` names the leaf, whether it is the existing node or the one
    /// being inserted.
    #[error("'{label}' cannot have children")]
    ContainerCapacity { label: String },

    /// No node matched the lookup or removal predicate.
    #[error("No matching node found")]
    NotFound,

    /// `start` is after `end`.
    #[error("Invalid range: start {start} is after end {end}")]
    InvalidRange { start: i64, end: i64 },

    /// A node with the same identity key is already in the index.
    #[error("'{label}' is already in the index")]
    DuplicateKey { label: String },

    /// A sibling already spans exactly the same range.
    ///
    /// Only raised with [`EqualRangePolicy::Reject`](crate::common::config::EqualRangePolicy).
    #[error("'{label}' has the same range {range} as '{existing_label}'")]
    DuplicateRange {
        label: String,
        range: FrameRange,
        existing_label: String,
    },
}
