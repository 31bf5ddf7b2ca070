//! Closed frame ranges and the predicates the index is built on.

use std::fmt;

use crate::common::{Error, Result};

/// A closed interval `[start, end]` of video frames.
///
/// Two ranges that share only an endpoint (`[4, 5]` and `[5, 10]`) are
/// treated as neighbours, not as overlapping.
///
/// # Example
/// ```
/// use framenest::FrameRange;
///
/// let outer = FrameRange::new(0, 10).unwrap();
/// let inner = FrameRange::new(4, 5).unwrap();
/// assert!(outer.contains(&inner));
/// assert!(!outer.overlaps(&inner));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameRange {
    pub start: i64,
    pub end: i64,
}

impl FrameRange {
    /// Create a new range.
    ///
    /// # Errors
    /// - `Error::InvalidRange` if `start > end`
    pub fn new(start: i64, end: i64) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidRange { start, end });
        }
        Ok(FrameRange { start, end })
    }

    /// A single-frame range.
    #[inline]
    pub fn point(frame: i64) -> Self {
        FrameRange {
            start: frame,
            end: frame,
        }
    }

    /// Strict partial overlap: the ranges intersect but neither contains the other.
    ///
    /// Containment in either direction, and equal ranges, are not overlaps.
    pub fn overlaps(&self, other: &FrameRange) -> bool {
        (self.start < other.start && self.end > other.start && self.end < other.end)
            || (self.start > other.start && self.start < other.end && self.end > other.end)
    }

    /// Whether `other` lies entirely inside `self` (equal ranges included).
    #[inline]
    pub fn contains(&self, other: &FrameRange) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Whether `frame` lies inside `self`.
    #[inline]
    pub fn contains_point(&self, frame: i64) -> bool {
        self.start <= frame && frame <= self.end
    }

    /// Whether `self` lies strictly left of `other`, touching at most at `other.start`.
    #[inline]
    pub fn precedes(&self, other: &FrameRange) -> bool {
        self.start < other.start && self.end <= other.start
    }

    /// Whether either endpoint of `self` falls inside `[start, end]`.
    pub fn touches_boundary(&self, start: i64, end: i64) -> bool {
        (start <= self.start && self.start <= end) || (start <= self.end && self.end <= end)
    }

    /// Whether `self` and `[start, end]` share at least one frame.
    #[inline]
    pub fn intersects(&self, start: i64, end: i64) -> bool {
        self.start.max(start) <= self.end.min(end)
    }
}

impl fmt::Display for FrameRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}
