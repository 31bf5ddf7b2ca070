//! Configuration for the range index.

/// Initial number of arena slots reserved by [`RangeIndex::new`](crate::RangeIndex::new).
///
/// A typical annotated clip carries a few dozen labels, so the arena rarely
/// reallocates. The arena grows on demand past this.
pub const DEFAULT_ARENA_CAPACITY: usize = 64;

/// How [`RangeIndex::range_query`](crate::RangeIndex::range_query) decides
/// whether a node belongs to a query window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeQueryMode {
    /// A node matches when its start or end frame lies inside the window.
    ///
    /// A node whose range spans the whole window without either endpoint
    /// inside it is not returned.
    #[default]
    Boundary,

    /// A node matches when its range shares at least one frame with the window.
    Intersecting,
}

/// What happens when a new range exactly equals an existing sibling's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EqualRangePolicy {
    /// The new node nests inside the existing one (if it can hold children).
    #[default]
    Nest,

    /// The insert fails with `Error::DuplicateRange`.
    Reject,
}

/// Behavioural knobs for a [`RangeIndex`](crate::RangeIndex).
///
/// # Example
/// ```
/// use framenest::{EqualRangePolicy, IndexConfig, RangeQueryMode};
///
/// let config = IndexConfig::default()
///     .with_range_query(RangeQueryMode::Intersecting)
///     .with_equal_ranges(EqualRangePolicy::Reject);
/// assert_eq!(config.range_query, RangeQueryMode::Intersecting);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexConfig {
    pub range_query: RangeQueryMode,
    pub equal_ranges: EqualRangePolicy,
    pub arena_capacity: usize,
}

impl IndexConfig {
    pub fn with_range_query(mut self, mode: RangeQueryMode) -> Self {
        self.range_query = mode;
        self
    }

    pub fn with_equal_ranges(mut self, policy: EqualRangePolicy) -> Self {
        self.equal_ranges = policy;
        self
    }

    pub fn with_arena_capacity(mut self, capacity: usize) -> Self {
        self.arena_capacity = capacity;
        self
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            range_query: RangeQueryMode::default(),
            equal_ranges: EqualRangePolicy::default(),
            arena_capacity: DEFAULT_ARENA_CAPACITY,
        }
    }
}
