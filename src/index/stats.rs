//! Range index mutation counters.

use std::fmt;

/// Counters updated by every mutating call on a [`RangeIndex`](crate::RangeIndex).
///
/// The index is single-threaded, so these are plain counters rather than
/// atomics; [`RangeIndex::stats`](crate::RangeIndex::stats) hands out a copy.
///
/// # Example
/// ```
/// use framenest::{Label, RangeIndex};
///
/// let mut index = RangeIndex::new();
/// index.insert_label(Label::skill(1, "walk", 0, 10).unwrap()).unwrap();
/// assert_eq!(index.stats().inserted, 1);
/// println!("{}", index.stats());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexStats {
    /// Successful inserts.
    pub inserted: u64,

    /// Successful removals.
    pub removed: u64,

    /// Existing nodes re-parented under a newly inserted container.
    pub absorbed: u64,

    /// Orphaned children moved up to their grandparent on removal.
    pub reattached: u64,

    /// Inserts rejected with an error.
    pub rejected: u64,
}

impl IndexStats {
    /// Share of insert attempts that were rejected (0.0 to 1.0).
    pub fn rejection_rate(&self) -> f64 {
        let total = self.inserted + self.rejected;
        if total == 0 {
            0.0
        } else {
            self.rejected as f64 / total as f64
        }
    }

    /// Nodes currently accounted for by inserts minus removals.
    pub fn live(&self) -> u64 {
        self.inserted.saturating_sub(self.removed)
    }
}

impl fmt::Display for IndexStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ inserted: {}, removed: {}, absorbed: {}, reattached: {}, rejected: {} }}",
            self.inserted, self.removed, self.absorbed, self.reattached, self.rejected
        )
    }
}
