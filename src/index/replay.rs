//! Snapshot and rebuild.
//!
//! The index defines no on-disk format. A persistence layer writes out
//! [`RangeIndex::entries`] however it likes and reloads by handing the same
//! entries back to [`RangeIndex::rebuild`], which replays them as inserts.

use crate::common::{FrameRange, IndexConfig, NodeId, Result};
use crate::index::{RangeIndex, RangeValue};

/// A value together with the range it was stored under.
///
/// Returned by removal so the caller can tear down anything keyed by the
/// value's identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<V> {
    pub value: V,
    pub range: FrameRange,
}

impl<V: RangeValue + Clone> RangeIndex<V> {
    /// Every stored `(value, range)` in replay order.
    ///
    /// Each parent comes before its subtree, and siblings come right to
    /// left. Replaying the list through `insert` rebuilds the same
    /// hierarchy: a node always finds its real parent before any earlier
    /// sibling that merely touches it exists, and each earlier sibling then
    /// lands in front of the later ones.
    ///
    /// This is not [`traverse`](RangeIndex::traverse) order; callers that
    /// display the tree should use that instead.
    pub fn entries(&self) -> Vec<Entry<V>> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack: Vec<NodeId> = self.roots().to_vec();

        while let Some(id) = stack.pop() {
            if let Some(node) = self.node(id) {
                out.push(Entry {
                    value: node.value().clone(),
                    range: node.range(),
                });
                stack.extend_from_slice(node.children());
            }
        }
        out
    }
}

impl<V: RangeValue> RangeIndex<V> {
    /// Build a new index by inserting `entries` in order.
    ///
    /// # Errors
    /// Returns the first insert error; the partially built index is dropped.
    pub fn rebuild<I>(entries: I, config: IndexConfig) -> Result<Self>
    where
        I: IntoIterator<Item = Entry<V>>,
    {
        let mut index = Self::with_config(config);
        for entry in entries {
            index.insert(entry.value, entry.range.start, entry.range.end)?;
        }
        Ok(index)
    }
}
