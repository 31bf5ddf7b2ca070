//! Bulk insertion.
//!
//! A batch is just a sequence of ordinary inserts: each item succeeds or
//! fails on its own and nothing is rolled back. The caller refreshes any
//! views once, after the whole batch.

use crate::common::{Error, NodeId};
use crate::index::{RangeIndex, RangeValue};

/// What happened to each item of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport<K> {
    /// Slots of the items that went in, in input order.
    pub inserted: Vec<NodeId>,

    /// Keys of the items that were refused, with the reason.
    pub rejected: Vec<(K, Error)>,
}

impl<K> BatchReport<K> {
    /// Whether every item was inserted.
    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }

    pub fn attempted(&self) -> usize {
        self.inserted.len() + self.rejected.len()
    }
}

impl<K> Default for BatchReport<K> {
    fn default() -> Self {
        Self {
            inserted: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

impl<V: RangeValue> RangeIndex<V> {
    /// Insert each `(value, start, end)` in order, collecting per-item outcomes.
    ///
    /// Items inserted before a failure stay in the index.
    ///
    /// # Example
    /// ```
    /// use framenest::{Label, RangeIndex};
    ///
    /// let mut index = RangeIndex::new();
    /// let report = index.insert_batch(vec![
    ///     (Label::action(1, "step", 0, 2).unwrap(), 0, 2),
    ///     (Label::action(2, "step", 3, 5).unwrap(), 3, 5),
    ///     (Label::action(3, "bad", 1, 4).unwrap(), 1, 4),
    /// ]);
    /// assert_eq!(report.inserted.len(), 2);
    /// assert!(!report.is_complete());
    /// ```
    pub fn insert_batch<I>(&mut self, items: I) -> BatchReport<V::Key>
    where
        I: IntoIterator<Item = (V, i64, i64)>,
    {
        let mut report = BatchReport::default();
        for (value, start, end) in items {
            let key = value.key();
            match self.insert(value, start, end) {
                Ok(id) => report.inserted.push(id),
                Err(err) => report.rejected.push((key, err)),
            }
        }
        report
    }
}
