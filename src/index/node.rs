//! IndexNode - a slot in the range index arena.
//!
//! An [`IndexNode`] holds a caller value plus the metadata the tree needs:
//! - The closed frame range it covers
//! - Its parent slot (if not top-level)
//! - Its ordered children

use std::fmt::Debug;
use std::hash::Hash;

use crate::common::{FrameRange, NodeId};

/// Whether a value may own nested ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Must never have children.
    Leaf,
    /// May own any number of non-overlapping children.
    Container,
}

impl Capability {
    #[inline]
    pub fn is_leaf(self) -> bool {
        self == Capability::Leaf
    }
}

/// The contract a value must meet to be stored in a [`RangeIndex`](crate::RangeIndex).
///
/// The index treats values as opaque beyond their identity key and whether
/// they can hold children.
///
/// # Example
/// ```
/// use framenest::{Capability, RangeValue};
///
/// struct Scene(u32);
///
/// impl RangeValue for Scene {
///     type Key = u32;
///
///     fn key(&self) -> u32 {
///         self.0
///     }
///
///     fn capability(&self) -> Capability {
///         Capability::Container
///     }
/// }
///
/// assert_eq!(Scene(3).describe(), "3");
/// ```
pub trait RangeValue {
    /// Identity, unique across the whole index.
    type Key: Eq + Hash + Clone + Debug;

    fn key(&self) -> Self::Key;

    fn capability(&self) -> Capability;

    /// Human-readable name used in error messages.
    fn describe(&self) -> String {
        format!("{:?}", self.key())
    }

    /// The range the value carries itself, if it has one.
    ///
    /// When present it must match the range the value is inserted under.
    fn range(&self) -> Option<FrameRange> {
        None
    }
}

/// A node in the range index.
///
/// Children are arena indices kept in ascending `start` order. `parent` is
/// `None` for top-level nodes (children of the implicit unbounded root).
#[derive(Debug, Clone)]
pub struct IndexNode<V> {
    pub(crate) value: V,
    pub(crate) range: FrameRange,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl<V> IndexNode<V> {
    pub(crate) fn new(value: V, range: FrameRange) -> Self {
        Self {
            value,
            range,
            parent: None,
            children: Vec::new(),
        }
    }

    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub fn range(&self) -> FrameRange {
        self.range
    }

    #[inline]
    pub fn start(&self) -> i64 {
        self.range.start
    }

    #[inline]
    pub fn end(&self) -> i64 {
        self.range.end
    }

    /// Parent slot, or `None` when the node sits directly under the root.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child slots in ascending start order.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[inline]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}
