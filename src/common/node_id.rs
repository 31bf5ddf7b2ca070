//! Node identifier type.

use std::fmt;

/// Identifies a node slot in the index arena.
///
/// Using `usize` because:
/// 1. Nodes are stored in `Vec<Option<IndexNode<V>>>`
/// 2. Direct indexing without casting: `nodes[node_id.0]`
///
/// Slots are recycled after removal, so a `NodeId` is only meaningful while
/// the node it was returned for is still in the index.
///
/// # Example
/// ```
/// use framenest::NodeId;
///
/// let node_id = NodeId::new(5);
/// assert_eq!(node_id.0, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Create a new NodeId.
    #[inline]
    pub fn new(id: usize) -> Self {
        NodeId(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}
