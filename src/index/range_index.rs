//! Range Index - the nested frame-range tree.
//!
//! The [`RangeIndex`] provides:
//! - Containment-driven placement (new ranges nest or absorb automatically)
//! - Rejection of partial overlaps and of children under leaf-only values
//! - Removal with in-order reattachment of orphaned children
//! - Point, window and traversal queries for presentation layers

use std::collections::HashMap;

use log::{debug, trace};

use crate::common::{
    EqualRangePolicy, Error, FrameRange, IndexConfig, NodeId, RangeQueryMode, Result,
};
use crate::index::{Entry, IndexNode, IndexStats, RangeValue};

/// Outcome of scanning one level of children for a new range.
enum Step {
    /// The new range fits inside this child; continue one level down.
    Descend(NodeId),
    /// The new range belongs at this level.
    Place(Placement),
}

enum Placement {
    /// Insert at this position in the children list.
    At(usize),
    /// Take over the siblings at these ascending positions, standing where the first one stood.
    Absorb(Vec<usize>),
}

/// An n-ary tree of frame ranges where nesting follows containment.
///
/// # Architecture
/// ```text
/// ┌──────────────────────────────────────────────────────────────┐
/// │                         RangeIndex                           │
/// │  ┌──────────────┐   ┌────────────────────────────────────┐   │
/// │  │    keys      │   │  nodes: Vec<Option<IndexNode<V>>>  │   │
/// │  │ Key → NodeId │──▶│  [Some(E)] [Some(A)] [None] ...    │   │
/// │  └──────────────┘   └────────────────────────────────────┘   │
/// │  ┌──────────────┐   ┌──────────────┐   ┌──────────────┐      │
/// │  │    roots     │   │  free_list   │   │    stats     │      │
/// │  │ Vec<NodeId>  │   │ Vec<NodeId>  │   │  IndexStats  │      │
/// │  └──────────────┘   └──────────────┘   └──────────────┘      │
/// └──────────────────────────────────────────────────────────────┘
/// ```
///
/// `roots` holds the children of the implicit root spanning every frame. That
/// root is never handed to callers; queries that would land on it return
/// `None` instead.
///
/// # Invariants
/// - Every child's range lies inside its parent's range.
/// - Siblings never strictly partially overlap, and are ordered by `start`.
/// - A value whose capability is [`Capability::Leaf`](crate::Capability::Leaf) has no children.
/// - Identity keys are unique across the tree.
///
/// # Usage
/// ```
/// use framenest::{Label, RangeIndex};
///
/// let mut index = RangeIndex::new();
/// index.insert_label(Label::skill(1, "A", 0, 10).unwrap()).unwrap();
/// index.insert_label(Label::action(2, "B", 4, 5).unwrap()).unwrap();
///
/// let hit = index.tightest_containing(4).unwrap();
/// assert_eq!(hit.value().name, "B");
/// ```
pub struct RangeIndex<V: RangeValue> {
    /// Node arena; `None` marks a free slot.
    nodes: Vec<Option<IndexNode<V>>>,

    /// Slots released by removal, reused before the arena grows.
    free_list: Vec<NodeId>,

    /// Top-level nodes in ascending start order.
    roots: Vec<NodeId>,

    /// Maps identity keys to their slot.
    keys: HashMap<V::Key, NodeId>,

    config: IndexConfig,

    stats: IndexStats,
}

impl<V: RangeValue> RangeIndex<V> {
    /// Create an empty index with the default configuration.
    pub fn new() -> Self {
        Self::with_config(IndexConfig::default())
    }

    pub fn with_config(config: IndexConfig) -> Self {
        Self {
            nodes: Vec::with_capacity(config.arena_capacity),
            free_list: Vec::new(),
            roots: Vec::new(),
            keys: HashMap::new(),
            config,
            stats: IndexStats::default(),
        }
    }

    /// Number of nodes in the index.
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[inline]
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    #[inline]
    pub fn stats(&self) -> IndexStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = IndexStats::default();
    }

    /// Drop every node, returning the index to empty.
    ///
    /// Statistics are kept.
    pub fn clear(&mut self) {
        debug!("clearing range index ({} nodes)", self.len());
        self.nodes.clear();
        self.free_list.clear();
        self.roots.clear();
        self.keys.clear();
    }

    // ========================================================================
    // Public API: Node access
    // ========================================================================

    /// Get a live node by slot.
    pub fn node(&self, id: NodeId) -> Option<&IndexNode<V>> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    /// Get a node by its value's identity key.
    pub fn get(&self, key: &V::Key) -> Option<&IndexNode<V>> {
        self.keys.get(key).map(|&id| self.slot(id))
    }

    /// Slot of the node with this identity key.
    pub fn id_of(&self, key: &V::Key) -> Option<NodeId> {
        self.keys.get(key).copied()
    }

    pub fn contains_key(&self, key: &V::Key) -> bool {
        self.keys.contains_key(key)
    }

    /// Top-level nodes in ascending start order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Children of `id`, or an empty slice if `id` is not live.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.node(id) {
            Some(node) => node.children(),
            None => &[],
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.parent)
    }

    /// Nesting depth of `id`; top-level nodes are at depth 0.
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        let mut node = self.node(id)?;
        let mut depth = 0;
        while let Some(parent) = node.parent {
            node = self.slot(parent);
            depth += 1;
        }
        Some(depth)
    }

    // ========================================================================
    // Public API: Insert
    // ========================================================================

    /// Insert `value` spanning `[start, end]`.
    ///
    /// The new node descends into the first existing range that contains it,
    /// and takes over as parent of every sibling it contains at the level
    /// where it lands. The whole placement is validated before the tree is
    /// touched, so a failed insert leaves the index unchanged.
    ///
    /// # Errors
    /// - `Error::InvalidRange` if `start > end`
    /// - `Error::DuplicateKey` if the value's key is already present
    /// - `Error::RangeOverlap` if the range partially overlaps a sibling
    /// - `Error::ContainerCapacity` if a leaf-only value would gain a child
    /// - `Error::DuplicateRange` if a sibling has the same range and the
    ///   config rejects equal ranges
    ///
    /// # Panics
    /// In debug builds, if [`RangeValue::range`] reports a range other than
    /// `[start, end]`.
    pub fn insert(&mut self, value: V, start: i64, end: i64) -> Result<NodeId> {
        match self.insert_internal(value, start, end) {
            Ok(id) => {
                self.stats.inserted += 1;
                Ok(id)
            }
            Err(err) => {
                self.stats.rejected += 1;
                Err(err)
            }
        }
    }

    fn insert_internal(&mut self, value: V, start: i64, end: i64) -> Result<NodeId> {
        let range = FrameRange::new(start, end)?;
        if let Some(own) = value.range() {
            debug_assert_eq!(own, range, "{} inserted under a range it does not carry", value.describe());
        }

        let key = value.key();
        if self.keys.contains_key(&key) {
            return Err(Error::DuplicateKey {
                label: value.describe(),
            });
        }

        let mut parent = None;
        let placement = loop {
            match self.scan_level(parent, &value, range)? {
                Step::Descend(child) => {
                    trace!("{} descends into {}", range, self.slot(child).range);
                    parent = Some(child);
                }
                Step::Place(placement) => break placement,
            }
        };

        let id = self.alloc(IndexNode::new(value, range));
        self.keys.insert(key, id);

        match placement {
            Placement::At(pos) => {
                self.child_list_mut(parent).insert(pos, id);
                self.slot_mut(id).parent = parent;
                debug!("inserted {} at position {} under {:?}", range, pos, parent);
            }
            Placement::Absorb(positions) => {
                self.absorb(parent, id, &positions);
                debug!(
                    "inserted {} under {:?}, absorbing {} sibling(s)",
                    range,
                    parent,
                    positions.len()
                );
            }
        }

        Ok(id)
    }

    /// Decide where `range` goes among the children of `parent`, without mutating.
    fn scan_level(&self, parent: Option<NodeId>, value: &V, range: FrameRange) -> Result<Step> {
        let mut absorbed = Vec::new();

        for (pos, &child_id) in self.child_list(parent).iter().enumerate() {
            let child = self.slot(child_id);

            if child.range.overlaps(&range) {
                return Err(Error::RangeOverlap {
                    label: value.describe(),
                    range,
                    conflict_label: child.value.describe(),
                    conflict_range: child.range,
                });
            }

            if !absorbed.is_empty() {
                // Position is fixed; later siblings can only be absorbed or conflict.
                if range.contains(&child.range) {
                    absorbed.push(pos);
                }
                continue;
            }

            if child.range.contains(&range) {
                if child.range == range && self.config.equal_ranges == EqualRangePolicy::Reject {
                    return Err(Error::DuplicateRange {
                        label: value.describe(),
                        range,
                        existing_label: child.value.describe(),
                    });
                }
                if child.value.capability().is_leaf() {
                    return Err(Error::ContainerCapacity {
                        label: child.value.describe(),
                    });
                }
                return Ok(Step::Descend(child_id));
            }

            // Checked before `precedes` so a single-frame child on our end frame is absorbed.
            if range.contains(&child.range) {
                if value.capability().is_leaf() {
                    return Err(Error::ContainerCapacity {
                        label: value.describe(),
                    });
                }
                absorbed.push(pos);
                continue;
            }

            if range.precedes(&child.range) {
                return Ok(Step::Place(Placement::At(pos)));
            }
        }

        if absorbed.is_empty() {
            let end = self.child_list(parent).len();
            Ok(Step::Place(Placement::At(end)))
        } else {
            Ok(Step::Place(Placement::Absorb(absorbed)))
        }
    }

    /// Move the siblings at `positions` under `id`, and put `id` where the first one stood.
    fn absorb(&mut self, parent: Option<NodeId>, id: NodeId, positions: &[usize]) {
        let siblings = self.child_list_mut(parent);
        let first = positions[0];

        let mut taken: Vec<NodeId> = positions
            .iter()
            .rev()
            .map(|&pos| siblings.remove(pos))
            .collect();
        taken.reverse();
        siblings.insert(first, id);

        for &child in &taken {
            self.slot_mut(child).parent = Some(id);
        }

        self.stats.absorbed += taken.len() as u64;
        let node = self.slot_mut(id);
        node.parent = parent;
        node.children = taken;
    }

    // ========================================================================
    // Public API: Find and remove
    // ========================================================================

    /// First node, in pre-order, whose value satisfies `predicate`.
    ///
    /// # Errors
    /// - `Error::NotFound` if nothing matches
    pub fn find<P>(&self, predicate: P) -> Result<&IndexNode<V>>
    where
        P: FnMut(&V) -> bool,
    {
        self.locate(predicate)
            .map(|id| self.slot(id))
            .ok_or(Error::NotFound)
    }

    /// First node, in pre-order, whose value equals `value`.
    pub fn find_value(&self, value: &V) -> Result<&IndexNode<V>>
    where
        V: PartialEq,
    {
        self.find(|candidate| candidate == value)
    }

    /// Remove the first node, in pre-order, whose value satisfies `predicate`.
    ///
    /// The removed node's children move up into its parent, in their
    /// original order, at the position it vacated.
    ///
    /// # Errors
    /// - `Error::NotFound` if nothing matches
    pub fn remove<P>(&mut self, predicate: P) -> Result<Entry<V>>
    where
        P: FnMut(&V) -> bool,
    {
        let id = self.locate(predicate).ok_or(Error::NotFound)?;
        Ok(self.detach(id))
    }

    pub fn remove_value(&mut self, value: &V) -> Result<Entry<V>>
    where
        V: PartialEq,
    {
        self.remove(|candidate| candidate == value)
    }

    /// Remove the node with this identity key.
    ///
    /// # Errors
    /// - `Error::NotFound` if the key is not present
    pub fn remove_key(&mut self, key: &V::Key) -> Result<Entry<V>> {
        let id = self.id_of(key).ok_or(Error::NotFound)?;
        Ok(self.detach(id))
    }

    fn locate<P>(&self, mut predicate: P) -> Option<NodeId>
    where
        P: FnMut(&V) -> bool,
    {
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let node = self.slot(id);
            if predicate(&node.value) {
                return Some(id);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        None
    }

    fn detach(&mut self, id: NodeId) -> Entry<V> {
        let pos = self.position_in_parent(id);
        let node = match self.nodes[id.0].take() {
            Some(node) => node,
            None => unreachable!("{} is not a live node", id),
        };

        let orphans = node.children.len();
        let siblings = self.child_list_mut(node.parent);
        siblings.remove(pos);
        for (offset, &child) in node.children.iter().enumerate() {
            siblings.insert(pos + offset, child);
        }
        for &child in &node.children {
            self.slot_mut(child).parent = node.parent;
        }

        self.keys.remove(&node.value.key());
        self.free_list.push(id);
        self.stats.removed += 1;
        self.stats.reattached += orphans as u64;
        debug!(
            "removed {} from {:?}, reattached {} child(ren)",
            node.range, node.parent, orphans
        );

        Entry {
            value: node.value,
            range: node.range,
        }
    }

    // ========================================================================
    // Public API: Queries
    // ========================================================================

    /// Deepest node whose range contains `frame`.
    ///
    /// At each level the first containing child wins. Returns `None` when no
    /// node contains the frame (the query stopped at the implicit root).
    pub fn tightest_containing(&self, frame: i64) -> Option<&IndexNode<V>> {
        let mut best = None;
        let mut level: &[NodeId] = &self.roots;

        while let Some(&id) = level
            .iter()
            .find(|&&id| self.slot(id).range.contains_point(frame))
        {
            let node = self.slot(id);
            best = Some(node);
            level = &node.children;
        }
        best
    }

    /// Nodes matching the window `[start, end]` under the configured
    /// [`RangeQueryMode`], in pre-order.
    pub fn range_query(&self, start: i64, end: i64) -> Vec<&IndexNode<V>> {
        self.range_query_with(start, end, self.config.range_query)
    }

    pub fn range_query_with(&self, start: i64, end: i64, mode: RangeQueryMode) -> Vec<&IndexNode<V>> {
        self.walk(&self.roots)
            .into_iter()
            .map(|(id, _)| self.slot(id))
            .filter(|node| match mode {
                RangeQueryMode::Boundary => node.range.touches_boundary(start, end),
                RangeQueryMode::Intersecting => node.range.intersects(start, end),
            })
            .collect()
    }

    /// Every node in pre-order.
    ///
    /// Each call walks the whole tree afresh.
    pub fn traverse(&self) -> Vec<&IndexNode<V>> {
        self.walk(&self.roots)
            .into_iter()
            .map(|(id, _)| self.slot(id))
            .collect()
    }

    /// Every node in pre-order, paired with its depth (top-level nodes are 0).
    pub fn traverse_with_levels(&self) -> Vec<(&IndexNode<V>, usize)> {
        self.walk(&self.roots)
            .into_iter()
            .map(|(id, depth)| (self.slot(id), depth))
            .collect()
    }

    /// Every node nested below `key`, in pre-order, excluding the node itself.
    ///
    /// # Errors
    /// - `Error::NotFound` if the key is not present
    pub fn descendants(&self, key: &V::Key) -> Result<Vec<&IndexNode<V>>> {
        let node = self.get(key).ok_or(Error::NotFound)?;
        Ok(self
            .walk(&node.children)
            .into_iter()
            .map(|(id, _)| self.slot(id))
            .collect())
    }

    /// Pre-order walk over the subtrees rooted at `from`, with depth relative to `from`.
    fn walk(&self, from: &[NodeId]) -> Vec<(NodeId, usize)> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack: Vec<(NodeId, usize)> = from.iter().rev().map(|&id| (id, 0)).collect();

        while let Some((id, depth)) = stack.pop() {
            out.push((id, depth));
            stack.extend(
                self.slot(id)
                    .children
                    .iter()
                    .rev()
                    .map(|&child| (child, depth + 1)),
            );
        }
        out
    }

    // ========================================================================
    // Internal: arena helpers
    // ========================================================================

    fn alloc(&mut self, node: IndexNode<V>) -> NodeId {
        if let Some(id) = self.free_list.pop() {
            self.nodes[id.0] = Some(node);
            id
        } else {
            self.nodes.push(Some(node));
            NodeId::new(self.nodes.len() - 1)
        }
    }

    /// Ids reachable from `roots` always address live slots.
    #[inline]
    fn slot(&self, id: NodeId) -> &IndexNode<V> {
        match &self.nodes[id.0] {
            Some(node) => node,
            None => unreachable!("{} is not a live node", id),
        }
    }

    #[inline]
    fn slot_mut(&mut self, id: NodeId) -> &mut IndexNode<V> {
        match &mut self.nodes[id.0] {
            Some(node) => node,
            None => unreachable!("{} is not a live node", id),
        }
    }

    fn child_list(&self, parent: Option<NodeId>) -> &Vec<NodeId> {
        match parent {
            Some(id) => &self.slot(id).children,
            None => &self.roots,
        }
    }

    fn child_list_mut(&mut self, parent: Option<NodeId>) -> &mut Vec<NodeId> {
        match parent {
            Some(id) => &mut self.slot_mut(id).children,
            None => &mut self.roots,
        }
    }

    fn position_in_parent(&self, id: NodeId) -> usize {
        let siblings = self.child_list(self.slot(id).parent);
        match siblings.iter().position(|&sibling| sibling == id) {
            Some(pos) => pos,
            None => unreachable!("{} is missing from its parent's children", id),
        }
    }
}

impl<V: RangeValue> Default for RangeIndex<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::Capability;
    use crate::label::{Label, LabelId};

    fn skill(index: &mut RangeIndex<Label>, id: u64, name: &str, start: i64, end: i64) -> Result<NodeId> {
        index.insert(Label::skill(id, name, start, end)?, start, end)
    }

    fn action(index: &mut RangeIndex<Label>, id: u64, name: &str, start: i64, end: i64) -> Result<NodeId> {
        index.insert(Label::action(id, name, start, end)?, start, end)
    }

    fn names(nodes: &[&IndexNode<Label>]) -> Vec<String> {
        nodes.iter().map(|node| node.value().name.clone()).collect()
    }

    fn child_names(index: &RangeIndex<Label>, id: NodeId) -> Vec<String> {
        index
            .children(id)
            .iter()
            .filter_map(|&child| index.node(child))
            .map(|node| node.value().name.clone())
            .collect()
    }

    /// Scenario tree: E[0,20] { A[0,10] { D[1,2], B[4,5], B2[5,10] }, C[10,11] }.
    fn scenario() -> RangeIndex<Label> {
        let mut index = RangeIndex::new();
        skill(&mut index, 1, "A", 0, 10).unwrap();
        skill(&mut index, 2, "B", 4, 5).unwrap();
        skill(&mut index, 3, "B2", 5, 10).unwrap();
        skill(&mut index, 4, "C", 10, 11).unwrap();
        skill(&mut index, 5, "D", 1, 2).unwrap();
        skill(&mut index, 6, "E", 0, 20).unwrap();
        index
    }

    #[test]
    fn test_empty_index() {
        let index: RangeIndex<Label> = RangeIndex::new();
        assert!(index.is_empty());
        assert!(index.traverse().is_empty());
        assert!(index.tightest_containing(0).is_none());
        assert_eq!(index.find(|_| true).unwrap_err(), Error::NotFound);
    }

    #[test]
    fn test_siblings_kept_in_start_order() {
        let mut index = RangeIndex::new();
        skill(&mut index, 1, "late", 20, 30).unwrap();
        skill(&mut index, 2, "early", 0, 5).unwrap();
        skill(&mut index, 3, "middle", 10, 12).unwrap();

        assert_eq!(names(&index.traverse()), vec!["early", "middle", "late"]);
    }

    #[test]
    fn test_scenario_structure() {
        let index = scenario();
        let e = index.id_of(&LabelId(6)).unwrap();
        let a = index.id_of(&LabelId(1)).unwrap();

        assert_eq!(index.roots(), &[e]);
        assert_eq!(child_names(&index, e), vec!["A", "C"]);
        assert_eq!(child_names(&index, a), vec!["D", "B", "B2"]);
        assert_eq!(index.depth(a), Some(1));
        assert_eq!(index.parent(a), Some(e));
    }

    #[test]
    fn test_absorbs_every_contained_sibling() {
        let mut index = RangeIndex::new();
        skill(&mut index, 1, "x", 0, 2).unwrap();
        skill(&mut index, 2, "y", 5, 7).unwrap();
        skill(&mut index, 3, "z", 20, 25).unwrap();
        skill(&mut index, 4, "w", 8, 9).unwrap();

        let outer = skill(&mut index, 5, "outer", 0, 10).unwrap();
        assert_eq!(child_names(&index, outer), vec!["x", "y", "w"]);
        assert_eq!(names(&index.traverse()), vec!["outer", "x", "y", "w", "z"]);
        assert_eq!(index.stats().absorbed, 3);
    }

    #[test]
    fn test_overlap_reports_first_conflict() {
        let mut index = scenario();
        // Would absorb D and B, then crosses B2's start.
        let err = skill(&mut index, 7, "bad", 0, 7).unwrap_err();
        match err {
            Error::RangeOverlap {
                label,
                range,
                conflict_label,
                conflict_range,
            } => {
                assert_eq!(label, "bad");
                assert_eq!(range, FrameRange::new(0, 7).unwrap());
                assert_eq!(conflict_label, "B2");
                assert_eq!(conflict_range, FrameRange::new(5, 10).unwrap());
            }
            other => panic!("expected RangeOverlap, got {:?}", other),
        }
    }

    #[test]
    fn test_shared_endpoint_is_not_overlap() {
        let mut index = scenario();
        let a = index.id_of(&LabelId(1)).unwrap();

        // Contains D, only touches B at frame 4.
        let wrapper = skill(&mut index, 7, "wrapper", 0, 4).unwrap();
        assert_eq!(child_names(&index, a), vec!["wrapper", "B", "B2"]);
        assert_eq!(child_names(&index, wrapper), vec!["D"]);
    }

    #[test]
    fn test_point_on_end_frame_is_absorbed() {
        let mut index = RangeIndex::new();
        skill(&mut index, 1, "point", 5, 5).unwrap();
        let span = skill(&mut index, 2, "span", 4, 5).unwrap();

        assert_eq!(index.roots(), &[span]);
        assert_eq!(child_names(&index, span), vec!["point"]);
    }

    #[test]
    fn test_failed_absorb_leaves_tree_unchanged() {
        let mut index = RangeIndex::new();
        skill(&mut index, 1, "x", 0, 2).unwrap();
        skill(&mut index, 2, "y", 4, 8).unwrap();

        // Would absorb x, then conflicts with y.
        let before = names(&index.traverse());
        assert!(matches!(
            skill(&mut index, 3, "bad", 0, 6),
            Err(Error::RangeOverlap { .. })
        ));
        assert_eq!(names(&index.traverse()), before);
        assert_eq!(index.roots().len(), 2);
        assert_eq!(index.len(), 2);
        assert!(!index.contains_key(&LabelId(3)));
        assert_eq!(index.stats().rejected, 1);
    }

    #[test]
    fn test_leaf_capacity() {
        let mut index = RangeIndex::new();
        action(&mut index, 1, "G", 0, 10).unwrap();

        assert_eq!(
            action(&mut index, 2, "inner", 4, 5),
            Err(Error::ContainerCapacity {
                label: "G".to_string()
            })
        );
        assert_eq!(
            skill(&mut index, 3, "inner skill", 0, 10),
            Err(Error::ContainerCapacity {
                label: "G".to_string()
            })
        );
        assert_eq!(
            action(&mut index, 4, "wrapper", 0, 11),
            Err(Error::ContainerCapacity {
                label: "wrapper".to_string()
            })
        );

        // A container may still wrap the leaf.
        let outer = skill(&mut index, 5, "outer", 0, 20).unwrap();
        assert_eq!(child_names(&index, outer), vec!["G"]);
    }

    #[test]
    fn test_rejects_duplicate_key_and_reversed_range() {
        let mut index = RangeIndex::new();
        skill(&mut index, 1, "A", 0, 10).unwrap();

        assert!(matches!(
            skill(&mut index, 1, "A again", 20, 30),
            Err(Error::DuplicateKey { .. })
        ));
        assert!(matches!(
            Label::skill(2, "rev", 5, 3),
            Err(Error::InvalidRange { start: 5, end: 3 })
        ));
    }

    /// A value with no range of its own; only the insert arguments place it.
    #[derive(Debug)]
    struct Span(u64);

    impl RangeValue for Span {
        type Key = u64;

        fn key(&self) -> u64 {
            self.0
        }

        fn capability(&self) -> Capability {
            Capability::Container
        }
    }

    #[test]
    fn test_rangeless_values_take_insert_range() {
        let mut index = RangeIndex::new();
        let outer = index.insert(Span(1), 0, 10).unwrap();
        let inner = index.insert(Span(2), 3, 4).unwrap();

        assert_eq!(index.parent(inner), Some(outer));
        assert_eq!(index.node(inner).unwrap().range(), FrameRange::new(3, 4).unwrap());
        assert_eq!(
            index.insert(Span(3), 9, 2),
            Err(Error::InvalidRange { start: 9, end: 2 })
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "inserted under a range it does not carry")]
    fn test_label_under_foreign_range_panics() {
        let mut index = RangeIndex::new();
        let _ = index.insert(Label::skill(1, "walk", 0, 10).unwrap(), 20, 30);
    }

    #[test]
    fn test_equal_range_policy() {
        let mut nesting = RangeIndex::new();
        let outer = skill(&mut nesting, 1, "first", 0, 10).unwrap();
        skill(&mut nesting, 2, "second", 0, 10).unwrap();
        assert_eq!(child_names(&nesting, outer), vec!["second"]);

        let config = IndexConfig::default().with_equal_ranges(EqualRangePolicy::Reject);
        let mut rejecting = RangeIndex::with_config(config);
        skill(&mut rejecting, 1, "first", 0, 10).unwrap();
        assert!(matches!(
            skill(&mut rejecting, 2, "second", 0, 10),
            Err(Error::DuplicateRange { .. })
        ));
    }

    #[test]
    fn test_remove_reattaches_in_order() {
        let mut index = scenario();
        let e = index.id_of(&LabelId(6)).unwrap();

        let removed = index.remove(|label| label.name == "A").unwrap();
        assert_eq!(removed.value.name, "A");
        assert_eq!(removed.range, FrameRange::new(0, 10).unwrap());
        assert_eq!(child_names(&index, e), vec!["D", "B", "B2", "C"]);
        assert_eq!(index.stats().reattached, 3);

        let d = index.id_of(&LabelId(5)).unwrap();
        assert_eq!(index.parent(d), Some(e));
    }

    #[test]
    fn test_remove_missing() {
        let mut index = scenario();
        assert_eq!(index.remove_key(&LabelId(99)).unwrap_err(), Error::NotFound);
        assert_eq!(
            index.remove(|label| label.name == "nope").unwrap_err(),
            Error::NotFound
        );
        assert_eq!(index.len(), 6);
    }

    #[test]
    fn test_removed_slot_is_reused() {
        let mut index = scenario();
        let b = index.id_of(&LabelId(2)).unwrap();
        index.remove_key(&LabelId(2)).unwrap();
        assert!(index.node(b).is_none());

        let reused = skill(&mut index, 7, "F", 30, 40).unwrap();
        assert_eq!(reused, b);
        assert_eq!(index.node(reused).unwrap().value().name, "F");
    }

    #[test]
    fn test_find_value_and_key() {
        let index = scenario();
        let b2 = Label::skill(3, "B2", 5, 10).unwrap();
        assert_eq!(index.find_value(&b2).unwrap().range(), b2.range);
        assert_eq!(index.get(&LabelId(4)).unwrap().value().name, "C");
    }

    #[test]
    fn test_tightest_containing() {
        let index = scenario();
        let name = |frame| index.tightest_containing(frame).map(|node| node.value().name.clone());

        assert_eq!(name(1).as_deref(), Some("D"));
        assert_eq!(name(3).as_deref(), Some("A"));
        // First containing child wins: 5 is in both B and B2.
        assert_eq!(name(5).as_deref(), Some("B"));
        // 10 is in both A and C; A comes first, then B2 inside it.
        assert_eq!(name(10).as_deref(), Some("B2"));
        assert_eq!(name(15).as_deref(), Some("E"));
        assert_eq!(name(21), None);
        assert_eq!(name(-1), None);
    }

    #[test]
    fn test_range_query_modes() {
        let index = scenario();

        assert_eq!(names(&index.range_query(3, 4)), vec!["B"]);
        assert_eq!(
            names(&index.range_query_with(3, 4, RangeQueryMode::Intersecting)),
            vec!["E", "A", "B"]
        );
        assert_eq!(names(&index.range_query(10, 10)), vec!["A", "B2", "C"]);
    }

    #[test]
    fn test_traverse_with_levels() {
        let index = scenario();
        let levels: Vec<(String, usize)> = index
            .traverse_with_levels()
            .into_iter()
            .map(|(node, depth)| (node.value().name.clone(), depth))
            .collect();

        assert_eq!(
            levels,
            vec![
                ("E".to_string(), 0),
                ("A".to_string(), 1),
                ("D".to_string(), 2),
                ("B".to_string(), 2),
                ("B2".to_string(), 2),
                ("C".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_descendants() {
        let index = scenario();
        assert_eq!(
            names(&index.descendants(&LabelId(1)).unwrap()),
            vec!["D", "B", "B2"]
        );
        assert!(index.descendants(&LabelId(4)).unwrap().is_empty());
        assert_eq!(index.descendants(&LabelId(42)).unwrap_err(), Error::NotFound);
    }

    #[test]
    fn test_clear_keeps_stats() {
        let mut index = scenario();
        index.clear();

        assert!(index.is_empty());
        assert!(index.roots().is_empty());
        assert_eq!(index.stats().inserted, 6);

        skill(&mut index, 1, "A", 0, 10).unwrap();
        assert_eq!(index.len(), 1);
    }
}
