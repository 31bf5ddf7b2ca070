//! Annotation labels stored in the index.
//!
//! A clip is annotated with two kinds of label:
//! - **Skills**: named segments that can contain other skills and actions
//! - **Actions**: atomic segments that never contain anything
//!
//! [`Label`] implements [`RangeValue`] with skills as containers and actions
//! as leaves, so a `RangeIndex<Label>` enforces that split on every insert.

use std::fmt;

use crate::common::{FrameRange, NodeId, Result};
use crate::index::{Capability, RangeIndex, RangeValue};

/// Identifies a label across edits, saves and reloads.
///
/// # Example
/// ```
/// use framenest::LabelId;
///
/// assert_eq!(format!("{}", LabelId(7)), "Label(7)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelId(pub u64);

impl fmt::Display for LabelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Label({})", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelKind {
    Skill,
    Action,
}

impl LabelKind {
    pub fn capability(self) -> Capability {
        match self {
            LabelKind::Skill => Capability::Container,
            LabelKind::Action => Capability::Leaf,
        }
    }
}

impl fmt::Display for LabelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelKind::Skill => write!(f, "skill"),
            LabelKind::Action => write!(f, "action"),
        }
    }
}

/// A named, frame-bounded annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub id: LabelId,
    pub name: String,
    pub kind: LabelKind,
    pub range: FrameRange,
}

impl Label {
    /// # Errors
    /// - `Error::InvalidRange` if `start > end`
    pub fn new(id: u64, name: impl Into<String>, kind: LabelKind, start: i64, end: i64) -> Result<Self> {
        Ok(Self {
            id: LabelId(id),
            name: name.into(),
            kind,
            range: FrameRange::new(start, end)?,
        })
    }

    pub fn skill(id: u64, name: impl Into<String>, start: i64, end: i64) -> Result<Self> {
        Self::new(id, name, LabelKind::Skill, start, end)
    }

    pub fn action(id: u64, name: impl Into<String>, start: i64, end: i64) -> Result<Self> {
        Self::new(id, name, LabelKind::Action, start, end)
    }

    /// Change the display name. Identity and range are untouched, so the
    /// label's place in an index stays valid.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

impl RangeValue for Label {
    type Key = LabelId;

    fn key(&self) -> LabelId {
        self.id
    }

    fn capability(&self) -> Capability {
        self.kind.capability()
    }

    fn describe(&self) -> String {
        self.name.clone()
    }

    fn range(&self) -> Option<FrameRange> {
        Some(self.range)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]{}({}): {}", self.kind, self.name, self.id, self.range)
    }
}

impl RangeIndex<Label> {
    /// Insert a label under its own range.
    pub fn insert_label(&mut self, label: Label) -> Result<NodeId> {
        let FrameRange { start, end } = label.range;
        self.insert(label, start, end)
    }
}
