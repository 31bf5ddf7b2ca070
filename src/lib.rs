//! framenest - A hierarchical frame-range index for nested timeline annotations.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │               Callers (timeline view, list view, IO)            │
//! │     insert / remove          traverse / range_query / point     │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                 Labels (label/)                          │   │
//! │  │        Skill = container      Action = leaf-only         │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                 Range Index (index/)                     │   │
//! │  │   RangeIndex + IndexNode arena + batch + replay + stats  │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                 Primitives (common/)                     │   │
//! │  │        FrameRange + NodeId + Error + IndexConfig         │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (FrameRange, NodeId, Error, config)
//! - [`index`] - The range index and its value contract
//! - [`label`] - Skill and action annotation payloads
//!
//! # Quick Start
//! ```
//! use framenest::{Error, Label, LabelId, RangeIndex};
//!
//! let mut index = RangeIndex::new();
//! index.insert_label(Label::skill(1, "serve", 0, 10).unwrap()).unwrap();
//! index.insert_label(Label::action(2, "toss", 1, 2).unwrap()).unwrap();
//!
//! // A wider skill becomes the parent of what it covers.
//! index.insert_label(Label::skill(3, "rally", 0, 20).unwrap()).unwrap();
//! assert_eq!(index.descendants(&LabelId(3)).unwrap().len(), 2);
//!
//! // Actions never hold children.
//! let err = index.insert_label(Label::action(4, "spin", 1, 1).unwrap());
//! assert!(matches!(err, Err(Error::ContainerCapacity { .. })));
//! ```

pub mod common;
pub mod index;
pub mod label;

// Re-export commonly used items at crate root for convenience
pub use common::config::DEFAULT_ARENA_CAPACITY;
pub use common::{EqualRangePolicy, Error, FrameRange, IndexConfig, NodeId, RangeQueryMode, Result};

pub use index::{BatchReport, Capability, Entry, IndexNode, IndexStats, RangeIndex, RangeValue};
pub use label::{Label, LabelId, LabelKind};
