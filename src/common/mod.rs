//! Common types and utilities shared across framenest.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration
//! - Error types
//! - Identifiers and ranges (NodeId, FrameRange)

pub mod config;
pub mod error;
mod frame_range;
mod node_id;

pub use config::{EqualRangePolicy, IndexConfig, RangeQueryMode};
pub use error::{Error, Result};
pub use frame_range::FrameRange;
pub use node_id::NodeId;
