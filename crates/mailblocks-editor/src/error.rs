//! Error types for document operations.
//!
//! These are internal plumbing: the public reducer and inspector entry points
//! catch every variant and degrade to a no-op (a failed drag must never
//! corrupt layout state). Only the snapshot codec surfaces errors to callers.

use thiserror::Error;

use mailblocks_types::BlockId;

/// Errors that can occur during document operations.
#[derive(Error, Debug)]
pub enum EditorError {
    /// Block not found in the document.
    #[error("block not found: {0:?}")]
    BlockNotFound(BlockId),

    /// Container reference names a block that is missing or not a columns block.
    #[error("unknown container block: {0:?}")]
    UnknownContainer(BlockId),

    /// Column index at or past the block's column count.
    #[error("column {index} out of range for columns block {block:?} with {count} columns")]
    ColumnOutOfRange {
        block: BlockId,
        index: usize,
        count: u32,
    },

    /// Source index past the end of its container.
    #[error("index {index} out of bounds for container with length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A block with this ID already exists in the tree.
    #[error("block already exists: {0:?}")]
    DuplicateBlock(BlockId),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}
