//! Block tree document model and drag-and-drop editor for mailblocks.
//!
//! An email template is an ordered tree of blocks: a root list of leaf blocks
//! (text, image, button, divider, footer, bullet list) and columns blocks,
//! each of whose column slots holds a further ordered list of leaves. Columns
//! never nest inside columns.
//!
//! # Architecture
//!
//! - [`TemplateDocument`] — arena store: blocks keyed by id, containers as
//!   ordered id lists. Find-by-id is a map lookup, order is a container
//!   concern.
//! - [`apply_move`] — the single state transition for drag and drop. Pure:
//!   takes the document by reference, returns a fresh one. Malformed events
//!   degrade to "tree unchanged", never to a panic or a corrupted layout.
//! - [`Editor`] — a session over one document with explicit selection state.
//!   `selected` always names a live block or is `None`.
//! - [`TemplateSnapshot`] — the nested JSON form templates are stored in,
//!   with lossless arena conversion both ways.
//!
//! # Failure semantics
//!
//! Interactive edits never error out: a drop into a container that no longer
//! exists, a patch against a deleted block, a stale index all land as warned
//! no-ops. Only the snapshot codec returns errors.

mod document;
mod error;
mod reducer;
mod session;
mod snapshot;

pub use document::{ContainerRef, TemplateDocument};
pub use error::EditorError;
pub use reducer::{apply_move, DragLocation, MoveEvent, MoveOutcome};
pub use session::Editor;
pub use snapshot::{ElementNode, TemplateSnapshot};

/// Result type for editor operations.
pub type Result<T> = std::result::Result<T, EditorError>;
