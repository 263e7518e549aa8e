//! Editor session — one document plus explicit selection state.
//!
//! Selection is session state, not document state: the same tree can be open
//! in two sessions with different blocks selected. The invariant here is that
//! `selected` always names a live block or is `None`, so every removal path
//! (including a columns subtree disappearing with its container) revalidates
//! it before returning.

use mailblocks_types::{Block, BlockId, BlockKind, OptionsPatch, SettingsPatch};

use crate::document::{ContainerRef, TemplateDocument};
use crate::reducer::{apply_move, MoveEvent};

/// A live editing session over one template document.
#[derive(Clone, Debug, Default)]
pub struct Editor {
    document: TemplateDocument,
    selected: Option<BlockId>,
}

impl Editor {
    /// Start a session over an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session over an existing document, nothing selected.
    pub fn with_document(document: TemplateDocument) -> Self {
        Self {
            document,
            selected: None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn document(&self) -> &TemplateDocument {
        &self.document
    }

    /// The currently selected block id, if any. Always names a live block.
    pub fn selected(&self) -> Option<BlockId> {
        self.selected
    }

    /// The currently selected block, if any.
    pub fn selected_block(&self) -> Option<&Block> {
        self.selected.and_then(|id| self.document.get(&id))
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Select a block. Returns false (selection unchanged) for a dead id.
    pub fn select(&mut self, id: BlockId) -> bool {
        if !self.document.contains(&id) {
            tracing::warn!("ignoring selection of dead block {id}");
            return false;
        }
        self.selected = Some(id);
        true
    }

    /// Clear the selection (click on empty canvas).
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    fn revalidate_selection(&mut self) {
        if let Some(id) = self.selected {
            if !self.document.contains(&id) {
                self.selected = None;
            }
        }
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Run a drag-and-drop event through the move reducer.
    ///
    /// A palette drop selects the block it created; moves leave the selection
    /// alone. Returns the id of a newly created block, if any.
    pub fn handle_move(&mut self, event: &MoveEvent) -> Option<BlockId> {
        let outcome = apply_move(&self.document, event);
        self.document = outcome.document;
        if let Some(id) = outcome.inserted {
            self.selected = Some(id);
        }
        self.revalidate_selection();
        outcome.inserted
    }

    /// Create a new block of `kind` at the end of the root list and select it.
    pub fn append_block(&mut self, kind: BlockKind) -> Option<BlockId> {
        let index = self.document.root_ids().len();
        match self
            .document
            .insert_new(&ContainerRef::Root, index, Block::default_for(kind))
        {
            Ok(id) => {
                self.selected = Some(id);
                Some(id)
            }
            Err(err) => {
                tracing::warn!("append degraded to no-op: {err}");
                None
            }
        }
    }

    /// Delete a block (and its subtree for columns blocks). The selection is
    /// cleared if it pointed anywhere inside what was removed.
    pub fn delete_block(&mut self, id: &BlockId) -> bool {
        let deleted = self.document.delete_block(id);
        if deleted {
            self.revalidate_selection();
        }
        deleted
    }

    /// Delete whatever is selected, clearing the selection.
    pub fn delete_selected(&mut self) -> bool {
        match self.selected {
            Some(id) => self.delete_block(&id),
            None => false,
        }
    }

    // =========================================================================
    // Inspector pass-throughs
    // =========================================================================

    pub fn update_block_options(&mut self, id: &BlockId, patch: &OptionsPatch) -> bool {
        self.document.update_block_options(id, patch)
    }

    pub fn set_content(&mut self, id: &BlockId, content: impl Into<String>) -> bool {
        self.document.set_content(id, content)
    }

    pub fn set_background_color(&mut self, id: &BlockId, color: impl Into<String>) -> bool {
        self.document.set_background_color(id, color)
    }

    pub fn update_settings(&mut self, patch: &SettingsPatch) {
        self.document.update_settings(patch);
    }
}

// =========================================================================
// Tests
// =========================================================================
