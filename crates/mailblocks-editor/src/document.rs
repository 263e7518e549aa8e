//! Template document — an arena of blocks with ordered containers.
//!
//! Blocks live in a single map keyed by [`BlockId`]; containers (the root
//! list and each column slot of a columns block) hold ordered *id lists*, not
//! embedded block values. Find-and-update-by-id is a map lookup instead of a
//! tree walk, and order stays purely a container concern.
//!
//! Column slots may lag a block's `column_count`: shrinking the count does
//! not truncate slots, growing does not backfill eagerly — a missing slot is
//! materialized the first time something is inserted into it. Encoders emit
//! slots verbatim, lag included.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use mailblocks_types::{
    Block, BlockId, BlockKind, BlockOptions, EditorSettings, OptionsPatch, SettingsPatch,
};

use crate::error::EditorError;
use crate::Result;

/// Address of a container: the root list, or one column slot of a columns
/// block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContainerRef {
    /// The top-level ordered list.
    Root,
    /// Column slot `column_index` of the columns block `columns_block_id`.
    #[serde(rename_all = "camelCase")]
    Column {
        columns_block_id: BlockId,
        column_index: usize,
    },
}

/// The block tree for one email template.
///
/// Owned exclusively by a single editor session; every mutation runs to
/// completion before the next event is processed. Cloning produces a fully
/// independent snapshot (no aliasing between old and new values), which is
/// what the move reducer builds on.
#[derive(Clone, Debug, PartialEq)]
pub struct TemplateDocument {
    /// All live blocks, keyed by id.
    blocks: BTreeMap<BlockId, Block>,
    /// Top-level ordering. Order is rendering order.
    root: Vec<BlockId>,
    /// Column sub-lists per columns block. May lag `column_count`.
    slots: BTreeMap<BlockId, Vec<Vec<BlockId>>>,
    /// Document-level canvas configuration.
    settings: EditorSettings,
    /// Bumped on every mutation; cheap change detection for consumers.
    version: u64,
}

impl TemplateDocument {
    /// Create an empty document with default settings.
    pub fn new() -> Self {
        Self::with_settings(EditorSettings::default())
    }

    /// Create an empty document with the given settings.
    pub fn with_settings(settings: EditorSettings) -> Self {
        Self {
            blocks: BTreeMap::new(),
            root: Vec::new(),
            slots: BTreeMap::new(),
            settings,
            version: 0,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current version (bumped on any mutation).
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Number of blocks across the root list and every column slot.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Check if a block id is live anywhere in the tree.
    pub fn contains(&self, id: &BlockId) -> bool {
        self.blocks.contains_key(id)
    }

    /// Get a block by id.
    pub fn get(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.get(id)
    }

    /// The top-level ordering.
    pub fn root_ids(&self) -> &[BlockId] {
        &self.root
    }

    /// Column slots of a columns block (`None` for non-container blocks).
    pub fn column_slots(&self, id: &BlockId) -> Option<&[Vec<BlockId>]> {
        self.slots.get(id).map(|lists| lists.as_slice())
    }

    /// Document-level settings.
    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// All block ids in rendering order (depth-first: a columns block, then
    /// its slots left to right).
    pub fn block_ids(&self) -> Vec<BlockId> {
        let mut out = Vec::with_capacity(self.blocks.len());
        for id in &self.root {
            self.collect_ids(*id, &mut out);
        }
        out
    }

    fn collect_ids(&self, id: BlockId, out: &mut Vec<BlockId>) {
        out.push(id);
        if let Some(lists) = self.slots.get(&id) {
            for list in lists {
                for child in list {
                    self.collect_ids(*child, out);
                }
            }
        }
    }

    /// Find which container holds a block, and at what index.
    pub fn container_of(&self, id: &BlockId) -> Option<(ContainerRef, usize)> {
        if let Some(pos) = self.root.iter().position(|b| b == id) {
            return Some((ContainerRef::Root, pos));
        }
        for (owner, lists) in &self.slots {
            for (col, list) in lists.iter().enumerate() {
                if let Some(pos) = list.iter().position(|b| b == id) {
                    return Some((
                        ContainerRef::Column {
                            columns_block_id: *owner,
                            column_index: col,
                        },
                        pos,
                    ));
                }
            }
        }
        None
    }

    /// The block id at a container position, if both exist.
    pub fn block_at(&self, container: &ContainerRef, index: usize) -> Option<BlockId> {
        match container {
            ContainerRef::Root => self.root.get(index).copied(),
            ContainerRef::Column {
                columns_block_id,
                column_index,
            } => self
                .slots
                .get(columns_block_id)?
                .get(*column_index)?
                .get(index)
                .copied(),
        }
    }

    /// Check if `id` sits anywhere inside `ancestor`'s column slots.
    pub fn is_descendant(&self, id: BlockId, ancestor: BlockId) -> bool {
        let Some(lists) = self.slots.get(&ancestor) else {
            return false;
        };
        lists
            .iter()
            .flatten()
            .any(|child| *child == id || self.is_descendant(id, *child))
    }

    // =========================================================================
    // Container resolution
    // =========================================================================

    /// Resolve a container to its mutable id list.
    ///
    /// For column refs this validates the owner (must exist and be a columns
    /// block), then lazily materializes missing slot lists up to the
    /// requested index — a count that grew without backfilling must not make
    /// drops throw. The `column_count` bound applies only to materializing
    /// new slots: a slot that already exists stays addressable even after
    /// the count shrank below it, so blocks parked there can still be moved
    /// out.
    fn resolve_list_mut(&mut self, container: &ContainerRef) -> Result<&mut Vec<BlockId>> {
        match container {
            ContainerRef::Root => Ok(&mut self.root),
            ContainerRef::Column {
                columns_block_id,
                column_index,
            } => {
                let count = match self.blocks.get(columns_block_id).map(|b| &b.options) {
                    Some(BlockOptions::Columns(opts)) => opts.column_count,
                    _ => return Err(EditorError::UnknownContainer(*columns_block_id)),
                };
                let lists = self.slots.entry(*columns_block_id).or_default();
                if *column_index >= lists.len() {
                    if *column_index >= count as usize {
                        return Err(EditorError::ColumnOutOfRange {
                            block: *columns_block_id,
                            index: *column_index,
                            count,
                        });
                    }
                    lists.resize_with(column_index + 1, Vec::new);
                }
                Ok(&mut lists[*column_index])
            }
        }
    }

    // =========================================================================
    // Block operations
    // =========================================================================

    /// Insert a freshly created block at a container position.
    ///
    /// The index clamps to append-at-end. Columns blocks get their slot lists
    /// created eagerly (one empty list per column).
    pub fn insert_new(
        &mut self,
        container: &ContainerRef,
        index: usize,
        block: Block,
    ) -> Result<BlockId> {
        let id = block.id;
        if self.blocks.contains_key(&id) {
            return Err(EditorError::DuplicateBlock(id));
        }
        {
            let list = self.resolve_list_mut(container)?;
            let at = index.min(list.len());
            list.insert(at, id);
        }
        if let BlockOptions::Columns(opts) = &block.options {
            self.slots
                .insert(id, vec![Vec::new(); opts.column_count as usize]);
        }
        self.blocks.insert(id, block);
        self.version += 1;
        Ok(id)
    }

    /// Remove the block at a container position, keeping it (and any subtree)
    /// in the arena for re-attachment. Reducer plumbing.
    pub(crate) fn detach(&mut self, container: &ContainerRef, index: usize) -> Result<BlockId> {
        let list = self.resolve_list_mut(container)?;
        if index >= list.len() {
            return Err(EditorError::IndexOutOfBounds {
                index,
                len: list.len(),
            });
        }
        let id = list.remove(index);
        self.version += 1;
        Ok(id)
    }

    /// Re-attach a previously detached block. Reducer plumbing; the caller
    /// guarantees the id is currently in no container.
    pub(crate) fn attach(
        &mut self,
        container: &ContainerRef,
        index: usize,
        id: BlockId,
    ) -> Result<()> {
        if !self.blocks.contains_key(&id) {
            return Err(EditorError::BlockNotFound(id));
        }
        let list = self.resolve_list_mut(container)?;
        let at = index.min(list.len());
        list.insert(at, id);
        self.version += 1;
        Ok(())
    }

    /// Insert a block into the arena without attaching it to any container.
    /// Snapshot-decode plumbing.
    pub(crate) fn insert_detached(&mut self, block: Block) -> Result<BlockId> {
        let id = block.id;
        if self.blocks.contains_key(&id) {
            return Err(EditorError::DuplicateBlock(id));
        }
        if block.kind() == BlockKind::Columns {
            self.slots.insert(id, Vec::new());
        }
        self.blocks.insert(id, block);
        Ok(id)
    }

    /// The root list, mutable. Snapshot-decode plumbing.
    pub(crate) fn root_mut(&mut self) -> &mut Vec<BlockId> {
        &mut self.root
    }

    /// Slot lists of a columns block, bypassing the column-count check so
    /// decoders can restore lagging slots verbatim. Snapshot-decode plumbing.
    pub(crate) fn slots_mut_unchecked(&mut self, owner: BlockId) -> &mut Vec<Vec<BlockId>> {
        self.slots.entry(owner).or_default()
    }

    /// Delete a block wherever it sits, plus its entire subtree for columns
    /// blocks. Not-found is a no-op returning false.
    pub fn delete_block(&mut self, id: &BlockId) -> bool {
        let Some((container, index)) = self.container_of(id) else {
            return false;
        };
        // Remove from the container the search just found — no re-validation
        // that could refuse a lagging slot and leave the id dangling.
        match container {
            ContainerRef::Root => {
                self.root.remove(index);
            }
            ContainerRef::Column {
                columns_block_id,
                column_index,
            } => {
                if let Some(lists) = self.slots.get_mut(&columns_block_id) {
                    lists[column_index].remove(index);
                }
            }
        }
        self.purge(*id);
        self.version += 1;
        true
    }

    /// Remove a block and its subtree from the arena.
    fn purge(&mut self, id: BlockId) {
        if let Some(lists) = self.slots.remove(&id) {
            for child in lists.into_iter().flatten() {
                self.purge(child);
            }
        }
        self.blocks.remove(&id);
    }

    // =========================================================================
    // Inspector operations
    // =========================================================================

    /// Shallow-merge an options patch into a block, clamping numerics.
    ///
    /// Silent no-op (false) when the id is missing or the patch targets a
    /// different kind — never reorders, never re-ids, never throws.
    pub fn update_block_options(&mut self, id: &BlockId, patch: &OptionsPatch) -> bool {
        let Some(block) = self.blocks.get_mut(id) else {
            return false;
        };
        if !block.apply_patch(patch) {
            tracing::warn!(
                "patch for {} dropped: block {id} is {}",
                patch.kind(),
                block.kind()
            );
            return false;
        }
        self.version += 1;
        true
    }

    /// Replace a block's content string. No-op (false) on missing id.
    pub fn set_content(&mut self, id: &BlockId, content: impl Into<String>) -> bool {
        let Some(block) = self.blocks.get_mut(id) else {
            return false;
        };
        block.content = content.into();
        self.version += 1;
        true
    }

    /// Replace a block's background color. No-op (false) on missing id.
    pub fn set_background_color(&mut self, id: &BlockId, color: impl Into<String>) -> bool {
        let Some(block) = self.blocks.get_mut(id) else {
            return false;
        };
        block.background_color = color.into();
        self.version += 1;
        true
    }

    /// Merge a settings patch, clamping numerics.
    pub fn update_settings(&mut self, patch: &SettingsPatch) {
        self.settings.apply(patch);
        self.version += 1;
    }
}

impl Default for TemplateDocument {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Tests
// =========================================================================
