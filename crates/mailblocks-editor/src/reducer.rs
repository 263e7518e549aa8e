//! The drag-and-drop move reducer — the single state transition of the editor.
//!
//! [`apply_move`] is pure: it never mutates its input document and returns a
//! fresh value, so consumers relying on value identity for change detection
//! never see aliasing between old and new snapshots.
//!
//! There is no fallible branch that raises. Silently failing a drag is
//! preferable to corrupting layout state, so every malformed input — null
//! destination, unknown container, stale index, drop into the dragged
//! block's own subtree — degrades to "tree unchanged" with a warning.

use serde::{Deserialize, Serialize};

use mailblocks_types::{Block, BlockId, BlockKind};

use crate::document::{ContainerRef, TemplateDocument};

/// A position inside a container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragLocation {
    pub container: ContainerRef,
    pub index: usize,
}

impl DragLocation {
    pub fn new(container: ContainerRef, index: usize) -> Self {
        Self { container, index }
    }

    /// Position `index` in the root list.
    pub fn root(index: usize) -> Self {
        Self::new(ContainerRef::Root, index)
    }

    /// Position `index` in one column slot of a columns block.
    pub fn column(columns_block_id: BlockId, column_index: usize, index: usize) -> Self {
        Self::new(
            ContainerRef::Column {
                columns_block_id,
                column_index,
            },
            index,
        )
    }
}

/// A structured drop event from the UI layer.
///
/// `from_palette` distinguishes "create a new block of `palette_kind`" from
/// "move the existing block at `source`". A missing or unrecognized palette
/// kind falls back to a text block — a documented fallback, not an error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveEvent {
    /// Where the drag started. Ignored for palette drags.
    pub source: DragLocation,
    /// Where the item was dropped; `None` means outside any valid container.
    #[serde(default)]
    pub destination: Option<DragLocation>,
    /// True when the dragged item is a palette entry, not an existing block.
    #[serde(default)]
    pub from_palette: bool,
    /// Which palette entry, when `from_palette`.
    #[serde(default)]
    pub palette_kind: Option<BlockKind>,
}

impl MoveEvent {
    /// A palette drop: create a new `kind` block at `destination`.
    pub fn palette(kind: BlockKind, destination: DragLocation) -> Self {
        Self {
            source: DragLocation::root(0),
            destination: Some(destination),
            from_palette: true,
            palette_kind: Some(kind),
        }
    }

    /// Move an existing block from `source` to `destination`.
    pub fn drag(source: DragLocation, destination: DragLocation) -> Self {
        Self {
            source,
            destination: Some(destination),
            from_palette: false,
            palette_kind: None,
        }
    }

    /// A drag that ended outside any container.
    pub fn cancelled(source: DragLocation) -> Self {
        Self {
            source,
            destination: None,
            from_palette: false,
            palette_kind: None,
        }
    }
}

/// Result of [`apply_move`].
#[derive(Clone, Debug)]
pub struct MoveOutcome {
    /// The next tree. A fresh value even when nothing changed.
    pub document: TemplateDocument,
    /// The id of a block created by a palette drop — callers select it.
    pub inserted: Option<BlockId>,
}

/// Compute the next tree for a move event.
pub fn apply_move(doc: &TemplateDocument, event: &MoveEvent) -> MoveOutcome {
    let unchanged = || MoveOutcome {
        document: doc.clone(),
        inserted: None,
    };

    // Dropped outside any valid container: no-op, not an error.
    let Some(dest) = &event.destination else {
        return unchanged();
    };

    let mut next = doc.clone();

    if event.from_palette {
        // Unknown palette entries fall back to a default text block.
        let kind = event.palette_kind.unwrap_or(BlockKind::Text);
        let block = Block::default_for(kind);
        return match next.insert_new(&dest.container, dest.index, block) {
            Ok(id) => MoveOutcome {
                document: next,
                inserted: Some(id),
            },
            Err(err) => {
                tracing::warn!("palette drop degraded to no-op: {err}");
                unchanged()
            }
        };
    }

    // Moving an existing block. Identify it before detaching so the cycle
    // guard can run against the intact tree.
    let Some(dragged) = next.block_at(&event.source.container, event.source.index) else {
        tracing::warn!(
            "move degraded to no-op: nothing at {:?}[{}]",
            event.source.container,
            event.source.index
        );
        return unchanged();
    };

    // A block can never be dropped into a container nested inside itself.
    if let ContainerRef::Column {
        columns_block_id, ..
    } = dest.container
    {
        if columns_block_id == dragged || next.is_descendant(columns_block_id, dragged) {
            tracing::warn!("drop target sits inside dragged block {dragged}, ignoring");
            return unchanged();
        }
    }

    // Detach then insert: the block value (id included) is preserved, and a
    // same-container move is a stable reorder, not duplicate-then-delete.
    let moved = next
        .detach(&event.source.container, event.source.index)
        .and_then(|id| next.attach(&dest.container, dest.index, id));
    match moved {
        Ok(()) => MoveOutcome {
            document: next,
            inserted: None,
        },
        Err(err) => {
            tracing::warn!("move degraded to no-op: {err}");
            unchanged()
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mailblocks_types::{BlockOptions, ColumnsPatch, OptionsPatch};

    fn doc_with_root_texts(n: usize) -> (TemplateDocument, Vec<BlockId>) {
        let mut doc = TemplateDocument::new();
        let ids = (0..n)
            .map(|i| {
                doc.insert_new(&ContainerRef::Root, i, Block::default_for(BlockKind::Text))
                    .unwrap()
            })
            .collect();
        (doc, ids)
    }

    fn columns_block(count: u32) -> Block {
        let mut block = Block::default_for(BlockKind::Columns);
        block.apply_patch(&OptionsPatch::Columns(ColumnsPatch {
            column_count: Some(count),
            ..Default::default()
        }));
        block
    }

    // ── Palette drops ───────────────────────────────────────────────────

    #[test]
    fn test_palette_drop_divider_into_empty_root() {
        let doc = TemplateDocument::new();
        let outcome = apply_move(
            &doc,
            &MoveEvent::palette(BlockKind::Divider, DragLocation::root(0)),
        );
        let next = outcome.document;
        assert_eq!(next.root_ids().len(), 1);
        let id = next.root_ids()[0];
        assert_eq!(outcome.inserted, Some(id));
        let block = next.get(&id).unwrap();
        assert_eq!(block.kind(), BlockKind::Divider);
        let BlockOptions::Divider(opts) = &block.options else {
            panic!("expected divider options");
        };
        assert_eq!(opts.divider_width, 100);
        assert_eq!(opts.divider_height, 1);
        assert_eq!(opts.divider_style.as_str(), "solid");
        assert_eq!(opts.divider_color, "#E5E7EB");
        assert!(doc.is_empty(), "input document untouched");
    }

    #[test]
    fn test_palette_drop_text_into_column() {
        let mut doc = TemplateDocument::new();
        let owner = doc
            .insert_new(&ContainerRef::Root, 0, columns_block(2))
            .unwrap();
        let outcome = apply_move(
            &doc,
            &MoveEvent::palette(BlockKind::Text, DragLocation::column(owner, 1, 0)),
        );
        let next = outcome.document;
        let lists = next.column_slots(&owner).unwrap();
        assert!(lists[0].is_empty());
        assert_eq!(lists[1].len(), 1);
        let block = next.get(&lists[1][0]).unwrap();
        let BlockOptions::Text(opts) = &block.options else {
            panic!("expected text options");
        };
        assert_eq!(opts.font_size, 16);
    }

    #[test]
    fn test_palette_drop_missing_kind_falls_back_to_text() {
        let doc = TemplateDocument::new();
        let event = MoveEvent {
            palette_kind: None,
            ..MoveEvent::palette(BlockKind::Divider, DragLocation::root(0))
        };
        let outcome = apply_move(&doc, &event);
        let id = outcome.inserted.unwrap();
        assert_eq!(outcome.document.get(&id).unwrap().kind(), BlockKind::Text);
    }

    #[test]
    fn test_palette_drop_selects_new_block() {
        let (doc, _) = doc_with_root_texts(2);
        let outcome = apply_move(
            &doc,
            &MoveEvent::palette(BlockKind::Button, DragLocation::root(1)),
        );
        let id = outcome.inserted.expect("palette drop reports the new id");
        assert_eq!(outcome.document.root_ids()[1], id);
    }

    #[test]
    fn test_palette_drop_index_clamps_to_append() {
        let (doc, ids) = doc_with_root_texts(2);
        let outcome = apply_move(
            &doc,
            &MoveEvent::palette(BlockKind::Image, DragLocation::root(50)),
        );
        let next = outcome.document;
        assert_eq!(next.root_ids().len(), 3);
        assert_eq!(&next.root_ids()[..2], &ids[..]);
        assert_eq!(Some(next.root_ids()[2]), outcome.inserted);
    }

    // ── Null destination ────────────────────────────────────────────────

    #[test]
    fn test_null_destination_is_idempotent_noop() {
        let (doc, _) = doc_with_root_texts(3);
        let mut current = doc.clone();
        for _ in 0..5 {
            let outcome = apply_move(&current, &MoveEvent::cancelled(DragLocation::root(0)));
            current = outcome.document;
            assert!(outcome.inserted.is_none());
        }
        assert_eq!(current, doc, "tree deep-equal to input after repeated no-ops");
    }

    // ── Same-container reorder ──────────────────────────────────────────

    #[test]
    fn test_root_reorder_is_stable() {
        let (doc, ids) = doc_with_root_texts(4);
        let outcome = apply_move(
            &doc,
            &MoveEvent::drag(DragLocation::root(0), DragLocation::root(2)),
        );
        let next = outcome.document;
        assert_eq!(next.root_ids(), &[ids[1], ids[2], ids[0], ids[3]]);
        assert_eq!(next.root_ids().len(), 4, "length unchanged");
        // Original untouched.
        assert_eq!(doc.root_ids(), &ids[..]);
    }

    #[test]
    fn test_reorder_toward_front() {
        let (doc, ids) = doc_with_root_texts(3);
        let outcome = apply_move(
            &doc,
            &MoveEvent::drag(DragLocation::root(2), DragLocation::root(0)),
        );
        assert_eq!(outcome.document.root_ids(), &[ids[2], ids[0], ids[1]]);
    }

    // ── Cross-container moves ───────────────────────────────────────────

    #[test]
    fn test_cross_column_move() {
        let mut doc = TemplateDocument::new();
        let owner = doc
            .insert_new(&ContainerRef::Root, 0, columns_block(2))
            .unwrap();
        let a = doc
            .insert_new(
                &ContainerRef::Column {
                    columns_block_id: owner,
                    column_index: 0,
                },
                0,
                Block::default_for(BlockKind::Text),
            )
            .unwrap();
        let b = doc
            .insert_new(
                &ContainerRef::Column {
                    columns_block_id: owner,
                    column_index: 1,
                },
                0,
                Block::default_for(BlockKind::Image),
            )
            .unwrap();

        // columns=[[A],[B]], move A from col 0 idx 0 to col 1 idx 1.
        let outcome = apply_move(
            &doc,
            &MoveEvent::drag(
                DragLocation::column(owner, 0, 0),
                DragLocation::column(owner, 1, 1),
            ),
        );
        let next = outcome.document;
        let lists = next.column_slots(&owner).unwrap();
        assert!(lists[0].is_empty());
        assert_eq!(lists[1], vec![b, a], "columns=[[],[B,A]]");
    }

    #[test]
    fn test_move_preserves_block_identity() {
        let mut doc = TemplateDocument::new();
        let owner = doc
            .insert_new(&ContainerRef::Root, 0, columns_block(2))
            .unwrap();
        let id = doc
            .insert_new(&ContainerRef::Root, 1, Block::default_for(BlockKind::Button))
            .unwrap();
        doc.set_content(&id, "Buy now");
        let before = doc.get(&id).unwrap().clone();

        let outcome = apply_move(
            &doc,
            &MoveEvent::drag(DragLocation::root(1), DragLocation::column(owner, 0, 0)),
        );
        let next = outcome.document;
        let after = next.get(&id).unwrap();
        assert_eq!(after, &before, "id, kind, content, options all preserved");
        assert_eq!(next.column_slots(&owner).unwrap()[0], vec![id]);
        assert!(!next.root_ids().contains(&id));
    }

    #[test]
    fn test_move_columns_block_carries_subtree() {
        let mut doc = TemplateDocument::new();
        let owner = doc
            .insert_new(&ContainerRef::Root, 0, columns_block(2))
            .unwrap();
        let child = doc
            .insert_new(
                &ContainerRef::Column {
                    columns_block_id: owner,
                    column_index: 0,
                },
                0,
                Block::default_for(BlockKind::Text),
            )
            .unwrap();
        doc.insert_new(&ContainerRef::Root, 1, Block::default_for(BlockKind::Divider))
            .unwrap();

        let outcome = apply_move(
            &doc,
            &MoveEvent::drag(DragLocation::root(0), DragLocation::root(1)),
        );
        let next = outcome.document;
        assert_eq!(next.root_ids()[1], owner);
        assert_eq!(
            next.column_slots(&owner).unwrap()[0],
            vec![child],
            "subtree travels with the columns block"
        );
    }

    #[test]
    fn test_move_into_missing_slot_materializes() {
        let mut doc = TemplateDocument::new();
        let owner = doc
            .insert_new(&ContainerRef::Root, 0, columns_block(2))
            .unwrap();
        doc.update_block_options(
            &owner,
            &OptionsPatch::Columns(ColumnsPatch {
                column_count: Some(3),
                ..Default::default()
            }),
        );
        let id = doc
            .insert_new(&ContainerRef::Root, 1, Block::default_for(BlockKind::Text))
            .unwrap();

        let outcome = apply_move(
            &doc,
            &MoveEvent::drag(DragLocation::root(1), DragLocation::column(owner, 2, 0)),
        );
        let next = outcome.document;
        assert_eq!(next.column_slots(&owner).unwrap()[2], vec![id]);
    }

    #[test]
    fn test_move_out_of_slot_past_shrunk_count() {
        let mut doc = TemplateDocument::new();
        let owner = doc
            .insert_new(&ContainerRef::Root, 0, columns_block(2))
            .unwrap();
        let child = doc
            .insert_new(
                &ContainerRef::Column {
                    columns_block_id: owner,
                    column_index: 1,
                },
                0,
                Block::default_for(BlockKind::Text),
            )
            .unwrap();
        // Shrink the count; the child now sits in a lagging slot.
        doc.update_block_options(
            &owner,
            &OptionsPatch::Columns(ColumnsPatch {
                column_count: Some(1),
                ..Default::default()
            }),
        );

        let outcome = apply_move(
            &doc,
            &MoveEvent::drag(DragLocation::column(owner, 1, 0), DragLocation::root(1)),
        );
        let next = outcome.document;
        assert_eq!(
            next.root_ids().get(1),
            Some(&child),
            "block dragged out of the lagging slot"
        );
        assert!(next.column_slots(&owner).unwrap()[1].is_empty());
    }

    // ── Degraded no-ops ─────────────────────────────────────────────────

    #[test]
    fn test_stale_source_index_is_noop() {
        let (doc, _) = doc_with_root_texts(2);
        let outcome = apply_move(
            &doc,
            &MoveEvent::drag(DragLocation::root(7), DragLocation::root(0)),
        );
        assert_eq!(outcome.document, doc);
    }

    #[test]
    fn test_unknown_destination_container_is_noop() {
        let (doc, _) = doc_with_root_texts(2);
        let outcome = apply_move(
            &doc,
            &MoveEvent::drag(
                DragLocation::root(0),
                DragLocation::column(BlockId::new(), 0, 0),
            ),
        );
        assert_eq!(outcome.document, doc, "tree unchanged on malformed target");
    }

    #[test]
    fn test_drop_into_own_column_is_noop() {
        let mut doc = TemplateDocument::new();
        doc.insert_new(&ContainerRef::Root, 0, Block::default_for(BlockKind::Text))
            .unwrap();
        let owner = doc
            .insert_new(&ContainerRef::Root, 1, columns_block(2))
            .unwrap();

        let outcome = apply_move(
            &doc,
            &MoveEvent::drag(DragLocation::root(1), DragLocation::column(owner, 0, 0)),
        );
        assert_eq!(outcome.document, doc, "cycle guard keeps the tree intact");
    }

    #[test]
    fn test_palette_drop_into_unknown_container_is_noop() {
        let doc = TemplateDocument::new();
        let outcome = apply_move(
            &doc,
            &MoveEvent::palette(
                BlockKind::Text,
                DragLocation::column(BlockId::new(), 0, 0),
            ),
        );
        assert_eq!(outcome.document, doc);
        assert!(outcome.inserted.is_none());
    }

    // ── Uniqueness under reducer sequences ──────────────────────────────

    #[test]
    fn test_ids_stay_unique_across_reducer_sequence() {
        let mut doc = TemplateDocument::new();
        doc = apply_move(
            &doc,
            &MoveEvent::palette(BlockKind::Columns, DragLocation::root(0)),
        )
        .document;
        let owner = doc.root_ids()[0];
        for kind in [BlockKind::Text, BlockKind::Image, BlockKind::Button] {
            doc = apply_move(&doc, &MoveEvent::palette(kind, DragLocation::root(0))).document;
        }
        doc = apply_move(
            &doc,
            &MoveEvent::drag(DragLocation::root(0), DragLocation::column(owner, 1, 0)),
        )
        .document;
        doc = apply_move(
            &doc,
            &MoveEvent::drag(DragLocation::root(0), DragLocation::column(owner, 0, 0)),
        )
        .document;

        let ids = doc.block_ids();
        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(ids.len(), deduped.len(), "ids pairwise distinct");
        assert_eq!(ids.len(), 4);
    }

    // ── Event wire shape ────────────────────────────────────────────────

    #[test]
    fn test_move_event_deserializes_from_ui_json() {
        let json = r#"{
            "source": {"container": "root", "index": 0},
            "destination": {"container": "root", "index": 2},
            "fromPalette": false
        }"#;
        let event: MoveEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.source, DragLocation::root(0));
        assert_eq!(event.destination, Some(DragLocation::root(2)));
        assert!(!event.from_palette);
        assert_eq!(event.palette_kind, None);
    }

    #[test]
    fn test_move_event_palette_json() {
        let json = r#"{
            "source": {"container": "root", "index": 0},
            "destination": {"container": "root", "index": 0},
            "fromPalette": true,
            "paletteKind": "bulletList"
        }"#;
        let event: MoveEvent = serde_json::from_str(json).unwrap();
        assert!(event.from_palette);
        assert_eq!(event.palette_kind, Some(BlockKind::BulletList));
    }
}
