//! Persistence snapshot — the nested JSON shape templates are stored in.
//!
//! The arena document is an editing-time structure; the stored form nests
//! children inside their columns block (`columns: [[...], [...]]`) because
//! that is the shape the templates backend already speaks. Conversion is
//! lossless in both directions: encode emits column slots verbatim, lag
//! behind `columnCount` included, and decode restores them verbatim.
//!
//! This is the only fallible public surface of the crate. Everything else
//! degrades to a no-op; a snapshot that does not parse has to say so.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use mailblocks_types::{Block, BlockId, BlockKind, EditorSettings};

use crate::document::TemplateDocument;
use crate::error::EditorError;
use crate::Result;

/// One block in stored form: the flat block fields plus nested children for
/// columns blocks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementNode {
    #[serde(flatten)]
    pub block: Block,
    /// Column sub-lists, present only on columns blocks. The outer list may
    /// be shorter than `columnCount`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<Vec<ElementNode>>>,
}

/// A stored template: tree, settings, and backend bookkeeping.
///
/// The backend assigns `id` and `user_id`; a never-saved template carries
/// neither. Timestamps are Unix milliseconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub elements: Vec<ElementNode>,
    #[serde(default)]
    pub editor_settings: EditorSettings,
    pub created_at: u64,
    pub updated_at: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

impl TemplateSnapshot {
    /// Capture a document as a new, never-saved snapshot.
    pub fn from_document(name: impl Into<String>, doc: &TemplateDocument) -> Self {
        let now = now_millis();
        Self {
            id: None,
            name: name.into(),
            elements: doc.to_elements(),
            editor_settings: doc.settings().clone(),
            created_at: now,
            updated_at: now,
            user_id: None,
        }
    }

    /// Re-capture the document into an existing snapshot, bumping `updated_at`
    /// and keeping backend bookkeeping intact.
    pub fn update_from(&mut self, doc: &TemplateDocument) {
        self.elements = doc.to_elements();
        self.editor_settings = doc.settings().clone();
        self.updated_at = now_millis();
    }

    /// Rebuild the editing-time document. Fails on duplicate block ids.
    pub fn into_document(&self) -> Result<TemplateDocument> {
        TemplateDocument::from_elements(&self.elements, self.editor_settings.clone())
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| EditorError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| EditorError::Serialization(e.to_string()))
    }
}

impl TemplateDocument {
    /// Encode the tree into stored form. Column slots are emitted verbatim.
    pub fn to_elements(&self) -> Vec<ElementNode> {
        self.root_ids()
            .iter()
            .filter_map(|id| self.element_of(id))
            .collect()
    }

    fn element_of(&self, id: &BlockId) -> Option<ElementNode> {
        let block = self.get(id)?.clone();
        let columns = self.column_slots(id).map(|lists| {
            lists
                .iter()
                .map(|list| list.iter().filter_map(|child| self.element_of(child)).collect())
                .collect()
        });
        Some(ElementNode { block, columns })
    }

    /// Decode stored form back into an arena document.
    ///
    /// Every block id must be unique across the whole tree; a duplicate is a
    /// corrupt snapshot and is rejected rather than silently dropped.
    pub fn from_elements(elements: &[ElementNode], settings: EditorSettings) -> Result<Self> {
        let mut doc = TemplateDocument::with_settings(settings);
        for node in elements {
            let id = Self::restore_node(&mut doc, node)?;
            doc.root_mut().push(id);
        }
        Ok(doc)
    }

    fn restore_node(doc: &mut TemplateDocument, node: &ElementNode) -> Result<BlockId> {
        let id = doc.insert_detached(node.block.clone())?;
        if node.block.kind() == BlockKind::Columns {
            let mut lists = Vec::new();
            for slot in node.columns.as_deref().unwrap_or_default() {
                let mut ids = Vec::with_capacity(slot.len());
                for child in slot {
                    ids.push(Self::restore_node(doc, child)?);
                }
                lists.push(ids);
            }
            *doc.slots_mut_unchecked(id) = lists;
        }
        Ok(id)
    }
}

// =========================================================================
// Tests
// =========================================================================
