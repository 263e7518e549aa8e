//! Block types — the atomic layout unit of an email template.
//!
//! ## Design: kind as a tagged union
//!
//! Rather than one options object with every field optional and convention
//! deciding which fields apply to which kind, `BlockOptions` is a tagged
//! union: one variant per [`BlockKind`], each carrying only its relevant
//! option struct. "Which fields are valid for this kind" is a type error
//! instead of a runtime bug, and a block's kind is the variant — it cannot
//! change after creation without replacing the whole options value, which no
//! public API does.
//!
//! On the wire this serializes adjacently tagged (`"kind": "text",
//! "options": { ... }`), flattened into the block object, matching the shape
//! the templates backend already stores.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::EnumString;

use crate::ids::BlockId;
use crate::options::{
    BulletListOptions, BulletListPatch, ButtonOptions, ButtonPatch, ColumnsOptions,
    ColumnsPatch, DividerOptions, DividerPatch, FooterOptions, FooterPatch, ImageOptions,
    ImagePatch, TextOptions, TextPatch,
};

/// What a block *is*. Closed set — there is no user-defined kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default, EnumString)]
#[serde(rename_all = "camelCase")]
#[strum(ascii_case_insensitive)]
pub enum BlockKind {
    /// Free-form rich text.
    #[default]
    Text,
    /// N ordered sub-lists of blocks, one per column.
    Columns,
    /// A single image by URL.
    Image,
    /// A call-to-action link.
    Button,
    /// A horizontal rule.
    Divider,
    /// Company info + social links.
    Footer,
    /// An unordered list.
    #[serde(rename = "bulletList")]
    #[strum(serialize = "bulletlist", serialize = "bullet_list")]
    BulletList,
}

impl BlockKind {
    /// Parse from string (case-insensitive). `bulletList` and `bullet_list`
    /// both work.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    /// Convert to the wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Text => "text",
            BlockKind::Columns => "columns",
            BlockKind::Image => "image",
            BlockKind::Button => "button",
            BlockKind::Divider => "divider",
            BlockKind::Footer => "footer",
            BlockKind::BulletList => "bulletList",
        }
    }

    /// Check if blocks of this kind own column sub-lists.
    pub fn is_container(&self) -> bool {
        matches!(self, BlockKind::Columns)
    }

    /// All kinds, in palette order.
    pub fn all() -> [BlockKind; 7] {
        [
            BlockKind::Text,
            BlockKind::Columns,
            BlockKind::Image,
            BlockKind::Button,
            BlockKind::Divider,
            BlockKind::Footer,
            BlockKind::BulletList,
        ]
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind-specific option bag. The variant *is* the block's kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "options", rename_all = "camelCase")]
pub enum BlockOptions {
    Text(TextOptions),
    Columns(ColumnsOptions),
    Image(ImageOptions),
    Button(ButtonOptions),
    Divider(DividerOptions),
    Footer(FooterOptions),
    #[serde(rename = "bulletList")]
    BulletList(BulletListOptions),
}

impl BlockOptions {
    /// The documented defaults for a kind.
    pub fn default_for(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Text => BlockOptions::Text(TextOptions::default()),
            BlockKind::Columns => BlockOptions::Columns(ColumnsOptions::default()),
            BlockKind::Image => BlockOptions::Image(ImageOptions::default()),
            BlockKind::Button => BlockOptions::Button(ButtonOptions::default()),
            BlockKind::Divider => BlockOptions::Divider(DividerOptions::default()),
            BlockKind::Footer => BlockOptions::Footer(FooterOptions::default()),
            BlockKind::BulletList => BlockOptions::BulletList(BulletListOptions::default()),
        }
    }

    /// Which kind this option bag belongs to.
    pub fn kind(&self) -> BlockKind {
        match self {
            BlockOptions::Text(_) => BlockKind::Text,
            BlockOptions::Columns(_) => BlockKind::Columns,
            BlockOptions::Image(_) => BlockKind::Image,
            BlockOptions::Button(_) => BlockKind::Button,
            BlockOptions::Divider(_) => BlockKind::Divider,
            BlockOptions::Footer(_) => BlockKind::Footer,
            BlockOptions::BulletList(_) => BlockKind::BulletList,
        }
    }

    /// Shallow-merge a patch in, clamping numeric fields.
    ///
    /// Returns false without touching anything when the patch targets a
    /// different kind — the caller treats that as a no-op, not an error.
    pub fn apply(&mut self, patch: &OptionsPatch) -> bool {
        match (self, patch) {
            (BlockOptions::Text(o), OptionsPatch::Text(p)) => o.apply(p),
            (BlockOptions::Columns(o), OptionsPatch::Columns(p)) => o.apply(p),
            (BlockOptions::Image(o), OptionsPatch::Image(p)) => o.apply(p),
            (BlockOptions::Button(o), OptionsPatch::Button(p)) => o.apply(p),
            (BlockOptions::Divider(o), OptionsPatch::Divider(p)) => o.apply(p),
            (BlockOptions::Footer(o), OptionsPatch::Footer(p)) => o.apply(p),
            (BlockOptions::BulletList(o), OptionsPatch::BulletList(p)) => o.apply(p),
            _ => return false,
        }
        true
    }
}

/// Kind-specific shallow-merge patch, mirroring [`BlockOptions`].
///
/// Arrives from the inspector panel as JSON; `Some` fields replace, `None`
/// fields leave the stored value alone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "patch", rename_all = "camelCase")]
pub enum OptionsPatch {
    Text(TextPatch),
    Columns(ColumnsPatch),
    Image(ImagePatch),
    Button(ButtonPatch),
    Divider(DividerPatch),
    Footer(FooterPatch),
    #[serde(rename = "bulletList")]
    BulletList(BulletListPatch),
}

impl OptionsPatch {
    /// Which kind this patch targets.
    pub fn kind(&self) -> BlockKind {
        match self {
            OptionsPatch::Text(_) => BlockKind::Text,
            OptionsPatch::Columns(_) => BlockKind::Columns,
            OptionsPatch::Image(_) => BlockKind::Image,
            OptionsPatch::Button(_) => BlockKind::Button,
            OptionsPatch::Divider(_) => BlockKind::Divider,
            OptionsPatch::Footer(_) => BlockKind::Footer,
            OptionsPatch::BulletList(_) => BlockKind::BulletList,
        }
    }
}

/// The atomic layout unit.
///
/// `content` is the free-form string payload (text body, button label);
/// structural kinds leave it empty. `background_color` defaults to
/// `"transparent"`. Column sub-lists for `columns` blocks live in the
/// document arena, keyed by this block's id — not embedded here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Unique for the lifetime of the tree. Assigned at creation, never reused.
    pub id: BlockId,
    /// Free-form string payload.
    #[serde(default)]
    pub content: String,
    /// Optional color string; "transparent" when unset.
    #[serde(default = "default_background_color")]
    pub background_color: String,
    /// Kind + kind-specific options, flattened onto the block object.
    #[serde(flatten)]
    pub options: BlockOptions,
}

fn default_background_color() -> String {
    "transparent".to_string()
}

impl Block {
    /// The single creation path: fresh id, documented defaults for `kind`.
    ///
    /// Pure — touches no external state beyond the id generator.
    pub fn default_for(kind: BlockKind) -> Self {
        Self {
            id: BlockId::new(),
            content: default_content(kind).to_string(),
            background_color: default_background_color(),
            options: BlockOptions::default_for(kind),
        }
    }

    /// The block's kind (the options variant).
    pub fn kind(&self) -> BlockKind {
        self.options.kind()
    }

    /// Shallow-merge an options patch; false (and untouched) on kind mismatch.
    pub fn apply_patch(&mut self, patch: &OptionsPatch) -> bool {
        self.options.apply(patch)
    }
}

/// Placeholder `content` for freshly created blocks.
fn default_content(kind: BlockKind) -> &'static str {
    match kind {
        BlockKind::Text => "Edit this text",
        BlockKind::Button => "Click me",
        _ => "",
    }
}

// =========================================================================
// Tests
// =========================================================================
