//! Block, options, and settings types for mailblocks.
//!
//! This crate is the pure leaf: typed ids, the closed [`BlockKind`] set, the
//! per-kind option bags with documented defaults and clamp ranges, and the
//! document-level [`EditorSettings`]. It has **no internal mailblocks
//! dependencies** — the editor crate builds on it.
//!
//! # Key Types
//!
//! |-------------------|----------------------------------------------|
//! | Type              | Purpose                                      |
//! |-------------------|----------------------------------------------|
//! | [`BlockId`]       | Unique block address (UUIDv7)                |
//! | [`BlockKind`]     | text, columns, image, button, divider, ...   |
//! | [`Block`]         | id + content + background + options          |
//! | [`BlockOptions`]  | Tagged union of per-kind option bags         |
//! | [`OptionsPatch`]  | Shallow-merge patch, clamped on apply        |
//! | [`EditorSettings`]| Canvas-level configuration                   |
//! |-------------------|----------------------------------------------|
//!
//! # Defaults and clamping
//!
//! Every option field has a documented default filled in when absent from
//! incoming JSON; out-of-range numeric edits are coerced to the nearest bound
//! at the edit boundary (`apply()`), never rejected. Stored snapshots
//! round-trip verbatim.

pub mod block;
pub mod ids;
pub mod options;
pub mod settings;

// Re-export primary types at crate root for convenience.
pub use block::{Block, BlockKind, BlockOptions, OptionsPatch};
pub use ids::BlockId;
pub use options::{
    Alignment, BulletListOptions, BulletListPatch, BulletStyle, ButtonOptions, ButtonPatch,
    ButtonStyle, ClampRange, ColumnsOptions, ColumnsPatch, DividerOptions, DividerPatch,
    DividerStyle, FooterOptions, FooterPatch, ImageOptions, ImagePatch, Insets, SocialLink,
    TextOptions, TextPatch,
};
pub use settings::{EditorSettings, SettingsPatch, CANVAS_WIDTH_RANGE};
