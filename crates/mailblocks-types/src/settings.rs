//! Document-level editor settings.
//!
//! A flat record beside the block tree — edited independently, with no
//! invariant coupling to block contents. Serialized as part of the template
//! snapshot under `editorSettings`.

use serde::{Deserialize, Serialize};

use crate::options::{ClampRange, PADDING_RANGE};

/// Canvas width / max content width, px.
pub const CANVAS_WIDTH_RANGE: ClampRange = ClampRange::new(320, 960);

/// Canvas-level configuration for the whole template.
///
/// Defaults: 600px canvas, `#F3F4F6` background, 24px padding, 600px max
/// content width.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorSettings {
    pub canvas_width: u32,
    pub background_color: String,
    pub canvas_padding: u32,
    pub max_content_width: u32,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            canvas_width: 600,
            background_color: "#F3F4F6".to_string(),
            canvas_padding: 24,
            max_content_width: 600,
        }
    }
}

/// Shallow-merge patch for [`EditorSettings`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    pub canvas_width: Option<u32>,
    pub background_color: Option<String>,
    pub canvas_padding: Option<u32>,
    pub max_content_width: Option<u32>,
}

impl EditorSettings {
    /// Merge `Some` patch fields in, clamping numerics.
    pub fn apply(&mut self, patch: &SettingsPatch) {
        if let Some(v) = patch.canvas_width {
            self.canvas_width = CANVAS_WIDTH_RANGE.clamp(v);
        }
        if let Some(v) = &patch.background_color {
            self.background_color = v.clone();
        }
        if let Some(v) = patch.canvas_padding {
            self.canvas_padding = PADDING_RANGE.clamp(v);
        }
        if let Some(v) = patch.max_content_width {
            self.max_content_width = CANVAS_WIDTH_RANGE.clamp(v);
        }
    }
}
