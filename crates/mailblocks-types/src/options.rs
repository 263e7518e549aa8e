//! Per-kind option bags with documented defaults and clamp ranges.
//!
//! Every field has a default applied when the field is absent from incoming
//! JSON (`serde(default)` backed by the struct's `Default` impl), so partially
//! populated option bags deserialize cleanly — consumers never see a missing
//! field, they see the documented default.
//!
//! Numeric fields are clamped at the *edit boundary*: the `apply()` methods on
//! each options struct coerce out-of-range patch values to the nearest bound
//! rather than rejecting them. Stored values are taken at face value — a
//! snapshot loaded from the templates backend round-trips verbatim.

use serde::{Deserialize, Serialize};
use strum::EnumString;

// ── Clamp ranges ─────────────────────────────────────────────────────────────

/// An inclusive `[min, max]` range for a numeric option field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClampRange {
    pub min: u32,
    pub max: u32,
}

impl ClampRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Coerce a value to the nearest bound.
    pub fn clamp(&self, v: u32) -> u32 {
        v.clamp(self.min, self.max)
    }
}

/// Font size, px.
pub const FONT_SIZE_RANGE: ClampRange = ClampRange::new(8, 72);
/// CSS font weight.
pub const FONT_WEIGHT_RANGE: ClampRange = ClampRange::new(100, 900);
/// Border radius, px.
pub const BORDER_RADIUS_RANGE: ClampRange = ClampRange::new(0, 24);
/// Number of columns in a columns block (and footer).
pub const COLUMN_COUNT_RANGE: ClampRange = ClampRange::new(1, 4);
/// Gap between columns, px.
pub const COLUMN_GAP_RANGE: ClampRange = ClampRange::new(0, 48);
/// Any single padding side, px.
pub const PADDING_RANGE: ClampRange = ClampRange::new(0, 96);
/// Image / divider width, percent of the container.
pub const WIDTH_PERCENT_RANGE: ClampRange = ClampRange::new(10, 100);
/// Divider thickness, px.
pub const DIVIDER_HEIGHT_RANGE: ClampRange = ClampRange::new(1, 8);
/// Bullet glyph size, px.
pub const BULLET_SIZE_RANGE: ClampRange = ClampRange::new(8, 48);

/// Line height is the one fractional range (em multiplier).
pub const LINE_HEIGHT_MIN: f32 = 1.0;
pub const LINE_HEIGHT_MAX: f32 = 3.0;

fn clamp_line_height(v: f32) -> f32 {
    v.clamp(LINE_HEIGHT_MIN, LINE_HEIGHT_MAX)
}

// ── Shared value types ───────────────────────────────────────────────────────

/// Padding around block content, px per side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Insets {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Insets {
    /// Uniform padding on all sides.
    pub fn all(value: u32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Symmetric padding (horizontal, vertical).
    pub fn symmetric(horizontal: u32, vertical: u32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Each side coerced into [`PADDING_RANGE`].
    pub fn clamped(&self) -> Self {
        Self {
            top: PADDING_RANGE.clamp(self.top),
            right: PADDING_RANGE.clamp(self.right),
            bottom: PADDING_RANGE.clamp(self.bottom),
            left: PADDING_RANGE.clamp(self.left),
        }
    }
}

/// Horizontal alignment of block content.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

impl std::fmt::Display for Alignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Visual style of a button block.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum ButtonStyle {
    /// Filled background.
    #[default]
    Solid,
    /// Border only.
    Outline,
    /// No chrome, link-styled.
    Ghost,
}

impl ButtonStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonStyle::Solid => "solid",
            ButtonStyle::Outline => "outline",
            ButtonStyle::Ghost => "ghost",
        }
    }
}

impl std::fmt::Display for ButtonStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rule style of a divider block.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum DividerStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl DividerStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            DividerStyle::Solid => "solid",
            DividerStyle::Dashed => "dashed",
            DividerStyle::Dotted => "dotted",
        }
    }
}

impl std::fmt::Display for DividerStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Marker glyph of a bullet list block.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum BulletStyle {
    #[default]
    Disc,
    Circle,
    Square,
}

impl BulletStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BulletStyle::Disc => "disc",
            BulletStyle::Circle => "circle",
            BulletStyle::Square => "square",
        }
    }
}

impl std::fmt::Display for BulletStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A social-media link in the footer block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

impl SocialLink {
    pub fn new(platform: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            url: url.into(),
        }
    }
}

// ── Text ─────────────────────────────────────────────────────────────────────

/// Options for a text block.
///
/// Defaults: 16px font, weight 400, left alignment, `#1F2937` color,
/// 1.5 line height, 16px uniform padding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextOptions {
    pub font_size: u32,
    pub font_weight: u32,
    pub alignment: Alignment,
    pub color: String,
    pub line_height: f32,
    pub padding: Insets,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            font_size: 16,
            font_weight: 400,
            alignment: Alignment::Left,
            color: "#1F2937".to_string(),
            line_height: 1.5,
            padding: Insets::all(16),
        }
    }
}

/// Shallow-merge patch for [`TextOptions`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextPatch {
    pub font_size: Option<u32>,
    pub font_weight: Option<u32>,
    pub alignment: Option<Alignment>,
    pub color: Option<String>,
    pub line_height: Option<f32>,
    pub padding: Option<Insets>,
}

impl TextOptions {
    /// Merge `Some` patch fields in, clamping numerics to their ranges.
    pub fn apply(&mut self, patch: &TextPatch) {
        if let Some(v) = patch.font_size {
            self.font_size = FONT_SIZE_RANGE.clamp(v);
        }
        if let Some(v) = patch.font_weight {
            self.font_weight = FONT_WEIGHT_RANGE.clamp(v);
        }
        if let Some(v) = patch.alignment {
            self.alignment = v;
        }
        if let Some(v) = &patch.color {
            self.color = v.clone();
        }
        if let Some(v) = patch.line_height {
            self.line_height = clamp_line_height(v);
        }
        if let Some(v) = &patch.padding {
            self.padding = v.clamped();
        }
    }
}

// ── Columns ──────────────────────────────────────────────────────────────────

/// Options for a columns block.
///
/// Defaults: 2 columns, 16px gap. The child sub-lists live in the document's
/// arena (one ordered id list per column slot), not here — editing
/// `column_count` does not resize them; missing slots are materialized lazily
/// on the next insert.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnsOptions {
    pub column_count: u32,
    pub column_gap: u32,
}

impl Default for ColumnsOptions {
    fn default() -> Self {
        Self {
            column_count: 2,
            column_gap: 16,
        }
    }
}

/// Shallow-merge patch for [`ColumnsOptions`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnsPatch {
    pub column_count: Option<u32>,
    pub column_gap: Option<u32>,
}

impl ColumnsOptions {
    pub fn apply(&mut self, patch: &ColumnsPatch) {
        if let Some(v) = patch.column_count {
            self.column_count = COLUMN_COUNT_RANGE.clamp(v);
        }
        if let Some(v) = patch.column_gap {
            self.column_gap = COLUMN_GAP_RANGE.clamp(v);
        }
    }
}

// ── Image ────────────────────────────────────────────────────────────────────

/// Options for an image block.
///
/// `image_url` holds only the URL string returned by the upload service —
/// never binary data. Defaults: empty URL/alt, 100% width, 0 radius,
/// center alignment, 16px uniform padding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageOptions {
    pub image_url: String,
    pub alt_text: String,
    pub width_percent: u32,
    pub border_radius: u32,
    pub alignment: Alignment,
    pub padding: Insets,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            image_url: String::new(),
            alt_text: String::new(),
            width_percent: 100,
            border_radius: 0,
            alignment: Alignment::Center,
            padding: Insets::all(16),
        }
    }
}

/// Shallow-merge patch for [`ImageOptions`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImagePatch {
    pub image_url: Option<String>,
    pub alt_text: Option<String>,
    pub width_percent: Option<u32>,
    pub border_radius: Option<u32>,
    pub alignment: Option<Alignment>,
    pub padding: Option<Insets>,
}

impl ImageOptions {
    pub fn apply(&mut self, patch: &ImagePatch) {
        if let Some(v) = &patch.image_url {
            self.image_url = v.clone();
        }
        if let Some(v) = &patch.alt_text {
            self.alt_text = v.clone();
        }
        if let Some(v) = patch.width_percent {
            self.width_percent = WIDTH_PERCENT_RANGE.clamp(v);
        }
        if let Some(v) = patch.border_radius {
            self.border_radius = BORDER_RADIUS_RANGE.clamp(v);
        }
        if let Some(v) = patch.alignment {
            self.alignment = v;
        }
        if let Some(v) = &patch.padding {
            self.padding = v.clamped();
        }
    }
}

// ── Button ───────────────────────────────────────────────────────────────────

/// Options for a button block.
///
/// Defaults: solid style, `#6366F1` background, white text, empty href,
/// 8px radius, 16px font, center alignment, 16px uniform padding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonOptions {
    pub style: ButtonStyle,
    pub background_color: String,
    pub text_color: String,
    pub href: String,
    pub border_radius: u32,
    pub font_size: u32,
    pub alignment: Alignment,
    pub padding: Insets,
}

impl Default for ButtonOptions {
    fn default() -> Self {
        Self {
            style: ButtonStyle::Solid,
            background_color: "#6366F1".to_string(),
            text_color: "#FFFFFF".to_string(),
            href: String::new(),
            border_radius: 8,
            font_size: 16,
            alignment: Alignment::Center,
            padding: Insets::all(16),
        }
    }
}

/// Shallow-merge patch for [`ButtonOptions`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonPatch {
    pub style: Option<ButtonStyle>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub href: Option<String>,
    pub border_radius: Option<u32>,
    pub font_size: Option<u32>,
    pub alignment: Option<Alignment>,
    pub padding: Option<Insets>,
}

impl ButtonOptions {
    pub fn apply(&mut self, patch: &ButtonPatch) {
        if let Some(v) = patch.style {
            self.style = v;
        }
        if let Some(v) = &patch.background_color {
            self.background_color = v.clone();
        }
        if let Some(v) = &patch.text_color {
            self.text_color = v.clone();
        }
        if let Some(v) = &patch.href {
            self.href = v.clone();
        }
        if let Some(v) = patch.border_radius {
            self.border_radius = BORDER_RADIUS_RANGE.clamp(v);
        }
        if let Some(v) = patch.font_size {
            self.font_size = FONT_SIZE_RANGE.clamp(v);
        }
        if let Some(v) = patch.alignment {
            self.alignment = v;
        }
        if let Some(v) = &patch.padding {
            self.padding = v.clamped();
        }
    }
}

// ── Divider ──────────────────────────────────────────────────────────────────

/// Options for a divider block.
///
/// Defaults: 100% width, 1px height, solid style, `#E5E7EB` color.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DividerOptions {
    pub divider_width: u32,
    pub divider_height: u32,
    pub divider_style: DividerStyle,
    pub divider_color: String,
}

impl Default for DividerOptions {
    fn default() -> Self {
        Self {
            divider_width: 100,
            divider_height: 1,
            divider_style: DividerStyle::Solid,
            divider_color: "#E5E7EB".to_string(),
        }
    }
}

/// Shallow-merge patch for [`DividerOptions`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DividerPatch {
    pub divider_width: Option<u32>,
    pub divider_height: Option<u32>,
    pub divider_style: Option<DividerStyle>,
    pub divider_color: Option<String>,
}

impl DividerOptions {
    pub fn apply(&mut self, patch: &DividerPatch) {
        if let Some(v) = patch.divider_width {
            self.divider_width = WIDTH_PERCENT_RANGE.clamp(v);
        }
        if let Some(v) = patch.divider_height {
            self.divider_height = DIVIDER_HEIGHT_RANGE.clamp(v);
        }
        if let Some(v) = patch.divider_style {
            self.divider_style = v;
        }
        if let Some(v) = &patch.divider_color {
            self.divider_color = v.clone();
        }
    }
}

// ── Footer ───────────────────────────────────────────────────────────────────

/// Options for a footer block.
///
/// Defaults: 3 columns, placeholder company info, 3 placeholder social links,
/// 12px font, `#6B7280` text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FooterOptions {
    pub footer_columns: u32,
    pub company_name: String,
    pub company_address: String,
    pub social_links: Vec<SocialLink>,
    pub font_size: u32,
    pub text_color: String,
}

impl Default for FooterOptions {
    fn default() -> Self {
        Self {
            footer_columns: 3,
            company_name: "Your Company".to_string(),
            company_address: "123 Main Street, Anytown, AN 12345".to_string(),
            social_links: vec![
                SocialLink::new("twitter", "https://twitter.com/yourcompany"),
                SocialLink::new("linkedin", "https://linkedin.com/company/yourcompany"),
                SocialLink::new("instagram", "https://instagram.com/yourcompany"),
            ],
            font_size: 12,
            text_color: "#6B7280".to_string(),
        }
    }
}

/// Shallow-merge patch for [`FooterOptions`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FooterPatch {
    pub footer_columns: Option<u32>,
    pub company_name: Option<String>,
    pub company_address: Option<String>,
    pub social_links: Option<Vec<SocialLink>>,
    pub font_size: Option<u32>,
    pub text_color: Option<String>,
}

impl FooterOptions {
    pub fn apply(&mut self, patch: &FooterPatch) {
        if let Some(v) = patch.footer_columns {
            self.footer_columns = COLUMN_COUNT_RANGE.clamp(v);
        }
        if let Some(v) = &patch.company_name {
            self.company_name = v.clone();
        }
        if let Some(v) = &patch.company_address {
            self.company_address = v.clone();
        }
        if let Some(v) = &patch.social_links {
            self.social_links = v.clone();
        }
        if let Some(v) = patch.font_size {
            self.font_size = FONT_SIZE_RANGE.clamp(v);
        }
        if let Some(v) = &patch.text_color {
            self.text_color = v.clone();
        }
    }
}

// ── Bullet list ──────────────────────────────────────────────────────────────

/// Options for a bullet list block.
///
/// Defaults: 3 placeholder items, disc style, 16px bullets, `#1F2937` color.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BulletListOptions {
    pub items: Vec<String>,
    pub bullet_style: BulletStyle,
    pub bullet_size: u32,
    pub color: String,
}

impl Default for BulletListOptions {
    fn default() -> Self {
        Self {
            items: vec![
                "First item".to_string(),
                "Second item".to_string(),
                "Third item".to_string(),
            ],
            bullet_style: BulletStyle::Disc,
            bullet_size: 16,
            color: "#1F2937".to_string(),
        }
    }
}

/// Shallow-merge patch for [`BulletListOptions`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BulletListPatch {
    pub items: Option<Vec<String>>,
    pub bullet_style: Option<BulletStyle>,
    pub bullet_size: Option<u32>,
    pub color: Option<String>,
}

impl BulletListOptions {
    pub fn apply(&mut self, patch: &BulletListPatch) {
        if let Some(v) = &patch.items {
            self.items = v.clone();
        }
        if let Some(v) = patch.bullet_style {
            self.bullet_style = v;
        }
        if let Some(v) = patch.bullet_size {
            self.bullet_size = BULLET_SIZE_RANGE.clamp(v);
        }
        if let Some(v) = &patch.color {
            self.color = v.clone();
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
