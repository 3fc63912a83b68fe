//! The layout model: single source of truth for the live preview.
//!
//! Every accepted change goes through [`LayoutModel::mutate`], which clears
//! the saved flag and bumps the revision. Nothing else can touch the fields,
//! so a configuration change can never leave a stale "saved" state behind.

use crate::models::overlay::{is_acceptable_number, truncate_name};
use crate::models::{
    FacePlacement, Font, InkColor, JerseyColor, JerseyConfig, OverlayElement, OverlayKind,
    Position, Size,
};

/// Result of a constrained text edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEdit {
    /// The text was stored (possibly truncated).
    Applied,
    /// The input was refused and the previous value kept.
    Rejected,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutModel {
    jersey: JerseyConfig,
    name: OverlayElement,
    number: OverlayElement,
    slogan: OverlayElement,
    font: Font,
    color: InkColor,
    preview_image: String,
    saved: bool,
    revision: u64,
}

impl Default for LayoutModel {
    fn default() -> Self {
        Self {
            jersey: JerseyConfig::default(),
            name: OverlayElement::new(OverlayKind::Name),
            number: OverlayElement::new(OverlayKind::Number),
            slogan: OverlayElement::new(OverlayKind::Slogan),
            font: Font::default(),
            color: InkColor::default(),
            preview_image: String::new(),
            saved: false,
            revision: 0,
        }
    }
}

impl LayoutModel {
    // ── Reads ────────────────────────────────────────────────────────────────

    pub fn jersey(&self) -> JerseyConfig {
        self.jersey
    }

    pub fn element(&self, which: OverlayKind) -> &OverlayElement {
        match which {
            OverlayKind::Name => &self.name,
            OverlayKind::Number => &self.number,
            OverlayKind::Slogan => &self.slogan,
        }
    }

    pub fn font(&self) -> Font {
        self.font
    }

    pub fn color(&self) -> InkColor {
        self.color
    }

    /// Data URI of the last rasterized preview, empty when none.
    pub fn preview_image(&self) -> &str {
        &self.preview_image
    }

    /// `true` while the in-memory state matches the last persisted snapshot.
    pub fn is_saved(&self) -> bool {
        self.saved
    }

    /// Counter bumped by every accepted mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn any_enabled(&self) -> bool {
        OverlayKind::ALL.iter().any(|k| self.element(*k).enabled)
    }

    // ── Setters ──────────────────────────────────────────────────────────────

    pub fn set_jersey_color(&mut self, color: JerseyColor) {
        self.mutate(|m| m.jersey.color = color);
    }

    pub fn set_size(&mut self, size: Size) {
        self.mutate(|m| m.jersey.size = size);
    }

    pub fn set_face_placement(&mut self, placement: FacePlacement) {
        self.mutate(|m| m.jersey.face_placement = placement);
    }

    pub fn set_element_enabled(&mut self, which: OverlayKind, enabled: bool) {
        self.mutate(|m| m.element_mut(which).enabled = enabled);
    }

    /// Store `text` for `which`, applying the per-overlay input rules:
    /// names are truncated, numbers outside 1–99 are refused.
    pub fn set_element_text(&mut self, which: OverlayKind, text: &str) -> TextEdit {
        let accepted = match which {
            OverlayKind::Name => truncate_name(text),
            OverlayKind::Number if !is_acceptable_number(text) => return TextEdit::Rejected,
            OverlayKind::Number | OverlayKind::Slogan => text.to_string(),
        };
        self.mutate(|m| m.element_mut(which).text = accepted);
        TextEdit::Applied
    }

    /// Applies to all three overlays.
    pub fn set_font(&mut self, font: Font) {
        self.mutate(|m| m.font = font);
    }

    /// Applies to all three overlays.
    pub fn set_color(&mut self, color: InkColor) {
        self.mutate(|m| m.color = color);
    }

    /// Used by the drag controller; the caller clamps.
    pub(crate) fn set_position(&mut self, which: OverlayKind, position: Position) {
        self.mutate(|m| m.element_mut(which).position = position);
    }

    /// Invalidate the saved state without changing any content (start of a
    /// drag gesture).
    pub(crate) fn touch(&mut self) {
        self.mutate(|_| {});
    }

    // ── Persistence hooks ────────────────────────────────────────────────────

    /// Record a successful save, unless the layout changed since
    /// `revision` was read. Returns whether the flag was set.
    pub(crate) fn mark_saved(&mut self, revision: u64, preview_image: String) -> bool {
        if self.revision != revision {
            return false;
        }
        self.preview_image = preview_image;
        self.saved = true;
        true
    }

    /// The persisted snapshot is gone (order placed).
    pub(crate) fn clear_saved(&mut self) {
        self.saved = false;
    }

    /// Build a saved layout from restored parts.
    ///
    /// Inputs go through the same rules as interactive edits so a hand-edited
    /// store cannot smuggle in an over-long name or an out-of-range number.
    pub(crate) fn restored(parts: RestoredParts) -> Self {
        let mut model = Self {
            jersey: parts.jersey,
            font: parts.font,
            color: parts.color,
            preview_image: parts.preview_image,
            ..Self::default()
        };
        for (kind, element) in OverlayKind::ALL.into_iter().zip(parts.elements) {
            let fallback = kind.default_position();
            let slot = model.element_mut(kind);
            slot.enabled = element.enabled;
            slot.position = element.position.clamp_to_container(fallback);
            slot.text = match kind {
                OverlayKind::Name => truncate_name(&element.text),
                OverlayKind::Number if !is_acceptable_number(&element.text) => {
                    tracing::warn!(text = %element.text, "dropping out-of-range restored number");
                    String::new()
                }
                _ => element.text,
            };
        }
        model.saved = true;
        model
    }

    fn element_mut(&mut self, which: OverlayKind) -> &mut OverlayElement {
        match which {
            OverlayKind::Name => &mut self.name,
            OverlayKind::Number => &mut self.number,
            OverlayKind::Slogan => &mut self.slogan,
        }
    }

    fn mutate(&mut self, change: impl FnOnce(&mut Self)) {
        change(self);
        self.saved = false;
        self.revision += 1;
    }
}

/// Decoded snapshot contents, in `OverlayKind::ALL` order.
#[derive(Debug, Clone)]
pub(crate) struct RestoredParts {
    pub jersey: JerseyConfig,
    pub elements: [OverlayElement; 3],
    pub font: Font,
    pub color: InkColor,
    pub preview_image: String,
}
