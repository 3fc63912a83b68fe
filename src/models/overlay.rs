//! Overlay text layers composited onto the jersey image.
//!
//! There are exactly three overlays ([`OverlayKind`]). Font and ink colour are
//! global to all three; each overlay keeps its own enabled flag, text and
//! position.

use serde::{Deserialize, Serialize};

/// Longest name accepted, in characters.
pub const NAME_MAX_CHARS: usize = 15;

/// Inclusive bounds for the jersey number.
pub const NUMBER_RANGE: std::ops::RangeInclusive<u32> = 1..=99;

/// Inclusive bounds, in percent, that a dragged overlay is clamped to.
pub const DRAG_MIN_PERCENT: f64 = 10.0;
pub const DRAG_MAX_PERCENT: f64 = 90.0;

/// Which of the three overlays an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayKind {
    Name,
    Number,
    Slogan,
}

impl OverlayKind {
    pub const ALL: [OverlayKind; 3] = [OverlayKind::Name, OverlayKind::Number, OverlayKind::Slogan];

    /// Resting position before the user drags anything.
    pub fn default_position(self) -> Position {
        match self {
            OverlayKind::Name => Position::new(50.0, 35.0),
            OverlayKind::Number => Position::new(50.0, 50.0),
            OverlayKind::Slogan => Position::new(50.0, 65.0),
        }
    }
}

/// Typeface offered for the overlays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Font {
    #[default]
    Montserrat,
    Roboto,
    Playfair,
    Inter,
    Lora,
    Opensans,
    Raleway,
    Poppins,
}

/// Generic family a [`Font`] falls back to when the face is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFamily {
    Sans,
    Serif,
}

impl Font {
    pub fn family(self) -> FontFamily {
        match self {
            Font::Playfair | Font::Lora => FontFamily::Serif,
            _ => FontFamily::Sans,
        }
    }

    /// Display name, also used as the CSS `font-family`.
    pub fn label(self) -> &'static str {
        match self {
            Font::Montserrat => "Montserrat",
            Font::Roboto => "Roboto",
            Font::Playfair => "Playfair Display",
            Font::Inter => "Inter",
            Font::Lora => "Lora",
            Font::Opensans => "Open Sans",
            Font::Raleway => "Raleway",
            Font::Poppins => "Poppins",
        }
    }
}

impl FontFamily {
    pub fn css_generic(self) -> &'static str {
        match self {
            FontFamily::Sans => "sans-serif",
            FontFamily::Serif => "serif",
        }
    }
}

/// Ink colour of the overlay text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InkColor {
    #[default]
    White,
    Red,
    Green,
}

impl InkColor {
    pub fn hex(self) -> &'static str {
        match self {
            InkColor::White => "#FFFFFF",
            InkColor::Red => "#C8102E",
            InkColor::Green => "#006233",
        }
    }
}

/// Percentage offset within the preview container (0–100 on both axes).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp both axes to the interior drag region.
    pub fn clamp_to_drag_region(self) -> Self {
        Self {
            x: self.x.clamp(DRAG_MIN_PERCENT, DRAG_MAX_PERCENT),
            y: self.y.clamp(DRAG_MIN_PERCENT, DRAG_MAX_PERCENT),
        }
    }

    /// Clamp both axes to the container (0–100). Non-finite values reset to
    /// `fallback`.
    pub fn clamp_to_container(self, fallback: Position) -> Self {
        if !self.x.is_finite() || !self.y.is_finite() {
            return fallback;
        }
        Self {
            x: self.x.clamp(0.0, 100.0),
            y: self.y.clamp(0.0, 100.0),
        }
    }
}

/// One text layer.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayElement {
    pub enabled: bool,
    pub text: String,
    pub position: Position,
}

impl OverlayElement {
    pub fn new(kind: OverlayKind) -> Self {
        Self {
            enabled: false,
            text: String::new(),
            position: kind.default_position(),
        }
    }

    /// Enabled and carrying some non-whitespace text.
    pub fn has_content(&self) -> bool {
        self.enabled && !self.text.trim().is_empty()
    }
}

/// Serialized form of one overlay, shared by the stored snapshot and the
/// order record.
///
/// Font and colour are repeated on every overlay so the record reads on its
/// own; the slogan additionally carries a fixed text size tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayRecord {
    pub enabled: bool,
    pub text: String,
    pub font: Font,
    pub color: InkColor,
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

/// Text size tag the slogan is always recorded with.
pub const SLOGAN_SIZE: &str = "medium";

impl OverlayRecord {
    pub fn from_element(
        kind: OverlayKind,
        element: &OverlayElement,
        font: Font,
        color: InkColor,
    ) -> Self {
        Self {
            enabled: element.enabled,
            text: element.text.clone(),
            font,
            color,
            position: Some(element.position),
            size: (kind == OverlayKind::Slogan).then(|| SLOGAN_SIZE.to_string()),
        }
    }
}

/// First [`NAME_MAX_CHARS`] characters of `text`.
pub fn truncate_name(text: &str) -> String {
    text.chars().take(NAME_MAX_CHARS).collect()
}

/// `true` when `text` is empty or an integer inside [`NUMBER_RANGE`].
pub fn is_acceptable_number(text: &str) -> bool {
    if text.is_empty() {
        return true;
    }
    // `u32::from_str` also takes a leading `+`.
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    text.parse::<u32>()
        .map(|n| NUMBER_RANGE.contains(&n))
        .unwrap_or(false)
}
