//! Garment selection: colourway, size and the face being customized.

use serde::{Deserialize, Serialize};

/// Jersey colourway; selects which front/back image pair is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JerseyColor {
    #[default]
    Red,
    White,
}

impl JerseyColor {
    /// French label used in order notes.
    pub fn label_fr(self) -> &'static str {
        match self {
            JerseyColor::Red => "Rouge",
            JerseyColor::White => "Blanc",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Size {
    S,
    #[default]
    M,
    L,
    XL,
    XXL,
}

impl Size {
    pub const ALL: [Size; 5] = [Size::S, Size::M, Size::L, Size::XL, Size::XXL];

    pub fn as_str(self) -> &'static str {
        match self {
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
            Size::XL => "XL",
            Size::XXL => "XXL",
        }
    }
}

/// Which jersey face is displayed and customized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacePlacement {
    #[default]
    Back,
    Chest,
    Sleeve,
}

impl FacePlacement {
    pub fn as_str(self) -> &'static str {
        match self {
            FacePlacement::Back => "back",
            FacePlacement::Chest => "chest",
            FacePlacement::Sleeve => "sleeve",
        }
    }

    /// Image orientation for this placement: the back image for `back`, the
    /// front image otherwise.
    pub fn side(self) -> JerseySide {
        match self {
            FacePlacement::Back => JerseySide::Back,
            FacePlacement::Chest | FacePlacement::Sleeve => JerseySide::Front,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JerseySide {
    Front,
    Back,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JerseyConfig {
    pub color: JerseyColor,
    pub size: Size,
    pub face_placement: FacePlacement,
}
