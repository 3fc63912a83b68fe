//! Serializable shape of the stored customization.
//!
//! This is the **stored** representation kept under the customization key.
//! The **in-memory** representation is [`crate::layout::LayoutModel`];
//! conversion between the two is done in [`super::serialization`].
//!
//! Every field defaults when absent, so a record written by an older build
//! (or with fields missing) still restores. A field of the wrong type makes
//! the whole record malformed.

use serde::{Deserialize, Serialize};

use crate::models::{FacePlacement, JerseyColor, OverlayRecord, Size};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoredCustomization {
    pub jersey_color: JerseyColor,
    pub selected_size: Size,
    pub name: OverlayRecord,
    pub number: OverlayRecord,
    pub slogan: OverlayRecord,
    pub selected_position: FacePlacement,
    /// Data URI of the rasterized preview; empty when capture failed.
    pub preview_image: String,
    pub saved: bool,
}
