//! Bundled jersey images.

use crate::models::{FacePlacement, JerseyColor, JerseySide};
use crate::ports::AssetCatalog;

/// The four images shipped with the storefront, addressed by colour and
/// side. `base_url` is prefixed verbatim.
#[derive(Debug, Clone)]
pub struct StaticAssets {
    base_url: String,
}

impl Default for StaticAssets {
    fn default() -> Self {
        Self::new("/assets")
    }
}

impl StaticAssets {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn file_name(color: JerseyColor, side: JerseySide) -> &'static str {
        match (color, side) {
            (JerseyColor::Red, JerseySide::Front) => "jersey-red.jpg",
            (JerseyColor::Red, JerseySide::Back) => "back.jpg",
            (JerseyColor::White, JerseySide::Front) => "jerseywhiteimage.jpg",
            (JerseyColor::White, JerseySide::Back) => "backwhiteimage.jpg",
        }
    }
}

impl AssetCatalog for StaticAssets {
    fn jersey_image(&self, color: JerseyColor, placement: FacePlacement) -> String {
        format!("{}/{}", self.base_url, Self::file_name(color, placement.side()))
    }
}
