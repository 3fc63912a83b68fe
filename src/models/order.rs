//! Order record handed to the order-persistence collaborator.
//!
//! Field names follow the `orders` table the storefront writes to, so the
//! record serializes directly into an insert payload.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::jersey::{FacePlacement, JerseyColor, Size};
use super::overlay::OverlayRecord;

pub const PRODUCT_NAME: &str = "Maillot CAN 2025 Personnalisé";
pub const PRODUCT_CATEGORY: &str = "Maillot";
/// The workbench only ever edits one personalization slot.
pub const PERSONALIZATION_ID: &str = "1";

/// Lifecycle of an order once it leaves the workbench.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Customer-facing status label.
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "En attente de confirmation",
            OrderStatus::Processing => "En préparation",
            OrderStatus::Shipped => "En cours de livraison",
            OrderStatus::Delivered => "Livrée",
            OrderStatus::Cancelled => "Annulée",
        }
    }
}

/// Contact details typed into the order form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerContact {
    pub name: String,
    pub phone: String,
    pub city: String,
    pub address: String,
}

/// Base price plus optional slogan surcharge, in dirhams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceBreakdown {
    pub base_price: u32,
    pub slogan_surcharge: u32,
}

impl PriceBreakdown {
    pub fn total(&self) -> u32 {
        self.base_price + self.slogan_surcharge
    }
}

/// `CMD-<unix millis>-<000..999>`.
///
/// Unique with high probability only: two orders created in the same
/// millisecond collide one time in a thousand.
pub fn generate_order_number() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u32 = rand::thread_rng().gen_range(0..1000);
    format!("CMD-{millis}-{suffix:03}")
}

/// A submitted order. Immutable once handed to the collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_number: String,
    pub personalization_id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub customer_city: String,

    pub product_name: String,
    pub product_price: u32,
    pub product_image_url: String,
    pub product_category: String,
    pub product_size: Size,

    pub jersey_color: JerseyColor,
    pub total_price: u32,
    pub status: OrderStatus,
    pub notes: String,

    pub name: OverlayRecord,
    pub number: OverlayRecord,
    pub slogan: OverlayRecord,

    pub selected_position: FacePlacement,
    pub preview_image_url: String,
    /// RFC 3339 UTC creation time.
    pub created_at: String,
}

/// Free-text summary stored with the order, e.g.
/// `Maillot Rouge - Taille: M - Position: back - Avec slogan (+50 DH)`.
pub fn order_notes(
    color: JerseyColor,
    size: Size,
    placement: FacePlacement,
    slogan_enabled: bool,
    slogan_surcharge: u32,
) -> String {
    let mut notes = format!(
        "Maillot {} - Taille: {} - Position: {}",
        color.label_fr(),
        size.as_str(),
        placement.as_str()
    );
    if slogan_enabled {
        notes.push_str(&format!(" - Avec slogan (+{slogan_surcharge} DH)"));
    }
    notes
}
