//! Order submission: validation, pricing and record assembly.
//!
//! The async dispatch, guard and cleanup live on the workbench
//! ([`crate::commands::order`]); everything here is pure.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::PricingConfig;
use crate::error::ValidationError;
use crate::layout::LayoutModel;
use crate::models::order::{
    generate_order_number, order_notes, PERSONALIZATION_ID, PRODUCT_CATEGORY, PRODUCT_NAME,
};
use crate::models::{
    CustomerContact, OrderRecord, OrderStatus, OverlayKind, OverlayRecord, PriceBreakdown,
};
use crate::ports::AssetCatalog;

/// Moroccan mobile number: `05`, `06` or `07` then eight digits.
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(06|07|05)\d{8}$").expect("phone pattern is a valid regex")
});

/// `phone` with all whitespace removed.
pub fn strip_whitespace(phone: &str) -> String {
    phone.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Validate a phone number as typed. Returns the normalized number.
pub fn validate_phone(phone: &str) -> Result<String, ValidationError> {
    let stripped = strip_whitespace(phone);
    if stripped.is_empty() {
        return Err(ValidationError::MissingPhone);
    }
    if !PHONE_PATTERN.is_match(&stripped) {
        return Err(ValidationError::MalformedPhone);
    }
    Ok(stripped)
}

/// Submission preconditions, checked in order. Returns the contact with
/// trimmed fields and a normalized phone.
pub fn validate_submission(
    saved: bool,
    contact: &CustomerContact,
) -> Result<CustomerContact, ValidationError> {
    if !saved {
        return Err(ValidationError::NotSaved);
    }
    let name = contact.name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingCustomerName);
    }
    let phone = validate_phone(&contact.phone)?;
    Ok(CustomerContact {
        name: name.to_string(),
        phone,
        city: contact.city.trim().to_string(),
        address: contact.address.trim().to_string(),
    })
}

/// Base price, plus the slogan surcharge when the slogan is enabled and
/// carries non-whitespace text.
pub fn price(layout: &LayoutModel, pricing: PricingConfig) -> PriceBreakdown {
    let slogan = layout.element(OverlayKind::Slogan);
    PriceBreakdown {
        base_price: pricing.base_price,
        slogan_surcharge: if slogan.has_content() {
            pricing.slogan_surcharge
        } else {
            0
        },
    }
}

/// Assemble the order for a validated contact.
pub fn build_order(
    layout: &LayoutModel,
    contact: CustomerContact,
    pricing: PricingConfig,
    assets: &dyn AssetCatalog,
) -> OrderRecord {
    let jersey = layout.jersey();
    let breakdown = price(layout, pricing);
    let record =
        |kind| OverlayRecord::from_element(kind, layout.element(kind), layout.font(), layout.color());
    OrderRecord {
        order_number: generate_order_number(),
        personalization_id: PERSONALIZATION_ID.to_string(),
        customer_name: contact.name,
        customer_phone: contact.phone,
        customer_address: contact.address,
        customer_city: contact.city,
        product_name: PRODUCT_NAME.to_string(),
        product_price: breakdown.base_price,
        product_image_url: assets.jersey_image(jersey.color, jersey.face_placement),
        product_category: PRODUCT_CATEGORY.to_string(),
        product_size: jersey.size,
        jersey_color: jersey.color,
        total_price: breakdown.total(),
        status: OrderStatus::Pending,
        notes: order_notes(
            jersey.color,
            jersey.size,
            jersey.face_placement,
            layout.element(OverlayKind::Slogan).enabled,
            pricing.slogan_surcharge,
        ),
        name: record(OverlayKind::Name),
        number: record(OverlayKind::Number),
        slogan: record(OverlayKind::Slogan),
        selected_position: jersey.face_placement,
        preview_image_url: layout.preview_image().to_string(),
        created_at: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
    }
}
