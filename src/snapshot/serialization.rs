//! Encode, decode and restore the stored customization.
//!
//! # Save
//! 1. [`validate_for_save`] checks the overlay preconditions.
//! 2. [`rasterize_best_effort`] flattens the preview; failures yield `""`.
//! 3. [`encode`] builds the full [`StoredCustomization`] and the caller
//!    writes it in one `LocalStore::set`, which replaces the previous record
//!    atomically.
//!
//! # Restore
//! [`restore`] never fails: a missing record leaves the defaults, a malformed
//! one is logged and discarded.

use crate::error::{AppError, ValidationError};
use crate::layout::{LayoutModel, RestoredParts};
use crate::models::{OverlayElement, OverlayKind, OverlayRecord};
use crate::ports::{LocalStore, Rasterizer};
use crate::raster::PreviewScene;

use super::types::StoredCustomization;

/// What [`restore`] found in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// A record was decoded and applied.
    Restored,
    /// No record under the key.
    Empty,
    /// A record existed but could not be used; defaults apply.
    Discarded(String),
}

/// Overlay preconditions for saving, checked in order.
pub fn validate_for_save(layout: &LayoutModel) -> Result<(), ValidationError> {
    if !layout.any_enabled() {
        return Err(ValidationError::NoOverlayEnabled);
    }
    let name = layout.element(OverlayKind::Name);
    if name.enabled && name.text.trim().is_empty() {
        return Err(ValidationError::MissingOverlayName);
    }
    let number = layout.element(OverlayKind::Number);
    if number.enabled && number.text.trim().is_empty() {
        return Err(ValidationError::MissingOverlayNumber);
    }
    Ok(())
}

/// Build the stored record for `layout` with the given preview image.
pub fn to_stored(layout: &LayoutModel, preview_image: &str) -> StoredCustomization {
    let record =
        |kind| OverlayRecord::from_element(kind, layout.element(kind), layout.font(), layout.color());
    let jersey = layout.jersey();
    StoredCustomization {
        jersey_color: jersey.color,
        selected_size: jersey.size,
        name: record(OverlayKind::Name),
        number: record(OverlayKind::Number),
        slogan: record(OverlayKind::Slogan),
        selected_position: jersey.face_placement,
        preview_image: preview_image.to_string(),
        saved: true,
    }
}

/// Serialize `layout` for the store.
pub fn encode(layout: &LayoutModel, preview_image: &str) -> Result<String, AppError> {
    serde_json::to_string(&to_stored(layout, preview_image))
        .map_err(|e| AppError::PersistenceWrite(format!("cannot serialize customization: {e}")))
}

/// Parse a stored record into a saved [`LayoutModel`].
///
/// Font and colour are global in the layout; they are read from the name
/// overlay, which every writer fills in.
pub fn decode(json: &str) -> Result<LayoutModel, AppError> {
    let stored: StoredCustomization = serde_json::from_str(json)
        .map_err(|e| AppError::RestoreParse(format!("cannot parse stored customization: {e}")))?;

    let element = |kind: OverlayKind, record: &OverlayRecord| OverlayElement {
        enabled: record.enabled,
        text: record.text.clone(),
        position: record.position.unwrap_or_else(|| kind.default_position()),
    };

    Ok(LayoutModel::restored(RestoredParts {
        jersey: crate::models::JerseyConfig {
            color: stored.jersey_color,
            size: stored.selected_size,
            face_placement: stored.selected_position,
        },
        elements: [
            element(OverlayKind::Name, &stored.name),
            element(OverlayKind::Number, &stored.number),
            element(OverlayKind::Slogan, &stored.slogan),
        ],
        font: stored.name.font,
        color: stored.name.color,
        preview_image: stored.preview_image,
    }))
}

/// Read the record under `key` and rebuild the layout, failing open.
pub async fn restore(store: &dyn LocalStore, key: &str) -> (LayoutModel, RestoreOutcome) {
    let raw = match store.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return (LayoutModel::default(), RestoreOutcome::Empty),
        Err(e) => {
            tracing::warn!(key, error = %e, "cannot read stored customization, using defaults");
            return (LayoutModel::default(), RestoreOutcome::Discarded(e.to_string()));
        }
    };
    match decode(&raw) {
        Ok(layout) => {
            tracing::info!(key, "restored saved customization");
            (layout, RestoreOutcome::Restored)
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding malformed customization, using defaults");
            (LayoutModel::default(), RestoreOutcome::Discarded(e.to_string()))
        }
    }
}

/// Capture `scene`, substituting an empty image on failure.
pub async fn rasterize_best_effort(rasterizer: &dyn Rasterizer, scene: &PreviewScene) -> String {
    match rasterizer.capture(scene).await {
        Ok(uri) => uri,
        Err(e) => {
            tracing::warn!(error = %e, "preview capture failed, saving without image");
            String::new()
        }
    }
}
