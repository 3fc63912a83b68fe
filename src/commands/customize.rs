//! Layout and contact form edits.

use std::sync::atomic::Ordering;

use crate::error::AppError;
use crate::layout::{LayoutModel, TextEdit};
use crate::models::{
    CustomerContact, FacePlacement, Font, InkColor, JerseyColor, OverlayKind, Size,
};
use crate::state::{read_lock, write_lock, Workbench};

impl Workbench {
    pub fn set_jersey_color(&self, color: JerseyColor) -> Result<(), AppError> {
        self.edit_layout(|l| l.set_jersey_color(color))
    }

    pub fn set_size(&self, size: Size) -> Result<(), AppError> {
        self.edit_layout(|l| l.set_size(size))
    }

    pub fn set_face_placement(&self, placement: FacePlacement) -> Result<(), AppError> {
        self.edit_layout(|l| l.set_face_placement(placement))
    }

    pub fn set_element_enabled(&self, which: OverlayKind, enabled: bool) -> Result<(), AppError> {
        self.edit_layout(|l| l.set_element_enabled(which, enabled))
    }

    /// Edit an overlay's text. A rejected number keeps the previous value
    /// and leaves the saved state untouched.
    pub fn set_element_text(&self, which: OverlayKind, text: &str) -> Result<TextEdit, AppError> {
        let outcome = self.edit_layout(|l| l.set_element_text(which, text))?;
        if outcome == TextEdit::Rejected {
            tracing::debug!(?which, text, "text edit rejected");
        }
        Ok(outcome)
    }

    pub fn set_font(&self, font: Font) -> Result<(), AppError> {
        self.edit_layout(|l| l.set_font(font))
    }

    pub fn set_color(&self, color: InkColor) -> Result<(), AppError> {
        self.edit_layout(|l| l.set_color(color))
    }

    // ── Contact form ─────────────────────────────────────────────────────────

    pub fn contact(&self) -> Result<CustomerContact, AppError> {
        Ok(read_lock(&self.contact, "contact")?.clone())
    }

    /// Replace the contact fields as typed. Validation happens on submit.
    pub fn set_contact(&self, contact: CustomerContact) -> Result<(), AppError> {
        *write_lock(&self.contact, "contact")? = contact;
        Ok(())
    }

    pub fn close_contact_form(&self) {
        self.contact_form_open.store(false, Ordering::SeqCst);
    }

    fn edit_layout<R>(&self, change: impl FnOnce(&mut LayoutModel) -> R) -> Result<R, AppError> {
        let mut layout = write_lock(&self.layout, "layout")?;
        Ok(change(&mut layout))
    }
}
