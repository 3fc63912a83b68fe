//! Operations the embedding shell invokes on a [`Workbench`].
//!
//! Sub-modules are grouped by concern, each adding an `impl Workbench` block:
//! - [`customize`] — layout setters and contact form fields
//! - [`drag`]      — pointer press / move / release
//! - [`save`]      — validate, rasterize and persist the customization
//! - [`order`]     — guarded order submission and its follow-ups
//! - [`track`]     — order tracking lookup
//!
//! # Error contract
//! Every fallible path returns `Result<_, AppError>`. User-correctable
//! failures are also reported through the notifier before returning.
//!
//! [`Workbench`]: crate::state::Workbench

pub mod customize;
pub mod drag;
pub mod order;
pub mod save;
pub mod track;

pub use order::{OrderReceipt, SubmitOutcome};
