//! Application-level error type returned by every workbench operation.
//!
//! `AppError` is serialized to `{ kind, message }` JSON payloads so an
//! embedding frontend can pattern-match on a stable `kind` string.

use crate::config::ConfigError;
use crate::ports::{RasterError, SinkError, StoreError};

/// A user-correctable input problem.
///
/// The `Display` text of each variant is the exact message shown to the
/// customer, so variants map one-to-one onto distinct validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Enable at least one customization")]
    NoOverlayEnabled,

    #[error("Please enter a name")]
    MissingOverlayName,

    #[error("Please enter a number")]
    MissingOverlayNumber,

    #[error("Save your customization first")]
    NotSaved,

    #[error("Name is required")]
    MissingCustomerName,

    #[error("Phone is required")]
    MissingPhone,

    #[error("Format: 06XXXXXXXX")]
    MalformedPhone,

    #[error("Please enter an order number")]
    MissingOrderNumber,
}

/// Top-level error returned by workbench operations.
///
/// Serialized with serde's adjacently-tagged representation:
/// `{ "kind": "<variant>", "message": "<human-readable text>" }`
#[derive(Debug, thiserror::Error, serde::Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum AppError {
    /// Local, synchronous input validation failure.
    #[error("{0}")]
    Validation(String),

    /// The stored snapshot could not be parsed. Only ever logged.
    #[error("{0}")]
    RestoreParse(String),

    /// The preview could not be rasterized.
    #[error("{0}")]
    Rasterization(String),

    /// The snapshot could not be written to the local store.
    #[error("{0}")]
    PersistenceWrite(String),

    /// The order collaborator rejected or failed the submission.
    #[error("{0}")]
    Submission(String),

    /// A requested resource (order, etc.) was not found.
    #[error("{0}")]
    NotFound(String),

    /// Configuration could not be loaded or is invalid.
    #[error("{0}")]
    Config(String),

    /// A generic I/O error, stringified at the boundary.
    #[error("{0}")]
    Io(String),

    /// An internal lock was poisoned.
    #[error("{0}")]
    State(String),
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e.to_string())
    }
}

impl From<RasterError> for AppError {
    fn from(e: RasterError) -> Self {
        Self::Rasterization(e.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        Self::PersistenceWrite(e.to_string())
    }
}

impl From<SinkError> for AppError {
    fn from(e: SinkError) -> Self {
        Self::Submission(e.to_string())
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
