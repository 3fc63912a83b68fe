//! Boundary contracts for the collaborators the workbench talks to.
//!
//! The workbench never performs I/O itself: durable storage, rasterization,
//! order persistence, notifications and navigation are all reached through
//! the traits below, held as `Arc<dyn Trait>` so one collaborator can be
//! shared with spawned follow-up tasks.

use async_trait::async_trait;

use crate::models::{FacePlacement, JerseyColor, OrderRecord};
use crate::raster::PreviewScene;

// ── Errors ────────────────────────────────────────────────────────────────────

/// Durable store failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage read failed: {0}")]
    Read(String),
    #[error("storage write failed: {0}")]
    Write(String),
}

/// Rasterization failure. Never fatal to a save.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("nothing to capture: {0}")]
    EmptyRegion(String),
    #[error("capture failed: {0}")]
    Capture(String),
}

/// Order collaborator failure.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("{0}")]
    Rejected(String),
    #[error("order service unavailable: {0}")]
    Unavailable(String),
}

// ── Storage ───────────────────────────────────────────────────────────────────

/// Durable local key-value store.
///
/// `set` must be logically atomic: either the new value fully replaces the
/// old one or the old one remains readable.
#[async_trait]
pub trait LocalStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

// ── Rasterization ─────────────────────────────────────────────────────────────

/// Turns a composed preview scene into an image data URI.
#[async_trait]
pub trait Rasterizer: Send + Sync {
    async fn capture(&self, scene: &PreviewScene) -> Result<String, RasterError>;
}

// ── Orders ────────────────────────────────────────────────────────────────────

/// Order-persistence collaborator. A successful return is assumed durable.
#[async_trait]
pub trait OrderSink: Send + Sync {
    async fn create_order(&self, order: &OrderRecord) -> Result<(), SinkError>;
}

/// Read side used by order tracking.
#[async_trait]
pub trait OrderLookup: Send + Sync {
    async fn find_order(&self, order_number: &str) -> Result<Option<OrderRecord>, SinkError>;
}

// ── Assets ────────────────────────────────────────────────────────────────────

/// Supplies the static jersey images.
pub trait AssetCatalog: Send + Sync {
    fn jersey_image(&self, color: JerseyColor, placement: FacePlacement) -> String;
}

// ── Notifications and navigation ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A user-facing toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: Option<String>,
}

impl Notice {
    pub fn info(title: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            description: None,
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: title.into(),
            description: None,
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Fire-and-forget user notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Navigation back to the storefront landing page.
pub trait Navigator: Send + Sync {
    fn go_home(&self);
}
