//! Workbench state shared by every command.
//!
//! [`Workbench`] owns the layout, the drag controller and the contact form,
//! each behind its own lock so a drag can proceed while a save or submit is
//! awaiting a collaborator. Locks are never held across an `.await`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::adapters::{
    CountingNavigator, MemoryOrderBook, MemoryStore, StaticAssets, TracingNotifier,
};
use crate::config::AtelierConfig;
use crate::drag::{DetachedHost, DragController, PointerHost};
use crate::error::AppError;
use crate::layout::LayoutModel;
use crate::models::CustomerContact;
use crate::ports::{
    AssetCatalog, LocalStore, Navigator, Notifier, OrderLookup, OrderSink, Rasterizer,
};
use crate::raster::{SvgRasterizer, Viewport};
use crate::relay::RetryingRelay;
use crate::snapshot::serialization::{restore, to_stored};
use crate::snapshot::{RestoreOutcome, StoredCustomization};

/// Everything the workbench reaches outside itself.
#[derive(Clone)]
pub struct Collaborators {
    pub store: Arc<dyn LocalStore>,
    pub rasterizer: Arc<dyn Rasterizer>,
    pub orders: Arc<dyn OrderSink>,
    pub lookup: Arc<dyn OrderLookup>,
    pub assets: Arc<dyn AssetCatalog>,
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
    pub pointer_host: Arc<dyn PointerHost>,
    /// Back-office relay; orders are not forwarded when absent.
    pub relay: Option<RetryingRelay>,
}

impl Default for Collaborators {
    /// In-process collaborators: nothing leaves the process.
    fn default() -> Self {
        let book = Arc::new(MemoryOrderBook::new());
        Self {
            store: Arc::new(MemoryStore::new()),
            rasterizer: Arc::new(SvgRasterizer),
            orders: book.clone(),
            lookup: book,
            assets: Arc::new(StaticAssets::default()),
            notifier: Arc::new(TracingNotifier),
            navigator: Arc::new(CountingNavigator::new()),
            pointer_host: Arc::new(DetachedHost),
            relay: None,
        }
    }
}

/// The personalization workbench.
pub struct Workbench {
    pub(crate) layout: RwLock<LayoutModel>,
    pub(crate) drag: Mutex<DragController>,
    pub(crate) contact: RwLock<CustomerContact>,
    pub(crate) contact_form_open: AtomicBool,
    pub(crate) submitting: AtomicBool,
    pub(crate) collaborators: Collaborators,
    pub(crate) config: AtelierConfig,
    pub(crate) viewport: Viewport,
    restore_outcome: RestoreOutcome,
}

impl Workbench {
    /// Build the workbench and restore the stored customization. Returns
    /// only once restore has finished, so no interaction can precede it.
    pub async fn mount(collaborators: Collaborators, config: AtelierConfig) -> Self {
        let (layout, restore_outcome) =
            restore(collaborators.store.as_ref(), &config.storage.key).await;
        tracing::info!(outcome = ?restore_outcome, saved = layout.is_saved(), "workbench mounted");
        Self {
            layout: RwLock::new(layout),
            drag: Mutex::new(DragController::new(Arc::clone(&collaborators.pointer_host))),
            contact: RwLock::new(CustomerContact::default()),
            contact_form_open: AtomicBool::new(false),
            submitting: AtomicBool::new(false),
            collaborators,
            config,
            viewport: Viewport::default(),
            restore_outcome,
        }
    }

    /// Size of the preview container used for capture and hit-testing.
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn config(&self) -> &AtelierConfig {
        &self.config
    }

    pub fn restore_outcome(&self) -> &RestoreOutcome {
        &self.restore_outcome
    }

    pub fn is_contact_form_open(&self) -> bool {
        self.contact_form_open.load(Ordering::SeqCst)
    }

    /// Whether an order submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    /// A copy of the current layout.
    pub fn layout(&self) -> Result<LayoutModel, AppError> {
        Ok(read_lock(&self.layout, "layout")?.clone())
    }

    /// The layout in its stored shape, with the live saved flag.
    pub fn summary(&self) -> Result<StoredCustomization, AppError> {
        let layout = read_lock(&self.layout, "layout")?;
        let mut summary = to_stored(&layout, layout.preview_image());
        summary.saved = layout.is_saved();
        Ok(summary)
    }
}

// ── Lock helpers ──────────────────────────────────────────────────────────────

pub(crate) fn read_lock<'a, T>(
    lock: &'a RwLock<T>,
    what: &str,
) -> Result<RwLockReadGuard<'a, T>, AppError> {
    lock.read()
        .map_err(|e| AppError::State(format!("{what} lock poisoned: {e}")))
}

pub(crate) fn write_lock<'a, T>(
    lock: &'a RwLock<T>,
    what: &str,
) -> Result<RwLockWriteGuard<'a, T>, AppError> {
    lock.write()
        .map_err(|e| AppError::State(format!("{what} lock poisoned: {e}")))
}

pub(crate) fn lock_mutex<'a, T>(
    lock: &'a Mutex<T>,
    what: &str,
) -> Result<MutexGuard<'a, T>, AppError> {
    lock.lock()
        .map_err(|e| AppError::State(format!("{what} lock poisoned: {e}")))
}

/// Holds a busy flag for its lifetime.
pub(crate) struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    /// `None` when the flag is already held.
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
