//! Saving the customization.
//!
//! 1. Check the overlay preconditions against the current layout.
//! 2. Capture the preview (best effort) from a copy taken at step 1.
//! 3. Write the full record in one store call.
//! 4. Mark the layout saved unless it changed during steps 2-3, then open
//!    the contact form.
//!
//! A failed write leaves the saved flag and the stored record untouched.

use std::sync::atomic::Ordering;

use crate::error::AppError;
use crate::ports::Notice;
use crate::raster::PreviewScene;
use crate::snapshot::serialization::{encode, rasterize_best_effort, validate_for_save};
use crate::state::{read_lock, write_lock, Workbench};

impl Workbench {
    pub async fn save(&self) -> Result<(), AppError> {
        let notifier = &self.collaborators.notifier;

        let (layout, scene) = {
            let layout = read_lock(&self.layout, "layout")?;
            if let Err(e) = validate_for_save(&layout) {
                notifier.notify(Notice::error(e.to_string()));
                return Err(e.into());
            }
            let scene =
                PreviewScene::compose(&layout, self.collaborators.assets.as_ref(), self.viewport);
            (layout.clone(), scene)
        };

        let preview = rasterize_best_effort(self.collaborators.rasterizer.as_ref(), &scene).await;
        let json = encode(&layout, &preview)?;

        let key = &self.config.storage.key;
        if let Err(e) = self.collaborators.store.set(key, &json).await {
            tracing::error!(key = %key, error = %e, "cannot write customization");
            let err = AppError::from(e);
            notifier.notify(Notice::error(format!("Error: {err}")));
            return Err(err);
        }

        let marked = write_lock(&self.layout, "layout")?.mark_saved(layout.revision(), preview);
        if !marked {
            tracing::debug!("layout changed while saving, saved flag left cleared");
        }
        self.contact_form_open.store(true, Ordering::SeqCst);
        tracing::info!(key = %key, bytes = json.len(), "customization saved");
        notifier.notify(
            Notice::success("Customization saved")
                .with_description("Fill in your contact details to order"),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::adapters::{MemoryStore, RecordingNotifier};
    use crate::config::AtelierConfig;
    use crate::error::AppError;
    use crate::models::OverlayKind;
    use crate::ports::{LocalStore, NoticeLevel, RasterError, Rasterizer, StoreError};
    use crate::raster::PreviewScene;
    use crate::state::{Collaborators, Workbench};

    const KEY: &str = "personalization-1";

    struct BrokenRasterizer;

    #[async_trait]
    impl Rasterizer for BrokenRasterizer {
        async fn capture(&self, _scene: &PreviewScene) -> Result<String, RasterError> {
            Err(RasterError::Capture("canvas tainted".into()))
        }
    }

    struct ReadOnlyStore;

    #[async_trait]
    impl LocalStore for ReadOnlyStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }
        async fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Write("quota exceeded".into()))
        }
        async fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Ok(())
        }
    }

    async fn bench(
        store: Arc<dyn LocalStore>,
        notifier: Arc<RecordingNotifier>,
    ) -> Workbench {
        let collaborators = Collaborators {
            store,
            notifier,
            ..Collaborators::default()
        };
        Workbench::mount(collaborators, AtelierConfig::default()).await
    }

    fn enable_name(bench: &Workbench, text: &str) {
        bench.set_element_enabled(OverlayKind::Name, true).unwrap();
        bench.set_element_text(OverlayKind::Name, text).unwrap();
    }

    #[tokio::test]
    async fn nothing_enabled_leaves_store_untouched() {
        let store = Arc::new(MemoryStore::with_entry(KEY, "sentinel"));
        let notifier = Arc::new(RecordingNotifier::new());
        let bench = bench(store.clone(), notifier.clone()).await;

        let err = bench.save().await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "Enable at least one customization"));
        assert_eq!(store.peek(KEY).as_deref(), Some("sentinel"));
        assert!(!bench.is_contact_form_open());
        let notice = notifier.last().expect("notice");
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.title, "Enable at least one customization");
    }

    #[tokio::test]
    async fn successful_save_marks_saved_and_opens_form() {
        let store = Arc::new(MemoryStore::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let bench = bench(store.clone(), notifier.clone()).await;
        enable_name(&bench, "ZIYECH");

        bench.save().await.expect("save");
        let layout = bench.layout().unwrap();
        assert!(layout.is_saved());
        assert!(layout.preview_image().starts_with("data:image/svg+xml;base64,"));
        assert!(bench.is_contact_form_open());

        let stored: serde_json::Value =
            serde_json::from_str(&store.peek(KEY).expect("written")).unwrap();
        assert_eq!(stored["name"]["text"], "ZIYECH");
        assert_eq!(stored["saved"], true);
        assert_eq!(notifier.last().unwrap().title, "Customization saved");
    }

    #[tokio::test]
    async fn capture_failure_saves_without_image() {
        let store = Arc::new(MemoryStore::new());
        let collaborators = Collaborators {
            store: store.clone(),
            rasterizer: Arc::new(BrokenRasterizer),
            ..Collaborators::default()
        };
        let bench = Workbench::mount(collaborators, AtelierConfig::default()).await;
        enable_name(&bench, "HAKIMI");

        bench.save().await.expect("save despite capture failure");
        assert!(bench.layout().unwrap().is_saved());
        let stored: serde_json::Value =
            serde_json::from_str(&store.peek(KEY).expect("written")).unwrap();
        assert_eq!(stored["previewImage"], "");
    }

    #[tokio::test]
    async fn write_failure_is_reported_and_not_saved() {
        let notifier = Arc::new(RecordingNotifier::new());
        let bench = bench(Arc::new(ReadOnlyStore), notifier.clone()).await;
        enable_name(&bench, "BOUNOU");

        let err = bench.save().await.unwrap_err();
        assert!(matches!(err, AppError::PersistenceWrite(_)));
        assert!(!bench.layout().unwrap().is_saved());
        assert!(!bench.is_contact_form_open());
        let notice = notifier.last().expect("notice");
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.title.contains("quota exceeded"));
    }

    #[tokio::test]
    async fn edit_after_save_invalidates() {
        let notifier = Arc::new(RecordingNotifier::new());
        let bench = bench(Arc::new(MemoryStore::new()), notifier).await;
        enable_name(&bench, "AMRABAT");
        bench.save().await.expect("save");
        bench.set_font(crate::models::Font::Lora).unwrap();
        assert!(!bench.layout().unwrap().is_saved());
    }
}
