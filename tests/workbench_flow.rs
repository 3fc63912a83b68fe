//! End-to-end workbench flows over in-memory and on-disk collaborators.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use jerseylab_lib::adapters::{CountingNavigator, FileStore, MemoryOrderBook, RecordingNotifier};
use jerseylab_lib::commands::SubmitOutcome;
use jerseylab_lib::config::{self, AtelierConfig};
use jerseylab_lib::drag::{ContainerRect, CountingHost, PointerId, PointerInput, TouchPoint};
use jerseylab_lib::models::{CustomerContact, JerseyColor, OverlayKind, Position, Size};
use jerseylab_lib::snapshot::RestoreOutcome;
use jerseylab_lib::state::{Collaborators, Workbench};

const RECT: ContainerRect = ContainerRect {
    left: 100.0,
    top: 50.0,
    width: 400.0,
    height: 400.0,
};

fn temp_store_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "jerseylab_flow_{tag}_{}",
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn file_collaborators(dir: &Path) -> Collaborators {
    Collaborators {
        store: Arc::new(FileStore::new(dir)),
        ..Collaborators::default()
    }
}

/// Set ZIYECH / 7, drag the name to (60, 40), save, and read it back in a
/// fresh workbench over the same directory.
#[tokio::test]
async fn saved_layout_survives_remount() {
    let dir = temp_store_dir("roundtrip");
    let host = Arc::new(CountingHost::new());
    let collaborators = Collaborators {
        pointer_host: host.clone(),
        ..file_collaborators(&dir)
    };
    let bench = Workbench::mount(collaborators, AtelierConfig::default()).await;
    assert_eq!(*bench.restore_outcome(), RestoreOutcome::Empty);

    bench.set_jersey_color(JerseyColor::White).unwrap();
    bench.set_size(Size::L).unwrap();
    bench.set_element_enabled(OverlayKind::Name, true).unwrap();
    bench.set_element_text(OverlayKind::Name, "ZIYECH").unwrap();
    bench.set_element_enabled(OverlayKind::Number, true).unwrap();
    bench.set_element_text(OverlayKind::Number, "7").unwrap();

    assert!(bench.press(OverlayKind::Name, PointerId::Mouse).unwrap());
    // 60% / 40% of a 400px container offset by (100, 50).
    let moved = bench
        .pointer_move(&PointerInput::Mouse { x: 340.0, y: 210.0 }, RECT)
        .unwrap();
    assert_eq!(moved, Some(Position::new(60.0, 40.0)));
    bench.release(PointerId::Mouse).unwrap();
    assert_eq!(host.active(), 0);

    bench.save().await.expect("save");
    let before = bench.layout().unwrap();

    let again = Workbench::mount(file_collaborators(&dir), AtelierConfig::default()).await;
    assert_eq!(*again.restore_outcome(), RestoreOutcome::Restored);
    let after = again.layout().unwrap();
    assert!(after.is_saved());
    assert_eq!(after.jersey(), before.jersey());
    for kind in OverlayKind::ALL {
        assert_eq!(after.element(kind), before.element(kind), "{kind:?}");
    }
    assert_eq!(after.element(OverlayKind::Name).position, Position::new(60.0, 40.0));
    assert_eq!(after.preview_image(), before.preview_image());

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn corrupt_store_file_fails_open() {
    let dir = temp_store_dir("corrupt");
    std::fs::create_dir_all(&dir).unwrap();
    let store = FileStore::new(dir.clone());
    std::fs::write(store.path_for("personalization-1"), "{ not json").unwrap();

    let bench = Workbench::mount(file_collaborators(&dir), AtelierConfig::default()).await;
    assert!(matches!(bench.restore_outcome(), RestoreOutcome::Discarded(_)));
    assert!(!bench.layout().unwrap().is_saved());

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn full_order_flow_with_configured_pricing() {
    let dir = temp_store_dir("order");
    let config = config::parse(
        r#"
        [pricing]
        base_price = 300
        slogan_surcharge = 60

        [ui]
        redirect_delay_ms = 5
        "#,
    )
    .expect("config");

    let book = Arc::new(MemoryOrderBook::with_latency(Duration::from_millis(30)));
    let notifier = Arc::new(RecordingNotifier::new());
    let navigator = Arc::new(CountingNavigator::new());
    let collaborators = Collaborators {
        orders: book.clone(),
        lookup: book.clone(),
        notifier: notifier.clone(),
        navigator: navigator.clone(),
        ..file_collaborators(&dir)
    };
    let bench = Workbench::mount(collaborators, config).await;

    bench.set_element_enabled(OverlayKind::Slogan, true).unwrap();
    bench.set_element_text(OverlayKind::Slogan, "Dima Atlas").unwrap();
    bench.save().await.expect("save");
    assert!(bench.is_contact_form_open());
    bench
        .set_contact(CustomerContact {
            name: "Nour".into(),
            phone: "07 12 34 56 78".into(),
            city: "Fès".into(),
            address: "Rue 1".into(),
        })
        .unwrap();

    let (a, b) = tokio::join!(bench.submit(), bench.submit());
    let submitted: Vec<_> = [a.unwrap(), b.unwrap()]
        .into_iter()
        .filter_map(|o| match o {
            SubmitOutcome::Submitted(receipt) => Some(receipt),
            SubmitOutcome::Ignored => None,
        })
        .collect();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].total_price, 360);
    assert_eq!(book.create_calls(), 1);
    assert!(!FileStore::new(dir.clone()).path_for("personalization-1").exists());

    // The same layout cannot be ordered again without a new save.
    assert!(bench.submit().await.is_err());
    assert_eq!(book.create_calls(), 1);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(navigator.home_visits(), 1);

    let view = bench.track_order(&submitted[0].order_number).await.expect("track");
    assert_eq!(view.total_price, 360);

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn touch_drag_ignores_other_fingers_and_detaches() {
    let host = Arc::new(CountingHost::new());
    let collaborators = Collaborators {
        pointer_host: host.clone(),
        ..Collaborators::default()
    };
    let bench = Workbench::mount(collaborators, AtelierConfig::default()).await;

    assert!(bench.press(OverlayKind::Slogan, PointerId::Touch(1)).unwrap());
    assert!(!bench.press(OverlayKind::Name, PointerId::Mouse).unwrap());
    assert_eq!(host.active(), 1);

    let foreign = PointerInput::Touch(vec![TouchPoint {
        id: 2,
        x: 300.0,
        y: 250.0,
    }]);
    assert_eq!(bench.pointer_move(&foreign, RECT).unwrap(), None);

    let both = PointerInput::Touch(vec![
        TouchPoint {
            id: 2,
            x: 500.0,
            y: 450.0,
        },
        TouchPoint {
            id: 1,
            x: 300.0,
            y: 250.0,
        },
    ]);
    assert_eq!(
        bench.pointer_move(&both, RECT).unwrap(),
        Some(Position::new(50.0, 50.0))
    );

    bench.release(PointerId::Touch(2)).unwrap();
    assert_eq!(bench.active_drag().unwrap(), Some(OverlayKind::Slogan));
    bench.release(PointerId::Touch(1)).unwrap();
    assert_eq!(bench.active_drag().unwrap(), None);
    assert_eq!(host.active(), 0);
    assert_eq!(host.attached_total(), 1);
}
