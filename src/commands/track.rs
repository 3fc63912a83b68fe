//! Order tracking from the workbench.

use crate::error::AppError;
use crate::ports::Notice;
use crate::state::Workbench;
use crate::tracking::{track, TrackingView};

impl Workbench {
    /// Look up an order as typed by the customer. Failures are also shown
    /// as an error notice.
    pub async fn track_order(&self, order_number: &str) -> Result<TrackingView, AppError> {
        let result = track(self.collaborators.lookup.as_ref(), order_number).await;
        if let Err(e) = &result {
            self.collaborators.notifier.notify(Notice::error(e.to_string()));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::adapters::{MemoryOrderBook, RecordingNotifier};
    use crate::commands::SubmitOutcome;
    use crate::config::AtelierConfig;
    use crate::error::AppError;
    use crate::models::{CustomerContact, OrderStatus, OverlayKind};
    use crate::state::{Collaborators, Workbench};

    #[tokio::test]
    async fn submitted_order_can_be_tracked() {
        let book = Arc::new(MemoryOrderBook::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let collaborators = Collaborators {
            orders: book.clone(),
            lookup: book.clone(),
            notifier: notifier.clone(),
            ..Collaborators::default()
        };
        let bench = Workbench::mount(collaborators, AtelierConfig::default()).await;
        bench.set_element_enabled(OverlayKind::Slogan, true).unwrap();
        bench.set_element_text(OverlayKind::Slogan, "Dima Maghrib").unwrap();
        bench.save().await.unwrap();
        bench
            .set_contact(CustomerContact {
                name: "Sara".into(),
                phone: "0512345678".into(),
                ..CustomerContact::default()
            })
            .unwrap();
        let SubmitOutcome::Submitted(receipt) = bench.submit().await.unwrap() else {
            panic!("expected a submitted order");
        };

        let view = bench.track_order(&receipt.order_number).await.expect("tracked");
        assert_eq!(view.status, OrderStatus::Pending);
        assert_eq!(view.status_label, "En attente de confirmation");
        assert_eq!(view.total_price, 299);

        book.set_status(&receipt.order_number, OrderStatus::Delivered);
        let view = bench.track_order(&receipt.order_number).await.expect("tracked");
        assert!(view.steps.iter().all(|s| s.completed));
    }

    #[tokio::test]
    async fn unknown_order_notifies() {
        let notifier = Arc::new(RecordingNotifier::new());
        let collaborators = Collaborators {
            notifier: notifier.clone(),
            ..Collaborators::default()
        };
        let bench = Workbench::mount(collaborators, AtelierConfig::default()).await;
        let err = bench.track_order("CMD-1-000").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(notifier.last().unwrap().title, "Order not found");
    }
}
