//! Order submission.
//!
//! Only one submission runs at a time: a call made while another is in
//! flight returns [`SubmitOutcome::Ignored`] without reaching the order
//! collaborator. The busy flag is released on every exit path.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use serde::Serialize;

use crate::error::AppError;
use crate::models::OrderRecord;
use crate::ports::Notice;
use crate::state::{read_lock, write_lock, InFlight, Workbench};
use crate::submission::{build_order, validate_submission};

/// What the customer is told about an accepted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub order_number: String,
    pub total_price: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum SubmitOutcome {
    Submitted(OrderReceipt),
    /// Another submission was already in flight.
    Ignored,
}

impl Workbench {
    pub async fn submit(&self) -> Result<SubmitOutcome, AppError> {
        let Some(_in_flight) = InFlight::acquire(&self.submitting) else {
            tracing::debug!("submit ignored, another submission in flight");
            return Ok(SubmitOutcome::Ignored);
        };
        let notifier = &self.collaborators.notifier;

        let order = {
            let layout = read_lock(&self.layout, "layout")?;
            let contact = read_lock(&self.contact, "contact")?;
            let contact = match validate_submission(layout.is_saved(), &contact) {
                Ok(contact) => contact,
                Err(e) => {
                    notifier.notify(Notice::error(e.to_string()));
                    return Err(e.into());
                }
            };
            build_order(
                &layout,
                contact,
                self.config.pricing,
                self.collaborators.assets.as_ref(),
            )
        };

        notifier.notify(Notice::info("Recording your order..."));
        if let Err(e) = self.collaborators.orders.create_order(&order).await {
            tracing::error!(order_number = %order.order_number, error = %e, "order rejected");
            let message = match e.to_string() {
                m if m.trim().is_empty() => "Please try again".to_string(),
                m => m,
            };
            notifier.notify(Notice::error(format!("Error: {message}")));
            return Err(AppError::Submission(message));
        }
        tracing::info!(
            order_number = %order.order_number,
            total_price = order.total_price,
            "order submitted"
        );

        self.finish_submission(&order).await;
        notifier.notify(
            Notice::success(format!("Order {} recorded", order.order_number))
                .with_description(format!("Total: {} DH", order.total_price)),
        );
        self.spawn_follow_ups(order.clone());

        Ok(SubmitOutcome::Submitted(OrderReceipt {
            order_number: order.order_number,
            total_price: order.total_price,
        }))
    }

    /// The order is durable: drop the stored customization and reset the
    /// form so the same layout cannot be ordered twice by accident. Cleanup
    /// failures are logged only; the order stands either way.
    async fn finish_submission(&self, order: &OrderRecord) {
        let key = &self.config.storage.key;
        if let Err(e) = self.collaborators.store.remove(key).await {
            tracing::warn!(key = %key, order_number = %order.order_number, error = %e,
                "cannot remove stored customization after order");
        }
        self.contact_form_open.store(false, Ordering::SeqCst);
        match write_lock(&self.layout, "layout") {
            Ok(mut layout) => layout.clear_saved(),
            Err(e) => tracing::error!(order_number = %order.order_number, error = %e,
                "cannot clear saved flag after order"),
        }
    }

    /// Delayed confirmation notice and redirect, plus the back-office relay.
    /// Neither is awaited by the submission.
    fn spawn_follow_ups(&self, order: OrderRecord) {
        let notifier = Arc::clone(&self.collaborators.notifier);
        let navigator = Arc::clone(&self.collaborators.navigator);
        let delay = self.config.ui.redirect_delay();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            notifier.notify(Notice::info("Phone confirmation within 24h"));
            navigator.go_home();
        });

        if let Some(relay) = self.collaborators.relay.clone() {
            tokio::spawn(async move {
                relay.forward(&order).await;
            });
        }
    }
}
