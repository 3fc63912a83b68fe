//! Customer-facing order tracking.

use serde::Serialize;

use crate::error::{AppError, ValidationError};
use crate::models::{OrderRecord, OrderStatus};
use crate::ports::OrderLookup;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineStep {
    pub title: &'static str,
    pub completed: bool,
}

/// What the tracking page shows for one order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingView {
    pub order_number: String,
    pub customer_name: String,
    pub status: OrderStatus,
    pub status_label: &'static str,
    pub total_price: u32,
    pub created_at: String,
    pub steps: Vec<TimelineStep>,
}

impl TrackingView {
    pub fn from_order(order: &OrderRecord) -> Self {
        Self {
            order_number: order.order_number.clone(),
            customer_name: order.customer_name.clone(),
            status: order.status,
            status_label: order.status.label(),
            total_price: order.total_price,
            created_at: order.created_at.clone(),
            steps: timeline(order.status),
        }
    }
}

/// Four-step progress: placed, processing, shipped, delivered.
///
/// Placement is always complete. A cancelled order completes nothing past it.
pub fn timeline(status: OrderStatus) -> Vec<TimelineStep> {
    let reached = match status {
        OrderStatus::Pending | OrderStatus::Cancelled => 0,
        OrderStatus::Processing => 1,
        OrderStatus::Shipped => 2,
        OrderStatus::Delivered => 3,
    };
    [
        "Commande passée",
        OrderStatus::Processing.label(),
        OrderStatus::Shipped.label(),
        OrderStatus::Delivered.label(),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, title)| TimelineStep {
        title,
        completed: i <= reached,
    })
    .collect()
}

/// Look up `order_number` as typed by the customer.
pub async fn track(lookup: &dyn OrderLookup, order_number: &str) -> Result<TrackingView, AppError> {
    let order_number = order_number.trim();
    if order_number.is_empty() {
        return Err(ValidationError::MissingOrderNumber.into());
    }
    let order = lookup
        .find_order(order_number)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;
    tracing::debug!(order_number, status = ?order.status, "order tracked");
    Ok(TrackingView::from_order(&order))
}
