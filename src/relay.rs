//! Forwarding of accepted orders to the back-office spreadsheet.
//!
//! The push happens after the order is durable and never reaches the
//! customer: failures are retried, then recorded through a [`FailureLog`]
//! for manual replay.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::RelayConfig;
use crate::models::OrderRecord;

/// Relay or failure-log collaborator error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelayError {
    #[error("relay returned status {0}")]
    Status(u16),
    #[error("relay rejected payload: {0}")]
    Rejected(String),
    #[error("relay unreachable: {0}")]
    Transport(String),
}

/// Body posted to the spreadsheet script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetPayload {
    #[serde(rename = "__secret")]
    pub secret: String,
    pub order_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_city: String,
    pub customer_address: String,
    pub total_price: u32,
    /// Line items; the workbench sells one personalized jersey per order.
    pub items: Vec<SheetItem>,
    pub notes: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetItem {
    pub product_name: String,
    pub size: String,
    pub quantity: u32,
    pub unit_price: u32,
}

impl SheetPayload {
    pub fn from_order(order: &OrderRecord, secret: &str) -> Self {
        Self {
            secret: secret.to_string(),
            order_number: order.order_number.clone(),
            customer_name: order.customer_name.clone(),
            customer_phone: order.customer_phone.clone(),
            customer_city: order.customer_city.clone(),
            customer_address: order.customer_address.clone(),
            total_price: order.total_price,
            items: vec![SheetItem {
                product_name: order.product_name.clone(),
                size: order.product_size.as_str().to_string(),
                quantity: 1,
                unit_price: order.total_price,
            }],
            notes: order.notes.clone(),
            created_at: order.created_at.clone(),
        }
    }
}

/// A relay push that exhausted its retries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedSync {
    pub order_number: String,
    pub payload: SheetPayload,
    pub error: String,
    pub created_at: String,
}

/// Spreadsheet endpoint.
#[async_trait]
pub trait SheetRelay: Send + Sync {
    async fn push(&self, payload: &SheetPayload) -> Result<(), RelayError>;
}

/// Where exhausted pushes are recorded.
#[async_trait]
pub trait FailureLog: Send + Sync {
    async fn record(&self, failure: FailedSync) -> Result<(), RelayError>;
}

/// Pushes with a fixed retry budget, then logs the failure.
#[derive(Clone)]
pub struct RetryingRelay {
    relay: Arc<dyn SheetRelay>,
    failures: Arc<dyn FailureLog>,
    secret: String,
    retries: u32,
    delay: Duration,
}

impl RetryingRelay {
    pub fn new(
        relay: Arc<dyn SheetRelay>,
        failures: Arc<dyn FailureLog>,
        config: &RelayConfig,
    ) -> Self {
        Self {
            relay,
            failures,
            secret: config.secret.clone(),
            retries: config.retries,
            delay: config.retry_delay(),
        }
    }

    /// Push `order`, retrying up to the configured count. Returns whether a
    /// push eventually succeeded.
    pub async fn forward(&self, order: &OrderRecord) -> bool {
        let payload = SheetPayload::from_order(order, &self.secret);
        let mut retries_left = self.retries;
        loop {
            match self.relay.push(&payload).await {
                Ok(()) => {
                    tracing::info!(order_number = %payload.order_number, "order relayed to sheet");
                    return true;
                }
                Err(e) if retries_left > 0 => {
                    tracing::warn!(
                        order_number = %payload.order_number,
                        retries_left,
                        error = %e,
                        "sheet relay failed, retrying"
                    );
                    retries_left -= 1;
                    tokio::time::sleep(self.delay).await;
                }
                Err(e) => {
                    self.give_up(payload, e).await;
                    return false;
                }
            }
        }
    }

    async fn give_up(&self, payload: SheetPayload, error: RelayError) {
        tracing::error!(order_number = %payload.order_number, error = %error, "sheet relay gave up");
        let failure = FailedSync {
            order_number: payload.order_number.clone(),
            payload,
            error: error.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        if let Err(e) = self.failures.record(failure).await {
            tracing::error!(error = %e, "cannot record failed sheet sync");
        }
    }
}
