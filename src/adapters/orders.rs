//! In-process order book implementing both [`OrderSink`] and [`OrderLookup`].
//!
//! Behaves like the hosted `orders` table closely enough for embedding and
//! tests: order numbers are unique, inserts can be delayed to simulate
//! network latency, and a failure can be armed for the next inserts.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::models::{OrderRecord, OrderStatus};
use crate::ports::{OrderLookup, OrderSink, SinkError};

#[derive(Debug, Default)]
pub struct MemoryOrderBook {
    orders: Mutex<Vec<OrderRecord>>,
    create_calls: AtomicUsize,
    latency: Option<Duration>,
    failure: Mutex<Option<String>>,
}

impl MemoryOrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every insert sleeps for `latency` before completing.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }

    /// Fail every insert with `message` until [`Self::disarm`] is called.
    pub fn fail_with(&self, message: impl Into<String>) {
        if let Ok(mut failure) = self.failure.lock() {
            *failure = Some(message.into());
        }
    }

    pub fn disarm(&self) {
        if let Ok(mut failure) = self.failure.lock() {
            *failure = None;
        }
    }

    /// Number of `create_order` calls received, successful or not.
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn orders(&self) -> Vec<OrderRecord> {
        self.orders.lock().map(|o| o.clone()).unwrap_or_default()
    }

    /// Move an order along its lifecycle (what the admin dashboard does).
    pub fn set_status(&self, order_number: &str, status: OrderStatus) -> bool {
        let Ok(mut orders) = self.orders.lock() else {
            return false;
        };
        match orders.iter_mut().find(|o| o.order_number == order_number) {
            Some(order) => {
                order.status = status;
                true
            }
            None => false,
        }
    }

    /// Insert an order directly, bypassing latency and failure injection.
    pub fn seed(&self, order: OrderRecord) {
        if let Ok(mut orders) = self.orders.lock() {
            orders.push(order);
        }
    }
}

#[async_trait]
impl OrderSink for MemoryOrderBook {
    async fn create_order(&self, order: &OrderRecord) -> Result<(), SinkError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let armed = self
            .failure
            .lock()
            .map_err(|e| SinkError::Unavailable(format!("order book lock poisoned: {e}")))?
            .clone();
        if let Some(message) = armed {
            return Err(SinkError::Unavailable(message));
        }

        let mut orders = self
            .orders
            .lock()
            .map_err(|e| SinkError::Unavailable(format!("order book lock poisoned: {e}")))?;
        if orders.iter().any(|o| o.order_number == order.order_number) {
            return Err(SinkError::Rejected(format!(
                "duplicate order number {}",
                order.order_number
            )));
        }
        orders.push(order.clone());
        Ok(())
    }
}

#[async_trait]
impl OrderLookup for MemoryOrderBook {
    async fn find_order(&self, order_number: &str) -> Result<Option<OrderRecord>, SinkError> {
        let orders = self
            .orders
            .lock()
            .map_err(|e| SinkError::Unavailable(format!("order book lock poisoned: {e}")))?;
        Ok(orders.iter().find(|o| o.order_number == order_number).cloned())
    }
}
