//! In-memory spreadsheet relay and failure log.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::relay::{FailedSync, FailureLog, RelayError, SheetPayload, SheetRelay};

/// Accepts every push after an optional number of injected failures.
#[derive(Debug, Default)]
pub struct MemorySheet {
    received: Mutex<Vec<SheetPayload>>,
    attempts: AtomicU32,
    failures_left: AtomicU32,
}

impl MemorySheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first `n` pushes fail with a 503.
    pub fn failing_first(n: u32) -> Self {
        Self {
            failures_left: AtomicU32::new(n),
            ..Self::default()
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn received(&self) -> Vec<SheetPayload> {
        self.received.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SheetRelay for MemorySheet {
    async fn push(&self, payload: &SheetPayload) -> Result<(), RelayError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let failing = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(RelayError::Status(503));
        }
        self.received
            .lock()
            .map_err(|e| RelayError::Transport(format!("sheet lock poisoned: {e}")))?
            .push(payload.clone());
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryFailureLog {
    failures: Mutex<Vec<FailedSync>>,
}

impl MemoryFailureLog {
    pub fn failures(&self) -> Vec<FailedSync> {
        self.failures.lock().map(|f| f.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl FailureLog for MemoryFailureLog {
    async fn record(&self, failure: FailedSync) -> Result<(), RelayError> {
        self.failures
            .lock()
            .map_err(|e| RelayError::Transport(format!("failure log lock poisoned: {e}")))?
            .push(failure);
        Ok(())
    }
}
