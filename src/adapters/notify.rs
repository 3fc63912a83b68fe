//! [`Notifier`] and [`Navigator`] implementations.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::ports::{Navigator, Notice, NoticeLevel, Notifier};

/// Writes every notice to the tracing log. Used when no UI is attached.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        let description = notice.description.as_deref().unwrap_or("");
        match notice.level {
            NoticeLevel::Error => tracing::warn!(title = %notice.title, %description, "notice"),
            NoticeLevel::Info | NoticeLevel::Success => {
                tracing::info!(title = %notice.title, %description, "notice")
            }
        }
    }
}

/// Keeps notices in memory so a shell (or a test) can drain them.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().map(|n| n.clone()).unwrap_or_default()
    }

    pub fn take(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|mut n| std::mem::take(&mut *n))
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.lock().ok()?.last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice);
        }
    }
}

/// Counts redirects instead of navigating.
#[derive(Debug, Default)]
pub struct CountingNavigator {
    home_visits: AtomicUsize,
}

impl CountingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn home_visits(&self) -> usize {
        self.home_visits.load(Ordering::SeqCst)
    }
}

impl Navigator for CountingNavigator {
    fn go_home(&self) {
        tracing::debug!("redirecting to landing page");
        self.home_visits.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_notifier_keeps_order_and_drains() {
        let n = RecordingNotifier::new();
        n.notify(Notice::error("first"));
        n.notify(Notice::success("second").with_description("details"));
        assert_eq!(n.last().unwrap().title, "second");
        let drained = n.take();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].level, NoticeLevel::Error);
        assert!(n.notices().is_empty());
    }

    #[test]
    fn counting_navigator_counts() {
        let nav = CountingNavigator::new();
        nav.go_home();
        nav.go_home();
        assert_eq!(nav.home_visits(), 2);
    }
}
