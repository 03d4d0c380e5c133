//! Transient notification line.
//!
//! [`Notifier`] holds at most one message. Each message expires after a fixed
//! time to live; posting a new message aborts the expiry timer of the previous
//! one, so a fresh message always gets its full time on screen. The current
//! message is published on a `tokio::sync::watch` channel, which lets the
//! binder redraw when a message appears or expires.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Owner of the notification message and its expiry timer.
///
/// [`Notifier::notify`] spawns onto the current tokio runtime and must be
/// called from within one.
#[derive(Debug)]
pub struct Notifier {
    ttl: Duration,
    message: Arc<watch::Sender<Option<String>>>,
    generation: Arc<AtomicU64>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl Notifier {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        let (message, _) = watch::channel(None);
        Self {
            ttl,
            message: Arc::new(message),
            generation: Arc::new(AtomicU64::new(0)),
            timer: Mutex::new(None),
        }
    }

    /// Shows `message`, replacing any current one and cancelling its timer.
    pub fn notify(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(message = %message, ttl_ms = self.ttl.as_millis(), "notification posted");

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.message.send_replace(Some(message));

        let sender = Arc::clone(&self.message);
        let current = Arc::clone(&self.generation);
        let ttl = self.ttl;
        let expiry = tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            sender.send_if_modified(|slot| {
                if current.load(Ordering::SeqCst) == generation && slot.is_some() {
                    *slot = None;
                    true
                } else {
                    false
                }
            });
        });

        let mut timer = self.timer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = timer.replace(expiry) {
            previous.abort();
        }
    }

    /// Removes the current message immediately.
    pub fn dismiss(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(previous) = self.timer.lock().unwrap_or_else(PoisonError::into_inner).take() {
            previous.abort();
        }
        self.message.send_replace(None);
    }

    /// The message currently shown, if any.
    #[must_use]
    pub fn current(&self) -> Option<String> {
        self.message.borrow().clone()
    }

    /// A receiver that observes every change of the current message.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.message.subscribe()
    }
}

impl Drop for Notifier {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.get_mut().unwrap_or_else(PoisonError::into_inner).take() {
            timer.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_millis(2500);

    #[tokio::test(start_paused = true)]
    async fn message_expires_after_ttl() {
        let notifier = Notifier::new(TTL);
        notifier.notify("Filters cleared");
        assert_eq!(notifier.current().as_deref(), Some("Filters cleared"));

        tokio::time::sleep(TTL - Duration::from_millis(1)).await;
        assert!(notifier.current().is_some());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(notifier.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn new_message_restarts_the_timer() {
        let notifier = Notifier::new(TTL);
        notifier.notify("first");
        tokio::time::sleep(Duration::from_millis(2000)).await;

        notifier.notify("second");
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(notifier.current().as_deref(), Some("second"));

        tokio::time::sleep(Duration::from_millis(1600)).await;
        assert_eq!(notifier.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_see_expiry() {
        let notifier = Notifier::new(TTL);
        let mut rx = notifier.subscribe();

        notifier.notify("hello");
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().as_deref(), Some("hello"));

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_clears_immediately() {
        let notifier = Notifier::new(TTL);
        notifier.notify("bye");
        notifier.dismiss();
        assert_eq!(notifier.current(), None);
    }
}
