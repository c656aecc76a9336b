use crate::domain::model::{Notification, Severity};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_millis(3000);

/// Single-slot holder for the outcome of the last cart operation.
///
/// A new notification replaces the current one and re-arms the expiry. The
/// previous timer is aborted, and an expiry only clears the slot while the
/// slot still holds the notification it was armed for.
///
/// `notify` spawns the expiry on the ambient tokio runtime.
pub struct NotificationController {
    ttl: Duration,
    slot: Arc<watch::Sender<Option<Notification>>>,
    next_id: u64,
    pending_expiry: Option<JoinHandle<()>>,
}

impl NotificationController {
    pub fn new(ttl: Duration) -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            ttl,
            slot: Arc::new(slot),
            next_id: 0,
            pending_expiry: None,
        }
    }

    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) -> Notification {
        if let Some(previous) = self.pending_expiry.take() {
            previous.abort();
        }

        self.next_id = self.next_id.wrapping_add(1);
        let notification = Notification {
            id: self.next_id,
            message: message.into(),
            severity,
            created_at: Utc::now(),
        };
        tracing::debug!(
            "Notification #{} [{}] {} at {}",
            notification.id,
            notification.severity,
            notification.message,
            notification.created_at.to_rfc3339()
        );
        self.slot.send_replace(Some(notification.clone()));

        let slot = Arc::clone(&self.slot);
        let token = notification.id;
        let ttl = self.ttl;
        self.pending_expiry = Some(tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            slot.send_if_modified(|current| match current {
                Some(active) if active.id == token => {
                    *current = None;
                    true
                }
                _ => false,
            });
        }));

        notification
    }

    pub fn current(&self) -> Option<Notification> {
        self.slot.borrow().clone()
    }

    pub fn is_active(&self) -> bool {
        self.slot.borrow().is_some()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Notification>> {
        self.slot.subscribe()
    }
}

impl Default for NotificationController {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_TTL)
    }
}

impl Drop for NotificationController {
    fn drop(&mut self) {
        if let Some(pending) = self.pending_expiry.take() {
            pending.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_notification_expires_after_ttl() {
        let mut controller = NotificationController::default();
        controller.notify("Add to cart successfully", Severity::Success);
        assert!(controller.is_active());

        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert!(controller.is_active());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(!controller.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_replacement_restarts_expiry() {
        let mut controller = NotificationController::default();
        controller.notify("Add to cart successfully", Severity::Success);

        tokio::time::sleep(Duration::from_millis(2000)).await;
        controller.notify("Quantity exceeds available stock", Severity::Danger);

        // The first timer would have fired here.
        tokio::time::sleep(Duration::from_millis(1500)).await;
        let current = controller.current().unwrap();
        assert_eq!(current.message, "Quantity exceeds available stock");
        assert_eq!(current.severity, Severity::Danger);

        tokio::time::sleep(Duration::from_millis(1600)).await;
        assert_eq!(controller.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ids_are_monotonic() {
        let mut controller = NotificationController::new(Duration::from_millis(10));
        let first = controller.notify("a", Severity::Success);
        let second = controller.notify("b", Severity::Warning);
        assert!(second.id > first.id);
    }

    #[tokio::test(start_paused = true)]
    async fn test_notification_records_creation_time() {
        let mut controller = NotificationController::default();
        let before = Utc::now();
        let first = controller.notify("Add to cart successfully", Severity::Success);
        let second = controller.notify("Update successfully", Severity::Warning);
        let after = Utc::now();

        assert!(before <= first.created_at && first.created_at <= second.created_at);
        assert!(second.created_at <= after);
        assert_eq!(controller.current().unwrap().created_at, second.created_at);
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_observe_expiry() {
        let mut controller = NotificationController::new(Duration::from_millis(100));
        let mut rx = controller.subscribe();

        controller.notify("Delete successfully", Severity::Danger);
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_some());

        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_none());
    }
}
