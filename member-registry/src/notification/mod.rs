//! Transient user notifications
//!
//! Each notification is independent: it is shown immediately, dismissed by its
//! own timer, and never blocks or replaces another one. Hosts either poll
//! [`NotificationService::active`] or follow [`NotificationService::subscribe`].
//!
//! Lifetimes are per channel: the registration flow keeps messages for 5 s,
//! the contact flow for 3 s (see `RegistryConfig`).

use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::broadcast;

/// Event channel capacity
const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// Which page flow raised the notification; decides its lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationChannel {
    Registration,
    Contact,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
    pub channel: NotificationChannel,
    pub created_at: i64,
    #[serde(skip)]
    pub lifetime: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationEvent {
    Shown(Notification),
    Dismissed { id: u64 },
}

struct Inner {
    active: Mutex<Vec<Notification>>,
    next_id: AtomicU64,
    event_tx: broadcast::Sender<NotificationEvent>,
    registration_lifetime: Duration,
    contact_lifetime: Duration,
}

impl Inner {
    fn dismiss(&self, id: u64) -> bool {
        let removed = {
            let mut active = self.active.lock();
            let before = active.len();
            active.retain(|n| n.id != id);
            active.len() != before
        };
        if removed {
            tracing::debug!(notification_id = id, "Notification dismissed");
            let _ = self.event_tx.send(NotificationEvent::Dismissed { id });
        }
        removed
    }
}

/// Cheap to clone; clones share the same set of notifications
#[derive(Clone)]
pub struct NotificationService {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for NotificationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationService")
            .field("active", &self.inner.active.lock().len())
            .field("registration_lifetime", &self.inner.registration_lifetime)
            .field("contact_lifetime", &self.inner.contact_lifetime)
            .finish()
    }
}

impl NotificationService {
    pub fn new(registration_lifetime: Duration, contact_lifetime: Duration) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                active: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
                event_tx,
                registration_lifetime,
                contact_lifetime,
            }),
        }
    }

    pub fn from_config(config: &crate::core::RegistryConfig) -> Self {
        Self::new(config.registration_notice(), config.contact_notice())
    }

    /// Show a registration-flow notification
    pub fn notify(&self, message: impl Into<String>, kind: NotificationKind) -> u64 {
        self.notify_on(NotificationChannel::Registration, message, kind)
    }

    /// Show a notification on a given channel; returns its id.
    ///
    /// Dismissal is scheduled on the current tokio runtime. Without a runtime
    /// the notification stays until [`Self::dismiss`] is called.
    pub fn notify_on(
        &self,
        channel: NotificationChannel,
        message: impl Into<String>,
        kind: NotificationKind,
    ) -> u64 {
        let lifetime = match channel {
            NotificationChannel::Registration => self.inner.registration_lifetime,
            NotificationChannel::Contact => self.inner.contact_lifetime,
        };
        let notification = Notification {
            id: self.inner.next_id.fetch_add(1, Ordering::Relaxed),
            message: message.into(),
            kind,
            channel,
            created_at: shared::util::now_millis(),
            lifetime,
        };
        let id = notification.id;

        tracing::info!(
            notification_id = id,
            kind = ?kind,
            channel = ?channel,
            message = %notification.message,
            "Notification shown"
        );
        self.inner.active.lock().push(notification.clone());
        let _ = self.inner.event_tx.send(NotificationEvent::Shown(notification));

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let inner = Arc::clone(&self.inner);
                handle.spawn(async move {
                    tokio::time::sleep(lifetime).await;
                    inner.dismiss(id);
                });
            }
            Err(_) => {
                tracing::warn!(notification_id = id, "No runtime, notification will not auto-dismiss");
            }
        }

        id
    }

    /// Remove a notification early. Returns false if it was already gone.
    pub fn dismiss(&self, id: u64) -> bool {
        self.inner.dismiss(id)
    }

    /// Currently visible notifications, oldest first
    pub fn active(&self) -> Vec<Notification> {
        self.inner.active.lock().clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
        self.inner.event_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> NotificationService {
        NotificationService::new(Duration::from_secs(5), Duration::from_secs(3))
    }

    #[tokio::test(start_paused = true)]
    async fn test_notifications_coexist_and_expire_independently() {
        let notices = service();
        let registration = notices.notify("Registration successful!", NotificationKind::Success);
        let contact = notices.notify_on(
            NotificationChannel::Contact,
            "Thank you for your message!",
            NotificationKind::Success,
        );
        assert_eq!(notices.active().len(), 2);

        tokio::time::sleep(Duration::from_millis(3001)).await;
        let ids: Vec<u64> = notices.active().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![registration]);
        assert_ne!(registration, contact);

        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert!(notices.active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_events_are_broadcast() {
        let notices = service();
        let mut events = notices.subscribe();

        let id = notices.notify("File size must be less than 5MB", NotificationKind::Error);
        match events.recv().await.unwrap() {
            NotificationEvent::Shown(n) => {
                assert_eq!(n.id, id);
                assert_eq!(n.kind, NotificationKind::Error);
                assert_eq!(n.lifetime, Duration::from_secs(5));
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(
            events.recv().await.unwrap(),
            NotificationEvent::Dismissed { id }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_dismiss_beats_timer() {
        let notices = service();
        let id = notices.notify("bye", NotificationKind::Success);
        assert!(notices.dismiss(id));
        assert!(!notices.dismiss(id));

        // Timer firing later is a no-op
        tokio::time::sleep(Duration::from_secs(6)).await;
        assert!(notices.active().is_empty());
    }

    #[test]
    fn test_without_runtime_notification_stays() {
        let notices = service();
        let id = notices.notify("offline", NotificationKind::Success);
        assert_eq!(notices.active().len(), 1);
        assert!(notices.dismiss(id));
    }
}
