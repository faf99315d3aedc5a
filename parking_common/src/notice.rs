//! Transient on-screen notifications.
//!
//! Every outcome the operator should see (backend success, backend/network failure,
//! locally rejected input) is turned into a `Notification` and handed to a
//! `Notifier`. Notifications are not errors: they never abort the page.
//!
//! `NotificationTray` is the in-memory notifier used by headless pages and tests:
//!
//! - `NotificationTray::notify(..)` — record a notification with its creation time.
//! - `NotificationTray::prune_expired()` — drop notifications older than the TTL
//!   (the auto-dismiss), returning what was dismissed.
//! - `NotificationTray::dismiss(index)` — the close button.
//!
//! Time is measured using `std::time::Instant`, so auto-dismiss is immune to wall
//! clock changes.
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::Serialize;
use strum_macros::{Display, EnumString};

/// Default lifetime of a notification before it is dismissed automatically.
pub const DEFAULT_TTL_MS: u64 = 5000;

/// Visual category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    /// A mutation went through.
    Success,
    /// Neutral information, e.g. an empty spot list.
    Info,
    /// Input rejected locally before any request was made.
    Warning,
    /// The backend or the network failed.
    Danger,
}

/// A message shown to the operator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }
}

/// Sink for notifications.
///
/// Takes `&self` so one notifier can be shared by the API wrappers and the
/// modal flows at the same time.
pub trait Notifier {
    /// Shows `notification` to the operator.
    fn notify(&self, notification: Notification);

    /// Shorthand for `notify(Notification::new(message, severity))`.
    fn show(&self, message: impl Into<String>, severity: Severity)
    where
        Self: Sized,
    {
        self.notify(Notification::new(message, severity));
    }
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification);
    }
}

struct Entry {
    notification: Notification,
    shown_at: Instant,
}

/// In-memory notifier with auto-dismiss.
pub struct NotificationTray {
    entries: Mutex<Vec<Entry>>,
    ttl: Duration,
}

impl NotificationTray {
    /// Creates an empty tray whose notifications live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            ttl,
        }
    }

    /// Notifications currently on screen, oldest first.
    pub fn active(&self) -> Vec<Notification> {
        self.lock()
            .iter()
            .map(|entry| entry.notification.clone())
            .collect()
    }

    /// The most recent notification, if any.
    pub fn last(&self) -> Option<Notification> {
        self.lock().last().map(|entry| entry.notification.clone())
    }

    /// Removes the notification at `index` (the close button).
    pub fn dismiss(&self, index: usize) -> Option<Notification> {
        let mut entries = self.lock();
        if index < entries.len() {
            Some(entries.remove(index).notification)
        } else {
            None
        }
    }

    /// Drops every notification older than the TTL and returns them.
    pub fn prune_expired(&self) -> Vec<Notification> {
        let now = Instant::now();
        let ttl = self.ttl;
        let mut expired = Vec::new();

        self.lock().retain(|entry| {
            if now.duration_since(entry.shown_at) >= ttl {
                expired.push(entry.notification.clone());
                false
            } else {
                true
            }
        });
        expired
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Entry>> {
        // A panic while holding the lock cannot leave the Vec half-updated.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for NotificationTray {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_TTL_MS))
    }
}

impl Notifier for NotificationTray {
    fn notify(&self, notification: Notification) {
        self.lock().push(Entry {
            notification,
            shown_at: Instant::now(),
        });
    }
}
