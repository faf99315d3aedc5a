//! Terminal rendering of notifications.
use std::time::Duration;

use log::{debug, error, info, warn};
use parking_common::notice::NotificationTray;
use parking_common::{Notification, Notifier, Severity};

/// Prints notifications to stdout and mirrors them into the log.
///
/// Printed notifications are kept in a tray until their lifetime runs out.
pub struct ConsoleNotifier {
    tray: NotificationTray,
}

impl ConsoleNotifier {
    pub fn new(ttl: Duration) -> Self {
        Self {
            tray: NotificationTray::new(ttl),
        }
    }

    /// Notifications printed within the last `ttl`.
    pub fn active(&self) -> Vec<Notification> {
        self.tray.prune_expired();
        self.tray.active()
    }

    fn render(notification: &Notification) -> String {
        format!("[{}] {}", notification.severity, notification.message)
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        for dismissed in self.tray.prune_expired() {
            debug!("Dismissed: {}", dismissed.message);
        }
        match notification.severity {
            Severity::Success | Severity::Info => info!("{}", notification.message),
            Severity::Warning => warn!("{}", notification.message),
            Severity::Danger => error!("{}", notification.message),
        }
        println!("{}", Self::render(&notification));
        self.tray.notify(notification);
    }
}
