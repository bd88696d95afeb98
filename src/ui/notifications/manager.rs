// SPDX-License-Identifier: MPL-2.0
//! Notification queue and expiry.

use super::notification::{Notification, NotificationId};
use std::collections::VecDeque;
use std::time::Instant;

/// Maximum number of toasts on screen.
const MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone)]
pub enum Message {
    Dismiss(NotificationId),
    Tick,
}

#[derive(Debug, Default)]
pub struct Manager {
    visible: VecDeque<Notification>,
    queue: VecDeque<Notification>,
}

impl Manager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `notification`, or queues it when the screen is full.
    ///
    /// A notification whose key and arguments equal one already shown or
    /// queued is dropped, so a failing reload does not stack duplicates.
    pub fn push(&mut self, notification: Notification) {
        let duplicate = self.visible.iter().chain(self.queue.iter()).any(|other| {
            other.message_key() == notification.message_key()
                && other.message_args() == notification.message_args()
        });
        if duplicate {
            return;
        }

        if self.visible.len() < MAX_VISIBLE {
            self.visible.push_front(notification);
        } else {
            self.queue.push_back(notification);
        }
    }

    /// Returns `true` if the notification was found.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        if let Some(pos) = self.visible.iter().position(|n| n.id() == id) {
            self.visible.remove(pos);
            self.promote_from_queue();
            return true;
        }
        if let Some(pos) = self.queue.iter().position(|n| n.id() == id) {
            self.queue.remove(pos);
            return true;
        }
        false
    }

    /// Drops expired toasts. Called from the periodic tick subscription.
    pub fn tick(&mut self, now: Instant) {
        let before = self.visible.len();
        self.visible.retain(|n| !n.is_expired(now));
        if self.visible.len() < before {
            self.promote_from_queue();
        }
    }

    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::Dismiss(id) => {
                self.dismiss(*id);
            }
            Message::Tick => self.tick(Instant::now()),
        }
    }

    /// Removes every notification whose key starts with `prefix`.
    ///
    /// Used after a successful reload to clear stale catalog errors.
    pub fn clear_prefixed(&mut self, prefix: &str) {
        let before = self.visible.len();
        self.visible.retain(|n| !n.message_key().starts_with(prefix));
        self.queue.retain(|n| !n.message_key().starts_with(prefix));
        if self.visible.len() < before {
            self.promote_from_queue();
        }
    }

    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.visible.iter()
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    /// Whether the tick subscription is needed.
    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.visible.is_empty() || !self.queue.is_empty()
    }

    fn promote_from_queue(&mut self) {
        while self.visible.len() < MAX_VISIBLE {
            match self.queue.pop_front() {
                Some(notification) => self.visible.push_back(notification),
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn new_manager_is_empty() {
        let manager = Manager::new();
        assert_eq!(manager.visible_count(), 0);
        assert!(!manager.has_notifications());
    }

    #[test]
    fn overflow_is_queued_then_promoted() {
        let mut manager = Manager::new();
        let first = Notification::error("first");
        let first_id = first.id();
        manager.push(first);
        for i in 0..MAX_VISIBLE {
            manager.push(Notification::error(format!("more-{i}")));
        }
        assert_eq!(manager.visible_count(), MAX_VISIBLE);
        assert_eq!(manager.queued_count(), 1);

        assert!(manager.dismiss(first_id));
        assert_eq!(manager.visible_count(), MAX_VISIBLE);
        assert_eq!(manager.queued_count(), 0);
    }

    #[test]
    fn duplicates_are_dropped() {
        let mut manager = Manager::new();
        manager.push(Notification::error("notification-catalog-network"));
        manager.push(Notification::error("notification-catalog-network"));
        assert_eq!(manager.visible_count(), 1);

        manager.push(Notification::error("notification-catalog-network").with_arg("a", "b"));
        assert_eq!(manager.visible_count(), 2);
    }

    #[test]
    fn dismissing_unknown_id_returns_false() {
        let mut manager = Manager::new();
        let stray = Notification::info("stray").id();
        assert!(!manager.dismiss(stray));
    }

    #[test]
    fn tick_expires_infos_but_keeps_errors() {
        let mut manager = Manager::new();
        manager.push(Notification::info("loaded"));
        manager.push(Notification::error("failed"));

        manager.tick(Instant::now() + Duration::from_secs(10));

        let keys: Vec<_> = manager.visible().map(Notification::message_key).collect();
        assert_eq!(keys, vec!["failed"]);
    }

    #[test]
    fn clear_prefixed_only_touches_matching_keys() {
        let mut manager = Manager::new();
        manager.push(Notification::error("notification-catalog-network"));
        manager.push(Notification::error("notification-catalog-malformed"));
        manager.push(Notification::error("notification-engine-error"));
        manager.push(Notification::warning("notification-config-load-error"));

        manager.clear_prefixed("notification-catalog-");

        let mut keys: Vec<_> = manager.visible().map(Notification::message_key).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["notification-config-load-error", "notification-engine-error"]
        );
        assert_eq!(manager.queued_count(), 0);
    }
}
