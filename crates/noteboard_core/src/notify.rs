//! Ephemeral notification queue.
//!
//! # Responsibility
//! - Hold short-lived messages in insertion order.
//! - Expire each message independently after its own deadline.
//! - Hand out a message's single action payload at most once.
//!
//! # Invariants
//! - A message and its deadline are removed together, whether by expiry,
//!   dismissal or action invocation.
//! - `invoke_action` never yields a payload for an expired or removed
//!   message.

use crate::clock::Clock;
use crate::model::entry::Timestamp;
use serde::Serialize;

/// Lifetime of a message when no explicit TTL is configured.
pub const DEFAULT_NOTIFICATION_TTL_MS: i64 = 4_000;

pub type NotificationId = u64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationVariant {
    #[default]
    Default,
    Success,
    Warning,
    Destructive,
}

/// Labelled action attached to a message. `A` is what the caller gets back
/// when the action is invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationAction<A> {
    pub label: String,
    pub payload: A,
}

impl<A> NotificationAction<A> {
    pub fn new(label: impl Into<String>, payload: A) -> Self {
        Self {
            label: label.into(),
            payload,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification<A> {
    pub id: NotificationId,
    pub message: String,
    pub variant: NotificationVariant,
    pub action: Option<NotificationAction<A>>,
    expires_at: Timestamp,
}

impl<A> Notification<A> {
    pub fn expires_at(&self) -> Timestamp {
        self.expires_at
    }

    pub fn action_label(&self) -> Option<&str> {
        self.action.as_ref().map(|action| action.label.as_str())
    }

    fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowOptions<A> {
    pub variant: NotificationVariant,
    pub action: Option<NotificationAction<A>>,
}

impl<A> Default for ShowOptions<A> {
    fn default() -> Self {
        Self {
            variant: NotificationVariant::Default,
            action: None,
        }
    }
}

impl<A> ShowOptions<A> {
    pub fn variant(variant: NotificationVariant) -> Self {
        Self {
            variant,
            action: None,
        }
    }

    pub fn with_action(mut self, label: impl Into<String>, payload: A) -> Self {
        self.action = Some(NotificationAction::new(label, payload));
        self
    }
}

/// Queue of auto-expiring messages driven by a [`Clock`].
pub struct NotificationCenter<A, C: Clock> {
    clock: C,
    ttl_ms: i64,
    next_id: NotificationId,
    queue: Vec<Notification<A>>,
}

impl<A, C: Clock> NotificationCenter<A, C> {
    pub fn new(clock: C) -> Self {
        Self::with_ttl(clock, DEFAULT_NOTIFICATION_TTL_MS)
    }

    pub fn with_ttl(clock: C, ttl_ms: i64) -> Self {
        Self {
            clock,
            ttl_ms,
            next_id: 1,
            queue: Vec::new(),
        }
    }

    pub fn ttl_ms(&self) -> i64 {
        self.ttl_ms
    }

    /// Queues a message and returns its id.
    pub fn show(&mut self, message: impl Into<String>, options: ShowOptions<A>) -> NotificationId {
        let id = self.next_id;
        self.next_id += 1;
        self.queue.push(Notification {
            id,
            message: message.into(),
            variant: options.variant,
            action: options.action,
            expires_at: self.clock.now_ms().saturating_add(self.ttl_ms),
        });
        id
    }

    /// Removes a message before its deadline. Returns whether it was present.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let before = self.queue.len();
        self.queue.retain(|notification| notification.id != id);
        self.queue.len() != before
    }

    /// Dismisses the message and yields its action payload.
    ///
    /// Returns `None` when the message is gone, expired, or carries no
    /// action. A payload is handed out at most once.
    pub fn invoke_action(&mut self, id: NotificationId) -> Option<A> {
        let now = self.clock.now_ms();
        let index = self
            .queue
            .iter()
            .position(|notification| notification.id == id)?;
        let notification = self.queue.remove(index);
        if notification.is_expired(now) {
            return None;
        }
        notification.action.map(|action| action.payload)
    }

    /// Drops every message whose deadline has passed; returns how many.
    pub fn expire(&mut self) -> usize {
        let now = self.clock.now_ms();
        let before = self.queue.len();
        self.queue
            .retain(|notification| !notification.is_expired(now));
        before - self.queue.len()
    }

    /// Live messages in insertion order.
    pub fn active(&self) -> impl Iterator<Item = &Notification<A>> {
        let now = self.clock.now_ms();
        self.queue
            .iter()
            .filter(move |notification| !notification.is_expired(now))
    }

    /// Earliest pending deadline, for frontends that schedule a wakeup.
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.queue
            .iter()
            .map(|notification| notification.expires_at)
            .min()
    }

    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::{NotificationCenter, NotificationVariant, ShowOptions, DEFAULT_NOTIFICATION_TTL_MS};
    use crate::clock::ManualClock;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn message_without_action_expires_after_ttl() {
        let clock = ManualClock::new(0);
        let mut center: NotificationCenter<(), _> = NotificationCenter::new(clock.clone());

        center.show("saved", ShowOptions::default());
        clock.advance_ms(DEFAULT_NOTIFICATION_TTL_MS - 1);
        assert_eq!(center.expire(), 0);
        assert_eq!(center.active().count(), 1);

        clock.advance_ms(1);
        assert_eq!(center.active().count(), 0);
        assert_eq!(center.expire(), 1);
        assert!(center.is_empty());
    }

    #[test]
    fn invoking_action_dismisses_and_runs_callback_exactly_once() {
        let clock = ManualClock::new(0);
        let calls = Rc::new(Cell::new(0));
        let mut center: NotificationCenter<Box<dyn FnOnce()>, _> =
            NotificationCenter::new(clock.clone());

        let counter = Rc::clone(&calls);
        let undo: Box<dyn FnOnce()> = Box::new(move || counter.set(counter.get() + 1));
        let id = center.show("deleted", ShowOptions::default().with_action("Undo", undo));

        let callback = center.invoke_action(id).expect("action should be available");
        callback();
        assert_eq!(calls.get(), 1);
        assert!(center.is_empty());

        assert!(center.invoke_action(id).is_none());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn expired_action_is_not_handed_out() {
        let clock = ManualClock::new(0);
        let mut center = NotificationCenter::with_ttl(clock.clone(), 100);

        let id = center.show("deleted", ShowOptions::default().with_action("Undo", 7_u8));
        clock.advance_ms(100);

        assert_eq!(center.invoke_action(id), None);
        assert_eq!(center.next_deadline(), None);
    }

    #[test]
    fn messages_expire_independently_and_keep_insertion_order() {
        let clock = ManualClock::new(0);
        let mut center: NotificationCenter<(), _> = NotificationCenter::with_ttl(clock.clone(), 1_000);

        let first = center.show("first", ShowOptions::default());
        clock.advance_ms(500);
        let second = center.show(
            "second",
            ShowOptions::variant(NotificationVariant::Warning),
        );
        let third = center.show("third", ShowOptions::default());

        let order: Vec<u64> = center.active().map(|n| n.id).collect();
        assert_eq!(order, vec![first, second, third]);

        assert!(center.dismiss(third));
        assert!(!center.dismiss(third));

        clock.advance_ms(500);
        assert_eq!(center.expire(), 1);
        let remaining: Vec<u64> = center.active().map(|n| n.id).collect();
        assert_eq!(remaining, vec![second]);
        assert_eq!(center.next_deadline(), Some(1_500));
    }
}
