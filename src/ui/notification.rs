//! Transient status banner with a replaceable auto-hide timer.

use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Danger,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

/// Identifies one scheduled hide. Only the most recent handle is live.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerHandle(u64);

struct Active {
    notification: Notification,
    handle: TimerHandle,
    deadline: Instant,
}

/// Holds at most one visible notification and the timer that will hide it.
pub struct NotificationSlot {
    ttl: Duration,
    active: Option<Active>,
    issued: u64,
}

impl NotificationSlot {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            active: None,
            issued: 0,
        }
    }

    /// Show `message`, replacing whatever was visible along with its timer.
    pub fn show(&mut self, kind: NotificationKind, message: impl Into<String>, now: Instant) -> TimerHandle {
        self.issued += 1;
        let handle = TimerHandle(self.issued);
        self.active = Some(Active {
            notification: Notification {
                kind,
                message: message.into(),
            },
            handle,
            deadline: now + self.ttl,
        });
        handle
    }

    /// Fire the live timer if its deadline has passed.
    pub fn tick(&mut self, now: Instant) {
        let due = self
            .active
            .as_ref()
            .filter(|a| now >= a.deadline)
            .map(|a| a.handle);
        if let Some(handle) = due {
            self.expire(handle);
        }
    }

    /// Hide only if `handle` is still the live timer. Returns whether it was.
    pub fn expire(&mut self, handle: TimerHandle) -> bool {
        if self.active.as_ref().is_some_and(|a| a.handle == handle) {
            self.active = None;
            true
        } else {
            false
        }
    }

    pub fn visible(&self) -> Option<&Notification> {
        self.active.as_ref().map(|a| &a.notification)
    }

    /// Time left before the live timer fires.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.active
            .as_ref()
            .map(|a| a.deadline.saturating_duration_since(now))
    }
}
