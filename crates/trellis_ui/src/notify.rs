//! Hierarchy notifications.
//!
//! Structural and geometric changes are not delivered synchronously. The
//! tree queues them for every component that registered as an observer of
//! the subject's parent, and the context drains the queue between frame
//! phases. Handlers run with the tree fully consistent and may mutate it.

use std::collections::{HashSet, VecDeque};

use crate::geometry::Vec2;
use crate::tree::ComponentId;

/// What happened to the subject.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TreeEventKind {
    /// The subject was attached to the parent.
    ChildAdded,
    /// The subject was detached from the parent (moved or destroyed).
    ChildRemoved,
    /// The subject's rectangle was recomputed.
    Recalculated,
    /// The subject's resolved location changed.
    Moved {
        /// Previous location.
        from: Vec2,
        /// New location.
        to: Vec2,
    },
    /// The subject's resolved size changed.
    Resized {
        /// Previous size.
        from: Vec2,
        /// New size.
        to: Vec2,
    },
}

/// A change to one child of `parent`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeEvent {
    /// The component whose children are observed.
    pub parent: ComponentId,
    /// The child the event is about.
    pub subject: ComponentId,
    /// What happened.
    pub kind: TreeEventKind,
}

/// An event addressed to one observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Notification {
    /// Who should handle it.
    pub observer: ComponentId,
    /// The event itself.
    pub event: TreeEvent,
}

/// FIFO of pending notifications.
#[derive(Debug, Default)]
pub(crate) struct NotificationQueue {
    pending: VecDeque<Notification>,
}

impl NotificationQueue {
    /// Queues `event` once for each observer.
    pub fn post(&mut self, observers: &[ComponentId], event: TreeEvent) {
        for &observer in observers {
            self.pending.push_back(Notification { observer, event });
        }
    }

    /// Takes everything queued so far, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        self.pending.drain(..).collect()
    }

    /// Drops everything addressed to `observers`.
    pub fn discard_for(&mut self, observers: &HashSet<ComponentId>) {
        self.pending.retain(|notification| !observers.contains(&notification.observer));
    }

    /// Number of queued notifications.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns true if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
