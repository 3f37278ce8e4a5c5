//! Pending transition - a deferred state change that fires exactly once
//!
//! INVARIANT: at most one transition is pending; scheduling while one is
//! pending is rejected, never queued or overwritten

use std::time::Duration;

use mano_core::FrameTime;

/// One-shot deferred transition carrying a payload
#[derive(Debug, Clone, PartialEq)]
pub struct PendingTransition<T> {
    slot: Option<(FrameTime, T)>,
}

impl<T> Default for PendingTransition<T> {
    fn default() -> Self {
        Self { slot: None }
    }
}

impl<T> PendingTransition<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `payload` to fire `delay` after `now`.
    /// Returns false (and drops nothing) if a transition is already pending.
    pub fn schedule(&mut self, now: FrameTime, delay: Duration, payload: T) -> bool {
        if self.slot.is_some() {
            return false;
        }
        self.slot = Some((now + delay, payload));
        true
    }

    pub fn is_pending(&self) -> bool {
        self.slot.is_some()
    }

    /// Payload of the pending transition
    pub fn peek(&self) -> Option<&T> {
        self.slot.as_ref().map(|(_, payload)| payload)
    }

    pub fn due_at(&self) -> Option<FrameTime> {
        self.slot.as_ref().map(|(at, _)| *at)
    }

    /// Take the payload once its deadline has been reached
    pub fn poll(&mut self, now: FrameTime) -> Option<T> {
        match &self.slot {
            Some((at, _)) if now >= *at => self.slot.take().map(|(_, payload)| payload),
            _ => None,
        }
    }

    /// Drop any pending transition
    pub fn cancel(&mut self) {
        self.slot = None;
    }
}
