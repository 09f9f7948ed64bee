//! One-shot timer queue.
//!
//! Toolkit adapters that have no timer facility of their own can back the
//! multi-stroke assist delay with a [`TimerQueue`]: schedule a payload, poll
//! [`TimerQueue::time_until_next`] from the event loop, and hand whatever
//! [`TimerQueue::take_expired`] returns back to the dispatcher.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use slotmap::{SlotMap, new_key_type};

use crate::error::TimerError;
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a scheduled timer.
    pub struct TimerId;
}

/// An entry in the timer queue (min-heap by fire time).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    fire_time: Instant,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_time == other.fire_time
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other.fire_time.cmp(&self.fire_time)
    }
}

/// A queue of one-shot timers, each carrying a payload.
pub struct TimerQueue<T> {
    /// Payloads of pending timers.
    timers: SlotMap<TimerId, T>,
    queue: BinaryHeap<TimerQueueEntry>,
}

impl<T> TimerQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            queue: BinaryHeap::new(),
        }
    }

    /// Schedule `payload` to fire `delay` after now.
    pub fn start_one_shot(&mut self, delay: Duration, payload: T) -> TimerId {
        self.start_at(Instant::now() + delay, payload)
    }

    /// Schedule `payload` to fire at `fire_time`.
    pub fn start_at(&mut self, fire_time: Instant, payload: T) -> TimerId {
        let id = self.timers.insert(payload);
        self.queue.push(TimerQueueEntry { id, fire_time });
        id
    }

    /// Stop a pending timer and return its payload.
    pub fn stop(&mut self, id: TimerId) -> Result<T, TimerError> {
        self.timers.remove(id).ok_or(TimerError::InvalidTimerId)
    }

    /// Check if a timer is still pending.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Number of pending timers.
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    /// Get the duration from `now` until the next timer fires, if any.
    pub fn time_until_next(&mut self, now: Instant) -> Option<Duration> {
        self.discard_stopped();
        self.queue
            .peek()
            .map(|entry| entry.fire_time.saturating_duration_since(now))
    }

    /// Remove and return the payloads of every timer due at `now`, earliest
    /// first.
    #[tracing::instrument(skip(self), target = "horizon_keys_core::timer", level = "trace")]
    pub fn take_expired(&mut self, now: Instant) -> Vec<(TimerId, T)> {
        let mut fired = Vec::new();

        while let Some(entry) = self.queue.peek().copied() {
            if entry.fire_time > now {
                break;
            }
            self.queue.pop();

            // Stopped timers leave their heap entry behind.
            let Some(payload) = self.timers.remove(entry.id) else {
                continue;
            };
            tracing::trace!(target: targets::TIMER, id = ?entry.id, "timer fired");
            fired.push((entry.id, payload));
        }

        fired
    }

    fn discard_stopped(&mut self) {
        while let Some(entry) = self.queue.peek() {
            if self.timers.contains_key(entry.id) {
                break;
            }
            self.queue.pop();
        }
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
