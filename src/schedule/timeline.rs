//! Virtual-time timer queue.
//!
//! Timers are ordered by due time, then by the order they were scheduled,
//! so two timers due at the same instant fire first-in first-out.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Identifies the session and round a timer was scheduled for.
///
/// A timer whose token no longer matches the live session is stale and
/// must not touch session state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoundToken {
    /// Incremented on every `start_game`.
    pub session: u32,
    /// Incremented on every round within a session.
    pub round: u32,
}

impl RoundToken {
    #[must_use]
    pub const fn new(session: u32, round: u32) -> Self {
        Self { session, round }
    }

    /// Token for the next round of the same session.
    #[must_use]
    pub const fn next_round(self) -> Self {
        Self {
            session: self.session,
            round: self.round + 1,
        }
    }
}

impl std::fmt::Display for RoundToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Session({})/Round({})", self.session, self.round)
    }
}

/// Unique identifier for a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u64);

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

/// A timer that has come due.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Timer<T> {
    pub id: TimerId,
    /// Offset from the timeline origin the timer was due at.
    pub due: Duration,
    pub token: RoundToken,
    pub event: T,
}

#[derive(Debug)]
struct Entry<T>(Timer<T>);

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.due == other.0.due && self.0.id == other.0.id
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.due.cmp(&other.0.due).then(self.0.id.cmp(&other.0.id))
    }
}

/// Cooperative timer queue over a virtual clock.
///
/// The timeline never sleeps. The host reads [`Timeline::next_deadline`],
/// waits however its platform waits (an event loop, `recv_timeout`, a test
/// that just jumps ahead) and then drains due timers with
/// [`Timeline::pop_due`].
#[derive(Debug)]
pub struct Timeline<T> {
    now: Duration,
    next_id: u64,
    queue: BinaryHeap<Reverse<Entry<T>>>,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Timeline<T> {
    /// Create an empty timeline at offset zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            queue: BinaryHeap::new(),
        }
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of pending timers, stale or not.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Due time of the earliest pending timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.peek().map(|Reverse(entry)| entry.0.due)
    }

    /// Schedule `event` to fire `delay` after the current time.
    pub fn schedule_after(&mut self, delay: Duration, token: RoundToken, event: T) -> TimerId {
        self.schedule_at(self.now + delay, token, event)
    }

    /// Schedule `event` at an absolute offset.
    ///
    /// Offsets in the past fire on the next drain.
    pub fn schedule_at(&mut self, due: Duration, token: RoundToken, event: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.queue.push(Reverse(Entry(Timer {
            id,
            due,
            token,
            event,
        })));
        id
    }

    /// Pop the earliest timer due at or before `until`.
    ///
    /// The clock moves to the timer's due time so handlers that schedule
    /// follow-ups measure from the moment the timer fired. Returns `None`
    /// once nothing else is due; the clock then rests at `until`.
    pub fn pop_due(&mut self, until: Duration) -> Option<Timer<T>> {
        match self.next_deadline() {
            Some(due) if due <= until => {
                let Reverse(Entry(timer)) = self.queue.pop()?;
                self.now = self.now.max(timer.due);
                Some(timer)
            }
            _ => {
                self.now = self.now.max(until);
                None
            }
        }
    }

    /// Drop every pending timer that was not scheduled for `live`.
    ///
    /// Returns the number of timers dropped.
    pub fn purge_stale(&mut self, live: RoundToken) -> usize {
        let before = self.queue.len();
        self.queue.retain(|Reverse(entry)| entry.0.token == live);
        before - self.queue.len()
    }
}
