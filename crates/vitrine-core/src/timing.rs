#![forbid(unsafe_code)]

//! Virtual timestamps and a cancellable single-threaded timer queue.
//!
//! Controllers never read a wall clock. Every event handler receives the
//! current [`Timestamp`] from the host, and deferred work is expressed as
//! messages in a [`TimerQueue`] that the host pumps from its own event loop.
//! This keeps all timing logic deterministic and testable.
//!
//! # Invariants
//!
//! 1. A cancelled token never yields its message.
//! 2. `pop_due` returns messages in deadline order; ties break in schedule
//!    order.
//! 3. After `clear()`, nothing fires until new work is scheduled.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Timestamp
// ---------------------------------------------------------------------------

/// A monotonic instant, measured from the moment the owning widget mounted.
///
/// Backed by a [`Duration`] rather than `std::time::Instant` so tests and
/// headless hosts can drive time explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(Duration);

impl Timestamp {
    /// The mount instant.
    pub const ZERO: Timestamp = Timestamp(Duration::ZERO);

    /// Create a timestamp `ms` milliseconds after mount.
    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        Self(Duration::from_millis(ms))
    }

    /// Elapsed time since mount.
    #[must_use]
    pub const fn since_mount(&self) -> Duration {
        self.0
    }

    /// Elapsed time since `earlier`, saturating to zero if `earlier` is in
    /// the future (hosts with coarse clocks can report out-of-order times).
    #[must_use]
    pub fn saturating_since(&self, earlier: Timestamp) -> Duration {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<Duration> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Duration) -> Timestamp {
        Timestamp(self.0 + rhs)
    }
}

impl std::ops::AddAssign<Duration> for Timestamp {
    fn add_assign(&mut self, rhs: Duration) {
        self.0 += rhs;
    }
}

// ---------------------------------------------------------------------------
// TimerQueue
// ---------------------------------------------------------------------------

/// Handle to a scheduled timer, used for cancellation.
///
/// Tokens are unique within their queue. Cancelling a token that has already
/// fired (or was already cancelled) is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

#[derive(Debug, Clone)]
struct TimerEntry<M> {
    token: TimerToken,
    due: Timestamp,
    msg: M,
}

/// A single-threaded queue of scheduled messages.
///
/// The host asks [`TimerQueue::next_deadline`] when to call back and drains
/// due messages with [`TimerQueue::pop_due`]. `clear()` is the unmount path:
/// it drops every pending entry so no stale message can reach a destroyed
/// view.
///
/// All operations are O(n) over pending entries; queues in this workspace
/// hold a handful of timers at most.
#[derive(Debug, Clone)]
pub struct TimerQueue<M> {
    entries: Vec<TimerEntry<M>>,
    next_token: u64,
}

impl<M> Default for TimerQueue<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> TimerQueue<M> {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_token: 0,
        }
    }

    /// Schedule `msg` to become due `delay` after `now`.
    pub fn schedule(&mut self, now: Timestamp, delay: Duration, msg: M) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        self.entries.push(TimerEntry {
            token,
            due: now + delay,
            msg,
        });
        token
    }

    /// Cancel a scheduled timer. Returns `true` if it was still pending.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.token != token);
        self.entries.len() != before
    }

    /// The earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.entries.iter().map(|e| e.due).min()
    }

    /// Remove and return the earliest message whose deadline has passed.
    ///
    /// Call in a loop to drain everything due at `now`. Ties between equal
    /// deadlines resolve in schedule order.
    pub fn pop_due(&mut self, now: Timestamp) -> Option<M> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= now)
            .min_by_key(|(_, e)| (e.due, e.token.0))
            .map(|(i, _)| i)?;
        Some(self.entries.remove(idx).msg)
    }

    /// Drop every pending entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of pending entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_arithmetic() {
        let t = Timestamp::from_millis(100);
        assert_eq!(t + Duration::from_millis(50), Timestamp::from_millis(150));
        assert_eq!(
            t.saturating_since(Timestamp::from_millis(40)),
            Duration::from_millis(60)
        );
    }

    #[test]
    fn timestamp_saturates_backwards() {
        let t = Timestamp::from_millis(10);
        assert_eq!(
            t.saturating_since(Timestamp::from_millis(20)),
            Duration::ZERO
        );
    }

    #[test]
    fn schedule_and_pop_in_deadline_order() {
        let mut q = TimerQueue::new();
        let now = Timestamp::ZERO;
        q.schedule(now, Duration::from_millis(30), "late");
        q.schedule(now, Duration::from_millis(10), "early");

        assert_eq!(q.next_deadline(), Some(Timestamp::from_millis(10)));
        assert_eq!(q.pop_due(Timestamp::from_millis(5)), None);
        assert_eq!(q.pop_due(Timestamp::from_millis(40)), Some("early"));
        assert_eq!(q.pop_due(Timestamp::from_millis(40)), Some("late"));
        assert_eq!(q.pop_due(Timestamp::from_millis(40)), None);
    }

    #[test]
    fn equal_deadlines_pop_in_schedule_order() {
        let mut q = TimerQueue::new();
        let now = Timestamp::ZERO;
        q.schedule(now, Duration::from_millis(10), 1);
        q.schedule(now, Duration::from_millis(10), 2);

        let at = Timestamp::from_millis(10);
        assert_eq!(q.pop_due(at), Some(1));
        assert_eq!(q.pop_due(at), Some(2));
    }

    #[test]
    fn cancelled_token_never_fires() {
        let mut q = TimerQueue::new();
        let tok = q.schedule(Timestamp::ZERO, Duration::from_millis(10), "x");
        assert!(q.cancel(tok));
        assert!(!q.cancel(tok));
        assert_eq!(q.pop_due(Timestamp::from_millis(100)), None);
    }

    #[test]
    fn clear_drops_everything() {
        let mut q = TimerQueue::new();
        q.schedule(Timestamp::ZERO, Duration::from_millis(1), "a");
        q.schedule(Timestamp::ZERO, Duration::from_millis(2), "b");
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.next_deadline(), None);
        assert_eq!(q.pop_due(Timestamp::from_millis(100)), None);
    }
}
