//! Property-based invariant tests for the rate limiters and timer queue.
//!
//! These tests verify guarantees that must hold for any event sequence:
//!
//! 1. Throttle never surrenders two values within one interval.
//! 2. Throttle never drops the final invocation of a burst.
//! 3. Debounce surrenders at most one value per quiet period, with the
//!    latest arguments.
//! 4. A cancelled timer token never yields its message.
//! 5. TimerQueue drains in deadline order.

use std::time::Duration;

use proptest::prelude::*;
use vitrine_core::rate_limit::{Debounce, Throttle};
use vitrine_core::timing::{Timestamp, TimerQueue};

// ── Helpers ─────────────────────────────────────────────────────────────

/// Strictly increasing call times derived from positive gaps.
fn call_times() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(1u64..50, 1..40).prop_map(|gaps| {
        let mut t = 0;
        gaps.iter()
            .map(|g| {
                t += g;
                t
            })
            .collect()
    })
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Throttle never surrenders two values within one interval
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn throttle_respects_minimum_spacing(times in call_times(), interval in 1u64..100) {
        let mut throttle = Throttle::new(Duration::from_millis(interval));
        let mut fired_at: Vec<u64> = Vec::new();

        for &t in &times {
            let now = Timestamp::from_millis(t);
            if throttle.poll(now).is_some() {
                fired_at.push(t);
            }
            if throttle.invoke(now, t).is_some() {
                fired_at.push(t);
            }
        }
        // Drain the trailing slot well past the last deadline.
        let settle = Timestamp::from_millis(times.last().unwrap() + interval);
        if throttle.poll(settle).is_some() {
            fired_at.push(times.last().unwrap() + interval);
        }

        for pair in fired_at.windows(2) {
            prop_assert!(
                pair[1] - pair[0] >= interval,
                "two executions {}ms apart with interval {}ms",
                pair[1] - pair[0],
                interval
            );
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Throttle never drops the final invocation of a burst
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn throttle_final_call_always_runs(times in call_times(), interval in 1u64..100) {
        let mut throttle = Throttle::new(Duration::from_millis(interval));
        let mut last_fired = None;

        for &t in &times {
            let now = Timestamp::from_millis(t);
            if let Some(v) = throttle.poll(now) {
                last_fired = Some(v);
            }
            if let Some(v) = throttle.invoke(now, t) {
                last_fired = Some(v);
            }
        }
        let settle = Timestamp::from_millis(times.last().unwrap() + interval);
        if let Some(v) = throttle.poll(settle) {
            last_fired = Some(v);
        }

        prop_assert_eq!(last_fired, Some(*times.last().unwrap()));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Debounce fires once per quiet period with the latest arguments
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn debounce_fires_latest_once(times in call_times(), delay in 1u64..200) {
        let mut debounce = Debounce::new(Duration::from_millis(delay));
        let mut fired: Vec<u64> = Vec::new();

        for &t in &times {
            let now = Timestamp::from_millis(t);
            if let Some(v) = debounce.poll(now) {
                fired.push(v);
            }
            debounce.invoke(now, t);
        }
        let settle = Timestamp::from_millis(times.last().unwrap() + delay);
        if let Some(v) = debounce.poll(settle) {
            fired.push(v);
        }

        // The last call always fires, exactly once, after the burst settles.
        prop_assert_eq!(fired.last(), Some(times.last().unwrap()));
        // Every fired value is one of the invoked times, in order.
        prop_assert!(fired.windows(2).all(|w| w[0] < w[1]));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. A cancelled timer token never yields its message
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn cancelled_tokens_never_fire(
        delays in prop::collection::vec(0u64..500, 1..20),
        cancel_mask in prop::collection::vec(any::<bool>(), 1..20)
    ) {
        let mut queue = TimerQueue::new();
        let now = Timestamp::ZERO;
        let tokens: Vec<_> = delays
            .iter()
            .enumerate()
            .map(|(i, &d)| queue.schedule(now, Duration::from_millis(d), i))
            .collect();

        let mut cancelled = Vec::new();
        for (i, tok) in tokens.iter().enumerate() {
            if *cancel_mask.get(i).unwrap_or(&false) {
                queue.cancel(*tok);
                cancelled.push(i);
            }
        }

        let mut drained = Vec::new();
        while let Some(msg) = queue.pop_due(Timestamp::from_millis(1_000)) {
            drained.push(msg);
        }

        for i in &cancelled {
            prop_assert!(!drained.contains(i), "cancelled timer {i} fired");
        }
        prop_assert_eq!(drained.len(), delays.len() - cancelled.len());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. TimerQueue drains in deadline order
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn queue_drains_in_deadline_order(delays in prop::collection::vec(0u64..500, 1..20)) {
        let mut queue = TimerQueue::new();
        let now = Timestamp::ZERO;
        for (i, &d) in delays.iter().enumerate() {
            queue.schedule(now, Duration::from_millis(d), (d, i));
        }

        let mut drained = Vec::new();
        while let Some(msg) = queue.pop_due(Timestamp::from_millis(1_000)) {
            drained.push(msg);
        }

        prop_assert!(drained.windows(2).all(|w| w[0] <= w[1]));
    }
}
