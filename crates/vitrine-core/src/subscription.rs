#![forbid(unsafe_code)]

//! Declarative listener lifecycles.
//!
//! Controllers never attach listeners themselves. After every state change
//! the host asks the controller which continuous event sources it currently
//! wants ([`Interests`]), diffs that against what is attached, and
//! attaches/detaches real listeners accordingly. An overlay that only wants
//! the global Escape listener while open simply stops declaring
//! `GLOBAL_KEYS` when it closes; unmounting is the empty set. Leaked
//! listeners become structurally impossible rather than a discipline.
//!
//! # How it works
//!
//! 1. The controller exposes `interests()` derived from its state
//! 2. After each update, the host calls [`Interests::diff`] against the
//!    previously attached set
//! 3. `started` sources get listeners attached, `stopped` ones detached

use bitflags::bitflags;

bitflags! {
    /// Continuous event sources a controller can declare interest in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Interests: u8 {
        /// Document-level keydown (Escape dismissal, focus trapping).
        const GLOBAL_KEYS = 0b0000_0001;
        /// Viewport breakpoint change notifications.
        const VIEWPORT    = 0b0000_0010;
        /// Scroll events on the widget's track element.
        const SCROLL      = 0b0000_0100;
        /// Window resize events.
        const RESIZE      = 0b0000_1000;
        /// Pointer move/up capture beyond the widget's own bounds.
        const POINTER     = 0b0001_0000;
        /// Animation-frame callbacks.
        const FRAMES      = 0b0010_0000;
    }
}

impl Default for Interests {
    fn default() -> Self {
        Self::empty()
    }
}

/// Result of diffing two interest sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterestDiff {
    /// Sources to attach listeners for.
    pub started: Interests,
    /// Sources to detach listeners from.
    pub stopped: Interests,
}

impl InterestDiff {
    /// Whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.started.is_empty() && self.stopped.is_empty()
    }
}

impl Interests {
    /// Diff `self` (previously attached) against `next` (now declared).
    #[must_use]
    pub fn diff(self, next: Interests) -> InterestDiff {
        InterestDiff {
            started: next & !self,
            stopped: self & !next,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_reports_started_and_stopped() {
        let before = Interests::VIEWPORT | Interests::GLOBAL_KEYS;
        let after = Interests::VIEWPORT | Interests::SCROLL;
        let d = before.diff(after);
        assert_eq!(d.started, Interests::SCROLL);
        assert_eq!(d.stopped, Interests::GLOBAL_KEYS);
    }

    #[test]
    fn diff_of_identical_sets_is_empty() {
        let s = Interests::SCROLL | Interests::RESIZE;
        assert!(s.diff(s).is_empty());
    }

    #[test]
    fn unmount_stops_everything() {
        let attached = Interests::SCROLL | Interests::RESIZE | Interests::POINTER;
        let d = attached.diff(Interests::empty());
        assert_eq!(d.started, Interests::empty());
        assert_eq!(d.stopped, attached);
    }
}
