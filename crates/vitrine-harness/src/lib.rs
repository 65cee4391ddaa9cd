#![forbid(unsafe_code)]

//! Deterministic fake hosts for exercising controllers without a page.
//!
//! Real hosts hand controllers wall-clock-ish timestamps and a live
//! scrollable element. Tests substitute [`ManualClock`] and [`FakeSurface`]
//! so every timer deadline and every animated scroll is driven explicitly,
//! one step at a time.

use std::time::Duration;

use vitrine_core::surface::{ScrollBehavior, ScrollMetrics, ScrollSurface};
use vitrine_core::timing::Timestamp;

// ---------------------------------------------------------------------------
// ManualClock
// ---------------------------------------------------------------------------

/// A clock that only moves when the test says so.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    now: Timestamp,
}

impl ManualClock {
    /// A clock at the mount instant.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current instant.
    #[must_use]
    pub fn now(&self) -> Timestamp {
        self.now
    }

    /// Advance by `delta` and return the new instant.
    pub fn advance(&mut self, delta: Duration) -> Timestamp {
        self.now = self.now + delta;
        self.now
    }

    /// Advance by `ms` milliseconds and return the new instant.
    pub fn advance_ms(&mut self, ms: u64) -> Timestamp {
        self.advance(Duration::from_millis(ms))
    }
}

// ---------------------------------------------------------------------------
// FakeSurface
// ---------------------------------------------------------------------------

/// A command observed by the fake surface, for assertions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceCommand {
    /// Direct offset write.
    SetOffset(f64),

    /// Scroll-by command with its behavior.
    ScrollBy(f64, ScrollBehavior),
}

/// An in-memory scrollable element.
///
/// Offsets clamp to `[0, max_offset]` like a real scroll container. Smooth
/// scrolls do not complete on their own: the pending target sits until the
/// test calls [`FakeSurface::step_animation`] or [`FakeSurface::settle`],
/// which is how tests place geometry reads "mid-animation" or "settled"
/// relative to a controller's delayed re-checks.
#[derive(Debug, Clone, Default)]
pub struct FakeSurface {
    offset: f64,
    track_extent: f64,
    viewport_extent: f64,
    detached: bool,
    animating_toward: Option<f64>,
    commands: Vec<SurfaceCommand>,
}

impl FakeSurface {
    /// A surface with the given track and viewport extents, at offset zero.
    #[must_use]
    pub fn new(track_extent: f64, viewport_extent: f64) -> Self {
        Self {
            offset: 0.0,
            track_extent,
            viewport_extent,
            detached: false,
            animating_toward: None,
            commands: Vec::new(),
        }
    }

    /// Start at a given offset (clamped).
    #[must_use]
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = self.clamp(offset);
        self
    }

    /// Simulate unmounting: geometry reads return `None` from here on.
    pub fn detach(&mut self) {
        self.detached = true;
    }

    /// Change the extents, as a window resize would.
    pub fn resize(&mut self, track_extent: f64, viewport_extent: f64) {
        self.track_extent = track_extent;
        self.viewport_extent = viewport_extent;
        self.offset = self.clamp(self.offset);
    }

    /// Current offset, regardless of attachment.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Whether a smooth scroll is still in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animating_toward.is_some()
    }

    /// Move a fraction of the way toward the pending smooth-scroll target.
    /// A fraction of `1.0` (or more) completes it.
    pub fn step_animation(&mut self, fraction: f64) {
        if let Some(target) = self.animating_toward {
            if fraction >= 1.0 {
                self.offset = target;
                self.animating_toward = None;
            } else {
                self.offset += (target - self.offset) * fraction;
            }
        }
    }

    /// Complete any pending smooth scroll.
    pub fn settle(&mut self) {
        self.step_animation(1.0);
    }

    /// Every command the surface has received, in order.
    #[must_use]
    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    fn max_offset(&self) -> f64 {
        (self.track_extent - self.viewport_extent).max(0.0)
    }

    fn clamp(&self, offset: f64) -> f64 {
        offset.clamp(0.0, self.max_offset())
    }
}

impl ScrollSurface for FakeSurface {
    fn metrics(&self) -> Option<ScrollMetrics> {
        if self.detached {
            return None;
        }
        Some(ScrollMetrics {
            offset: self.offset,
            track_extent: self.track_extent,
            viewport_extent: self.viewport_extent,
        })
    }

    fn set_offset(&mut self, offset: f64) {
        self.commands.push(SurfaceCommand::SetOffset(offset));
        if self.detached {
            return;
        }
        self.animating_toward = None;
        self.offset = self.clamp(offset);
    }

    fn scroll_by(&mut self, delta: f64, behavior: ScrollBehavior) {
        self.commands.push(SurfaceCommand::ScrollBy(delta, behavior));
        if self.detached {
            return;
        }
        let target = self.clamp(self.offset + delta);
        match behavior {
            ScrollBehavior::Auto => {
                self.animating_toward = None;
                self.offset = target;
            }
            ScrollBehavior::Smooth => {
                self.animating_toward = Some(target);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
