#![forbid(unsafe_code)]

//! Host container contracts.
//!
//! Controllers reach the real page through these traits and records only.
//! A detached host (the element unmounted while an event was already in
//! flight) reports `None` geometry, and every controller operation no-ops
//! against it instead of panicking.

// ---------------------------------------------------------------------------
// Scroll surface
// ---------------------------------------------------------------------------

/// A snapshot of a scrollable element's geometry, in host units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Current scroll offset from the start of the track.
    pub offset: f64,

    /// Total extent of the scrollable content.
    pub track_extent: f64,

    /// Extent of the visible viewport.
    pub viewport_extent: f64,
}

impl ScrollMetrics {
    /// The scrollable overflow: `track_extent - viewport_extent`, floored
    /// at zero.
    #[must_use]
    pub fn overflow(&self) -> f64 {
        (self.track_extent - self.viewport_extent).max(0.0)
    }

    /// The maximum legal scroll offset.
    #[must_use]
    pub fn max_offset(&self) -> f64 {
        self.overflow()
    }
}

/// How a scroll command should move the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    /// Jump immediately.
    #[default]
    Auto,

    /// Animate; completion is not observable, callers re-check geometry
    /// after a delay instead.
    Smooth,
}

/// A horizontally scrollable host element.
///
/// The underlying surface clamps offsets to `[0, max_offset]` itself;
/// implementations must tolerate `set_offset` values outside that range.
/// Reads during an animated scroll may transiently sit outside the range
/// too, and callers are expected to tolerate that.
pub trait ScrollSurface {
    /// Current geometry, or `None` when the element is detached.
    fn metrics(&self) -> Option<ScrollMetrics>;

    /// Set the scroll offset directly (no animation).
    fn set_offset(&mut self, offset: f64);

    /// Scroll by a signed amount.
    fn scroll_by(&mut self, delta: f64, behavior: ScrollBehavior);
}

// ---------------------------------------------------------------------------
// Focus candidates
// ---------------------------------------------------------------------------

/// Host-assigned identity of a potentially focusable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FocusId(pub u64);

/// How an element participates in the tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusKind {
    /// Natively focusable: link, button, form control.
    Native,

    /// Explicit focus-order attribute with the given value.
    TabIndex(i32),
}

/// One focus candidate, as enumerated by the host with computed visibility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusCandidate {
    /// Host identity, echoed back in focus commands.
    pub id: FocusId,

    /// Tab-order participation.
    pub kind: FocusKind,

    /// Whether the element is disabled.
    pub disabled: bool,

    /// Whether the element is visible per computed display/visibility.
    pub visible: bool,
}

impl FocusCandidate {
    /// A visible, enabled, natively focusable candidate.
    #[must_use]
    pub const fn native(id: u64) -> Self {
        Self {
            id: FocusId(id),
            kind: FocusKind::Native,
            disabled: false,
            visible: true,
        }
    }

    /// A visible, enabled candidate with an explicit tab index.
    #[must_use]
    pub const fn tab_index(id: u64, index: i32) -> Self {
        Self {
            id: FocusId(id),
            kind: FocusKind::TabIndex(index),
            disabled: false,
            visible: true,
        }
    }

    /// Mark the candidate disabled.
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Mark the candidate hidden.
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
