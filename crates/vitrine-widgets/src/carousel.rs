#![forbid(unsafe_code)]

//! Horizontal product carousel controller.
//!
//! Translates pointer-drag, keyboard, and button input into scroll commands
//! against a host [`ScrollSurface`], and keeps the prev/next boundary flags
//! synchronized with the surface's actual geometry.
//!
//! # Design
//!
//! Animated scrolls are fire-and-forget: the host gives no completion
//! signal, so after every command the controller re-verifies the boundary
//! flags twice: once shortly after the scroll starts and once after it has
//! had time to settle. The two-stage re-check is a heuristic; flags can be
//! momentarily stale during unusually slow or fast animations.
//!
//! Continuous recomputation is rate-limited: scroll events pass through a
//! throttle (one refresh per ~16 ms), resize events through a debounce
//! (~300 ms), and drag updates through a frame gate (one surface write per
//! animation frame, latest position wins).
//!
//! # Failure Modes
//!
//! | Failure | Cause | Fallback |
//! |---------|-------|----------|
//! | Empty catalog | No record survived validation | Controller is inert: no track, no controls |
//! | Detached surface | Event fired after unmount | Operation no-ops |
//! | Zero overflow | Track fits the viewport | Both flags false, commands no-op |

use std::time::Duration;

use vitrine_core::event::{KeyCode, KeyEvent, PointerEvent, PointerEventKind};
use vitrine_core::rate_limit::{Debounce, FrameGate, Throttle};
use vitrine_core::subscription::Interests;
use vitrine_core::surface::{ScrollBehavior, ScrollMetrics, ScrollSurface};
use vitrine_core::timing::{TimerQueue, TimerToken, Timestamp};
use vitrine_core::warn;

use crate::catalog::Catalog;
use crate::text::bullet_points;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tuning for boundary detection and rate limiting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselConfig {
    /// Slack absorbing rounding error in geometry comparisons. Default: 1.0.
    pub tolerance: f64,

    /// Minimum spacing between scroll-driven refreshes. Default: 16 ms.
    pub scroll_throttle: Duration,

    /// Quiet period before a resize-driven refresh. Default: 300 ms.
    pub resize_debounce: Duration,

    /// First boundary re-check after a scroll command, catching the scroll
    /// starting. Default: 100 ms.
    pub recheck_start: Duration,

    /// Second re-check, catching the scroll settling. Default: 350 ms.
    pub recheck_settle: Duration,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            tolerance: 1.0,
            scroll_throttle: Duration::from_millis(16),
            resize_debounce: Duration::from_millis(300),
            recheck_start: Duration::from_millis(100),
            recheck_settle: Duration::from_millis(350),
        }
    }
}

impl CarouselConfig {
    /// Set the geometry tolerance.
    #[must_use]
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the scroll-refresh throttle interval.
    #[must_use]
    pub fn scroll_throttle(mut self, interval: Duration) -> Self {
        self.scroll_throttle = interval;
        self
    }

    /// Set the resize-refresh debounce delay.
    #[must_use]
    pub fn resize_debounce(mut self, delay: Duration) -> Self {
        self.resize_debounce = delay;
        self
    }

    /// Set the two re-check delays after a scroll command.
    #[must_use]
    pub fn recheck_delays(mut self, start: Duration, settle: Duration) -> Self {
        self.recheck_start = start;
        self.recheck_settle = settle;
        self
    }
}

// ---------------------------------------------------------------------------
// State and view
// ---------------------------------------------------------------------------

/// One carousel card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    /// Catalog record id.
    pub id: String,

    /// Card title.
    pub name: String,

    /// Trimmed bullet items from the record's description.
    pub bullets: Vec<String>,
}

/// Mutable carousel state: the last observed geometry plus derived flags.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CarouselState {
    /// Last observed scroll offset.
    pub scroll_offset: f64,

    /// Last observed track extent.
    pub track_extent: f64,

    /// Last observed viewport extent.
    pub viewport_extent: f64,

    /// Whether scrolling backward is possible.
    pub can_scroll_prev: bool,

    /// Whether scrolling forward is possible.
    pub can_scroll_next: bool,

    /// Whether a pointer drag is in progress.
    pub is_dragging: bool,
}

/// Renderable button state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselControls {
    /// Whether the previous button is enabled.
    pub prev_enabled: bool,

    /// Whether the next button is enabled.
    pub next_enabled: bool,
}

/// Renderable snapshot: the track plus its controls. Absent entirely when
/// the controller is inert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselView<'a> {
    /// Slides in catalog order.
    pub slides: &'a [Slide],

    /// Button state.
    pub controls: CarouselControls,
}

#[derive(Debug, Clone, Copy)]
struct DragOrigin {
    start_x: f64,
    start_offset: f64,
}

/// Message carried by the post-command re-check timers.
#[derive(Debug, Clone, Copy)]
struct Recheck;

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// The carousel controller.
///
/// All event methods take the current [`Timestamp`] where deferred work can
/// result, and the host surface where geometry is involved. The host is
/// expected to call [`CarouselController::tick`] no later than
/// [`CarouselController::next_deadline`].
#[derive(Debug, Clone)]
pub struct CarouselController {
    slides: Vec<Slide>,
    config: CarouselConfig,
    state: CarouselState,
    drag: Option<DragOrigin>,
    frame: FrameGate<f64>,
    scroll_throttle: Throttle<()>,
    resize_debounce: Debounce<()>,
    timers: TimerQueue<Recheck>,
    recheck_tokens: Vec<TimerToken>,
    torn_down: bool,
}

impl CarouselController {
    /// Build a controller from the catalog. Records become slides 1:1; an
    /// empty catalog leaves the controller inert.
    #[must_use]
    pub fn new(catalog: &Catalog) -> Self {
        Self::with_config(catalog, CarouselConfig::default())
    }

    /// Build with explicit tuning.
    #[must_use]
    pub fn with_config(catalog: &Catalog, config: CarouselConfig) -> Self {
        let slides: Vec<Slide> = catalog
            .records()
            .iter()
            .map(|record| Slide {
                id: record.id.clone(),
                name: record.name.clone(),
                bullets: bullet_points(&record.description_short),
            })
            .collect();
        if slides.is_empty() {
            warn!("carousel has no valid slides to display");
        }
        Self {
            slides,
            config,
            state: CarouselState::default(),
            drag: None,
            frame: FrameGate::new(),
            scroll_throttle: Throttle::new(config.scroll_throttle),
            resize_debounce: Debounce::new(config.resize_debounce),
            timers: TimerQueue::new(),
            recheck_tokens: Vec::new(),
            torn_down: false,
        }
    }

    /// Slides in catalog order.
    #[must_use]
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    /// Whether the controller renders nothing and ignores input: no valid
    /// slides, or torn down.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.slides.is_empty() || self.torn_down
    }

    /// Renderable snapshot, or `None` when inert.
    #[must_use]
    pub fn view(&self) -> Option<CarouselView<'_>> {
        if self.is_inert() {
            return None;
        }
        Some(CarouselView {
            slides: &self.slides,
            controls: CarouselControls {
                prev_enabled: self.state.can_scroll_prev,
                next_enabled: self.state.can_scroll_next,
            },
        })
    }

    /// Initial geometry sync, once the host has laid the track out.
    pub fn mount(&mut self, surface: &impl ScrollSurface) {
        if self.is_inert() {
            return;
        }
        self.refresh(surface);
    }

    // --- Pointer drag ------------------------------------------------------

    /// Dispatch a pointer event to the drag handlers.
    pub fn handle_pointer(&mut self, event: PointerEvent, surface: &mut impl ScrollSurface) {
        match event.kind {
            PointerEventKind::Down => self.pointer_down(event.x, surface),
            PointerEventKind::Moved => self.pointer_move(event.x),
            PointerEventKind::Up | PointerEventKind::Leave => self.pointer_up(surface),
        }
    }

    /// Begin a drag: record the grab position and the offset under it.
    pub fn pointer_down(&mut self, x: f64, surface: &impl ScrollSurface) {
        if self.is_inert() {
            return;
        }
        let Some(metrics) = surface.metrics() else {
            return;
        };
        self.drag = Some(DragOrigin {
            start_x: x,
            start_offset: metrics.offset,
        });
        self.state.is_dragging = true;
    }

    /// Track a drag. The new offset is parked in the frame gate; the host
    /// applies it on the next animation frame via [`Self::on_frame`].
    pub fn pointer_move(&mut self, x: f64) {
        if let Some(drag) = self.drag {
            self.frame.request(drag.start_offset + (drag.start_x - x));
        }
    }

    /// Apply the latest parked drag offset. Call once per animation frame.
    pub fn on_frame(&mut self, surface: &mut impl ScrollSurface) {
        if let Some(offset) = self.frame.take() {
            surface.set_offset(offset);
        }
    }

    /// End a drag (pointer released or left the track) and recompute the
    /// boundary flags immediately.
    pub fn pointer_up(&mut self, surface: &mut impl ScrollSurface) {
        if self.drag.take().is_none() {
            return;
        }
        self.state.is_dragging = false;
        // Flush a parked move so the release position is not lost.
        if let Some(offset) = self.frame.take() {
            surface.set_offset(offset);
        }
        self.refresh(surface);
    }

    // --- Buttons and keyboard ----------------------------------------------

    /// Scroll one viewport backward, animated. No-op at the boundary.
    pub fn scroll_prev(&mut self, now: Timestamp, surface: &mut impl ScrollSurface) {
        if self.is_inert() || !self.state.can_scroll_prev {
            return;
        }
        let Some(metrics) = surface.metrics() else {
            return;
        };
        surface.scroll_by(-metrics.viewport_extent, ScrollBehavior::Smooth);
        self.schedule_rechecks(now);
    }

    /// Scroll one viewport forward, animated. No-op at the boundary.
    pub fn scroll_next(&mut self, now: Timestamp, surface: &mut impl ScrollSurface) {
        if self.is_inert() || !self.state.can_scroll_next {
            return;
        }
        let Some(metrics) = surface.metrics() else {
            return;
        };
        surface.scroll_by(metrics.viewport_extent, ScrollBehavior::Smooth);
        self.schedule_rechecks(now);
    }

    /// Handle a key aimed at the carousel. Returns whether the key was
    /// consumed (the host then suppresses its default page scroll).
    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        now: Timestamp,
        surface: &mut impl ScrollSurface,
    ) -> bool {
        if self.is_inert() {
            return false;
        }
        match key.code {
            KeyCode::Left => {
                self.scroll_prev(now, surface);
                true
            }
            KeyCode::Right => {
                self.scroll_next(now, surface);
                true
            }
            KeyCode::Home => {
                self.scroll_to_edge(now, surface, Edge::Start);
                true
            }
            KeyCode::End => {
                self.scroll_to_edge(now, surface, Edge::End);
                true
            }
            _ => false,
        }
    }

    fn scroll_to_edge(&mut self, now: Timestamp, surface: &mut impl ScrollSurface, edge: Edge) {
        let Some(metrics) = surface.metrics() else {
            return;
        };
        if metrics.overflow() <= self.config.tolerance {
            return;
        }
        let delta = match edge {
            Edge::Start => -metrics.offset,
            Edge::End => metrics.max_offset() - metrics.offset,
        };
        surface.scroll_by(delta, ScrollBehavior::Smooth);
        self.schedule_rechecks(now);
    }

    // --- Continuous recomputation ------------------------------------------

    /// A scroll event fired on the track. Refreshes through the throttle.
    pub fn on_scroll(&mut self, now: Timestamp, surface: &impl ScrollSurface) {
        if self.is_inert() {
            return;
        }
        if self.scroll_throttle.invoke(now, ()).is_some() {
            self.refresh(surface);
        }
    }

    /// The window resized. Extents can change without a scroll event, so
    /// refresh once the debounce settles.
    pub fn on_resize(&mut self, now: Timestamp) {
        if self.is_inert() {
            return;
        }
        self.resize_debounce.invoke(now, ());
    }

    /// Fire everything that has come due: trailing throttle and debounce
    /// executions, and post-command boundary re-checks.
    pub fn tick(&mut self, now: Timestamp, surface: &impl ScrollSurface) {
        if self.is_inert() {
            return;
        }
        let mut stale = false;
        if self.scroll_throttle.poll(now).is_some() {
            stale = true;
        }
        if self.resize_debounce.poll(now).is_some() {
            stale = true;
        }
        while self.timers.pop_due(now).is_some() {
            stale = true;
        }
        if stale {
            self.refresh(surface);
        }
    }

    /// When the host should call [`Self::tick`] next, if at all.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Timestamp> {
        [
            self.scroll_throttle.deadline(),
            self.resize_debounce.deadline(),
            self.timers.next_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Event sources this carousel currently wants.
    #[must_use]
    pub fn interests(&self) -> Interests {
        if self.is_inert() {
            return Interests::empty();
        }
        let mut interests = Interests::SCROLL | Interests::RESIZE;
        if self.state.is_dragging {
            interests |= Interests::POINTER;
        }
        if self.frame.is_pending() {
            interests |= Interests::FRAMES;
        }
        interests
    }

    /// Unmount: cancel every pending timer and frame request and go inert.
    pub fn teardown(&mut self) {
        self.timers.clear();
        self.recheck_tokens.clear();
        self.frame.cancel();
        self.scroll_throttle.cancel();
        self.resize_debounce.cancel();
        self.drag = None;
        self.state.is_dragging = false;
        self.torn_down = true;
    }

    // --- Internals ---------------------------------------------------------

    /// Replace the pending re-check pair with a fresh one.
    fn schedule_rechecks(&mut self, now: Timestamp) {
        for token in self.recheck_tokens.drain(..) {
            self.timers.cancel(token);
        }
        self.recheck_tokens
            .push(self.timers.schedule(now, self.config.recheck_start, Recheck));
        self.recheck_tokens
            .push(self.timers.schedule(now, self.config.recheck_settle, Recheck));
    }

    /// Re-read geometry and recompute the boundary flags. Tolerates offsets
    /// transiently outside the legal range during animated scrolls.
    fn refresh(&mut self, surface: &impl ScrollSurface) {
        let Some(metrics) = surface.metrics() else {
            return;
        };
        self.apply_metrics(metrics);
    }

    fn apply_metrics(&mut self, metrics: ScrollMetrics) {
        self.state.scroll_offset = metrics.offset;
        self.state.track_extent = metrics.track_extent;
        self.state.viewport_extent = metrics.viewport_extent;
        let overflow = metrics.overflow();
        if overflow <= self.config.tolerance {
            self.state.can_scroll_prev = false;
            self.state.can_scroll_next = false;
        } else {
            self.state.can_scroll_prev = metrics.offset > self.config.tolerance;
            self.state.can_scroll_next = metrics.offset < overflow - self.config.tolerance;
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Edge {
    Start,
    End,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
