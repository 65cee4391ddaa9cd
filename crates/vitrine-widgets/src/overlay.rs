#![forbid(unsafe_code)]

//! Full-screen navigation overlay controller.
//!
//! A state machine over [`OverlayState`]: visibility, active/content
//! selection, responsive pane layout, and focus/escape handling. Pane
//! visibility is derived from state, never stored: on wide viewports both
//! panes render side by side; on narrow viewports selection drills down
//! into the submenu pane and `back()` returns to the item list.
//!
//! The host wires it up by forwarding events and reconciling
//! [`NavigationOverlay::interests`] after every call: the document-level
//! key listener exists exactly while the overlay is open, so Escape
//! dismissal cannot leak a global listener.
//!
//! Focus trapping needs the host's cooperation once per opening: after
//! `open()`, enumerate the overlay's focus candidates and pass them to
//! [`NavigationOverlay::activate_focus`], then route Tab keys through
//! [`NavigationOverlay::handle_key`].

use vitrine_core::event::{KeyCode, KeyEvent};
use vitrine_core::subscription::Interests;
use vitrine_core::surface::{FocusCandidate, FocusId};
use vitrine_core::warn;

use crate::focus::{FocusScope, TabFlow};
use crate::menu::{MenuModel, SubmenuEntry};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the overlay's responsive behavior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayConfig {
    /// Viewport widths at or below this threshold use the narrow
    /// (drill-down) layout. Default: 768.
    pub breakpoint: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self { breakpoint: 768.0 }
    }
}

impl OverlayConfig {
    /// Set the breakpoint width.
    #[must_use]
    pub fn breakpoint(mut self, width: f64) -> Self {
        self.breakpoint = width;
        self
    }

    /// Classify a viewport width against the breakpoint.
    #[must_use]
    pub fn is_narrow(&self, width: f64) -> bool {
        width <= self.breakpoint
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Mutable overlay state. `active_id` and `content_id` always name valid
/// menu items; they are equal except after selecting the account item,
/// which highlights without replacing content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayState {
    /// Whether the overlay is shown.
    pub is_open: bool,

    /// Id of the highlighted item.
    pub active_id: String,

    /// Id of the item whose content the right pane shows.
    pub content_id: String,

    /// Narrow-viewport drill-down: whether the submenu pane is the visible
    /// one. Meaningless on wide viewports, where both panes render.
    pub submenu_view: bool,

    /// Whether the viewport is at or below the breakpoint.
    pub is_narrow_viewport: bool,
}

// ---------------------------------------------------------------------------
// View projection
// ---------------------------------------------------------------------------

/// One left-pane list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    /// Item id, echoed back through `select_item`.
    pub id: String,

    /// Display label.
    pub label: String,

    /// Whether the row renders highlighted.
    pub active: bool,

    /// Whether the row shows the drill-down affordance.
    pub has_submenu: bool,
}

/// One right-pane submenu card with its description pre-segmented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmenuCard {
    /// The underlying entry.
    pub entry: SubmenuEntry,

    /// Trimmed bullet items from the entry's description.
    pub bullets: Vec<String>,
}

/// Content of the right pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RightPane {
    /// The content item has no submenu yet.
    Unavailable,

    /// Submenu entries in catalog order.
    Submenu(Vec<SubmenuCard>),
}

/// Renderable snapshot of the overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayView {
    /// Whether the overlay is shown at all.
    pub is_open: bool,

    /// Whether the host should hold background page scroll.
    pub scroll_locked: bool,

    /// Whether the item list pane renders.
    pub show_left_pane: bool,

    /// Whether the content pane renders.
    pub show_right_pane: bool,

    /// Whether the content pane shows the back affordance (narrow
    /// drill-down only).
    pub show_back: bool,

    /// Heading of the content pane: the content item's label.
    pub title: String,

    /// Left-pane rows in display order.
    pub items: Vec<ItemView>,

    /// Right-pane content.
    pub right_pane: RightPane,
}

/// What the host should do with a key it forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// Not the overlay's key; let it flow.
    Ignored,

    /// Consumed; suppress the host default.
    Handled,

    /// Consumed; suppress the default and focus this element.
    Refocus(FocusId),
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// The navigation overlay state machine.
#[derive(Debug, Clone)]
pub struct NavigationOverlay {
    model: MenuModel,
    config: OverlayConfig,
    state: OverlayState,
    focus: FocusScope,
}

impl NavigationOverlay {
    /// Create a closed overlay over a menu, defaulting the selection to the
    /// first item and a wide viewport.
    #[must_use]
    pub fn new(model: MenuModel) -> Self {
        let first = model.first_id().to_string();
        Self {
            model,
            config: OverlayConfig::default(),
            state: OverlayState {
                is_open: false,
                active_id: first.clone(),
                content_id: first,
                submenu_view: false,
                is_narrow_viewport: false,
            },
            focus: FocusScope::new(),
        }
    }

    /// Replace the responsive configuration.
    #[must_use]
    pub fn with_config(mut self, config: OverlayConfig) -> Self {
        self.config = config;
        self
    }

    /// The menu this overlay presents.
    #[must_use]
    pub fn model(&self) -> &MenuModel {
        &self.model
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    /// The responsive configuration.
    #[must_use]
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    // --- Transitions -------------------------------------------------------

    /// Show the overlay. Selection persists from the previous opening.
    pub fn open(&mut self) {
        self.state.is_open = true;
    }

    /// Hide the overlay and leave drill-down. Selection is kept.
    pub fn close(&mut self) {
        self.state.is_open = false;
        self.state.submenu_view = false;
        self.focus.deactivate();
    }

    /// Open if closed, close if open.
    pub fn toggle(&mut self) {
        if self.state.is_open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Select a menu item.
    ///
    /// The account item only moves the highlight; everything else also
    /// replaces the content pane and, on narrow viewports, drills down.
    /// Unknown ids are rejected so the state never holds an invalid id.
    /// Returns whether the selection was applied.
    pub fn select_item(&mut self, id: &str) -> bool {
        if !self.model.contains(id) {
            warn!(id, "ignoring selection of unknown menu item");
            return false;
        }
        self.state.active_id = id.to_string();
        if self.model.is_account(id) {
            if self.state.is_narrow_viewport {
                self.state.submenu_view = false;
            }
        } else {
            self.state.content_id = id.to_string();
            if self.state.is_narrow_viewport {
                self.state.submenu_view = true;
            }
        }
        true
    }

    /// Leave drill-down and return to the item list. Narrow viewports only.
    pub fn back(&mut self) {
        if self.state.is_narrow_viewport {
            self.state.submenu_view = false;
        }
    }

    /// Record a viewport breakpoint change. Selection and drill-down state
    /// are untouched; only derived pane visibility changes.
    pub fn viewport_change(&mut self, narrow: bool) {
        self.state.is_narrow_viewport = narrow;
    }

    /// The backdrop behind the panel was pressed.
    pub fn backdrop_pressed(&mut self) {
        self.close();
    }

    // --- Focus and keys ----------------------------------------------------

    /// Activate the focus trap over a fresh enumeration of the overlay's
    /// focus candidates. Call after every `open()`; returns the element to
    /// focus. No-op while closed.
    pub fn activate_focus(&mut self, candidates: &[FocusCandidate]) -> Option<FocusId> {
        if !self.state.is_open {
            return None;
        }
        self.focus.activate(candidates)
    }

    /// Handle a key forwarded from the document-level listener.
    ///
    /// `focused` is the host-reported currently focused element, consulted
    /// for Tab cycling.
    pub fn handle_key(&mut self, key: KeyEvent, focused: Option<FocusId>) -> KeyDisposition {
        if !self.state.is_open {
            return KeyDisposition::Ignored;
        }
        match key.code {
            KeyCode::Escape => {
                self.close();
                KeyDisposition::Handled
            }
            KeyCode::Tab | KeyCode::BackTab => {
                let shift = key.shift() || key.code == KeyCode::BackTab;
                match self.focus.handle_tab(shift, focused) {
                    TabFlow::Native => KeyDisposition::Ignored,
                    TabFlow::Intercept(id) => KeyDisposition::Refocus(id),
                }
            }
            _ => KeyDisposition::Ignored,
        }
    }

    // --- Derived -----------------------------------------------------------

    /// Whether the item list pane renders.
    #[must_use]
    pub fn show_left_pane(&self) -> bool {
        !self.state.is_narrow_viewport || !self.state.submenu_view
    }

    /// Whether the content pane renders.
    #[must_use]
    pub fn show_right_pane(&self) -> bool {
        !self.state.is_narrow_viewport || self.state.submenu_view
    }

    /// Whether the host should hold background page scroll.
    #[must_use]
    pub fn scroll_locked(&self) -> bool {
        self.state.is_open
    }

    /// Event sources this overlay currently wants. Viewport notifications
    /// for the lifetime of the mount; the global key listener only while
    /// open.
    #[must_use]
    pub fn interests(&self) -> Interests {
        let mut interests = Interests::VIEWPORT;
        if self.state.is_open {
            interests |= Interests::GLOBAL_KEYS;
        }
        interests
    }

    /// Renderable snapshot of the whole overlay.
    #[must_use]
    pub fn view(&self) -> OverlayView {
        let content = self.model.get(&self.state.content_id);
        let right_pane = match content {
            Some(item) if item.has_submenu() => RightPane::Submenu(
                item.submenu()
                    .iter()
                    .map(|entry| SubmenuCard {
                        bullets: entry.description_bullets(),
                        entry: entry.clone(),
                    })
                    .collect(),
            ),
            _ => RightPane::Unavailable,
        };
        OverlayView {
            is_open: self.state.is_open,
            scroll_locked: self.scroll_locked(),
            show_left_pane: self.show_left_pane(),
            show_right_pane: self.show_right_pane(),
            show_back: self.state.is_narrow_viewport && self.state.submenu_view,
            title: content.map(|item| item.label().to_string()).unwrap_or_default(),
            items: self
                .model
                .items()
                .iter()
                .map(|item| ItemView {
                    id: item.id().to_string(),
                    label: item.label().to_string(),
                    active: item.id() == self.state.active_id,
                    has_submenu: item.has_submenu(),
                })
                .collect(),
            right_pane,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
