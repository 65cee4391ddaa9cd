#![forbid(unsafe_code)]

//! Focus trapping for the overlay.
//!
//! The host enumerates potentially focusable descendants of the overlay
//! container ([`FocusCandidate`], with computed visibility); the scope
//! filters them to the actually focusable set and decides how Tab moves.
//! The set is re-evaluated on every activation, never cached across
//! activations, because content behind the overlay can change between
//! openings.

use vitrine_core::surface::{FocusCandidate, FocusId, FocusKind};

/// What the host should do with a Tab keypress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabFlow {
    /// Let the host's native tab order handle it.
    Native,

    /// Suppress the native move and focus this element instead.
    Intercept(FocusId),
}

/// A focus trap over the currently open overlay.
///
/// While active, Tab from the last element wraps to the first, Shift+Tab
/// from the first wraps to the last, and a single focusable element keeps
/// focus pinned. Deactivation stops interception; restoring the previously
/// focused element is the caller's responsibility.
#[derive(Debug, Clone, Default)]
pub struct FocusScope {
    order: Vec<FocusId>,
    active: bool,
}

impl FocusScope {
    /// An inactive scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate over a fresh enumeration of candidates.
    ///
    /// Returns the element to focus (the first focusable one), or `None`
    /// when nothing is focusable, in which case the scope stays inactive
    /// and every Tab flows natively.
    pub fn activate(&mut self, candidates: &[FocusCandidate]) -> Option<FocusId> {
        self.order = candidates
            .iter()
            .filter(|c| Self::focusable(c))
            .map(|c| c.id)
            .collect();
        self.active = !self.order.is_empty();
        self.order.first().copied()
    }

    /// Stop intercepting. Does not restore prior focus.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.order.clear();
    }

    /// Whether the scope is currently trapping focus.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Decide how a Tab (or Shift+Tab) keypress flows.
    ///
    /// `focused` is the host-reported currently focused element; `None` or
    /// an element outside the scope falls back to native order.
    #[must_use]
    pub fn handle_tab(&self, shift: bool, focused: Option<FocusId>) -> TabFlow {
        if !self.active {
            return TabFlow::Native;
        }
        if self.order.len() == 1 {
            return TabFlow::Intercept(self.order[0]);
        }
        let Some(pos) = focused.and_then(|id| self.order.iter().position(|&o| o == id)) else {
            return TabFlow::Native;
        };
        match (shift, pos) {
            (false, p) if p == self.order.len() - 1 => TabFlow::Intercept(self.order[0]),
            (true, 0) => TabFlow::Intercept(self.order[self.order.len() - 1]),
            _ => TabFlow::Native,
        }
    }

    fn focusable(candidate: &FocusCandidate) -> bool {
        if candidate.disabled || !candidate.visible {
            return false;
        }
        match candidate.kind {
            FocusKind::Native => true,
            FocusKind::TabIndex(index) => index >= 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::surface::FocusCandidate;

    #[test]
    fn activation_filters_and_focuses_first() {
        let mut scope = FocusScope::new();
        let focused = scope.activate(&[
            FocusCandidate::native(1).disabled(),
            FocusCandidate::native(2).hidden(),
            FocusCandidate::tab_index(3, -1),
            FocusCandidate::native(4),
            FocusCandidate::tab_index(5, 0),
        ]);
        assert_eq!(focused, Some(FocusId(4)));
        assert!(scope.is_active());
    }

    #[test]
    fn empty_candidate_set_is_a_noop() {
        let mut scope = FocusScope::new();
        assert_eq!(scope.activate(&[FocusCandidate::native(1).hidden()]), None);
        assert!(!scope.is_active());
        assert_eq!(scope.handle_tab(false, Some(FocusId(1))), TabFlow::Native);
    }

    #[test]
    fn single_element_pins_focus() {
        let mut scope = FocusScope::new();
        scope.activate(&[FocusCandidate::native(7)]);
        // Tab never moves focus off the only element, in either direction.
        for shift in [false, true] {
            assert_eq!(
                scope.handle_tab(shift, Some(FocusId(7))),
                TabFlow::Intercept(FocusId(7))
            );
        }
    }

    #[test]
    fn tab_wraps_at_the_edges() {
        let mut scope = FocusScope::new();
        scope.activate(&[
            FocusCandidate::native(1),
            FocusCandidate::native(2),
            FocusCandidate::native(3),
        ]);
        assert_eq!(
            scope.handle_tab(false, Some(FocusId(3))),
            TabFlow::Intercept(FocusId(1))
        );
        assert_eq!(
            scope.handle_tab(true, Some(FocusId(1))),
            TabFlow::Intercept(FocusId(3))
        );
    }

    #[test]
    fn interior_positions_use_native_order() {
        let mut scope = FocusScope::new();
        scope.activate(&[
            FocusCandidate::native(1),
            FocusCandidate::native(2),
            FocusCandidate::native(3),
        ]);
        assert_eq!(scope.handle_tab(false, Some(FocusId(1))), TabFlow::Native);
        assert_eq!(scope.handle_tab(true, Some(FocusId(2))), TabFlow::Native);
    }

    #[test]
    fn unknown_focus_falls_back_to_native() {
        let mut scope = FocusScope::new();
        scope.activate(&[FocusCandidate::native(1), FocusCandidate::native(2)]);
        assert_eq!(scope.handle_tab(false, None), TabFlow::Native);
        assert_eq!(scope.handle_tab(false, Some(FocusId(99))), TabFlow::Native);
    }

    #[test]
    fn reactivation_reenumerates() {
        let mut scope = FocusScope::new();
        scope.activate(&[FocusCandidate::native(1)]);
        let focused = scope.activate(&[FocusCandidate::native(8), FocusCandidate::native(9)]);
        assert_eq!(focused, Some(FocusId(8)));
        assert_eq!(scope.handle_tab(false, Some(FocusId(1))), TabFlow::Native);
    }
}
