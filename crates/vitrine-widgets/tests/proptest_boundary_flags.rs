//! Property-based invariant tests for carousel boundary flags.
//!
//! For any geometry the host can report:
//!
//! 1. Flags agree with the defining comparisons against tolerance.
//! 2. No overflow (within tolerance) means both flags are off.
//! 3. Flags are never both on unless the overflow exceeds both tolerance
//!    bands.
//! 4. Out-of-range offsets (mid-animation reads) never panic and never
//!    enable the flag on the side being overshot.

use proptest::prelude::*;
use vitrine_harness::FakeSurface;
use vitrine_widgets::carousel::CarouselController;
use vitrine_widgets::catalog::{Catalog, CatalogRecord};

const TOLERANCE: f64 = 1.0;

fn controller() -> CarouselController {
    CarouselController::new(&Catalog::from_records([CatalogRecord {
        id: "only".to_string(),
        name: "Only".to_string(),
        description_short: "one".to_string(),
        meta: None,
        link: None,
    }]))
}

proptest! {
    #[test]
    fn flags_match_their_defining_comparisons(
        offset in 0.0f64..2_000.0,
        track in 0.0f64..4_000.0,
        viewport in 1.0f64..1_500.0,
    ) {
        let mut c = controller();
        c.mount(&FakeSurface::new(track, viewport).with_offset(offset));
        let state = c.state();

        let overflow = (track - viewport).max(0.0);
        let clamped = offset.clamp(0.0, overflow);
        if overflow <= TOLERANCE {
            prop_assert!(!state.can_scroll_prev && !state.can_scroll_next);
        } else {
            prop_assert_eq!(state.can_scroll_prev, clamped > TOLERANCE);
            prop_assert_eq!(state.can_scroll_next, clamped < overflow - TOLERANCE);
        }
    }
}

proptest! {
    #[test]
    fn both_flags_require_room_for_both_bands(
        offset in 0.0f64..100.0,
        track in 0.0f64..400.0,
        viewport in 1.0f64..400.0,
    ) {
        let mut c = controller();
        c.mount(&FakeSurface::new(track, viewport).with_offset(offset));
        let state = c.state();

        let overflow = (track - viewport).max(0.0);
        if overflow <= 2.0 * TOLERANCE {
            prop_assert!(!(state.can_scroll_prev && state.can_scroll_next));
        }
    }
}

proptest! {
    #[test]
    fn transient_out_of_range_reads_are_tolerated(
        overshoot in 0.0f64..500.0,
        track in 500.0f64..2_000.0,
    ) {
        // Bypass the clamping fake: feed raw metrics through a surface
        // stand-in that reports what a mid-animation read can contain.
        struct Raw(vitrine_core::surface::ScrollMetrics);
        impl vitrine_core::surface::ScrollSurface for Raw {
            fn metrics(&self) -> Option<vitrine_core::surface::ScrollMetrics> {
                Some(self.0)
            }
            fn set_offset(&mut self, _offset: f64) {}
            fn scroll_by(&mut self, _delta: f64, _behavior: vitrine_core::surface::ScrollBehavior) {}
        }

        let viewport = 300.0;
        let overflow = track - viewport;

        let mut c = controller();
        c.mount(&Raw(vitrine_core::surface::ScrollMetrics {
            offset: -overshoot,
            track_extent: track,
            viewport_extent: viewport,
        }));
        prop_assert!(!c.state().can_scroll_prev);

        c.mount(&Raw(vitrine_core::surface::ScrollMetrics {
            offset: overflow + overshoot,
            track_extent: track,
            viewport_extent: viewport,
        }));
        prop_assert!(!c.state().can_scroll_next);
    }
}
