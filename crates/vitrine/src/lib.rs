#![forbid(unsafe_code)]

//! Vitrine public facade crate.
//!
//! Re-exports the stable surface of the core and widget crates and offers a
//! lightweight prelude for hosts wiring the controllers into a real page.

// --- Core re-exports -------------------------------------------------------

pub use vitrine_core::event::{
    KeyCode, KeyEvent, Modifiers, PointerEvent, PointerEventKind,
};
pub use vitrine_core::rate_limit::{Debounce, FrameGate, Throttle};
pub use vitrine_core::subscription::{InterestDiff, Interests};
pub use vitrine_core::surface::{
    FocusCandidate, FocusId, FocusKind, ScrollBehavior, ScrollMetrics, ScrollSurface,
};
pub use vitrine_core::timing::{TimerQueue, TimerToken, Timestamp};

// --- Widget re-exports -----------------------------------------------------

pub use vitrine_widgets::carousel::{
    CarouselConfig, CarouselController, CarouselControls, CarouselState, CarouselView, Slide,
};
pub use vitrine_widgets::catalog::{Catalog, CatalogError, CatalogRecord};
pub use vitrine_widgets::focus::{FocusScope, TabFlow};
pub use vitrine_widgets::menu::{
    ImageRef, MenuError, MenuItem, MenuModel, MenuModelBuilder, SubmenuEntry,
};
pub use vitrine_widgets::overlay::{
    ItemView, KeyDisposition, NavigationOverlay, OverlayConfig, OverlayState, OverlayView,
    RightPane, SubmenuCard,
};
pub use vitrine_widgets::text::bullet_points;

/// Common imports for host glue code.
pub mod prelude {
    pub use vitrine_core::event::{KeyCode, KeyEvent, PointerEvent, PointerEventKind};
    pub use vitrine_core::subscription::Interests;
    pub use vitrine_core::surface::{ScrollBehavior, ScrollSurface};
    pub use vitrine_core::timing::Timestamp;
    pub use vitrine_widgets::carousel::CarouselController;
    pub use vitrine_widgets::catalog::Catalog;
    pub use vitrine_widgets::menu::MenuModel;
    pub use vitrine_widgets::overlay::NavigationOverlay;
}
