#![forbid(unsafe_code)]

//! Interactive view-model controllers for a landing page: the drill-down
//! navigation overlay and the horizontal product carousel, plus the catalog
//! data model they share.
//!
//! Everything here is headless. Controllers consume host events
//! ([`vitrine_core::event`]), mutate their own state, and expose renderable
//! view snapshots; the host owns the actual elements, listeners, and timers
//! and drives controllers through [`vitrine_core::timing::Timestamp`]s.

pub mod carousel;
pub mod catalog;
pub mod focus;
pub mod menu;
pub mod overlay;
pub mod text;

pub use carousel::{
    CarouselConfig, CarouselController, CarouselControls, CarouselState, CarouselView, Slide,
};
pub use catalog::{Catalog, CatalogError, CatalogRecord};
pub use focus::{FocusScope, TabFlow};
pub use menu::{ImageRef, MenuError, MenuItem, MenuModel, MenuModelBuilder, SubmenuEntry};
pub use overlay::{
    ItemView, KeyDisposition, NavigationOverlay, OverlayConfig, OverlayState, OverlayView,
    RightPane, SubmenuCard,
};
