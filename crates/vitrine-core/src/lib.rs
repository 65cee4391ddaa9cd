#![forbid(unsafe_code)]

//! Core: input events, virtual timing, rate limiters, and host contracts.

pub mod event;
pub mod logging;
pub mod rate_limit;
pub mod subscription;
pub mod surface;
pub mod timing;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, error, info, trace, warn};
