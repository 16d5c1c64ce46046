#![forbid(unsafe_code)]

//! List windowing (virtualization) for long feeds.
//!
//! Rendering a feed of hundreds of media-heavy entries by mounting every one
//! is what makes long lists crawl. This crate computes the minimal contiguous
//! slice that must be mounted to cover the viewport plus an overscan margin,
//! so mounted-item count is bounded by the viewport, never by list length.
//!
//! # Core Types
//!
//! - [`ViewportWindow`] - the computed slice: indices, pixel offset, total height
//! - [`WindowState`] - `Empty` or `Windowed`, the whole lifecycle
//! - [`WindowEngine`] - scroll-state container driving recomputation
//! - [`compute_window`] - the pure function underneath it all
//!
//! # Design
//!
//! All geometry lives in one pure function, [`compute_window`]; the
//! [`WindowEngine`] is a thin stateful adapter that remembers the current
//! scroll offset, container height, and item count between events. Every
//! update is O(1) - no operation ever re-scans the list - so the engine is
//! safe to drive from unthrottled scroll events, and calling it twice with
//! the same offset returns an identical window.
//!
//! The engine reserves the full scroll height (`item_count × item_height`)
//! on every update, so the native scrollbar keeps correct proportions no
//! matter how few items are actually mounted.

pub mod engine;
pub mod window;

pub use engine::{WindowEngine, WindowError, WindowPersistState};
pub use window::{ViewportWindow, WindowState, compute_window};
