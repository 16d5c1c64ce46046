#![forbid(unsafe_code)]

//! Core data model and event plumbing for CastFeed.
//!
//! This crate defines the feed entry model shared by the ranking and
//! windowing crates, plus the viewport event types and a coalescer for
//! taming high-frequency scroll/resize bursts.

pub mod coalescer;
pub mod entry;
pub mod event;

pub use coalescer::ViewportCoalescer;
pub use entry::{EntryError, EntryStatus, FeedEntry, MediaClass, validate_snapshot};
pub use event::ViewportEvent;
