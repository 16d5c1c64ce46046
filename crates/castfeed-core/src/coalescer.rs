#![forbid(unsafe_code)]

//! Event coalescing for high-frequency viewport events.
//!
//! Scroll events can fire per frame during a fling, and resize observers can
//! report every intermediate size while a pane is dragged. Recomputing the
//! window for each one wastes work: only the latest position matters.
//!
//! This module provides [`ViewportCoalescer`] which:
//! - Coalesces consecutive scroll events (latest offset wins)
//! - Coalesces consecutive resize events (latest height wins)
//! - Passes list-change events through immediately
//!
//! # Design
//!
//! The coalescer uses a "latest wins" strategy for coalescable events and
//! holds at most one pending scroll and one pending resize. It never drops
//! information the windowing layer cares about: the window is a function of
//! the *current* scroll offset and container height, not their history.
//!
//! List changes are not coalescable, since the windowing layer must observe
//! every length change to keep its indices in bounds, so they pass through
//! immediately. The caller is responsible for flushing pending events once
//! per frame (or at whatever cadence it renders).
//!
//! # Usage
//!
//! ```
//! use castfeed_core::coalescer::ViewportCoalescer;
//! use castfeed_core::event::ViewportEvent;
//!
//! let mut coalescer = ViewportCoalescer::new();
//!
//! // Scroll events coalesce - only the latest offset is kept.
//! assert!(coalescer.push(ViewportEvent::Scroll { top: 120 }).is_none());
//! assert!(coalescer.push(ViewportEvent::Scroll { top: 480 }).is_none());
//!
//! // List changes pass through immediately (no auto-flush).
//! let passed = coalescer.push(ViewportEvent::ItemsChanged { len: 42 });
//! assert_eq!(passed, Some(ViewportEvent::ItemsChanged { len: 42 }));
//!
//! // Caller must explicitly flush to get pending coalesced events.
//! let pending = coalescer.flush();
//! assert_eq!(pending, vec![ViewportEvent::Scroll { top: 480 }]);
//! ```

use crate::event::ViewportEvent;

/// Coalesces high-frequency viewport events to prevent event storms.
///
/// # Thread Safety
///
/// `ViewportCoalescer` is not thread-safe. It should be used from the single
/// execution context that owns the rendered list.
///
/// # Performance
///
/// All operations are O(1). The coalescer holds at most two pending events
/// (one scroll and one resize).
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewportCoalescer {
    /// Pending scroll offset (latest wins).
    pending_scroll: Option<u64>,

    /// Pending container height (latest wins).
    pending_resize: Option<u32>,
}

impl ViewportCoalescer {
    /// Create a new coalescer with nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an event into the coalescer.
    ///
    /// Returns `Some(event)` if the event should be processed immediately,
    /// or `None` if the event was coalesced and is pending.
    pub fn push(&mut self, event: ViewportEvent) -> Option<ViewportEvent> {
        match event {
            ViewportEvent::Scroll { top } => {
                self.pending_scroll = Some(top);
                None
            }
            ViewportEvent::Resize { height } => {
                self.pending_resize = Some(height);
                None
            }
            ViewportEvent::ItemsChanged { .. } => Some(event),
        }
    }

    /// Drain pending coalesced events, scroll first, then resize.
    ///
    /// Scroll is drained first so that a resize arriving mid-fling is applied
    /// to the final scroll position rather than a stale one.
    pub fn flush(&mut self) -> Vec<ViewportEvent> {
        let mut out = Vec::with_capacity(2);
        if let Some(top) = self.pending_scroll.take() {
            out.push(ViewportEvent::Scroll { top });
        }
        if let Some(height) = self.pending_resize.take() {
            out.push(ViewportEvent::Resize { height });
        }
        out
    }

    /// Whether any coalesced event is waiting to be flushed.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending_scroll.is_some() || self.pending_resize.is_some()
    }
}
