#![forbid(unsafe_code)]

//! Stateful adapter over [`compute_window`].
//!
//! The engine remembers scroll offset, container height, overscan, and item
//! count between viewport events, recomputing the window on each one. It is
//! exclusively owned by one rendered list and lives for as long as that list
//! is mounted.

use castfeed_core::event::ViewportEvent;

use crate::window::{WindowState, compute_window};

/// Errors raised by engine construction or resizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowError {
    /// `item_height` must be positive; a zero height makes the window
    /// degenerate (division by zero, infinite visible count).
    ZeroItemHeight,
    /// `container_height` must be positive.
    ZeroContainerHeight,
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroItemHeight => write!(f, "item height must be positive"),
            Self::ZeroContainerHeight => write!(f, "container height must be positive"),
        }
    }
}

impl std::error::Error for WindowError {}

/// Scroll-state container driving window recomputation.
///
/// # Performance
///
/// Every operation is O(1); nothing ever walks the list. `on_scroll` is safe
/// to call unthrottled on every scroll event, and is idempotent: the same
/// offset twice yields an identical [`WindowState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowEngine {
    item_count: usize,
    item_height: u32,
    container_height: u32,
    overscan: usize,
    scroll_top: u64,
    state: WindowState,
}

/// Persistable scroll state for a [`WindowEngine`].
///
/// Contains the user-facing state that should survive sessions; geometry
/// that the next session re-measures (item height, item count) is omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct WindowPersistState {
    /// Scroll offset in pixels.
    pub scroll_top: u64,
    /// Last known container height in pixels.
    pub container_height: u32,
}

impl WindowEngine {
    /// Create an engine anchored at the top of a list.
    ///
    /// `item_height` is the estimated per-item pixel height; `overscan` is
    /// the number of extra items mounted beyond each viewport edge. Zero
    /// heights are rejected here rather than producing a degenerate window
    /// later.
    pub fn new(
        item_count: usize,
        item_height: u32,
        container_height: u32,
        overscan: usize,
    ) -> Result<Self, WindowError> {
        if item_height == 0 {
            return Err(WindowError::ZeroItemHeight);
        }
        if container_height == 0 {
            return Err(WindowError::ZeroContainerHeight);
        }
        let mut engine = Self {
            item_count,
            item_height,
            container_height,
            overscan,
            scroll_top: 0,
            state: WindowState::Empty,
        };
        engine.recompute();
        Ok(engine)
    }

    /// The scroll position changed.
    pub fn on_scroll(&mut self, new_scroll_top: u64) -> WindowState {
        self.scroll_top = new_scroll_top;
        self.recompute()
    }

    /// The container was resized.
    ///
    /// The same precondition as construction applies: a zero height is a
    /// caller bug, not a window of zero items.
    pub fn on_resize(&mut self, new_container_height: u32) -> Result<WindowState, WindowError> {
        if new_container_height == 0 {
            return Err(WindowError::ZeroContainerHeight);
        }
        self.container_height = new_container_height;
        Ok(self.recompute())
    }

    /// The backing list was replaced.
    ///
    /// Re-anchors at the current scroll offset against the new length, so a
    /// refresh does not yank the user back to the top; when the list shrinks
    /// below the current offset the window clamps to the last item.
    pub fn on_items_changed(&mut self, new_item_count: usize) -> WindowState {
        self.item_count = new_item_count;
        self.recompute()
    }

    /// Apply a [`ViewportEvent`] from the coalescer.
    pub fn apply(&mut self, event: ViewportEvent) -> Result<WindowState, WindowError> {
        match event {
            ViewportEvent::Scroll { top } => Ok(self.on_scroll(top)),
            ViewportEvent::Resize { height } => self.on_resize(height),
            ViewportEvent::ItemsChanged { len } => Ok(self.on_items_changed(len)),
        }
    }

    /// The current state without recomputation.
    #[inline]
    #[must_use]
    pub fn window(&self) -> WindowState {
        self.state
    }

    /// The scroll offset that puts `index` at the top of the viewport.
    ///
    /// Clamped to the maximum offset the native scrollbar allows
    /// (`total_height − container_height`), the same clamp a scroll
    /// container applies to programmatic scrolls.
    #[must_use]
    pub fn scroll_top_for(&self, index: usize) -> u64 {
        let item_height = u64::from(self.item_height);
        let target = index.min(self.item_count.saturating_sub(1)) as u64 * item_height;
        let total = self.item_count as u64 * item_height;
        target.min(total.saturating_sub(u64::from(self.container_height)))
    }

    /// Current scroll offset in pixels.
    #[inline]
    #[must_use]
    pub fn scroll_top(&self) -> u64 {
        self.scroll_top
    }

    /// Current item count.
    #[inline]
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Estimated per-item height in pixels.
    #[inline]
    #[must_use]
    pub fn item_height(&self) -> u32 {
        self.item_height
    }

    /// Current container height in pixels.
    #[inline]
    #[must_use]
    pub fn container_height(&self) -> u32 {
        self.container_height
    }

    /// Overscan margin in items.
    #[inline]
    #[must_use]
    pub fn overscan(&self) -> usize {
        self.overscan
    }

    /// Snapshot the state worth persisting across sessions.
    #[must_use]
    pub fn save_state(&self) -> WindowPersistState {
        WindowPersistState {
            scroll_top: self.scroll_top,
            container_height: self.container_height,
        }
    }

    /// Restore a previously saved snapshot.
    ///
    /// A snapshot with a zero container height (hand-edited or corrupt) is
    /// rejected just like the live value would be.
    pub fn restore_state(&mut self, state: WindowPersistState) -> Result<WindowState, WindowError> {
        if state.container_height == 0 {
            return Err(WindowError::ZeroContainerHeight);
        }
        self.scroll_top = state.scroll_top;
        self.container_height = state.container_height;
        Ok(self.recompute())
    }

    fn recompute(&mut self) -> WindowState {
        self.state = compute_window(
            self.scroll_top,
            self.item_height,
            self.overscan,
            self.container_height,
            self.item_count,
        );
        #[cfg(feature = "tracing")]
        if let WindowState::Windowed(w) = self.state {
            tracing::trace!(
                scroll_top = self.scroll_top,
                start = w.start_index,
                end = w.end_index,
                mounted = w.len(),
                "window recomputed"
            );
        }
        self.state
    }
}
