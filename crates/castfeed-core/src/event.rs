#![forbid(unsafe_code)]

//! Viewport events consumed by the windowing layer.

/// An event affecting the visible window of a rendered feed.
///
/// The data fetching that supplies the feed itself is out of scope; callers
/// translate whatever their UI toolkit reports (scroll offsets, container
/// measurements, list refreshes) into these three shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportEvent {
    /// The scroll position changed. `top` is the new offset in pixels.
    Scroll {
        /// New scroll offset from the top of the list, in pixels.
        top: u64,
    },
    /// The scroll container was resized. `height` is the new viewport height.
    Resize {
        /// New container height in pixels.
        height: u32,
    },
    /// The backing list was replaced; `len` is the new item count.
    ItemsChanged {
        /// Item count of the new list.
        len: usize,
    },
}
