//! Window management using winit, plus the shared viewport handoff

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use winit::{
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::EventLoop,
    window::{Window as WinitWindow, WindowBuilder},
};

/// Viewport dimensions shared between the UI thread and the render thread.
///
/// The UI thread writes on every resize event; the render thread consumes the
/// dirty flag once per loop iteration and reads the current dimensions. A
/// burst of resizes between frames collapses to a single consumption of the
/// final size. Lost updates cost at most a one-frame-late resize.
pub struct ViewportState {
    width: AtomicU32,
    height: AtomicU32,
    dirty: AtomicBool,
}

impl ViewportState {
    /// Create the viewport state with the dirty flag already set, so the
    /// render thread configures itself on its first iteration.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: AtomicU32::new(width),
            height: AtomicU32::new(height),
            dirty: AtomicBool::new(true),
        }
    }

    /// Record a resize event. Called from the UI thread.
    pub fn record_resize(&self, width: u32, height: u32) {
        self.width.store(width, Ordering::Relaxed);
        self.height.store(height, Ordering::Relaxed);
        self.dirty.store(true, Ordering::Release);
    }

    /// Consume the dirty flag, returning the current dimensions if a resize
    /// happened since the last consumption. Called from the render thread.
    pub fn consume(&self) -> Option<(u32, u32)> {
        if self.dirty.swap(false, Ordering::Acquire) {
            Some(self.dimensions())
        } else {
            None
        }
    }

    /// Get the current viewport dimensions without clearing the flag.
    pub fn dimensions(&self) -> (u32, u32) {
        (
            self.width.load(Ordering::Relaxed),
            self.height.load(Ordering::Relaxed),
        )
    }
}

/// Wrapper around a winit window that forwards resize events into the shared
/// viewport state.
pub struct Window {
    window: Arc<WinitWindow>,
    viewport: Arc<ViewportState>,
}

impl Window {
    /// Create a new window with the given title and dimensions
    pub fn new(event_loop: &EventLoop<()>, title: &str, width: u32, height: u32) -> Self {
        let window = Arc::new(
            WindowBuilder::new()
                .with_title(title)
                .with_inner_size(PhysicalSize::new(width, height))
                .build(event_loop)
                .expect("Failed to create window"),
        );

        let size = window.inner_size();
        let viewport = Arc::new(ViewportState::new(size.width, size.height));

        Self { window, viewport }
    }

    /// Get arc reference to the window for engine initialization
    pub fn window_arc(&self) -> Arc<WinitWindow> {
        Arc::clone(&self.window)
    }

    /// Get arc reference to the shared viewport state
    pub fn viewport(&self) -> Arc<ViewportState> {
        Arc::clone(&self.viewport)
    }

    /// Handle window events on the UI thread
    pub fn handle_event(&self, event: &WindowEvent) {
        if let WindowEvent::Resized(size) = event {
            self.viewport.record_resize(size.width, size.height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_dirty() {
        let viewport = ViewportState::new(800, 600);
        assert_eq!(viewport.consume(), Some((800, 600)));
        assert_eq!(viewport.consume(), None);
    }

    #[test]
    fn test_consume_clears_flag() {
        let viewport = ViewportState::new(800, 600);
        viewport.consume();

        viewport.record_resize(1024, 768);
        assert_eq!(viewport.consume(), Some((1024, 768)));
        assert_eq!(viewport.consume(), None);
    }

    #[test]
    fn test_resize_burst_consumed_once() {
        let viewport = ViewportState::new(800, 600);
        viewport.consume();

        viewport.record_resize(900, 700);
        viewport.record_resize(1000, 800);
        viewport.record_resize(640, 480);

        // Only the final size of the burst survives.
        assert_eq!(viewport.consume(), Some((640, 480)));
        assert_eq!(viewport.consume(), None);
    }

    #[test]
    fn test_dimensions_do_not_clear() {
        let viewport = ViewportState::new(800, 600);
        assert_eq!(viewport.dimensions(), (800, 600));
        assert_eq!(viewport.consume(), Some((800, 600)));
    }
}
