//! Triangle Sandbox - a minimal desktop sandbox for the wgpu rendering engine
//!
//! Opens a single resizable window and renders one rotating, vertex-colored
//! triangle. The whole point is to exercise the engine's material/mesh/camera
//! APIs from a dedicated render thread and to compare how two different
//! surface presentation strategies behave under window resize.

pub mod engine;
pub mod material;
pub mod mesh;
pub mod sandbox;
pub mod scene;
pub mod window;

pub use engine::{Engine, EngineError, EngineResult};
pub use material::Material;
pub use mesh::{Mesh, Vertex};
pub use sandbox::Sandbox;
pub use window::Window;

/// Surface presentation strategy under comparison.
///
/// The sandbox always paces itself with a fixed sleep; the strategy only
/// decides whether presentation additionally blocks on the display's
/// vertical blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceStrategy {
    /// Present in FIFO order, blocking on vsync.
    #[default]
    BlockingVsync,
    /// Present immediately; the fixed frame sleep is the only pacing.
    ImmediateSleep,
}

impl SurfaceStrategy {
    /// The wgpu present mode this strategy maps to.
    pub fn present_mode(self) -> wgpu::PresentMode {
        match self {
            // TODO: profile drag-resize jank of ImmediateSleep against
            // BlockingVsync once both run on the same compositor.
            SurfaceStrategy::BlockingVsync => wgpu::PresentMode::AutoVsync,
            SurfaceStrategy::ImmediateSleep => wgpu::PresentMode::AutoNoVsync,
        }
    }
}

/// Configuration for the sandbox, fixed at compile time.
#[derive(Debug, Clone)]
pub struct SandboxConfig {
    /// Window title
    pub title: String,
    /// Initial window width
    pub width: u32,
    /// Initial window height
    pub height: u32,
    /// Which surface strategy to use
    pub strategy: SurfaceStrategy,
    /// Fixed sleep between frames, in milliseconds
    pub frame_interval_ms: u64,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            title: "Triangle Sandbox".to_string(),
            width: 800,
            height: 600,
            strategy: SurfaceStrategy::default(),
            frame_interval_ms: 16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SandboxConfig::default();
        assert_eq!(config.width, 800);
        assert_eq!(config.height, 600);
        assert_eq!(config.frame_interval_ms, 16);
        assert_eq!(config.strategy, SurfaceStrategy::BlockingVsync);
    }

    #[test]
    fn test_scene_submodule_paths() {
        // The frame loop reaches the camera and transform through their
        // module paths, not just the glob re-exports.
        assert_eq!(scene::transform::SPIN_DEGREES_PER_SECOND, 65.0);
        assert_eq!(scene::camera::DEFAULT_ZOOM, 1.5);
    }

    #[test]
    fn test_strategy_present_modes() {
        assert_eq!(
            SurfaceStrategy::BlockingVsync.present_mode(),
            wgpu::PresentMode::AutoVsync
        );
        assert_eq!(
            SurfaceStrategy::ImmediateSleep.present_mode(),
            wgpu::PresentMode::AutoNoVsync
        );
    }
}
