//! Orthographic camera

use glam::Mat4;

/// Default vertical half-extent of the orthographic volume.
pub const DEFAULT_ZOOM: f32 = 1.5;

/// Camera for viewing the scene.
///
/// Always orthographic: the vertical extent is fixed at `zoom` and the
/// horizontal extent scales with the viewport aspect ratio, so the triangle
/// keeps its shape when the window is resized.
#[derive(Debug, Clone)]
pub struct Camera {
    pub zoom: f32,
    width: u32,
    height: u32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Update the viewport dimensions after a resize.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    pub fn viewport(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        let aspect = self.aspect();
        Mat4::orthographic_rh(
            -aspect * self.zoom,
            aspect * self.zoom,
            -self.zoom,
            self.zoom,
            0.0,
            10.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_vertical_extent_is_zoom() {
        let camera = Camera::new(800, 600);
        let projected = camera
            .projection_matrix()
            .project_point3(Vec3::new(0.0, 1.5, 0.0));
        assert!((projected.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_horizontal_extent_scales_with_aspect() {
        let camera = Camera::new(800, 600);
        let aspect = 800.0 / 600.0;
        let projected = camera
            .projection_matrix()
            .project_point3(Vec3::new(aspect * 1.5, 0.0, 0.0));
        assert!((projected.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_set_viewport_changes_aspect() {
        let mut camera = Camera::new(800, 600);
        camera.set_viewport(1600, 600);
        assert!((camera.aspect() - 1600.0 / 600.0).abs() < 1e-6);
        assert_eq!(camera.viewport(), (1600, 600));
    }

    #[test]
    fn test_zero_viewport_clamped() {
        let mut camera = Camera::new(800, 600);
        camera.set_viewport(0, 0);
        assert_eq!(camera.viewport(), (1, 1));
    }
}
