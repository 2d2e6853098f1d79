//! Scene management

pub mod camera;
pub mod transform;

pub use camera::*;
pub use transform::*;

use crate::mesh::Mesh;
use glam::Vec4;

/// A renderable entity: geometry plus a spin rate, rotated about the Z axis.
#[derive(Debug, Clone)]
pub struct Renderable {
    pub mesh: Mesh,
    /// Rotation speed in degrees per second of wall-clock time.
    pub spin_rate: f32,
}

impl Renderable {
    pub fn new(mesh: Mesh) -> Self {
        Self {
            mesh,
            spin_rate: SPIN_DEGREES_PER_SECOND,
        }
    }
}

/// The scene containing all renderable content
pub struct Scene {
    pub camera: Camera,
    pub renderable: Renderable,
    /// Flat clear color standing in for a skybox.
    pub skybox: Vec4,
}

impl Scene {
    /// The fixed sandbox scene: the RGB triangle under an orthographic
    /// camera, against a dark blue backdrop.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            camera: Camera::new(width, height),
            renderable: Renderable::new(Mesh::triangle()),
            skybox: Vec4::new(0.1, 0.125, 0.25, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_holds_the_triangle() {
        let scene = Scene::new(800, 600);
        assert_eq!(scene.renderable.mesh.vertex_count(), 3);
        assert_eq!(scene.renderable.spin_rate, 65.0);
    }
}
