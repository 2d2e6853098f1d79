//! Mesh data structures and the hard-coded triangle geometry

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec4};

/// A 2D vertex with a baked RGBA color.
///
/// The fields are plain float arrays so the in-memory layout is exactly the
/// layout declared to the engine: position at offset 0, color at offset 8,
/// stride 24 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

impl Vertex {
    pub fn new(position: Vec2, color: Vec4) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
        }
    }

    /// Vertex buffer layout as declared to the render pipeline.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &VERTEX_ATTRIBUTES,
        }
    }
}

/// A mesh with vertex and index data
#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
    pub name: String,
}

impl Mesh {
    pub fn new(name: &str) -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            name: name.to_string(),
        }
    }

    /// The sandbox triangle: one vertex on the unit circle every 120 degrees,
    /// colored red, green and blue.
    pub fn triangle() -> Self {
        let mut mesh = Mesh::new("triangle");
        let third = 2.0 * std::f32::consts::PI / 3.0;

        mesh.vertices = vec![
            Vertex::new(Vec2::new(1.0, 0.0), Vec4::new(1.0, 0.0, 0.0, 1.0)),
            Vertex::new(
                Vec2::new(third.cos(), third.sin()),
                Vec4::new(0.0, 1.0, 0.0, 1.0),
            ),
            Vertex::new(
                Vec2::new((2.0 * third).cos(), (2.0 * third).sin()),
                Vec4::new(0.0, 0.0, 1.0, 1.0),
            ),
        ];
        mesh.indices = (0..mesh.vertices.len() as u16).collect();

        mesh
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Get vertex data as bytes
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Get index data as bytes
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_stride_and_offsets() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);

        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes.len(), 2);
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[0].shader_location, 0);
        assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x2);
        assert_eq!(layout.attributes[1].offset, 8);
        assert_eq!(layout.attributes[1].shader_location, 1);
        assert_eq!(layout.attributes[1].format, wgpu::VertexFormat::Float32x4);
    }

    #[test]
    fn test_triangle_packs_to_72_bytes() {
        let mesh = Mesh::triangle();
        let bytes = mesh.vertex_bytes();
        assert_eq!(bytes.len(), 72);

        // Position floats at each 24-byte stride offset 0, colors at offset 8.
        let floats: &[f32] = bytemuck::cast_slice(bytes);
        for (i, vertex) in mesh.vertices.iter().enumerate() {
            let base = i * 6;
            assert_eq!(&floats[base..base + 2], &vertex.position);
            assert_eq!(&floats[base + 2..base + 6], &vertex.color);
        }
    }

    #[test]
    fn test_triangle_geometry() {
        let mesh = Mesh::triangle();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.vertices[0].position, [1.0, 0.0]);
        assert_eq!(mesh.vertices[0].color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(mesh.vertices[1].color, [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(mesh.vertices[2].color, [0.0, 0.0, 1.0, 1.0]);

        // All three corners sit on the unit circle.
        for vertex in &mesh.vertices {
            let [x, y] = vertex.position;
            assert!((x * x + y * y - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_triangle_indices() {
        let mesh = Mesh::triangle();
        assert_eq!(mesh.indices, vec![0u16, 1, 2]);
        assert_eq!(mesh.index_bytes().len(), 6);
    }
}
