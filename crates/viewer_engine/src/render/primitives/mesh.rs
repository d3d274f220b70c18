//! Mesh representation for 3D models
//!
//! Backend-agnostic geometry: an interleaved vertex type, a description of
//! its attribute layout, and the non-indexed triangle list the viewer draws.
//! Uploading to the GPU is handled by [`crate::render::opengl::GpuMesh`], which
//! reads the layout from [`Vertex::layout`] instead of hard-coding offsets.

use std::mem::{offset_of, size_of};

use bytemuck::{Pod, Zeroable};

/// Interleaved vertex with position and normal
///
/// # Memory Layout
/// `#[repr(C)]` keeps the field order and packing stable: 6 consecutive
/// `f32`s, 24 bytes per vertex, position first.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in model space
    pub position: [f32; 3],

    /// Unit surface normal
    pub normal: [f32; 3],
}

impl Vertex {
    /// Create a new vertex
    pub const fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }

    /// Attribute layout of this vertex type
    ///
    /// Location 0 is the position, location 1 the normal; both are three
    /// floats, matching the `layout (location = N)` declarations in the
    /// vertex shader.
    pub fn layout() -> VertexLayout {
        VertexLayout {
            stride: size_of::<Self>(),
            attributes: vec![
                VertexAttribute {
                    location: 0,
                    components: 3,
                    offset: offset_of!(Vertex, position),
                },
                VertexAttribute {
                    location: 1,
                    components: 3,
                    offset: offset_of!(Vertex, normal),
                },
            ],
        }
    }
}

/// A single float vertex attribute within an interleaved buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader attribute location
    pub location: u32,
    /// Number of `f32` components (1 to 4)
    pub components: i32,
    /// Byte offset from the start of the vertex
    pub offset: usize,
}

/// Layout of an interleaved vertex buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    /// Size of one vertex in bytes
    pub stride: usize,
    /// Attributes in location order
    pub attributes: Vec<VertexAttribute>,
}

/// Triangle-list mesh
///
/// Every three consecutive vertices form one triangle; there is no index
/// buffer. Flat-shaded geometry like the cube needs distinct normals per
/// face anyway, so indexing would save nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Vertex data, three per triangle
    pub vertices: Vec<Vertex>,
}

/// Half the edge length of [`Mesh::cube`]
const H: f32 = 0.5;

#[rustfmt::skip]
const CUBE_VERTICES: [Vertex; 36] = [
    // -Z
    Vertex::new([-H, -H, -H], [ 0.0,  0.0, -1.0]),
    Vertex::new([ H, -H, -H], [ 0.0,  0.0, -1.0]),
    Vertex::new([ H,  H, -H], [ 0.0,  0.0, -1.0]),
    Vertex::new([ H,  H, -H], [ 0.0,  0.0, -1.0]),
    Vertex::new([-H,  H, -H], [ 0.0,  0.0, -1.0]),
    Vertex::new([-H, -H, -H], [ 0.0,  0.0, -1.0]),
    // +Z
    Vertex::new([-H, -H,  H], [ 0.0,  0.0,  1.0]),
    Vertex::new([-H,  H,  H], [ 0.0,  0.0,  1.0]),
    Vertex::new([ H,  H,  H], [ 0.0,  0.0,  1.0]),
    Vertex::new([ H,  H,  H], [ 0.0,  0.0,  1.0]),
    Vertex::new([ H, -H,  H], [ 0.0,  0.0,  1.0]),
    Vertex::new([-H, -H,  H], [ 0.0,  0.0,  1.0]),
    // -X
    Vertex::new([-H,  H,  H], [-1.0,  0.0,  0.0]),
    Vertex::new([-H, -H,  H], [-1.0,  0.0,  0.0]),
    Vertex::new([-H, -H, -H], [-1.0,  0.0,  0.0]),
    Vertex::new([-H, -H, -H], [-1.0,  0.0,  0.0]),
    Vertex::new([-H,  H, -H], [-1.0,  0.0,  0.0]),
    Vertex::new([-H,  H,  H], [-1.0,  0.0,  0.0]),
    // +X
    Vertex::new([ H,  H,  H], [ 1.0,  0.0,  0.0]),
    Vertex::new([ H,  H, -H], [ 1.0,  0.0,  0.0]),
    Vertex::new([ H, -H, -H], [ 1.0,  0.0,  0.0]),
    Vertex::new([ H, -H, -H], [ 1.0,  0.0,  0.0]),
    Vertex::new([ H, -H,  H], [ 1.0,  0.0,  0.0]),
    Vertex::new([ H,  H,  H], [ 1.0,  0.0,  0.0]),
    // -Y
    Vertex::new([-H, -H, -H], [ 0.0, -1.0,  0.0]),
    Vertex::new([-H, -H,  H], [ 0.0, -1.0,  0.0]),
    Vertex::new([ H, -H,  H], [ 0.0, -1.0,  0.0]),
    Vertex::new([ H, -H,  H], [ 0.0, -1.0,  0.0]),
    Vertex::new([ H, -H, -H], [ 0.0, -1.0,  0.0]),
    Vertex::new([-H, -H, -H], [ 0.0, -1.0,  0.0]),
    // +Y
    Vertex::new([-H,  H, -H], [ 0.0,  1.0,  0.0]),
    Vertex::new([ H,  H, -H], [ 0.0,  1.0,  0.0]),
    Vertex::new([ H,  H,  H], [ 0.0,  1.0,  0.0]),
    Vertex::new([ H,  H,  H], [ 0.0,  1.0,  0.0]),
    Vertex::new([-H,  H,  H], [ 0.0,  1.0,  0.0]),
    Vertex::new([-H,  H, -H], [ 0.0,  1.0,  0.0]),
];

impl Mesh {
    /// Create a new mesh from a triangle list
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Self { vertices }
    }

    /// Unit cube centred on the origin
    ///
    /// 36 vertices, two triangles per face, per-face outward normals, faces
    /// in the order -Z, +Z, -X, +X, -Y, +Y. Seen from outside the cube every
    /// triangle is wound clockwise, which is why the renderer culls GL front
    /// faces by default.
    pub fn cube() -> Self {
        Self::new(CUBE_VERTICES.to_vec())
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Vertex data as raw bytes for buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Axis-aligned bounds as (min, max), `None` for an empty mesh
    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        let first = self.vertices.first()?.position;
        Some(self.vertices.iter().fold((first, first), |(mut min, mut max), vertex| {
            for axis in 0..3 {
                min[axis] = min[axis].min(vertex.position[axis]);
                max[axis] = max[axis].max(vertex.position[axis]);
            }
            (min, max)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use approx::assert_relative_eq;

    fn triangles(mesh: &Mesh) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        mesh.vertices.chunks_exact(3).map(|tri| {
            [
                Vec3::from(tri[0].position),
                Vec3::from(tri[1].position),
                Vec3::from(tri[2].position),
            ]
        })
    }

    #[test]
    fn test_vertex_layout() {
        let layout = Vertex::layout();
        assert_eq!(layout.stride, 6 * size_of::<f32>());
        assert_eq!(layout.attributes.len(), 2);
        assert_eq!(layout.attributes[0], VertexAttribute { location: 0, components: 3, offset: 0 });
        assert_eq!(layout.attributes[1], VertexAttribute { location: 1, components: 3, offset: 12 });
    }

    #[test]
    fn test_cube_shape() {
        let cube = Mesh::cube();
        assert_eq!(cube.vertex_count(), 36);
        assert_eq!(cube.as_bytes().len(), 36 * 24);
        assert_eq!(cube.bounds(), Some(([-0.5, -0.5, -0.5], [0.5, 0.5, 0.5])));
    }

    #[test]
    fn test_cube_bytes_are_interleaved() {
        let cube = Mesh::cube();
        let floats: &[f32] = bytemuck::cast_slice(cube.as_bytes());
        assert_eq!(&floats[..6], &[-0.5, -0.5, -0.5, 0.0, 0.0, -1.0]);
        assert_eq!(&floats[floats.len() - 6..], &[-0.5, 0.5, -0.5, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_cube_normals_point_outward() {
        let cube = Mesh::cube();
        for vertex in &cube.vertices {
            let normal = Vec3::from(vertex.normal);
            let position = Vec3::from(vertex.position);
            assert_relative_eq!(normal.norm(), 1.0);
            // The vertex lies on the face the normal belongs to
            assert_relative_eq!(position.dot(&normal), 0.5);
        }
    }

    #[test]
    fn test_cube_faces_in_order() {
        let cube = Mesh::cube();
        let expected = [
            [0.0, 0.0, -1.0],
            [0.0, 0.0, 1.0],
            [-1.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.0, 1.0, 0.0],
        ];
        for (face, normal) in cube.vertices.chunks_exact(6).zip(expected) {
            assert!(face.iter().all(|v| v.normal == normal));
        }
    }

    #[test]
    fn test_cube_winding_is_clockwise_from_outside() {
        let cube = Mesh::cube();
        for (tri, normal) in triangles(&cube).zip(cube.vertices.chunks_exact(3).map(|t| Vec3::from(t[0].normal))) {
            let geometric = (tri[1] - tri[0]).cross(&(tri[2] - tri[0]));
            // Counter-clockwise triangles would have a geometric normal along the face normal
            assert!(geometric.dot(&normal) < 0.0, "triangle {:?} is wound counter-clockwise", tri);
        }
    }

    #[test]
    fn test_empty_mesh_has_no_bounds() {
        assert_eq!(Mesh::new(Vec::new()).bounds(), None);
    }
}
