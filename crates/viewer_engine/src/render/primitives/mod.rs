//! Backend-agnostic rendering primitives: geometry and camera

pub mod mesh;
pub mod camera;

pub use mesh::{Mesh, Vertex, VertexAttribute, VertexLayout};
pub use camera::Camera;
