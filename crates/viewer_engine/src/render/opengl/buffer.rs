//! GPU buffer wrappers
//!
//! RAII owners for vertex array and vertex buffer objects, and [`GpuMesh`],
//! which pairs them to hold one uploaded [`Mesh`].

use std::ffi::c_void;

use gl::types::{GLsizei, GLsizeiptr, GLuint};
use thiserror::Error;

use crate::render::primitives::{Mesh, Vertex, VertexLayout};

/// Buffer upload errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum BufferError {
    /// Nothing to upload
    #[error("Cannot upload an empty mesh")]
    EmptyMesh,

    /// Vertex count is not a whole number of triangles
    #[error("Mesh has {0} vertices, which is not a multiple of 3")]
    IncompleteTriangles(usize),

    /// Data does not fit the GL size types
    #[error("Mesh with {0} vertices is too large for a single draw call")]
    TooLarge(usize),
}

/// Vertex array object
#[derive(Debug)]
pub struct VertexArray {
    id: GLuint,
}

impl VertexArray {
    /// Generate a new vertex array object
    pub fn new() -> Self {
        let mut id = 0;
        unsafe { gl::GenVertexArrays(1, &mut id) };
        Self { id }
    }

    /// Bind this vertex array
    pub fn bind(&self) {
        unsafe { gl::BindVertexArray(self.id) };
    }

    /// Unbind any vertex array
    pub fn unbind() {
        unsafe { gl::BindVertexArray(0) };
    }

    /// Describe interleaved float attributes of the currently bound array buffer
    ///
    /// The array must be bound.
    pub fn set_layout(&self, layout: &VertexLayout) {
        let stride = layout.stride as GLsizei;
        for attribute in &layout.attributes {
            unsafe {
                gl::VertexAttribPointer(
                    attribute.location,
                    attribute.components,
                    gl::FLOAT,
                    gl::FALSE,
                    stride,
                    attribute.offset as *const c_void,
                );
                gl::EnableVertexAttribArray(attribute.location);
            }
        }
    }
}

impl Default for VertexArray {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        unsafe { gl::DeleteVertexArrays(1, &self.id) };
    }
}

/// Array buffer filled once with `GL_STATIC_DRAW` data
#[derive(Debug)]
pub struct VertexBuffer {
    id: GLuint,
    size: usize,
}

impl VertexBuffer {
    /// Create a buffer, bind it to `GL_ARRAY_BUFFER` and upload `data`
    ///
    /// The buffer stays bound so a vertex array can capture it.
    pub fn new_static(data: &[u8]) -> Self {
        let mut id = 0;
        unsafe {
            gl::GenBuffers(1, &mut id);
            gl::BindBuffer(gl::ARRAY_BUFFER, id);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                data.len() as GLsizeiptr,
                data.as_ptr().cast::<c_void>(),
                gl::STATIC_DRAW,
            );
        }
        Self { id, size: data.len() }
    }

    /// Size of the uploaded data in bytes
    pub fn size(&self) -> usize {
        self.size
    }

    /// Unbind any array buffer
    pub fn unbind() {
        unsafe { gl::BindBuffer(gl::ARRAY_BUFFER, 0) };
    }
}

impl Drop for VertexBuffer {
    fn drop(&mut self) {
        unsafe { gl::DeleteBuffers(1, &self.id) };
    }
}

/// Number of vertices to pass to `glDrawArrays`, after validating the mesh
fn draw_count(mesh: &Mesh) -> Result<GLsizei, BufferError> {
    let count = mesh.vertex_count();
    if count == 0 {
        return Err(BufferError::EmptyMesh);
    }
    if count % 3 != 0 {
        return Err(BufferError::IncompleteTriangles(count));
    }
    // The byte size must also fit GLsizeiptr
    if isize::try_from(mesh.as_bytes().len()).is_err() {
        return Err(BufferError::TooLarge(count));
    }
    GLsizei::try_from(count).map_err(|_| BufferError::TooLarge(count))
}

/// A mesh resident in GPU memory
///
/// Owns one VAO and one VBO; both are released on drop, so the GL context
/// must still be current at that point.
#[derive(Debug)]
pub struct GpuMesh {
    // Declared before the buffer so the array is deleted first
    vertex_array: VertexArray,
    vertex_buffer: VertexBuffer,
    vertex_count: GLsizei,
}

impl GpuMesh {
    /// Upload a mesh and record its attribute layout
    ///
    /// Leaves no vertex array or array buffer bound.
    pub fn upload(mesh: &Mesh) -> Result<Self, BufferError> {
        let vertex_count = draw_count(mesh)?;

        let vertex_array = VertexArray::new();
        vertex_array.bind();
        let vertex_buffer = VertexBuffer::new_static(mesh.as_bytes());
        vertex_array.set_layout(&Vertex::layout());

        VertexArray::unbind();
        VertexBuffer::unbind();

        log::info!(
            "Uploaded mesh: {} vertices, {} bytes",
            vertex_count,
            vertex_buffer.size()
        );

        Ok(Self {
            vertex_array,
            vertex_buffer,
            vertex_count,
        })
    }

    /// Number of vertices drawn
    pub fn vertex_count(&self) -> GLsizei {
        self.vertex_count
    }

    /// Size of the vertex data in bytes
    pub fn byte_size(&self) -> usize {
        self.vertex_buffer.size()
    }

    /// Draw the mesh as a triangle list with the current program
    pub fn draw(&self) {
        self.vertex_array.bind();
        unsafe { gl::DrawArrays(gl::TRIANGLES, 0, self.vertex_count) };
        VertexArray::unbind();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_draw_count() {
        assert_eq!(draw_count(&Mesh::cube()), Ok(36));
    }

    #[test]
    fn test_empty_mesh_rejected() {
        assert_eq!(draw_count(&Mesh::new(Vec::new())), Err(BufferError::EmptyMesh));
    }

    #[test]
    fn test_partial_triangle_rejected() {
        let vertex = Vertex::new([0.0; 3], [0.0, 0.0, 1.0]);
        let mesh = Mesh::new(vec![vertex; 4]);
        assert_eq!(draw_count(&mesh), Err(BufferError::IncompleteTriangles(4)));
    }
}
