//! OpenGL backend
//!
//! Thin RAII wrappers over the raw `gl` bindings plus a few free functions
//! for global state. Every function here assumes a current GL context whose
//! function pointers were loaded with [`load_with`]; the window module takes
//! care of both.

pub mod shader;
pub mod buffer;

use std::ffi::{c_void, CStr};

use gl::types::{GLenum, GLsizei};

pub use shader::{ShaderProgram, ShaderSource, ShaderStage, ShaderError, ShaderResult};
pub use buffer::{GpuMesh, VertexArray, VertexBuffer, BufferError};

/// Load GL function pointers through a context's proc-address lookup
pub fn load_with<F>(loader: F)
where
    F: FnMut(&'static str) -> *const c_void,
{
    gl::load_with(loader);
}

/// The driver's `GL_VERSION` string, if available
pub fn version_string() -> Option<String> {
    let ptr = unsafe { gl::GetString(gl::VERSION) };
    if ptr.is_null() {
        return None;
    }
    let version = unsafe { CStr::from_ptr(ptr.cast()) };
    Some(version.to_string_lossy().into_owned())
}

/// Set the viewport to cover a framebuffer of the given pixel size
pub fn set_viewport(width: u32, height: u32) {
    let width = GLsizei::try_from(width).unwrap_or(GLsizei::MAX);
    let height = GLsizei::try_from(height).unwrap_or(GLsizei::MAX);
    unsafe { gl::Viewport(0, 0, width, height) };
}

/// Symbolic name of a `glGetError` code
pub fn error_name(code: GLenum) -> &'static str {
    match code {
        gl::NO_ERROR => "GL_NO_ERROR",
        gl::INVALID_ENUM => "GL_INVALID_ENUM",
        gl::INVALID_VALUE => "GL_INVALID_VALUE",
        gl::INVALID_OPERATION => "GL_INVALID_OPERATION",
        gl::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        gl::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        gl::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        gl::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        _ => "unknown GL error",
    }
}

/// Upper bound on errors drained per check; a lost context can report forever
const MAX_DRAINED_ERRORS: usize = 32;

/// Drain the GL error queue, logging each error with `context`
///
/// Returns the number of errors found.
pub fn check_errors(context: &str) -> usize {
    let mut count = 0;
    while count < MAX_DRAINED_ERRORS {
        let code = unsafe { gl::GetError() };
        if code == gl::NO_ERROR {
            break;
        }
        log::error!("OpenGL error during {}: {} (0x{:04X})", context, error_name(code), code);
        count += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_names() {
        assert_eq!(error_name(gl::INVALID_OPERATION), "GL_INVALID_OPERATION");
        assert_eq!(error_name(gl::OUT_OF_MEMORY), "GL_OUT_OF_MEMORY");
        assert_eq!(error_name(0xFFFF), "unknown GL error");
    }
}
