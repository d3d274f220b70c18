//! Shader management and compilation
//!
//! GLSL source loading, compilation and program linking following RAII
//! patterns. A [`ShaderProgram`] owns its GL program object and deletes it
//! on drop; the intermediate shader objects never outlive construction.
//!
//! Uniform setters look the location up by name on every call. Setting a
//! uniform the linker optimised away (or never declared) is a silent no-op,
//! as in GL itself.

use std::ffi::CString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::ptr;

use gl::types::{GLchar, GLenum, GLint, GLsizei, GLuint};
use thiserror::Error;

use crate::foundation::math::{Mat2, Mat3, Mat4, Vec2, Vec3, Vec4};

/// Capacity of the buffer used to read compile and link logs
pub const INFO_LOG_CAPACITY: usize = 1024;

/// Programmable pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Fragment shader
    Fragment,
}

impl ShaderStage {
    /// GL shader type enum for this stage
    pub fn gl_enum(self) -> GLenum {
        match self {
            Self::Vertex => gl::VERTEX_SHADER,
            Self::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex"),
            Self::Fragment => f.write_str("fragment"),
        }
    }
}

/// Shader errors
#[derive(Error, Debug)]
pub enum ShaderError {
    /// A source file could not be read
    #[error("Failed to read shader source {}: {source}", .path.display())]
    Io {
        /// File that failed to load
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Source text contains an interior NUL byte and cannot be passed to GL
    #[error("{stage} shader source contains a NUL byte")]
    InvalidSource {
        /// Stage whose source is invalid
        stage: ShaderStage,
    },

    /// The driver refused to create a shader or program object
    #[error("Failed to create GL {0} object")]
    CreationFailed(&'static str),

    /// Compilation failed
    #[error("Failed to compile {stage} shader:\n{log}")]
    Compile {
        /// Stage that failed to compile
        stage: ShaderStage,
        /// Driver info log
        log: String,
    },

    /// Linking failed
    #[error("Failed to link shader program:\n{log}")]
    Link {
        /// Driver info log
        log: String,
    },
}

/// Result alias for shader operations
pub type ShaderResult<T> = Result<T, ShaderError>;

/// GLSL source for a vertex/fragment pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    /// Vertex stage source
    pub vertex: String,
    /// Fragment stage source
    pub fragment: String,
}

impl ShaderSource {
    /// Create from in-memory source text
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// Read both stages from disk
    pub fn from_files(vertex_path: impl AsRef<Path>, fragment_path: impl AsRef<Path>) -> ShaderResult<Self> {
        Ok(Self {
            vertex: read_source(vertex_path.as_ref())?,
            fragment: read_source(fragment_path.as_ref())?,
        })
    }

    /// Source text of one stage
    pub fn stage(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::Fragment => &self.fragment,
        }
    }
}

fn read_source(path: &Path) -> ShaderResult<String> {
    log::debug!("Loading shader source: {}", path.display());
    std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Convert a driver-filled log buffer into a string
///
/// `written` is the length the driver reported; it is clamped to the buffer
/// and trailing NULs and whitespace are trimmed.
fn info_log_to_string(buffer: &[u8], written: GLsizei) -> String {
    let len = usize::try_from(written).unwrap_or(0).min(buffer.len());
    String::from_utf8_lossy(&buffer[..len])
        .trim_end_matches(['\0', '\n', '\r', ' '])
        .to_string()
}

/// Compiled shader object, deleted on drop
struct CompiledStage(GLuint);

impl Drop for CompiledStage {
    fn drop(&mut self) {
        unsafe { gl::DeleteShader(self.0) };
    }
}

fn compile_stage(stage: ShaderStage, source: &str) -> ShaderResult<CompiledStage> {
    let c_source = CString::new(source).map_err(|_| ShaderError::InvalidSource { stage })?;

    let shader = unsafe { gl::CreateShader(stage.gl_enum()) };
    if shader == 0 {
        return Err(ShaderError::CreationFailed("shader"));
    }
    let shader = CompiledStage(shader);

    let mut success = GLint::from(gl::FALSE);
    unsafe {
        gl::ShaderSource(shader.0, 1, &c_source.as_ptr(), ptr::null());
        gl::CompileShader(shader.0);
        gl::GetShaderiv(shader.0, gl::COMPILE_STATUS, &mut success);
    }

    if success == GLint::from(gl::FALSE) {
        let mut buffer = vec![0u8; INFO_LOG_CAPACITY];
        let mut written: GLsizei = 0;
        unsafe {
            gl::GetShaderInfoLog(
                shader.0,
                INFO_LOG_CAPACITY as GLsizei,
                &mut written,
                buffer.as_mut_ptr().cast::<GLchar>(),
            );
        }
        return Err(ShaderError::Compile {
            stage,
            log: info_log_to_string(&buffer, written),
        });
    }

    log::debug!("Compiled {} shader", stage);
    Ok(shader)
}

/// Linked GLSL program with RAII cleanup
#[derive(Debug)]
pub struct ShaderProgram {
    id: GLuint,
}

impl ShaderProgram {
    /// Load, compile and link a program from two source files
    pub fn from_files(vertex_path: impl AsRef<Path>, fragment_path: impl AsRef<Path>) -> ShaderResult<Self> {
        let source = ShaderSource::from_files(vertex_path, fragment_path)?;
        Self::from_source(&source)
    }

    /// Compile and link a program from in-memory sources
    pub fn from_source(source: &ShaderSource) -> ShaderResult<Self> {
        let vertex = compile_stage(ShaderStage::Vertex, source.stage(ShaderStage::Vertex))?;
        let fragment = compile_stage(ShaderStage::Fragment, source.stage(ShaderStage::Fragment))?;

        let id = unsafe { gl::CreateProgram() };
        if id == 0 {
            return Err(ShaderError::CreationFailed("program"));
        }
        // From here on the program is deleted on every early return
        let program = Self { id };

        let mut success = GLint::from(gl::FALSE);
        unsafe {
            gl::AttachShader(program.id, vertex.0);
            gl::AttachShader(program.id, fragment.0);
            gl::LinkProgram(program.id);
            gl::GetProgramiv(program.id, gl::LINK_STATUS, &mut success);
        }

        if success == GLint::from(gl::FALSE) {
            let mut buffer = vec![0u8; INFO_LOG_CAPACITY];
            let mut written: GLsizei = 0;
            unsafe {
                gl::GetProgramInfoLog(
                    program.id,
                    INFO_LOG_CAPACITY as GLsizei,
                    &mut written,
                    buffer.as_mut_ptr().cast::<GLchar>(),
                );
            }
            return Err(ShaderError::Link {
                log: info_log_to_string(&buffer, written),
            });
        }

        unsafe {
            gl::DetachShader(program.id, vertex.0);
            gl::DetachShader(program.id, fragment.0);
        }

        log::info!("Linked shader program {}", program.id);
        Ok(program)
    }

    /// Raw GL program name
    pub fn id(&self) -> GLuint {
        self.id
    }

    /// Make this the current program
    ///
    /// Uniform setters affect the current program, so call this first.
    pub fn use_program(&self) {
        unsafe { gl::UseProgram(self.id) };
    }

    fn uniform_location(&self, name: &str) -> Option<GLint> {
        let Ok(c_name) = CString::new(name) else {
            log::warn!("Ignoring uniform name with NUL byte: {:?}", name);
            return None;
        };
        let location = unsafe { gl::GetUniformLocation(self.id, c_name.as_ptr()) };
        if location < 0 {
            log::trace!("Uniform '{}' is not active in program {}", name, self.id);
            None
        } else {
            Some(location)
        }
    }

    /// Set a `bool` uniform
    pub fn set_bool(&self, name: &str, value: bool) {
        self.set_int(name, i32::from(value));
    }

    /// Set an `int` uniform
    pub fn set_int(&self, name: &str, value: i32) {
        if let Some(location) = self.uniform_location(name) {
            unsafe { gl::Uniform1i(location, value) };
        }
    }

    /// Set a `float` uniform
    pub fn set_float(&self, name: &str, value: f32) {
        if let Some(location) = self.uniform_location(name) {
            unsafe { gl::Uniform1f(location, value) };
        }
    }

    /// Set a `vec2` uniform
    pub fn set_vec2(&self, name: &str, value: &Vec2) {
        if let Some(location) = self.uniform_location(name) {
            unsafe { gl::Uniform2fv(location, 1, value.as_ptr()) };
        }
    }

    /// Set a `vec2` uniform from components
    pub fn set_vec2_xy(&self, name: &str, x: f32, y: f32) {
        if let Some(location) = self.uniform_location(name) {
            unsafe { gl::Uniform2f(location, x, y) };
        }
    }

    /// Set a `vec3` uniform
    pub fn set_vec3(&self, name: &str, value: &Vec3) {
        if let Some(location) = self.uniform_location(name) {
            unsafe { gl::Uniform3fv(location, 1, value.as_ptr()) };
        }
    }

    /// Set a `vec3` uniform from components
    pub fn set_vec3_xyz(&self, name: &str, x: f32, y: f32, z: f32) {
        if let Some(location) = self.uniform_location(name) {
            unsafe { gl::Uniform3f(location, x, y, z) };
        }
    }

    /// Set a `vec4` uniform
    pub fn set_vec4(&self, name: &str, value: &Vec4) {
        if let Some(location) = self.uniform_location(name) {
            unsafe { gl::Uniform4fv(location, 1, value.as_ptr()) };
        }
    }

    /// Set a `vec4` uniform from components
    pub fn set_vec4_xyzw(&self, name: &str, x: f32, y: f32, z: f32, w: f32) {
        if let Some(location) = self.uniform_location(name) {
            unsafe { gl::Uniform4f(location, x, y, z, w) };
        }
    }

    /// Set a `mat2` uniform
    pub fn set_mat2(&self, name: &str, value: &Mat2) {
        if let Some(location) = self.uniform_location(name) {
            unsafe { gl::UniformMatrix2fv(location, 1, gl::FALSE, value.as_ptr()) };
        }
    }

    /// Set a `mat3` uniform
    pub fn set_mat3(&self, name: &str, value: &Mat3) {
        if let Some(location) = self.uniform_location(name) {
            unsafe { gl::UniformMatrix3fv(location, 1, gl::FALSE, value.as_ptr()) };
        }
    }

    /// Set a `mat4` uniform
    pub fn set_mat4(&self, name: &str, value: &Mat4) {
        if let Some(location) = self.uniform_location(name) {
            unsafe { gl::UniformMatrix4fv(location, 1, gl::FALSE, value.as_ptr()) };
        }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        log::debug!("Deleting shader program {}", self.id);
        unsafe { gl::DeleteProgram(self.id) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn source_file(text: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_stage_names_and_enums() {
        assert_eq!(ShaderStage::Vertex.to_string(), "vertex");
        assert_eq!(ShaderStage::Fragment.to_string(), "fragment");
        assert_eq!(ShaderStage::Vertex.gl_enum(), gl::VERTEX_SHADER);
        assert_eq!(ShaderStage::Fragment.gl_enum(), gl::FRAGMENT_SHADER);
    }

    #[test]
    fn test_source_from_files() {
        let vertex = source_file("void main() { gl_Position = vec4(0.0); }");
        let fragment = source_file("out vec4 c; void main() { c = vec4(1.0); }");

        let source = ShaderSource::from_files(vertex.path(), fragment.path()).unwrap();

        assert!(source.stage(ShaderStage::Vertex).contains("gl_Position"));
        assert!(source.stage(ShaderStage::Fragment).contains("vec4(1.0)"));
    }

    #[test]
    fn test_missing_source_reports_path() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.glsl");
        let error = ShaderSource::from_files(&missing, &missing).unwrap_err();
        match &error {
            ShaderError::Io { path, .. } => assert_eq!(path, &missing),
            other => panic!("expected IO error, got {:?}", other),
        }
        assert!(error.to_string().contains("missing.glsl"));
    }

    #[test]
    fn test_info_log_trimming() {
        let mut buffer = vec![0u8; 32];
        let message = b"0:1(1): error: syntax\n";
        buffer[..message.len()].copy_from_slice(message);

        assert_eq!(info_log_to_string(&buffer, message.len() as GLsizei), "0:1(1): error: syntax");
        // Drivers that report the NUL terminator in the length
        assert_eq!(info_log_to_string(&buffer, message.len() as GLsizei + 1), "0:1(1): error: syntax");
        // Lengths beyond the buffer are clamped, negative ones yield nothing
        assert_eq!(info_log_to_string(&buffer, 4096), "0:1(1): error: syntax");
        assert_eq!(info_log_to_string(&buffer, -1), "");
    }

    #[test]
    fn test_error_messages() {
        let compile = ShaderError::Compile {
            stage: ShaderStage::Fragment,
            log: "bad token".to_string(),
        };
        assert_eq!(compile.to_string(), "Failed to compile fragment shader:\nbad token");

        let invalid = ShaderError::InvalidSource { stage: ShaderStage::Vertex };
        assert_eq!(invalid.to_string(), "vertex shader source contains a NUL byte");
    }
}
