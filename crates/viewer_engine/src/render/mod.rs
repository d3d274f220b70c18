//! Rendering system
//!
//! - [`window`]: GLFW window and OpenGL context
//! - [`opengl`]: RAII wrappers for shader programs and vertex buffers
//! - [`primitives`]: backend-agnostic geometry and camera
//! - [`lighting`]: point-light parameters and their uniforms
//! - [`renderer`]: global pipeline state and per-frame draw commands

pub mod window;
pub mod opengl;
pub mod primitives;
pub mod lighting;
pub mod renderer;

pub use window::{WindowHandle, WindowError};
pub use opengl::{ShaderProgram, ShaderSource, ShaderError, GpuMesh};
pub use primitives::{Camera, Mesh, Vertex};
pub use lighting::LightingEnvironment;
pub use renderer::{Renderer, FrameUniforms, FrameStats};
