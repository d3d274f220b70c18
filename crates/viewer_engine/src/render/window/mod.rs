//! Window management subsystem
//!
//! GLFW owns both the native window and the OpenGL context. Application
//! code only ever sees [`WindowHandle`]; the raw `glfw` types stay inside
//! this module and the input translation layer.

pub mod handle;

// Re-export the main public types for convenience
pub use handle::{WindowHandle, WindowError, WindowResult};
