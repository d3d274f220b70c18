//! Application trait and lifecycle management

use crate::engine::{Engine, EngineError};
use crate::render::opengl::{BufferError, ShaderError};
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to build a viewer on top of the engine. All methods
/// run on the thread that owns the OpenGL context.
pub trait Application {
    /// Initialize the application
    ///
    /// Called once after the window and renderer exist. Load shaders and
    /// upload meshes here.
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Update the application
    ///
    /// # Arguments
    /// * `engine` - Mutable reference to the engine
    /// * `delta_time` - Time since last frame in seconds
    fn update(&mut self, _engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
        Ok(())
    }

    /// Render the application
    ///
    /// Called after update; the frame has already been cleared.
    fn render(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Handle application events
    ///
    /// Called for every event after the input manager and the engine have
    /// seen it.
    fn handle_event(&mut self, _engine: &mut Engine, _event: AppEvent) -> Result<(), AppError> {
        Ok(())
    }

    /// Cleanup the application
    ///
    /// Called once when the main loop ends, while the GL context is still
    /// current. GPU resources must be released here.
    fn cleanup(&mut self, engine: &mut Engine);
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Shader loading error
    #[error("Shader error: {0}")]
    Shader(#[from] ShaderError),

    /// Mesh upload error
    #[error("Buffer error: {0}")]
    Buffer(#[from] BufferError),

    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),
}

/// Application events
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppEvent {
    /// Framebuffer was resized
    WindowResized {
        /// New framebuffer width in pixels
        width: u32,
        /// New framebuffer height in pixels
        height: u32,
    },

    /// Window close requested
    WindowCloseRequested,

    /// Window gained focus
    WindowFocused,

    /// Window lost focus
    WindowUnfocused,

    /// Key was pressed
    KeyPressed(crate::input::KeyCode),

    /// Key was released
    KeyReleased(crate::input::KeyCode),

    /// Mouse button event
    MouseButton {
        /// The mouse button that was pressed/released
        button: crate::input::MouseButton,
        /// Whether the button was pressed (true) or released (false)
        pressed: bool,
    },

    /// Mouse movement
    MouseMoved {
        /// New X coordinate
        x: f64,
        /// New Y coordinate
        y: f64,
    },

    /// Mouse wheel
    MouseWheel {
        /// Horizontal scroll delta
        delta_x: f64,
        /// Vertical scroll delta
        delta_y: f64,
    },
}
