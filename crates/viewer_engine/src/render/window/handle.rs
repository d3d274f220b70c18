//! GLFW window with a current OpenGL context
//!
//! Creating a [`WindowHandle`] does everything needed before the first GL
//! call: it initialises GLFW, requests a core-profile context of the
//! configured version, makes it current on the calling thread and loads the
//! GL function pointers. The handle must therefore stay on the thread that
//! created it, and every GL object must be dropped before it.

use glfw::Context;
use thiserror::Error;

use crate::core::config::WindowConfig;
use crate::render::opengl;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// GLFW could not be initialised
    #[error("GLFW initialization failed: {0}")]
    InitializationFailed(String),

    /// The window or its GL context could not be created
    #[error("Failed to create a {width}x{height} window with an OpenGL {major}.{minor} core context")]
    CreationFailed {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Requested context major version
        major: u32,
        /// Requested context minor version
        minor: u32,
    },
}

/// Result alias for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// Application window owning the GL context
pub struct WindowHandle {
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    glfw: glfw::Glfw,
}

impl WindowHandle {
    /// Create a window and make its OpenGL context current
    pub fn new(config: &WindowConfig) -> WindowResult<Self> {
        let mut glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|e| WindowError::InitializationFailed(format!("{:?}", e)))?;

        let (major, minor) = config.gl_version;
        glfw.window_hint(glfw::WindowHint::ContextVersion(major, minor));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(cfg!(target_os = "macos")));
        glfw.window_hint(glfw::WindowHint::Resizable(config.resizable));

        log::info!(
            "Creating {}x{} window \"{}\" (OpenGL {}.{} core)",
            config.width, config.height, config.title, major, minor
        );
        let (mut window, events) = glfw
            .create_window(config.width, config.height, &config.title, glfw::WindowMode::Windowed)
            .ok_or(WindowError::CreationFailed {
                width: config.width,
                height: config.height,
                major,
                minor,
            })?;

        window.make_current();
        opengl::load_with(|symbol| window.get_proc_address(symbol) as *const _);

        glfw.set_swap_interval(if config.vsync {
            glfw::SwapInterval::Sync(1)
        } else {
            glfw::SwapInterval::None
        });

        window.set_key_polling(true);
        window.set_mouse_button_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_scroll_polling(true);
        window.set_close_polling(true);
        window.set_focus_polling(true);
        window.set_framebuffer_size_polling(true);

        Ok(Self { window, events, glfw })
    }

    /// Check if the window should close
    pub fn should_close(&self) -> bool {
        self.window.should_close()
    }

    /// Set whether the window should close
    pub fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    /// Process pending window system events
    pub fn poll_events(&mut self) {
        self.glfw.poll_events();
    }

    /// Drain the events received since the last call
    pub fn event_iter(&self) -> impl Iterator<Item = (f64, glfw::WindowEvent)> + '_ {
        glfw::flush_messages(&self.events)
    }

    /// Present the back buffer
    pub fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    /// Current window size in screen coordinates
    pub fn get_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_size();
        (clamp_dimension(width), clamp_dimension(height))
    }

    /// Current framebuffer size in pixels (differs from the window size on HiDPI displays)
    pub fn get_framebuffer_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_framebuffer_size();
        (clamp_dimension(width), clamp_dimension(height))
    }

    /// Set the window title
    pub fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }
}

fn clamp_dimension(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_dimensions_clamp_to_zero() {
        assert_eq!(clamp_dimension(-3), 0);
        assert_eq!(clamp_dimension(640), 640);
    }

    #[test]
    fn test_creation_error_message() {
        let error = WindowError::CreationFailed { width: 800, height: 600, major: 4, minor: 3 };
        assert_eq!(
            error.to_string(),
            "Failed to create a 800x600 window with an OpenGL 4.3 core context"
        );
    }
}
