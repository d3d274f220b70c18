//! # Unified Configuration System
//!
//! All configuration structures for the viewer live here. Every section
//! implements `Default` with the values the cube demo ships with, and every
//! struct is `#[serde(default)]`, so a config file only needs to mention the
//! values it changes:
//!
//! ```toml
//! log_level = "debug"
//!
//! [window]
//! width = 1280
//! height = 720
//!
//! [controls]
//! rotation_sensitivity = 0.5
//! ```
//!
//! ## Configuration Categories
//!
//! - **Window**: size, title, requested OpenGL context version, vsync
//! - **Shaders**: GLSL source locations with search-path resolution
//! - **Camera**: projection parameters and the fixed view setup
//! - **Lighting**: object/light colours and the light position
//! - **Controls**: mouse-drag rotation sensitivity
//! - **Render**: clear colour, depth testing and face culling

use serde::{Serialize, Deserialize};
use std::path::Path;

use crate::foundation::math::Vec3;

pub use crate::config::{Config, ConfigError};

/// Lowest OpenGL version the shader pair (`#version 330 core`) can run on
pub const MIN_GL_VERSION: (u32, u32) = (3, 3);

/// # Window Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Client area width in screen coordinates
    pub width: u32,
    /// Client area height in screen coordinates
    pub height: u32,
    /// Requested OpenGL context version (major, minor), core profile
    pub gl_version: (u32, u32),
    /// Whether the window can be resized
    pub resizable: bool,
    /// Synchronise buffer swaps with the display refresh
    pub vsync: bool,
}

impl WindowConfig {
    /// Width divided by height, as used for the initial projection
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Validate the window settings
    pub fn validate(&self) -> Result<(), String> {
        if self.title.is_empty() {
            return Err("Window title cannot be empty".to_string());
        }
        if self.width == 0 || self.height == 0 {
            return Err(format!("Window size must be non-zero, got {}x{}", self.width, self.height));
        }
        if self.gl_version < MIN_GL_VERSION {
            return Err(format!(
                "OpenGL {}.{} is too old, at least {}.{} is required",
                self.gl_version.0, self.gl_version.1, MIN_GL_VERSION.0, MIN_GL_VERSION.1
            ));
        }
        Ok(())
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "OpenGL Viewer".to_string(),
            width: 800,
            height: 600,
            gl_version: (4, 3),
            resizable: true,
            vsync: true,
        }
    }
}

/// # Shader Configuration
///
/// Locations of the GLSL vertex and fragment sources. The sources are
/// compiled by the driver at start-up, so these point at plain text files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderConfig {
    /// Path to the vertex shader source
    pub vertex_shader_path: String,
    /// Path to the fragment shader source
    pub fragment_shader_path: String,
}

impl ShaderConfig {
    /// Directories searched by [`ShaderConfig::with_path_resolution`], in order
    pub const SEARCH_DIRS: [&'static str; 4] = [
        "resources/shaders/",
        "res/",
        "../res/",
        "./",
    ];

    /// Create a new shader configuration
    pub fn new(vertex_path: impl Into<String>, fragment_path: impl Into<String>) -> Self {
        Self {
            vertex_shader_path: vertex_path.into(),
            fragment_shader_path: fragment_path.into(),
        }
    }

    /// Create shader config with automatic path resolution
    ///
    /// Tries each of [`ShaderConfig::SEARCH_DIRS`] so the viewer can be
    /// launched from the workspace root or from a build directory. When a
    /// file is found nowhere the first search directory is used, and
    /// [`ShaderConfig::validate`] will report it.
    pub fn with_path_resolution(base_vertex: &str, base_fragment: &str) -> Self {
        Self {
            vertex_shader_path: Self::resolve(base_vertex),
            fragment_shader_path: Self::resolve(base_fragment),
        }
    }

    fn resolve(file_name: &str) -> String {
        Self::SEARCH_DIRS
            .iter()
            .map(|dir| format!("{dir}{file_name}"))
            .find(|candidate| Path::new(candidate).exists())
            .unwrap_or_else(|| format!("{}{file_name}", Self::SEARCH_DIRS[0]))
    }

    /// Validate that shader files exist
    pub fn validate(&self) -> Result<(), String> {
        if !Path::new(&self.vertex_shader_path).exists() {
            return Err(format!("Vertex shader not found: {}", self.vertex_shader_path));
        }
        if !Path::new(&self.fragment_shader_path).exists() {
            return Err(format!("Fragment shader not found: {}", self.fragment_shader_path));
        }
        Ok(())
    }
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self::with_path_resolution("vertex.glsl", "fragment.glsl")
    }
}

/// # Camera Configuration
///
/// The camera never moves: the view is a look-at from `position` along
/// `front`, followed by a fixed `scene_offset` translation that pushes the
/// model away from the eye.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane distance
    pub near: f32,
    /// Far clipping plane distance
    pub far: f32,
    /// Eye position
    pub position: [f32; 3],
    /// Viewing direction
    pub front: [f32; 3],
    /// Up vector
    pub up: [f32; 3],
    /// Translation applied after the look-at
    pub scene_offset: [f32; 3],
}

impl CameraConfig {
    /// Validate the projection parameters
    pub fn validate(&self) -> Result<(), String> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(format!("Field of view must be in (0, 180) degrees, got {}", self.fov_degrees));
        }
        if self.near <= 0.0 {
            return Err(format!("Near plane must be positive, got {}", self.near));
        }
        if self.far <= self.near {
            return Err(format!("Far plane ({}) must be beyond near plane ({})", self.far, self.near));
        }
        if Vec3::from(self.front).norm() == 0.0 {
            return Err("Camera front vector cannot be zero".to_string());
        }
        Ok(())
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
            position: [0.0, 0.0, 0.0],
            front: [0.0, 0.0, -1.0],
            up: [0.0, 1.0, 0.0],
            scene_offset: [0.0, 0.0, -5.0],
        }
    }
}

/// # Lighting Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Base colour of the rendered object
    pub object_color: [f32; 3],
    /// Colour of the single point light
    pub light_color: [f32; 3],
    /// World-space position of the light
    pub light_position: [f32; 3],
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            object_color: [0.5, 0.5, 0.5],
            light_color: [1.0, 1.0, 1.0],
            light_position: [1.2, 1.0, 2.0],
        }
    }
}

/// # Controls Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Degrees of rotation per pixel of mouse drag
    pub rotation_sensitivity: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self { rotation_sensitivity: 1.0 }
    }
}

/// Which polygon faces are discarded by face culling
///
/// Spelled `"disabled"`, `"front"` or `"back"` in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CullMode {
    /// Face culling off
    Disabled,
    /// Cull front faces
    Front,
    /// Cull back faces
    Back,
}

/// # Render State Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Colour the framebuffer is cleared to (RGBA)
    pub clear_color: [f32; 4],
    /// Enable depth testing
    pub depth_test: bool,
    /// Face culling mode
    pub cull_mode: CullMode,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.0, 0.0, 0.0, 1.0],
            depth_test: true,
            // The cube's triangles are wound clockwise seen from outside,
            // so the faces facing the camera are GL back faces.
            cull_mode: CullMode::Front,
        }
    }
}

/// # Complete Viewer Configuration
///
/// Top-level configuration that encompasses all engine subsystems.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Default log filter, overridden by `RUST_LOG`
    pub log_level: String,
    /// Window configuration
    pub window: WindowConfig,
    /// Shader configuration
    pub shaders: ShaderConfig,
    /// Camera configuration
    pub camera: CameraConfig,
    /// Lighting configuration
    pub lighting: LightingConfig,
    /// Input controls configuration
    pub controls: ControlsConfig,
    /// Render state configuration
    pub render: RenderConfig,
}

impl ViewerConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.window.validate().map_err(ConfigError::Invalid)?;
        self.camera.validate().map_err(ConfigError::Invalid)?;
        if self.controls.rotation_sensitivity <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "Rotation sensitivity must be positive, got {}",
                self.controls.rotation_sensitivity
            )));
        }
        self.shaders.validate().map_err(ConfigError::Invalid)?;
        Ok(())
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            window: WindowConfig::default(),
            shaders: ShaderConfig::default(),
            camera: CameraConfig::default(),
            lighting: LightingConfig::default(),
            controls: ControlsConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl Config for ViewerConfig {}
