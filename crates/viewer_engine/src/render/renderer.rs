//! Frame rendering
//!
//! The [`Renderer`] owns the global GL pipeline state (depth test, face
//! culling, clear colour, viewport) and issues the per-frame commands. GPU
//! resources themselves (programs, meshes) are owned by the application and
//! passed in for each draw.

use gl::types::GLenum;

use crate::core::config::{CullMode, RenderConfig};
use crate::foundation::math::Mat4;
use crate::render::lighting::LightingEnvironment;
use crate::render::opengl::{self, GpuMesh, ShaderProgram};
use crate::render::primitives::Camera;

/// Uniform receiving the model matrix
pub const MODEL_UNIFORM: &str = "model";
/// Uniform receiving the view matrix
pub const VIEW_UNIFORM: &str = "view";
/// Uniform receiving the projection matrix
pub const PROJECTION_UNIFORM: &str = "projection";

/// Transformation matrices for one draw
#[derive(Debug, Clone, PartialEq)]
pub struct FrameUniforms {
    /// Model-to-world transform
    pub model: Mat4,
    /// World-to-view transform
    pub view: Mat4,
    /// View-to-clip transform
    pub projection: Mat4,
}

impl FrameUniforms {
    /// Combine a model matrix with a camera's view and projection
    pub fn from_camera(camera: &Camera, model: Mat4) -> Self {
        Self {
            model,
            view: camera.get_view_matrix(),
            projection: camera.get_projection_matrix(),
        }
    }

    fn apply(&self, program: &ShaderProgram) {
        program.set_mat4(PROJECTION_UNIFORM, &self.projection);
        program.set_mat4(VIEW_UNIFORM, &self.view);
        program.set_mat4(MODEL_UNIFORM, &self.model);
    }
}

/// GL face to cull for a cull mode, `None` when culling is off
fn cull_face(mode: CullMode) -> Option<GLenum> {
    match mode {
        CullMode::Disabled => None,
        CullMode::Front => Some(gl::FRONT),
        CullMode::Back => Some(gl::BACK),
    }
}

/// Per-frame draw statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Draw calls issued this frame
    pub draw_calls: u32,
    /// Vertices submitted this frame
    pub vertices: u64,
}

/// OpenGL renderer
pub struct Renderer {
    config: RenderConfig,
    viewport: (u32, u32),
    stats: FrameStats,
}

impl Renderer {
    /// Configure global pipeline state for the current context
    ///
    /// # Arguments
    /// * `config` - Depth, culling and clear settings
    /// * `framebuffer_size` - Initial viewport in pixels
    pub fn new(config: &RenderConfig, framebuffer_size: (u32, u32)) -> Self {
        match opengl::version_string() {
            Some(version) => log::info!("OpenGL version: {}", version),
            None => log::warn!("Could not query the OpenGL version string"),
        }

        let [r, g, b, a] = config.clear_color;
        unsafe {
            if config.depth_test {
                gl::Enable(gl::DEPTH_TEST);
            } else {
                gl::Disable(gl::DEPTH_TEST);
            }

            match cull_face(config.cull_mode) {
                Some(face) => {
                    gl::Enable(gl::CULL_FACE);
                    gl::CullFace(face);
                }
                None => gl::Disable(gl::CULL_FACE),
            }

            gl::ClearColor(r, g, b, a);
        }
        log::debug!(
            "Render state: depth test {}, cull mode {:?}",
            config.depth_test,
            config.cull_mode
        );

        let mut renderer = Self {
            config: config.clone(),
            viewport: (0, 0),
            stats: FrameStats::default(),
        };
        renderer.resize(framebuffer_size.0, framebuffer_size.1);
        opengl::check_errors("renderer initialization");
        renderer
    }

    /// Update the viewport after a framebuffer resize
    ///
    /// Zero-sized framebuffers (minimized windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 || (width, height) == self.viewport {
            return;
        }
        log::debug!("Viewport resized to {}x{}", width, height);
        opengl::set_viewport(width, height);
        self.viewport = (width, height);
    }

    /// Current viewport size in pixels
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Render state this renderer was created with
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Clear colour and depth buffers and reset frame statistics
    pub fn begin_frame(&mut self) {
        self.stats = FrameStats::default();
        let mut mask = gl::COLOR_BUFFER_BIT;
        if self.config.depth_test {
            mask |= gl::DEPTH_BUFFER_BIT;
        }
        unsafe { gl::Clear(mask) };
    }

    /// Draw a mesh with the given program, transforms and lighting
    pub fn draw(
        &mut self,
        program: &ShaderProgram,
        mesh: &GpuMesh,
        frame: &FrameUniforms,
        lighting: &LightingEnvironment,
    ) {
        program.use_program();
        lighting.apply(program);
        frame.apply(program);
        mesh.draw();

        self.stats.draw_calls += 1;
        self.stats.vertices += u64::try_from(mesh.vertex_count()).unwrap_or(0);
    }

    /// Drain and log pending GL errors, returning how many there were
    pub fn check_errors(&self) -> usize {
        opengl::check_errors("frame rendering")
    }

    /// Finish the frame, reporting any GL errors raised while drawing
    ///
    /// Returns the statistics of the finished frame.
    pub fn end_frame(&mut self) -> FrameStats {
        let errors = self.check_errors();
        if errors > 0 {
            log::warn!("Frame finished with {} OpenGL error(s)", errors);
        }
        self.stats
    }
}
