//! Single point light lighting model
//!
//! The fragment shader implements ambient + diffuse + specular shading for
//! one point light. This module holds the values it needs and knows the
//! uniform names they are bound to.

use crate::core::config::LightingConfig;
use crate::foundation::math::Vec3;
use crate::render::opengl::ShaderProgram;

/// Uniform receiving the object's base colour
pub const OBJECT_COLOR_UNIFORM: &str = "objectColor";
/// Uniform receiving the light colour
pub const LIGHT_COLOR_UNIFORM: &str = "lightColor";
/// Uniform receiving the light position
pub const LIGHT_POSITION_UNIFORM: &str = "lightPos";

/// Lighting parameters for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct LightingEnvironment {
    /// Base colour of the lit object
    pub object_color: Vec3,
    /// Colour of the point light
    pub light_color: Vec3,
    /// World-space light position
    pub light_position: Vec3,
}

impl LightingEnvironment {
    /// Build from configuration
    pub fn from_config(config: &LightingConfig) -> Self {
        Self {
            object_color: Vec3::from(config.object_color),
            light_color: Vec3::from(config.light_color),
            light_position: Vec3::from(config.light_position),
        }
    }

    /// Upload the lighting uniforms to `program`, which must be current
    pub fn apply(&self, program: &ShaderProgram) {
        program.set_vec3(OBJECT_COLOR_UNIFORM, &self.object_color);
        program.set_vec3(LIGHT_COLOR_UNIFORM, &self.light_color);
        program.set_vec3(LIGHT_POSITION_UNIFORM, &self.light_position);
    }
}

impl Default for LightingEnvironment {
    fn default() -> Self {
        Self::from_config(&LightingConfig::default())
    }
}
