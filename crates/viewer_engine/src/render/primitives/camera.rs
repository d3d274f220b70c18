//! # 3D Camera System
//!
//! A fixed perspective camera. The view matrix is a right-handed look-at
//! from `position` along `front`, followed by a constant scene offset, so
//! the model at the origin ends up in front of the eye. Only the aspect
//! ratio changes at runtime (on framebuffer resize).

use crate::core::config::CameraConfig;
use crate::foundation::math::{Vec3, Mat4, Mat4Ext, utils};

/// 3D perspective camera
///
/// # Coordinate System
/// Standard OpenGL view space: X+ right, Y+ up, looking down -Z.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye position in world space
    pub position: Vec3,

    /// Viewing direction (need not be normalized)
    pub front: Vec3,

    /// Up vector for camera orientation
    pub up: Vec3,

    /// Translation applied to the world after the look-at transform
    pub scene_offset: Vec3,

    /// Vertical field of view in radians
    pub fov: f32,

    /// Aspect ratio (width / height)
    pub aspect: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,
}

impl Camera {
    /// Create a perspective camera at `position` looking down -Z
    ///
    /// # Arguments
    /// * `fov_degrees` - Vertical field of view in degrees
    /// * `aspect` - Viewport width / height
    /// * `near` - Near clipping plane distance (must be > 0)
    /// * `far` - Far clipping plane distance (must be > near)
    pub fn perspective(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            front: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::new(0.0, 1.0, 0.0),
            scene_offset: Vec3::zeros(),
            fov: utils::deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
        }
    }

    /// Build a camera from configuration and the initial viewport aspect
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            front: Vec3::from(config.front),
            up: Vec3::from(config.up),
            scene_offset: Vec3::from(config.scene_offset),
            ..Self::perspective(Vec3::from(config.position), config.fov_degrees, aspect, config.near, config.far)
        }
    }

    /// Update camera aspect ratio for viewport changes
    ///
    /// Only logs when the change is larger than 0.01 to keep resize drags quiet.
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > 0.01 {
            log::info!("Camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }

    /// Update the aspect ratio from a framebuffer size in pixels
    ///
    /// Zero-sized framebuffers (minimized windows) are ignored.
    pub fn set_viewport_size(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.set_aspect_ratio(width as f32 / height as f32);
        }
    }

    /// World-to-view transformation
    pub fn get_view_matrix(&self) -> Mat4 {
        let look_at = Mat4::look_at(self.position, self.position + self.front, self.up);
        look_at * Mat4::translation(self.scene_offset)
    }

    /// Perspective projection matrix
    pub fn get_projection_matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov, self.aspect, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn default_camera() -> Camera {
        Camera::from_config(&CameraConfig::default(), 800.0 / 600.0)
    }

    #[test]
    fn test_from_config() {
        let camera = default_camera();
        assert_relative_eq!(camera.fov, utils::deg_to_rad(45.0));
        assert_eq!(camera.front, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(camera.scene_offset, Vec3::new(0.0, 0.0, -5.0));
        assert_relative_eq!(camera.aspect, 800.0 / 600.0);
    }

    #[test]
    fn test_default_view_pushes_origin_back() {
        let view = default_camera().get_view_matrix();
        // Identity look-at followed by a translation of -5 along Z
        assert_relative_eq!(view, Mat4::translation(Vec3::new(0.0, 0.0, -5.0)), epsilon = 1e-6);

        let origin = view.transform_point(&Point3::origin());
        assert_relative_eq!(origin.coords, Vec3::new(0.0, 0.0, -5.0), epsilon = 1e-6);
    }

    #[test]
    fn test_origin_projects_to_screen_centre() {
        let camera = default_camera();
        let clip = camera.get_projection_matrix() * camera.get_view_matrix() * nalgebra::Vector4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.xyz() / clip.w;
        assert_relative_eq!(ndc.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(ndc.y, 0.0, epsilon = 1e-6);
        assert!(ndc.z > -1.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_viewport_resize() {
        let mut camera = default_camera();
        camera.set_viewport_size(1920, 1080);
        assert_relative_eq!(camera.aspect, 1920.0 / 1080.0);

        // Minimized window keeps the previous aspect
        camera.set_viewport_size(0, 0);
        assert_relative_eq!(camera.aspect, 1920.0 / 1080.0);
    }
}
