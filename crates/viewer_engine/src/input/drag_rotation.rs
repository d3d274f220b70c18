//! Mouse-drag rotation controller
//!
//! Dragging with the left button held turns the model: horizontal motion
//! adds to yaw, vertical motion adds to pitch, one degree per screen unit
//! scaled by the sensitivity. Each left press re-anchors the drag at the
//! next cursor position, so a new drag never jumps by the distance the
//! cursor travelled while the button was up.

use crate::application::AppEvent;
use crate::foundation::math::{utils::deg_to_rad, Mat4, Mat4Ext};
use crate::input::{InputManager, MouseButton};

/// Accumulated yaw/pitch driven by left-button drags
#[derive(Debug, Clone, PartialEq)]
pub struct DragRotation {
    yaw: f32,
    pitch: f32,
    last_cursor: (f32, f32),
    anchor_pending: bool,
    sensitivity: f32,
}

impl DragRotation {
    /// New controller at zero rotation
    pub fn new(sensitivity: f32) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            last_cursor: (0.0, 0.0),
            anchor_pending: true,
            sensitivity,
        }
    }

    /// Yaw in degrees
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Degrees per screen unit
    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    /// Record a mouse button transition
    pub fn on_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if button == MouseButton::Left && pressed {
            self.anchor_pending = true;
        }
    }

    /// Record a cursor move
    ///
    /// Moves without the left button held are ignored. The first move after
    /// a press only sets the anchor.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64, left_held: bool) {
        if !left_held {
            return;
        }

        let (x, y) = (x as f32, y as f32);
        if self.anchor_pending {
            self.last_cursor = (x, y);
            self.anchor_pending = false;
        }

        let dx = x - self.last_cursor.0;
        // Screen y grows downwards
        let dy = self.last_cursor.1 - y;
        self.last_cursor = (x, y);

        self.yaw += dx * self.sensitivity;
        self.pitch += dy * self.sensitivity;
    }

    /// Feed an event, reading the left button state from `input`
    ///
    /// `input` must already reflect `event`.
    pub fn handle_event(&mut self, event: &AppEvent, input: &InputManager) {
        match *event {
            AppEvent::MouseButton { button, pressed } => self.on_mouse_button(button, pressed),
            AppEvent::MouseMoved { x, y } => {
                self.on_cursor_moved(x, y, input.is_mouse_button_down(MouseButton::Left));
            }
            _ => {}
        }
    }

    /// Return to zero rotation and re-arm the anchor
    pub fn reset(&mut self) {
        self.yaw = 0.0;
        self.pitch = 0.0;
        self.anchor_pending = true;
    }

    /// Model matrix for the current rotation
    ///
    /// Pitch is applied about X (negated so dragging up tips the top away),
    /// then yaw about Y.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::rotation_x(deg_to_rad(-self.pitch))
            * Mat4::rotation_y(deg_to_rad(self.yaw))
            * Mat4::rotation_z(0.0)
    }
}

impl Default for DragRotation {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec4;
    use approx::assert_relative_eq;

    #[test]
    fn test_moves_without_button_are_ignored() {
        let mut rotation = DragRotation::default();
        rotation.on_cursor_moved(100.0, 100.0, false);
        rotation.on_cursor_moved(300.0, 50.0, false);
        assert_eq!(rotation.yaw(), 0.0);
        assert_eq!(rotation.pitch(), 0.0);
    }

    #[test]
    fn test_first_move_anchors() {
        let mut rotation = DragRotation::default();
        rotation.on_mouse_button(MouseButton::Left, true);
        rotation.on_cursor_moved(400.0, 300.0, true);
        assert_eq!(rotation.yaw(), 0.0);
        assert_eq!(rotation.pitch(), 0.0);

        rotation.on_cursor_moved(410.0, 295.0, true);
        assert_relative_eq!(rotation.yaw(), 10.0);
        assert_relative_eq!(rotation.pitch(), 5.0);
    }

    #[test]
    fn test_new_press_reanchors() {
        let mut rotation = DragRotation::default();
        rotation.on_mouse_button(MouseButton::Left, true);
        rotation.on_cursor_moved(0.0, 0.0, true);
        rotation.on_cursor_moved(20.0, 0.0, true);
        rotation.on_mouse_button(MouseButton::Left, false);

        // Cursor travels while released
        rotation.on_cursor_moved(500.0, 500.0, false);

        rotation.on_mouse_button(MouseButton::Left, true);
        rotation.on_cursor_moved(500.0, 500.0, true);
        assert_relative_eq!(rotation.yaw(), 20.0);

        rotation.on_cursor_moved(495.0, 510.0, true);
        assert_relative_eq!(rotation.yaw(), 15.0);
        assert_relative_eq!(rotation.pitch(), -10.0);
    }

    #[test]
    fn test_other_buttons_do_not_reanchor() {
        let mut rotation = DragRotation::default();
        rotation.on_cursor_moved(0.0, 0.0, true);
        rotation.on_mouse_button(MouseButton::Right, true);
        rotation.on_cursor_moved(3.0, 0.0, true);
        assert_relative_eq!(rotation.yaw(), 3.0);
    }

    #[test]
    fn test_sensitivity_scales_delta() {
        let mut rotation = DragRotation::new(0.5);
        rotation.on_cursor_moved(0.0, 0.0, true);
        rotation.on_cursor_moved(10.0, -4.0, true);
        assert_relative_eq!(rotation.yaw(), 5.0);
        assert_relative_eq!(rotation.pitch(), 2.0);
    }

    #[test]
    fn test_event_driven_drag() {
        let mut input = InputManager::new();
        let mut rotation = DragRotation::default();
        let events = [
            AppEvent::MouseMoved { x: 50.0, y: 50.0 },
            AppEvent::MouseButton { button: MouseButton::Left, pressed: true },
            AppEvent::MouseMoved { x: 60.0, y: 50.0 },
            AppEvent::MouseMoved { x: 90.0, y: 40.0 },
            AppEvent::MouseButton { button: MouseButton::Left, pressed: false },
            AppEvent::MouseMoved { x: 200.0, y: 200.0 },
        ];
        for event in &events {
            input.handle_event(event);
            rotation.handle_event(event, &input);
        }
        assert_relative_eq!(rotation.yaw(), 30.0);
        assert_relative_eq!(rotation.pitch(), 10.0);
    }

    #[test]
    fn test_reset() {
        let mut rotation = DragRotation::default();
        rotation.on_cursor_moved(0.0, 0.0, true);
        rotation.on_cursor_moved(45.0, 30.0, true);
        rotation.reset();
        assert_eq!(rotation.yaw(), 0.0);
        assert_eq!(rotation.pitch(), 0.0);

        rotation.on_cursor_moved(1000.0, 1000.0, true);
        assert_eq!(rotation.yaw(), 0.0);
    }

    #[test]
    fn test_model_matrix() {
        let rotation = DragRotation::default();
        assert_relative_eq!(rotation.model_matrix(), Mat4::identity(), epsilon = 1e-6);

        // Quarter turn of yaw sends +X to -Z
        let mut rotation = DragRotation::default();
        rotation.on_cursor_moved(0.0, 0.0, true);
        rotation.on_cursor_moved(90.0, 0.0, true);
        let x_axis = rotation.model_matrix() * Vec4::new(1.0, 0.0, 0.0, 0.0);
        assert_relative_eq!(x_axis, Vec4::new(0.0, 0.0, -1.0, 0.0), epsilon = 1e-6);

        // Positive pitch tips +Y towards -Z
        let mut rotation = DragRotation::default();
        rotation.on_cursor_moved(0.0, 90.0, true);
        rotation.on_cursor_moved(0.0, 0.0, true);
        assert_relative_eq!(rotation.pitch(), 90.0);
        let y_axis = rotation.model_matrix() * Vec4::new(0.0, 1.0, 0.0, 0.0);
        assert_relative_eq!(y_axis, Vec4::new(0.0, 0.0, -1.0, 0.0), epsilon = 1e-6);
    }
}
