//! Input management system
//!
//! Raw GLFW events are translated into [`AppEvent`]s by [`translate_event`]
//! and then fed, in arrival order, to the [`InputManager`], which tracks
//! which keys and mouse buttons are currently held. Because the state is
//! rebuilt from the event stream rather than queried from GLFW, a handler
//! looking at the manager sees exactly the state as of the event it is
//! processing.

pub mod bindings;
pub mod drag_rotation;

use std::collections::HashSet;

use crate::application::AppEvent;

pub use bindings::{InputAction, KeyBindings};
pub use drag_rotation::DragRotation;

/// Input manager
#[derive(Debug, Default)]
pub struct InputManager {
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    cursor_position: Option<(f64, f64)>,
}

impl InputManager {
    /// Create a new input manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Update tracked state from an event
    pub fn handle_event(&mut self, event: &AppEvent) {
        match *event {
            AppEvent::KeyPressed(key) => {
                self.keys_down.insert(key);
            }
            AppEvent::KeyReleased(key) => {
                self.keys_down.remove(&key);
            }
            AppEvent::MouseButton { button, pressed } => {
                if pressed {
                    self.buttons_down.insert(button);
                } else {
                    self.buttons_down.remove(&button);
                }
            }
            AppEvent::MouseMoved { x, y } => {
                self.cursor_position = Some((x, y));
            }
            AppEvent::WindowUnfocused => {
                // Releases that happen while unfocused are never delivered
                self.keys_down.clear();
                self.buttons_down.clear();
            }
            _ => {}
        }
    }

    /// Whether a key is currently held
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Whether a mouse button is currently held
    pub fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    /// Last reported cursor position in screen coordinates
    pub fn cursor_position(&self) -> Option<(f64, f64)> {
        self.cursor_position
    }
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A key
    A,
    /// B key
    B,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// G key
    G,
    /// H key
    H,
    /// I key
    I,
    /// J key
    J,
    /// K key
    K,
    /// L key
    L,
    /// M key
    M,
    /// N key
    N,
    /// O key
    O,
    /// P key
    P,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// T key
    T,
    /// U key
    U,
    /// V key
    V,
    /// W key
    W,
    /// X key
    X,
    /// Y key
    Y,
    /// Z key
    Z,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

impl KeyCode {
    /// Map a GLFW key, `None` for keys the engine does not expose
    pub fn from_glfw(key: glfw::Key) -> Option<Self> {
        use glfw::Key;

        let code = match key {
            Key::A => Self::A,
            Key::B => Self::B,
            Key::C => Self::C,
            Key::D => Self::D,
            Key::E => Self::E,
            Key::F => Self::F,
            Key::G => Self::G,
            Key::H => Self::H,
            Key::I => Self::I,
            Key::J => Self::J,
            Key::K => Self::K,
            Key::L => Self::L,
            Key::M => Self::M,
            Key::N => Self::N,
            Key::O => Self::O,
            Key::P => Self::P,
            Key::Q => Self::Q,
            Key::R => Self::R,
            Key::S => Self::S,
            Key::T => Self::T,
            Key::U => Self::U,
            Key::V => Self::V,
            Key::W => Self::W,
            Key::X => Self::X,
            Key::Y => Self::Y,
            Key::Z => Self::Z,
            Key::Space => Self::Space,
            Key::Enter => Self::Enter,
            Key::Escape => Self::Escape,
            Key::Up => Self::Up,
            Key::Down => Self::Down,
            Key::Left => Self::Left,
            Key::Right => Self::Right,
            _ => return None,
        };
        Some(code)
    }
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

impl MouseButton {
    /// Map a GLFW mouse button, `None` for extra buttons
    pub fn from_glfw(button: glfw::MouseButton) -> Option<Self> {
        match button {
            glfw::MouseButton::Button1 => Some(Self::Left),
            glfw::MouseButton::Button2 => Some(Self::Right),
            glfw::MouseButton::Button3 => Some(Self::Middle),
            _ => None,
        }
    }
}

/// Translate a GLFW window event into an application event
///
/// Key repeats, unmapped keys and buttons, and event kinds the engine does
/// not use yield `None`.
pub fn translate_event(event: &glfw::WindowEvent) -> Option<AppEvent> {
    use glfw::{Action, WindowEvent};

    match *event {
        WindowEvent::Key(key, _, action, _) => {
            let key = KeyCode::from_glfw(key)?;
            match action {
                Action::Press => Some(AppEvent::KeyPressed(key)),
                Action::Release => Some(AppEvent::KeyReleased(key)),
                Action::Repeat => None,
            }
        }
        WindowEvent::MouseButton(button, action, _) => {
            let button = MouseButton::from_glfw(button)?;
            match action {
                Action::Press => Some(AppEvent::MouseButton { button, pressed: true }),
                Action::Release => Some(AppEvent::MouseButton { button, pressed: false }),
                Action::Repeat => None,
            }
        }
        WindowEvent::CursorPos(x, y) => Some(AppEvent::MouseMoved { x, y }),
        WindowEvent::Scroll(delta_x, delta_y) => Some(AppEvent::MouseWheel { delta_x, delta_y }),
        WindowEvent::FramebufferSize(width, height) => Some(AppEvent::WindowResized {
            width: u32::try_from(width).unwrap_or(0),
            height: u32::try_from(height).unwrap_or(0),
        }),
        WindowEvent::Close => Some(AppEvent::WindowCloseRequested),
        WindowEvent::Focus(true) => Some(AppEvent::WindowFocused),
        WindowEvent::Focus(false) => Some(AppEvent::WindowUnfocused),
        _ => None,
    }
}
