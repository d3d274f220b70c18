//! # Core Engine Module
//!
//! Shared abstractions used throughout the engine. At the moment this is the
//! unified configuration system; the low-level utilities live in
//! [`crate::foundation`].

pub mod config;

// Re-export commonly used config types
pub use config::{
    ViewerConfig,
    WindowConfig,
    ShaderConfig,
    CameraConfig,
    LightingConfig,
    ControlsConfig,
    RenderConfig,
    CullMode,
    Config,
    ConfigError,
};
