//! # Viewer Engine
//!
//! A small OpenGL viewer engine built on GLFW.
//!
//! ## Features
//!
//! - **OpenGL Core Profile**: window and context creation through GLFW
//! - **Shader Programs**: RAII wrapper over GLSL programs with uniform setters
//! - **Meshes**: interleaved position/normal vertex buffers
//! - **Input**: event-driven key and mouse state, drag-to-rotate controller
//! - **Configuration**: TOML or RON files through serde
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use viewer_engine::prelude::*;
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         // Load shaders and upload meshes
//!         Ok(())
//!     }
//!
//!     fn render(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         // Issue draw calls
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, engine: &mut Engine) {
//!         // Drop GPU resources
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ViewerConfig::default();
//!     let mut app = MyApp;
//!     Engine::run(config, &mut app)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]

// Core engine modules
pub mod core;

pub mod foundation;
pub mod config;
pub mod render;
pub mod input;

mod application;
mod engine;

pub use application::{AppError, AppEvent, Application};
pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        AppError, AppEvent, Application,
        Engine, EngineError,
        config::Config,
        core::config::{ViewerConfig, WindowConfig, ShaderConfig, CameraConfig, RenderConfig},
        foundation::{
            math::{Vec3, Mat4, Mat4Ext},
            time::{FrameClock, Stopwatch},
        },
        render::{
            Renderer, FrameUniforms, Camera, Mesh, GpuMesh,
            ShaderProgram, ShaderSource, LightingEnvironment,
        },
        input::{InputManager, KeyCode, MouseButton, KeyBindings, InputAction, DragRotation},
    };
}
