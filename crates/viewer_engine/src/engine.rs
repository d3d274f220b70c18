//! Core engine implementation

use crate::{
    application::{AppEvent, Application},
    config::ConfigError,
    core::config::ViewerConfig,
    foundation::time::{FrameClock, Stopwatch},
    input::{translate_event, InputManager},
    render::{window::WindowError, FrameStats, Renderer, WindowHandle},
};
use thiserror::Error;

/// Main engine struct
///
/// Owns the window (and with it the GL context), the renderer and the input
/// state, and drives the main loop.
pub struct Engine {
    /// Input handling system
    pub input: InputManager,

    renderer: Renderer,
    clock: FrameClock,
    config: ViewerConfig,
    last_frame: FrameStats,
    running: bool,

    // Declared last so the context outlives everything above
    window: WindowHandle,
}

impl Engine {
    /// Create the window and renderer
    pub fn new(config: ViewerConfig) -> Result<Self, EngineError> {
        log::info!("Initializing engine...");

        let window = WindowHandle::new(&config.window)?;
        let renderer = Renderer::new(&config.render, window.get_framebuffer_size());

        Ok(Self {
            input: InputManager::new(),
            renderer,
            window,
            clock: FrameClock::new(),
            config,
            last_frame: FrameStats::default(),
            running: true,
        })
    }

    /// Run the engine main loop with the given application
    ///
    /// `app.cleanup` runs even when the loop stops on an error, so GPU
    /// resources are always released before the window is destroyed.
    pub fn run<T: Application>(config: ViewerConfig, app: &mut T) -> Result<(), EngineError> {
        let boot = Stopwatch::start_new();
        let mut engine = Self::new(config)?;

        if let Err(e) = app.initialize(&mut engine) {
            app.cleanup(&mut engine);
            return Err(EngineError::ApplicationError(format!("App initialization: {}", e)));
        }

        log::info!("Boot time: {} ms", boot.elapsed_millis());
        log::info!("Starting main loop...");

        let result = engine.main_loop(app);

        app.cleanup(&mut engine);
        log::info!(
            "Engine shutdown complete after {} frames ({:.1} FPS average)",
            engine.clock.frame_count(),
            engine.clock.average_fps()
        );
        result
    }

    fn main_loop<T: Application>(&mut self, app: &mut T) -> Result<(), EngineError> {
        while self.running && !self.window.should_close() {
            let delta_time = self.clock.tick();

            self.renderer.begin_frame();
            app.update(self, delta_time)
                .map_err(|e| EngineError::ApplicationError(format!("App update: {}", e)))?;
            app.render(self)
                .map_err(|e| EngineError::ApplicationError(format!("App render: {}", e)))?;
            self.last_frame = self.renderer.end_frame();

            self.window.swap_buffers();
            self.window.poll_events();
            self.dispatch_events(app)?;
        }
        Ok(())
    }

    /// Translate pending window events and deliver them in order
    fn dispatch_events<T: Application>(&mut self, app: &mut T) -> Result<(), EngineError> {
        let events: Vec<AppEvent> = self
            .window
            .event_iter()
            .filter_map(|(_, event)| translate_event(&event))
            .collect();

        for event in events {
            self.input.handle_event(&event);
            self.handle_event(event);
            app.handle_event(self, event)
                .map_err(|e| EngineError::ApplicationError(format!("App event: {}", e)))?;
        }
        Ok(())
    }

    /// Handle an application event
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::WindowCloseRequested => {
                log::info!("Window close requested");
                self.running = false;
            }
            AppEvent::WindowResized { width, height } => {
                self.renderer.resize(width, height);
            }
            AppEvent::WindowFocused => log::debug!("Window focused"),
            AppEvent::WindowUnfocused => log::debug!("Window unfocused"),
            _ => {}
        }
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
        self.window.set_should_close(true);
    }

    /// Whether the main loop will run another frame
    pub fn is_running(&self) -> bool {
        self.running && !self.window.should_close()
    }

    /// Get the renderer
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Get mutable access to the renderer
    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    /// Get the window
    pub fn window(&self) -> &WindowHandle {
        &self.window
    }

    /// Get mutable access to the window
    pub fn window_mut(&mut self) -> &mut WindowHandle {
        &mut self.window
    }

    /// Get the input manager
    pub fn input(&self) -> &InputManager {
        &self.input
    }

    /// Configuration the engine was started with
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Current framebuffer size in pixels
    pub fn framebuffer_size(&self) -> (u32, u32) {
        self.window.get_framebuffer_size()
    }

    /// Get the current frame delta time
    pub fn delta_time(&self) -> f32 {
        self.clock.delta_time()
    }

    /// Statistics of the last completed frame
    pub fn last_frame_stats(&self) -> FrameStats {
        self.last_frame
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Window or context creation failed
    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Application error
    #[error("Application error: {0}")]
    ApplicationError(String),
}
