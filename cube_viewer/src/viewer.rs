//! Lit cube that rotates while dragged with the left mouse button

use viewer_engine::prelude::*;

/// GPU resources, alive only between `initialize` and `cleanup`
struct GpuResources {
    program: ShaderProgram,
    cube: GpuMesh,
}

/// The cube viewer application
pub struct CubeViewer {
    gpu: Option<GpuResources>,
    camera: Camera,
    lighting: LightingEnvironment,
    rotation: DragRotation,
    bindings: KeyBindings,
}

impl CubeViewer {
    /// Build the CPU-side state from configuration
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            gpu: None,
            camera: Camera::from_config(&config.camera, config.window.aspect_ratio()),
            lighting: LightingEnvironment::from_config(&config.lighting),
            rotation: DragRotation::new(config.controls.rotation_sensitivity),
            bindings: KeyBindings::default(),
        }
    }

    /// Current rotation state
    pub fn rotation(&self) -> &DragRotation {
        &self.rotation
    }

    /// Camera used for drawing
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Update viewer state from an event
    ///
    /// `input` must already reflect `event`. Returns the action the event
    /// triggered, if any; `ResetRotation` is handled here, `Quit` is left
    /// to the caller.
    fn apply_event(&mut self, event: AppEvent, input: &InputManager) -> Option<InputAction> {
        if let AppEvent::WindowResized { width, height } = event {
            self.camera.set_viewport_size(width, height);
        }

        self.rotation.handle_event(&event, input);

        let action = self.bindings.action_for(&event)?;
        if action == InputAction::ResetRotation {
            log::info!("Rotation reset");
            self.rotation.reset();
        }
        Some(action)
    }
}

impl Application for CubeViewer {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        let shaders = &engine.config().shaders;
        log::info!(
            "Loading shaders {} and {}",
            shaders.vertex_shader_path,
            shaders.fragment_shader_path
        );
        let program = ShaderProgram::from_files(
            &shaders.vertex_shader_path,
            &shaders.fragment_shader_path,
        )?;
        let cube = GpuMesh::upload(&Mesh::cube())?;
        self.gpu = Some(GpuResources { program, cube });

        let (width, height) = engine.framebuffer_size();
        self.camera.set_viewport_size(width, height);
        Ok(())
    }

    fn render(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        let gpu = self
            .gpu
            .as_ref()
            .ok_or_else(|| AppError::Custom("render called before initialize".to_string()))?;

        let frame = FrameUniforms::from_camera(&self.camera, self.rotation.model_matrix());
        engine
            .renderer_mut()
            .draw(&gpu.program, &gpu.cube, &frame, &self.lighting);
        Ok(())
    }

    fn handle_event(&mut self, engine: &mut Engine, event: AppEvent) -> Result<(), AppError> {
        if self.apply_event(event, engine.input()) == Some(InputAction::Quit) {
            engine.quit();
        }
        Ok(())
    }

    fn cleanup(&mut self, _engine: &mut Engine) {
        if self.gpu.take().is_some() {
            log::info!("Released shader program and cube mesh");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn feed(viewer: &mut CubeViewer, input: &mut InputManager, event: AppEvent) -> Option<InputAction> {
        input.handle_event(&event);
        viewer.apply_event(event, input)
    }

    fn left(pressed: bool) -> AppEvent {
        AppEvent::MouseButton { button: MouseButton::Left, pressed }
    }

    #[test]
    fn test_escape_requests_quit() {
        let mut viewer = CubeViewer::new(&ViewerConfig::default());
        let mut input = InputManager::new();

        assert_eq!(
            feed(&mut viewer, &mut input, AppEvent::KeyPressed(KeyCode::Escape)),
            Some(InputAction::Quit)
        );
        assert_eq!(feed(&mut viewer, &mut input, AppEvent::KeyReleased(KeyCode::Escape)), None);
    }

    #[test]
    fn test_drag_rotates_cube() {
        let mut viewer = CubeViewer::new(&ViewerConfig::default());
        let mut input = InputManager::new();

        feed(&mut viewer, &mut input, AppEvent::MouseMoved { x: 10.0, y: 10.0 });
        feed(&mut viewer, &mut input, left(true));
        feed(&mut viewer, &mut input, AppEvent::MouseMoved { x: 100.0, y: 100.0 });
        feed(&mut viewer, &mut input, AppEvent::MouseMoved { x: 130.0, y: 80.0 });
        feed(&mut viewer, &mut input, left(false));
        feed(&mut viewer, &mut input, AppEvent::MouseMoved { x: 400.0, y: 400.0 });

        assert_relative_eq!(viewer.rotation().yaw(), 30.0);
        assert_relative_eq!(viewer.rotation().pitch(), 20.0);
    }

    #[test]
    fn test_space_resets_rotation() {
        let mut viewer = CubeViewer::new(&ViewerConfig::default());
        let mut input = InputManager::new();

        feed(&mut viewer, &mut input, left(true));
        feed(&mut viewer, &mut input, AppEvent::MouseMoved { x: 0.0, y: 0.0 });
        feed(&mut viewer, &mut input, AppEvent::MouseMoved { x: 25.0, y: 0.0 });
        assert_relative_eq!(viewer.rotation().yaw(), 25.0);

        assert_eq!(
            feed(&mut viewer, &mut input, AppEvent::KeyPressed(KeyCode::Space)),
            Some(InputAction::ResetRotation)
        );
        assert_eq!(viewer.rotation().yaw(), 0.0);
    }

    #[test]
    fn test_resize_updates_camera_aspect() {
        let mut viewer = CubeViewer::new(&ViewerConfig::default());
        let mut input = InputManager::new();
        let before = viewer.camera().get_projection_matrix();

        feed(&mut viewer, &mut input, AppEvent::WindowResized { width: 1000, height: 500 });
        let after = viewer.camera().get_projection_matrix();

        // Only the x scale depends on the aspect ratio
        assert_relative_eq!(after[(1, 1)], before[(1, 1)]);
        assert_relative_eq!(after[(0, 0)], after[(1, 1)] / 2.0, epsilon = 1e-6);
    }
}
