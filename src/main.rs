//! Stormsea - an ocean under a scattering sky
//!
//! Press S to roll in a storm: the sun goes out, rain starts falling and
//! lightning flickers over the water.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use stormsea::cli::Args;
use stormsea::controls::{ControlEvent, ControlName};
use stormsea::error::{OceanError, OceanResult};
use stormsea::frame::{ContextConfig, OceanContext};
use stormsea::ocean::generate_normal_map;
use stormsea::rendering::RenderSystem;

/// Wind step per key press
const WIND_STEP: f32 = 0.5;
/// Wave height step per key press
const WAVE_HEIGHT_STEP: f32 = 0.25;
/// Breeze and current step per key press (degrees)
const ANGLE_STEP_DEG: f32 = 5.0;

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Simulation
    context: OceanContext,

    // Startup failure raised inside the event loop
    failure: Option<OceanError>,
}

impl App {
    fn new(config: ContextConfig) -> Self {
        Self {
            window: None,
            render_system: None,
            context: OceanContext::new(config),
            failure: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> OceanResult<()> {
        let (width, height) = self.context.camera.viewport();
        let window_attributes = Window::default_attributes()
            .with_title("Stormsea")
            .with_inner_size(winit::dpi::LogicalSize::new(width, height));

        let window = Arc::new(event_loop.create_window(window_attributes)?);

        let render_system =
            pollster::block_on(RenderSystem::new(Arc::clone(&window), &self.context.scene))?;

        // The window may not have the requested size on HiDPI displays
        let size = window.inner_size();
        self.context.resize(size.width, size.height);

        log::info!("Stormsea is running");
        log::info!("W/Q wind, H/G waves, arrows breeze, A/D current, S storm, Esc quit");

        self.window = Some(window);
        self.render_system = Some(render_system);
        Ok(())
    }

    /// Map a pressed key onto a control change
    fn handle_key(&mut self, key: KeyCode) {
        let (name, delta) = match key {
            KeyCode::KeyW => (ControlName::Wind, WIND_STEP),
            KeyCode::KeyQ => (ControlName::Wind, -WIND_STEP),
            KeyCode::KeyH => (ControlName::WaveHeight, WAVE_HEIGHT_STEP),
            KeyCode::KeyG => (ControlName::WaveHeight, -WAVE_HEIGHT_STEP),
            KeyCode::ArrowRight => (ControlName::Breeze, ANGLE_STEP_DEG),
            KeyCode::ArrowLeft => (ControlName::Breeze, -ANGLE_STEP_DEG),
            KeyCode::KeyD => (ControlName::CurrentDirection, ANGLE_STEP_DEG),
            KeyCode::KeyA => (ControlName::CurrentDirection, -ANGLE_STEP_DEG),
            KeyCode::KeyS => {
                self.context.handle(ControlEvent::StormToggled);
                return;
            }
            _ => return,
        };

        // Nudge a copy so the change goes through the regular event path
        let mut inputs = self.context.inputs().clone();
        if let Some(value) = inputs.nudge(name, delta) {
            let event = match name {
                ControlName::Wind => ControlEvent::WindChanged(value),
                ControlName::WaveHeight => ControlEvent::WaveHeightChanged(value),
                ControlName::Breeze => ControlEvent::BreezeChanged(value),
                ControlName::CurrentDirection => ControlEvent::CurrentDirectionChanged(value),
            };
            self.context.handle(event);
            log::info!("{} = {}", name.id(), value);
        }
    }

    /// Update and render a single frame
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(render_system) = self.render_system.as_mut() else {
            return;
        };

        self.context.update();

        match render_system.render(&mut self.context.scene, &self.context.camera) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                render_system.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        if let Err(e) = self.init(event_loop) {
            self.failure = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(key),
                        ..
                    },
                ..
            } => {
                if key == KeyCode::Escape {
                    event_loop.exit();
                } else {
                    self.handle_key(key);
                }
            }
            WindowEvent::Resized(size) => {
                if self.context.resize(size.width, size.height) {
                    if let Some(render_system) = self.render_system.as_mut() {
                        render_system.resize(size.width, size.height);
                    }
                }
            }
            WindowEvent::RedrawRequested => self.render_frame(event_loop),
            _ => {}
        }
    }
}

fn run(args: Args) -> OceanResult<()> {
    let config = args.context_config();

    if let Some(path) = &args.dump_normal_map {
        generate_normal_map(&config.normal_map).save(path)?;
        log::info!("Normal map written to {}", path.display());
        return Ok(());
    }

    let mut app = App::new(config);
    let event_loop = EventLoop::new()?;
    event_loop.run_app(&mut app)?;

    match app.failure.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
