//! Grassland - Main Entry Point
//!
//! A small walkable 3D scene driven by a fixed-timestep loop:
//! - Simulation advances in 1/60 s steps drained from an accumulator
//! - One frame renders per loop iteration, however many steps ran
//! - A coarse sleep paces the loop; the accumulator absorbs the jitter
//!
//! Startup failures (event loop, window, GPU context, texture) are shown in
//! a modal dialog and mapped to distinct process exit codes.

mod core;
mod game;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::core::error::StartupError;
use crate::core::time::{FixedTimestep, FIXED_TIMESTEP, STEPS_PER_SECOND};
use crate::core::{Renderer, Time};
use crate::game::input::Control;
use crate::game::{KeyState, PlayerState};

/// Fixed window size. The scene is framed for this 16:9 layout, so the
/// window is not resizable.
const WINDOW_WIDTH: u32 = 1280;
const WINDOW_HEIGHT: u32 = 720;

const WINDOW_TITLE: &str = "Grassland";

/// Coarse pause between loop iterations. Whatever error it introduces is
/// absorbed by the step accumulator on the next iteration.
const FRAME_DELAY: Duration = Duration::from_millis(16);

/// Application state handler for winit 0.30.
///
/// Owns the window, the renderer, and the simulation state, and runs one
/// loop iteration per `RedrawRequested` event.
struct App {
    /// Window handle.
    window: Option<Arc<Window>>,
    /// WebGPU renderer.
    renderer: Option<Renderer>,
    /// Live and previous key-state tables.
    input: KeyState,
    /// Player pose, advanced at the fixed rate.
    player: PlayerState,
    /// Time manager for delta and elapsed time tracking.
    time: Time,
    /// Accumulator draining wall time into fixed steps.
    stepper: FixedTimestep,
    /// Cleared by the quit key or a close request; the iteration that
    /// notices still finishes before the loop exits.
    running: bool,
    /// Total simulation steps executed.
    steps: u64,
    /// Set when startup fails inside the event loop, reported after it ends.
    startup_error: Option<StartupError>,
}

impl App {
    fn new() -> Self {
        Self {
            window: None,
            renderer: None,
            input: KeyState::new(),
            player: PlayerState::new(),
            time: Time::new(),
            stepper: FixedTimestep::new(),
            running: true,
            steps: 0,
            startup_error: None,
        }
    }

    /// Records a startup error and stops the event loop.
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: StartupError) {
        self.startup_error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
            .with_resizable(false);

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };
        log::info!("Window created: {}x{}", WINDOW_WIDTH, WINDOW_HEIGHT);

        let renderer = match pollster::block_on(Renderer::new(Arc::clone(&window))) {
            Ok(renderer) => renderer,
            Err(e) => return self.fail(event_loop, e),
        };
        log::info!("Renderer initialized successfully");

        // Restart the clock so loading time never counts as a stall.
        self.time = Time::new();
        log::info!(
            "Game loop initialized | Fixed timestep: {:.4}s ({} Hz)",
            FIXED_TIMESTEP,
            STEPS_PER_SECOND
        );

        window.request_redraw();
        self.window = Some(window);
        self.renderer = Some(renderer);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, shutting down...");
                self.running = false;
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    if let Some(control) = Control::from_key_code(code) {
                        self.input.set(control, event.state.is_pressed());
                    }
                }
            }
            WindowEvent::Resized(physical_size) => {
                log::debug!(
                    "Window resized to {}x{}",
                    physical_size.width,
                    physical_size.height
                );
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size.width, physical_size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.time.update();
                let steps = self.stepper.advance(self.time.delta_time());

                // Every accumulated step runs, even after a quit request, so
                // the final frame reflects a fully caught-up simulation.
                for _ in 0..steps {
                    log::info!(
                        "Player X: {:.2}, Y: {:.2}, Z: {:.2}",
                        self.player.x,
                        self.player.y,
                        self.player.z
                    );
                    if !self.player.step(&self.input) {
                        self.running = false;
                    }
                    self.steps += 1;
                }

                if let Some(renderer) = &mut self.renderer {
                    match renderer.render(&self.player) {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("GPU out of memory!");
                            event_loop.exit();
                        }
                        Err(wgpu::SurfaceError::Timeout) => {
                            log::warn!("Surface timeout, skipping frame");
                        }
                        Err(e) => {
                            log::warn!("Render error: {:?}", e);
                        }
                    }
                }

                // Keep the previous-state table one iteration behind.
                self.input.snapshot();

                if self.running {
                    std::thread::sleep(FRAME_DELAY);
                    if let Some(window) = &self.window {
                        window.request_redraw();
                    }
                } else {
                    log::info!(
                        "Final stats: {} steps, {:.2}s elapsed",
                        self.steps,
                        self.time.elapsed_time()
                    );
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }
}

/// Builds the event loop and runs the app to completion.
fn run() -> Result<(), StartupError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app)?;

    match app.startup_error.take() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    log::info!("Grassland starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("{error}");
            rfd::MessageDialog::new()
                .set_level(rfd::MessageLevel::Error)
                .set_title("Error!")
                .set_description(error.to_string())
                .set_buttons(rfd::MessageButtons::Ok)
                .show();
            ExitCode::from(error.exit_code())
        }
    }
}
