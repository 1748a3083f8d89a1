//! Arena FPS - a small first-person arena shooter.
//!
//! The binary owns the window and the event loop; all gameplay lives in the
//! `game` library's [`Simulation`].

use std::sync::Arc;

use anyhow::Result;
use engine_core::Time;
use game::config::GameConfig;
use game::hud::HudData;
use game::simulation::Simulation;
use input::InputState;
use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Fullscreen, Window, WindowId};

mod events;

/// Everything alive while the window is open.
pub(crate) struct GameState {
    window: Arc<Window>,
    input: InputState,
    time: Time,
    sim: Simulation,
    title: String,
}

impl GameState {
    fn new(window: Arc<Window>, config: &GameConfig) -> Self {
        Self {
            window,
            input: InputState::new(),
            time: Time::new(),
            sim: Simulation::new(config),
            title: String::new(),
        }
    }

    /// Sample input, step the simulation, then present.
    fn frame(&mut self) {
        self.time.update();
        let dt = self.time.step_seconds();

        let frame_input = self.input.sample();
        self.sim.tick(&frame_input, dt);
        self.input.begin_frame();
        self.sync_cursor();

        let title = HudData::from_simulation(&self.sim).summary();
        if title != self.title {
            self.window.set_title(&title);
            self.title = title;
        }

        if self.time.frame_count() % 600 == 0 {
            log::debug!(
                "{:.0} fps, {} enemies, {} particles",
                self.time.fps(),
                self.sim.enemy_count(),
                self.sim.particles().len()
            );
        }
    }
}

struct App {
    state: Option<GameState>,
}

impl App {
    fn new() -> Self {
        Self { state: None }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_none() {
            let config = GameConfig::load();
            let mut window_attrs = Window::default_attributes()
                .with_title("Arena FPS")
                .with_inner_size(winit::dpi::LogicalSize::new(config.window_width, config.window_height));
            if config.fullscreen {
                window_attrs = window_attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
            }

            let window = match event_loop.create_window(window_attrs) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    log::error!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            window.request_redraw();
            self.state = Some(GameState::new(window, &config));
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(state) = &mut self.state {
            if state.handle_window_event(event) {
                event_loop.exit();
            }
        }
    }

    fn device_event(&mut self, _: &ActiveEventLoop, _: DeviceId, event: DeviceEvent) {
        if let Some(state) = &mut self.state {
            state.handle_device_event(event);
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║                            ARENA FPS                             ║");
    println!("╠══════════════════════════════════════════════════════════════════╣");
    println!("║  MENU:      1 - Target Practice   │  2 - Survival                ║");
    println!("║  CONTROLS:                                                       ║");
    println!("║    WASD       - Move              │  Mouse  - Look around        ║");
    println!("║    Left Click - Fire weapon       │  R      - Reload             ║");
    println!("║    1/2/3      - Pistol/Rifle/Shotgun                             ║");
    println!("║    P / Escape - Pause / resume    │  M      - Menu (when paused) ║");
    println!("║    Enter/Space/Click - Leave the game-over screen                ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");

    log::info!("Starting Arena FPS");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app)?;

    Ok(())
}
