//! Brickfall entry point
//!
//! Native window shell: winit event loop, wgpu bring-up, fixed-timestep
//! simulation drain, and one render pass per frame.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use brickfall::consts::*;
use brickfall::renderer::{RenderState, scene_vertices};
use brickfall::sim::{GamePhase, GameState, TickInput, tick};
use brickfall::{HighScores, Settings};

fn wall_clock_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Everything that exists once the window is up
struct AppState {
    window: Arc<Window>,
    render: RenderState,
    game: GameState,
    input: TickInput,
    accumulator: f32,
    last_frame: Instant,
    last_phase: GamePhase,
    settings: Settings,
    highscores: HighScores,
    highscores_path: PathBuf,
    // FPS tracking
    frames: u32,
    fps: u32,
    fps_window_start: Instant,
    title: String,
}

impl AppState {
    async fn new(window: Arc<Window>, settings: Settings) -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("using adapter: {:?}", adapter.get_info().name);

        let size = window.inner_size();
        let render = RenderState::new(
            surface,
            &adapter,
            size.width.max(1),
            size.height.max(1),
            settings.vsync,
        )
        .await;

        let seed = settings.fixed_seed.unwrap_or_else(wall_clock_ms);
        log::info!("new run with seed {seed}");

        let highscores_path = PathBuf::from(HighScores::FILE_NAME);
        let highscores = HighScores::load(&highscores_path);
        if let Some(best) = highscores.best() {
            log::info!("best score on record: {best}");
        }

        let now = Instant::now();
        Self {
            window,
            render,
            game: GameState::new(seed),
            input: TickInput::default(),
            accumulator: 0.0,
            last_frame: now,
            last_phase: GamePhase::Playing,
            settings,
            highscores,
            highscores_path,
            frames: 0,
            fps: 0,
            fps_window_start: now,
            title: String::new(),
        }
    }

    /// Drain the accumulator in fixed substeps, then refresh HUD state
    fn update(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(0.1);
        self.last_frame = now;
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.game, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.pause = false;
        }

        // Record the run once, on the transition into game over
        if self.game.phase != self.last_phase {
            if self.game.phase == GamePhase::GameOver {
                let wave = self.game.wave_index + 1;
                if let Some(rank) = self.highscores.add_score(self.game.score, wave, wall_clock_ms())
                {
                    log::info!("run placed #{rank} on the leaderboard");
                }
                self.highscores.save(&self.highscores_path);
            }
            self.last_phase = self.game.phase;
        }

        self.frames += 1;
        if self.fps_window_start.elapsed().as_secs_f32() >= 1.0 {
            self.fps = self.frames;
            self.frames = 0;
            self.fps_window_start = now;
        }

        self.refresh_title();
    }

    /// The window title doubles as the score/health readout
    fn refresh_title(&mut self) {
        let mut title = format!(
            "Brickfall | score {} | wave {} | health {}",
            self.game.score,
            self.game.wave_index + 1,
            self.game.health
        );
        match self.game.phase {
            GamePhase::Paused => title.push_str(" | paused"),
            GamePhase::GameOver => title.push_str(" | game over, R restarts"),
            GamePhase::Playing => {}
        }
        if self.settings.show_fps {
            title.push_str(&format!(" | {} fps", self.fps));
        }
        if title != self.title {
            self.window.set_title(&title);
            self.title = title;
        }
    }

    fn restart(&mut self) {
        let seed = self.settings.fixed_seed.unwrap_or_else(wall_clock_ms);
        log::info!("restarted with seed {seed}");
        self.game = GameState::new(seed);
        self.accumulator = 0.0;
        self.input = TickInput::default();
        self.last_phase = GamePhase::Playing;
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        match key {
            KeyCode::ArrowLeft | KeyCode::KeyA => self.input.move_left = pressed,
            KeyCode::ArrowRight | KeyCode::KeyD => self.input.move_right = pressed,
            KeyCode::Escape | KeyCode::KeyP if pressed => self.input.pause = true,
            KeyCode::KeyR if pressed => {
                if self.game.phase == GamePhase::GameOver {
                    self.restart();
                }
            }
            _ => {}
        }
    }
}

struct App {
    settings: Settings,
    state: Option<AppState>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let window_attrs = WindowAttributes::default()
            .with_title("Brickfall")
            .with_inner_size(LogicalSize::new(SCREEN_W as f64, SCREEN_H as f64));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .expect("Failed to create window"),
        );
        self.state = Some(pollster::block_on(AppState::new(
            window,
            self.settings.clone(),
        )));

        log::info!("ready; arrows/A-D move, Escape pauses");
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(state) = &mut self.state else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                state.render.resize(new_size.width, new_size.height);
            }
            WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                state.handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::RedrawRequested => {
                state.update();

                let vertices = scene_vertices(&state.game);
                match state.render.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let (w, h) = state.render.size;
                        state.render.resize(w, h);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("out of GPU memory");
                        event_loop.exit();
                    }
                    Err(e) => log::warn!("render error: {e:?}"),
                }

                state.window.request_redraw();
            }
            _ => {}
        }
    }
}

fn main() {
    env_logger::init();

    let settings_path = std::path::Path::new(Settings::FILE_NAME);
    let settings = Settings::load(settings_path);
    if !settings_path.exists() {
        // Write the defaults so the knobs are discoverable
        settings.save(settings_path);
    }

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App {
        settings,
        state: None,
    };
    event_loop.run_app(&mut app).expect("Event loop error");
}
