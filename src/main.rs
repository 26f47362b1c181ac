//! Fruit Cutter entry point
//!
//! Loads settings and assets, opens the window, and runs the frame-paced
//! game loop.

use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use glam::Vec2;
use thiserror::Error;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use fruit_cutter::audio::{AudioManager, SoundEffect};
use fruit_cutter::consts::*;
use fruit_cutter::renderer::{RenderError, RenderState, Scene};
use fruit_cutter::settings::{Settings, SettingsError};
use fruit_cutter::sim::{FrameInput, GameEvent, GameState, tick};
use fruit_cutter::{AssetCatalog, AssetError};

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("Error: {0}")]
    Asset(#[from] AssetError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

/// Map a cursor position in window pixels onto the logical screen
fn window_to_screen(cursor: PhysicalPosition<f64>, window: PhysicalSize<u32>) -> Vec2 {
    if window.width == 0 || window.height == 0 {
        return Vec2::new(cursor.x as f32, cursor.y as f32);
    }
    Vec2::new(
        (cursor.x / f64::from(window.width) * f64::from(SCREEN_WIDTH)) as f32,
        (cursor.y / f64::from(window.height) * f64::from(SCREEN_HEIGHT)) as f32,
    )
}

/// Primary button and cursor as last reported by the window
#[derive(Debug, Default, Clone, Copy)]
struct Pointer {
    /// Window pixels
    cursor: PhysicalPosition<f64>,
    held: bool,
}

impl Pointer {
    /// Track pointer-related window events. Returns true if the event was one.
    fn handle(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => self.cursor = *position,
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => self.held = *state == ElementState::Pressed,
            // A release outside the window is never delivered
            WindowEvent::CursorLeft { .. } | WindowEvent::Focused(false) => self.held = false,
            _ => return false,
        }
        true
    }
}

/// What a `RedrawRequested` should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Redraw {
    /// Paced frame: tick, then render
    Frame,
    /// Repaint the frozen game-over screen
    Repaint,
    /// Unpaced redraw while running; the next paced frame repaints
    Skip,
}

impl Redraw {
    fn classify(frame_due: bool, game_over: bool) -> Self {
        if frame_due {
            Redraw::Frame
        } else if game_over {
            Redraw::Repaint
        } else {
            Redraw::Skip
        }
    }
}

fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Game instance holding all state
struct Game {
    window: Arc<Window>,
    render_state: RenderState,
    audio: AudioManager,
    state: GameState,
    pointer: Pointer,
    /// Session clock origin
    started: Instant,
    /// Deadline for the next simulation frame
    next_frame: Instant,
    frame_interval: Duration,
    /// Set when the pacer asks for a redraw
    frame_due: bool,
}

impl Game {
    fn new(
        event_loop: &ActiveEventLoop,
        settings: &Settings,
        assets: &AssetCatalog,
    ) -> Result<Self, AppError> {
        let attributes = Window::default_attributes()
            .with_title("Fruit Cutter Game")
            .with_inner_size(LogicalSize::new(SCREEN_WIDTH, SCREEN_HEIGHT))
            .with_resizable(false);
        let window = Arc::new(event_loop.create_window(attributes)?);
        let size = window.inner_size();
        log::info!("Window created: {}x{}", size.width, size.height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window.clone())
            .map_err(RenderError::from)?;
        let render_state = pollster::block_on(RenderState::new(
            &instance,
            surface,
            size.width,
            size.height,
            assets,
        ))?;

        let audio = AudioManager::new(assets.slice_sound.clone(), assets.music.clone(), settings);

        let seed = settings.seed.unwrap_or_else(seed_from_clock);
        let state = GameState::with_config(seed, settings.session_config());
        log::info!("Game initialized with seed: {}", seed);

        let now = Instant::now();
        Ok(Self {
            window,
            render_state,
            audio,
            state,
            pointer: Pointer::default(),
            started: now,
            next_frame: now,
            frame_interval: settings.frame_interval(),
            frame_due: false,
        })
    }

    /// Run one simulation frame and react to what happened
    fn step(&mut self) {
        let input = FrameInput {
            pointer: window_to_screen(self.pointer.cursor, self.window.inner_size()),
            pointer_down: self.pointer.held,
            elapsed: self.started.elapsed(),
        };
        tick(&mut self.state, &input);

        for event in self.state.drain_events() {
            match event {
                GameEvent::FruitSliced { .. } => self.audio.play(SoundEffect::Slice),
                GameEvent::TimeUp { .. } => {
                    log::info!("Waiting for ESC or window close");
                }
            }
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let scene = Scene::build(&self.state);
        self.render_state.render(&scene)
    }
}

struct App {
    settings: Settings,
    /// Handed to the game when the window opens
    assets: Option<AssetCatalog>,
    game: Option<Game>,
    error: Option<AppError>,
}

impl App {
    fn new(settings: Settings, assets: AssetCatalog) -> Self {
        Self {
            settings,
            assets: Some(assets),
            game: None,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: AppError) {
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.game.is_some() {
            return;
        }
        let Some(assets) = self.assets.take() else {
            return;
        };

        match Game::new(event_loop, &self.settings, &assets) {
            Ok(game) => {
                self.game = Some(game);
                log::info!("Fruit Cutter running!");
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(game) = self.game.as_mut() else {
            return;
        };

        // Frozen after time-up: only wait for quit events
        if game.state.is_game_over() {
            event_loop.set_control_flow(ControlFlow::Wait);
            return;
        }

        let now = Instant::now();
        if now >= game.next_frame {
            game.frame_due = true;
            game.window.request_redraw();
            game.next_frame += game.frame_interval;
            // Fell behind; don't try to catch up with a burst of frames
            if game.next_frame < now {
                game.next_frame = now + game.frame_interval;
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(game.next_frame));
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(game) = self.game.as_mut() else {
            return;
        };

        if game.pointer.handle(&event) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                    && game.state.is_game_over()
                {
                    log::info!("Escape pressed, exiting.");
                    event_loop.exit();
                }
            }

            WindowEvent::Resized(size) => {
                game.render_state.resize(size.width, size.height);
            }

            WindowEvent::RedrawRequested => {
                match Redraw::classify(game.frame_due, game.state.is_game_over()) {
                    Redraw::Frame => {
                        game.frame_due = false;
                        game.step();
                    }
                    Redraw::Repaint => {}
                    // Rendering here would show the slice ring on an extra frame
                    Redraw::Skip => return,
                }

                match game.render() {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let (w, h) = game.render_state.size;
                        game.render_state.resize(w, h);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                        event_loop.exit();
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(game) = self.game.take() {
            log::info!("Final score: {}", game.state.score);
        }
    }
}

fn run() -> Result<(), AppError> {
    log::info!("Fruit Cutter starting...");

    let args: Vec<String> = std::env::args().collect();
    let settings = Settings::load(&args)?;
    // Mandatory images are checked before any window exists
    let assets = AssetCatalog::load(&settings.asset_root)?;

    let event_loop = EventLoop::new()?;
    let mut app = App::new(settings, assets);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        if let AppError::Asset(asset) = &e {
            log::error!("Required asset {} could not be loaded", asset.asset_name());
        }
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_to_screen_scales() {
        let window = PhysicalSize::new(2000, 1600);
        let p = window_to_screen(PhysicalPosition::new(1000.0, 400.0), window);
        assert_eq!(p, Vec2::new(500.0, 200.0));
    }

    #[test]
    fn test_window_to_screen_identity_at_logical_size() {
        let window = PhysicalSize::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        let p = window_to_screen(PhysicalPosition::new(123.0, 456.0), window);
        assert_eq!(p, Vec2::new(123.0, 456.0));
    }

    #[test]
    fn test_window_to_screen_zero_size() {
        let p = window_to_screen(PhysicalPosition::new(5.0, 6.0), PhysicalSize::new(0, 0));
        assert_eq!(p, Vec2::new(5.0, 6.0));
    }

    fn device() -> winit::event::DeviceId {
        // SAFETY: only compared, never handed to the platform
        unsafe { winit::event::DeviceId::dummy() }
    }

    fn left(state: ElementState) -> WindowEvent {
        WindowEvent::MouseInput {
            device_id: device(),
            state,
            button: MouseButton::Left,
        }
    }

    #[test]
    fn test_pointer_tracks_left_button_and_cursor() {
        let mut pointer = Pointer::default();
        assert!(pointer.handle(&WindowEvent::CursorMoved {
            device_id: device(),
            position: PhysicalPosition::new(12.0, 34.0),
        }));
        assert!(pointer.handle(&left(ElementState::Pressed)));
        assert!(pointer.held);
        assert_eq!(pointer.cursor, PhysicalPosition::new(12.0, 34.0));

        assert!(pointer.handle(&left(ElementState::Released)));
        assert!(!pointer.held);
    }

    #[test]
    fn test_other_buttons_ignored() {
        let mut pointer = Pointer::default();
        pointer.handle(&left(ElementState::Pressed));
        let right = WindowEvent::MouseInput {
            device_id: device(),
            state: ElementState::Released,
            button: MouseButton::Right,
        };
        assert!(!pointer.handle(&right));
        assert!(pointer.held);
    }

    #[test]
    fn test_focus_loss_releases_pointer() {
        let mut pointer = Pointer::default();
        pointer.handle(&left(ElementState::Pressed));
        assert!(!pointer.handle(&WindowEvent::Focused(true)));
        assert!(pointer.held);

        assert!(pointer.handle(&WindowEvent::Focused(false)));
        assert!(!pointer.held);
    }

    #[test]
    fn test_cursor_leaving_releases_pointer() {
        let mut pointer = Pointer::default();
        pointer.handle(&left(ElementState::Pressed));
        assert!(pointer.handle(&WindowEvent::CursorLeft {
            device_id: device(),
        }));
        assert!(!pointer.held);
    }

    #[test]
    fn test_unpaced_redraw_skipped_while_running() {
        assert_eq!(Redraw::classify(true, false), Redraw::Frame);
        assert_eq!(Redraw::classify(false, false), Redraw::Skip);
        assert_eq!(Redraw::classify(false, true), Redraw::Repaint);
    }

    #[test]
    fn test_asset_error_names_file() {
        let err = AppError::from(AssetError::Missing {
            name: "background.jpg".to_string(),
            dir: "assets".into(),
        });
        assert_eq!(
            err.to_string(),
            "Error: file background.jpg not found in assets"
        );
    }
}
