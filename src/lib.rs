//! Fruit Cutter - A timed arcade slicing game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (fruit lifecycle, scoring, countdown)
//! - `renderer`: Draw-list construction and the wgpu back end
//! - `assets`: Image/audio loading from a configurable asset root
//! - `audio`: Slice sound and background music playback
//! - `settings`: Data-driven configuration

pub mod assets;
pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use assets::{AssetCatalog, AssetError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Logical screen size
    pub const SCREEN_WIDTH: u32 = 1000;
    pub const SCREEN_HEIGHT: u32 = 800;

    /// Frame pacing target
    pub const TARGET_FPS: u32 = 60;

    /// Session length in seconds
    pub const TIME_LIMIT_SECS: u32 = 60;
    /// Number of fruits on screen at once
    pub const POOL_SIZE: usize = 3;

    /// Fruit sprite edge length (sprites are square)
    pub const FRUIT_SIZE: i32 = 90;
    /// Horizontal spawn margin: x is drawn from [MARGIN, SCREEN_WIDTH - MARGIN]
    pub const SPAWN_MARGIN: i32 = 50;
    /// Spawn height (above the visible area)
    pub const SPAWN_Y: i32 = -50;
    /// Fall speed range, inclusive
    pub const MIN_FALL_SPEED: i32 = 5;
    pub const MAX_FALL_SPEED: i32 = 10;

    /// Frames the slice ring stays on screen after a cut
    pub const SLICE_EFFECT_FRAMES: u32 = 10;
    /// Slice ring geometry, relative to the fruit's top-left corner
    pub const SLICE_RING_OFFSET: f32 = 40.0;
    pub const SLICE_RING_RADIUS: f32 = 50.0;
    pub const SLICE_RING_THICKNESS: f32 = 5.0;
}
