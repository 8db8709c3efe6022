//! Brickfall - a paddle-and-tiles arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collision core, game state, tick)
//! - `renderer`: wgpu rendering pipeline
//! - `settings`: User preferences
//! - `highscores`: Local leaderboard

pub mod highscores;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
///
/// Coordinates are screen-space: origin top-left, y grows downward.
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions in pixels
    pub const SCREEN_W: f32 = 500.0;
    pub const SCREEN_H: f32 = 700.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_SPEED: f32 = 200.0;
    pub const BALL_SPAWN: Vec2 = Vec2::new(250.0, 300.0);

    /// Paddle defaults
    pub const PADDLE_SIZE: Vec2 = Vec2::new(64.0, 14.0);
    pub const PADDLE_SPEED: f32 = 300.0;
    pub const PADDLE_SPAWN: Vec2 = Vec2::new(250.0, 650.0);

    /// Tile field layout: a centered grid of destructible tiles
    pub const TILE_SIZE: Vec2 = Vec2::new(64.0, 24.0);
    pub const TILE_SPACING: Vec2 = Vec2::new(96.0, 48.0);
    /// Vertical anchor of the grid as a fraction of screen height
    pub const TILE_FIELD_Y: f32 = 0.3;

    /// Lives at the start of a run
    pub const START_HEALTH: u8 = 3;

    /// Points awarded per destroyed tile
    pub const TILE_SCORE: u64 = 100;
}
