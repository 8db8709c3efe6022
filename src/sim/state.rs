//! Game state and core simulation types
//!
//! Everything needed to reproduce a run lives here and serializes to JSON.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended (health hit zero)
    GameOver,
}

/// The ball
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Velocity in pixels/second; magnitude stays at BALL_SPEED
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// Ball at the spawn point with the fixed opening serve (down-left)
    pub fn new() -> Self {
        Self {
            pos: BALL_SPAWN,
            vel: Vec2::new(-1.0, 1.0) * (BALL_SPEED / 2.0_f32.sqrt()),
            radius: BALL_RADIUS,
        }
    }

    /// Put the ball back at the spawn point, serving down-left or
    /// down-right depending on the coin flip.
    pub fn respawn(&mut self, serve_right: bool) {
        let dir = if serve_right {
            Vec2::new(1.0, 1.0)
        } else {
            Vec2::new(-1.0, 1.0)
        };
        self.pos = BALL_SPAWN;
        self.vel = dir * (BALL_SPEED / 2.0_f32.sqrt());
    }
}

impl Default for Ball {
    fn default() -> Self {
        Self::new()
    }
}

/// The player's paddle
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Paddle {
    /// Center position; only x moves
    pub pos: Vec2,
}

impl Default for Paddle {
    fn default() -> Self {
        Self { pos: PADDLE_SPAWN }
    }
}

impl Paddle {
    /// Bounding box size (constant)
    #[inline]
    pub fn size(&self) -> Vec2 {
        PADDLE_SIZE
    }

    /// Shift horizontally and clamp so the whole paddle stays on screen
    pub fn shift(&mut self, dx: f32) {
        let half_w = 0.5 * PADDLE_SIZE.x;
        self.pos.x = (self.pos.x + dx).clamp(half_w, SCREEN_W - half_w);
    }
}

/// A destructible tile
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tile {
    pub id: u32,
    pub center: Vec2,
}

/// RNG state wrapper for serialization
///
/// Draws reconstruct a Pcg32 from (seed, stream) and bump the stream, so the
/// state stays a plain pair of integers and replays stay deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// Fresh generator for the next draw; advances the stream
    pub fn next_rng(&mut self) -> Pcg32 {
        self.stream += 1;
        Pcg32::new(self.seed, self.stream)
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG state
    pub rng_state: RngState,
    /// Current wave index (0-based; bumps each time the field clears)
    pub wave_index: u32,
    /// Remaining lives
    pub health: u8,
    /// Score
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Player paddle
    pub paddle: Paddle,
    /// The ball
    pub ball: Ball,
    /// Live tiles (in spawn order)
    pub tiles: Vec<Tile>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng_state: RngState::new(seed),
            wave_index: 0,
            health: START_HEALTH,
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            paddle: Paddle::default(),
            ball: Ball::new(),
            tiles: Vec::new(),
            next_id: 1,
        };
        state.spawn_tile_field();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Fill the playfield with the 5x4 tile grid
    pub fn spawn_tile_field(&mut self) {
        for i in -2i32..=2 {
            for j in -2i32..2 {
                let id = self.next_entity_id();
                self.tiles.push(Tile {
                    id,
                    center: Vec2::new(
                        SCREEN_W * 0.5 + i as f32 * TILE_SPACING.x,
                        SCREEN_H * TILE_FIELD_Y + j as f32 * TILE_SPACING.y,
                    ),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_field_layout() {
        let state = GameState::new(1);
        assert_eq!(state.tiles.len(), 20);

        // Grid is centered horizontally and sits in the upper playfield
        let min_x = state.tiles.iter().map(|t| t.center.x).fold(f32::MAX, f32::min);
        let max_x = state.tiles.iter().map(|t| t.center.x).fold(f32::MIN, f32::max);
        assert_eq!(min_x, SCREEN_W * 0.5 - 2.0 * TILE_SPACING.x);
        assert_eq!(max_x, SCREEN_W * 0.5 + 2.0 * TILE_SPACING.x);

        let max_y = state.tiles.iter().map(|t| t.center.y).fold(f32::MIN, f32::max);
        assert!(max_y < SCREEN_H * 0.5);

        // Every tile gets a distinct id
        let mut ids: Vec<u32> = state.tiles.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn test_paddle_clamps_to_screen() {
        let mut paddle = Paddle::default();
        paddle.shift(-10_000.0);
        assert_eq!(paddle.pos.x, 0.5 * PADDLE_SIZE.x);
        paddle.shift(10_000.0);
        assert_eq!(paddle.pos.x, SCREEN_W - 0.5 * PADDLE_SIZE.x);
    }

    #[test]
    fn test_ball_respawn_serves_downward() {
        let mut ball = Ball::new();
        ball.pos = Vec2::new(9.0, 9.0);

        ball.respawn(true);
        assert_eq!(ball.pos, BALL_SPAWN);
        assert!(ball.vel.x > 0.0 && ball.vel.y > 0.0);
        assert!((ball.vel.length() - BALL_SPEED).abs() < 1e-3);

        ball.respawn(false);
        assert!(ball.vel.x < 0.0 && ball.vel.y > 0.0);
    }

    #[test]
    fn test_rng_state_is_deterministic() {
        use rand::Rng;

        let mut a = RngState::new(42);
        let mut b = RngState::new(42);
        for _ in 0..8 {
            let x: u32 = a.next_rng().random();
            let y: u32 = b.next_rng().random();
            assert_eq!(x, y);
        }
    }
}
