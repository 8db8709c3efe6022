//! Fixed timestep simulation tick
//!
//! Advances the game deterministically: paddle motion, ball integration with
//! wall bounces, then collision response against the paddle and tile field.

use glam::Vec2;
use rand::Rng;

use super::collision::{circle_rect, reflect_velocity};
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Move the paddle left (held key)
    pub move_left: bool,
    /// Move the paddle right (held key)
    pub move_right: bool,
    /// Pause toggle (one-shot, cleared by the caller after the tick)
    pub pause: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }

    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    // Paddle motion; opposing keys cancel out
    let mut dx = 0.0;
    if input.move_right {
        dx += PADDLE_SPEED * dt;
    }
    if input.move_left {
        dx -= PADDLE_SPEED * dt;
    }
    if dx != 0.0 {
        state.paddle.shift(dx);
    }

    move_ball(state, dt);
    if state.phase == GamePhase::GameOver {
        return;
    }

    bounce_off_paddle(state);
    destroy_hit_tiles(state);

    // Field cleared: next wave, fresh grid, fresh serve
    if state.tiles.is_empty() {
        state.wave_index += 1;
        log::info!(
            "wave {} cleared at score {}, spawning next field",
            state.wave_index,
            state.score
        );
        state.spawn_tile_field();
        let serve_right = state.rng_state.next_rng().random_range(0..2) == 1;
        state.ball.respawn(serve_right);
    }
}

/// Integrate the ball and bounce it off the screen bounds.
///
/// Left, right and top walls clamp and reflect; the bottom edge costs a
/// life and respawns the ball (ending the run at zero health).
fn move_ball(state: &mut GameState, dt: f32) {
    let r = state.ball.radius;
    let mut new_pos = state.ball.pos + state.ball.vel * dt;

    if new_pos.x > SCREEN_W - r {
        new_pos.x = SCREEN_W - r;
        state.ball.vel = reflect_velocity(state.ball.vel, Vec2::new(-1.0, 0.0));
    }
    if new_pos.x < r {
        new_pos.x = r;
        state.ball.vel = reflect_velocity(state.ball.vel, Vec2::new(1.0, 0.0));
    }
    if new_pos.y > SCREEN_H - r {
        state.health = state.health.saturating_sub(1);
        let serve_right = state.rng_state.next_rng().random_range(0..2) == 1;
        state.ball.respawn(serve_right);
        if state.health == 0 {
            log::info!("out of lives at score {}", state.score);
            state.phase = GamePhase::GameOver;
        }
        return;
    }
    if new_pos.y < r {
        new_pos.y = r;
        state.ball.vel = reflect_velocity(state.ball.vel, Vec2::new(0.0, 1.0));
    }

    state.ball.pos = new_pos;
}

/// Resolve a ball/paddle overlap and reflect the ball off it
fn bounce_off_paddle(state: &mut GameState) {
    let hit = circle_rect(
        state.ball.pos,
        state.ball.radius,
        state.paddle.pos,
        state.paddle.size(),
    );
    if hit.intersects {
        state.ball.pos += hit.resolution;
        state.ball.vel = reflect_velocity(state.ball.vel, hit.resolution.normalize());
    }
}

/// Destroy every tile the ball touches this tick.
///
/// Tiles die on first contact. Each hit re-resolves the ball before the
/// next tile is tested, so a ball clipping two tiles bounces off both.
fn destroy_hit_tiles(state: &mut GameState) {
    let mut i = 0;
    while i < state.tiles.len() {
        let tile = state.tiles[i];
        let hit = circle_rect(state.ball.pos, state.ball.radius, tile.center, TILE_SIZE);
        if hit.intersects {
            state.ball.pos += hit.resolution;
            state.ball.vel = reflect_velocity(state.ball.vel, hit.resolution.normalize());
            state.tiles.remove(i);
            state.score += TILE_SCORE;
        } else {
            i += 1;
        }
    }
}
