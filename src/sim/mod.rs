//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Hit, circle_rect, circle_segment, orthogonal, point_in_rect, reflect_velocity};
pub use state::{Ball, GamePhase, GameState, Paddle, Tile};
pub use tick::{TickInput, tick};
