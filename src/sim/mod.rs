//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - One owned `GameState`, mutated by exclusive reference
//! - Seeded RNG only
//! - Side effects (sounds, transitions) reported as `GameEvent`s

pub mod collision;
pub mod geometry;
pub mod level;
pub mod pool;
pub mod powerup;
pub mod state;
pub mod tick;

#[cfg(test)]
pub(crate) mod testing;

pub use collision::hit_brick;
pub use geometry::{circle_overlaps_rect, rect_overlaps, segment_intersect_axis_aligned_line};
pub use level::{LevelMap, parse_map};
pub use pool::Pool;
pub use state::{
    Ball, Brick, Bullet, GameEvent, GameMode, GameState, InputState, Key, Paddle, Powerup,
    PowerupKind, SoundSet,
};
pub use tick::tick;
