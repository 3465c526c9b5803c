//! Level layouts and level / game resets
//!
//! Map files are plain text grids: digits `1`..`5` are bricks with that much
//! health, a newline starts the next row, anything else leaves a gap.

use std::fs;
use std::path::Path;

use glam::Vec2;

use super::state::{Brick, GameEvent, GameMode, GameState};
use crate::consts::*;
use crate::error::LoadError;

/// Brick layout of one level
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelMap {
    pub bricks: Vec<Brick>,
}

impl LevelMap {
    /// Read and parse a map file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let map = parse_map(&text);
        log::info!("Loaded map {} ({} bricks)", path.display(), map.bricks.len());
        Ok(map)
    }
}

/// Lay bricks out from a text grid
pub fn parse_map(text: &str) -> LevelMap {
    let column_start = -1.0 + BRICK_SPACING + BRICK_WIDTH / 2.0;
    let mut x = column_start;
    let mut y = 1.0 - BRICK_SPACING - BRICK_HEIGHT / 2.0;
    let mut bricks = Vec::new();

    for tile in text.chars() {
        match tile {
            '\n' => {
                x = column_start;
                y -= BRICK_HEIGHT + BRICK_SPACING;
            }
            _ => {
                if let Some(health) = brick_health(tile) {
                    bricks.push(Brick::new(Vec2::new(x, y), health as f32));
                }
                x += BRICK_WIDTH + BRICK_SPACING;
            }
        }
    }

    LevelMap { bricks }
}

fn brick_health(tile: char) -> Option<u8> {
    let health = tile.to_digit(10)? as u8;
    (1..=BRICK_MAX_HEALTH).contains(&health).then_some(health)
}

/// Start the current level: fresh bricks, one ball on the paddle
pub fn new_level(state: &mut GameState) {
    state.mode = GameMode::Started;

    state.balls.clear();
    state.bullets.clear();
    state.powerups.clear();
    state.powerup_time = 0.0;

    match state.levels.get(state.level_index) {
        Some(map) => state.bricks.fill_from(&map.bricks),
        None => state.bricks.clear(),
    }

    state.paddle.reset();
    state.paddle.caught_ball = None;
    state.spawn_ball_caught();

    log::info!(
        "Level {} started: {} bricks, ball speed {:.2}",
        state.level_index + 1,
        state.bricks.len(),
        state.balls_speed
    );
    state.emit(GameEvent::LevelStarted {
        level: state.level_index,
    });
}

/// Reset score, lives and ball speed for a new game
pub fn new_game(state: &mut GameState) {
    state.balls_speed = BALLS_SPEED_INIT;
    state.lives = state.config.lives_count;
    state.score = 0;
    state.level_index = 0;
}

/// Move on to the following map, wrapping around after the last one
pub fn advance_level(state: &mut GameState) {
    if !state.levels.is_empty() {
        state.level_index = (state.level_index + 1) % state.levels.len();
    }
}
