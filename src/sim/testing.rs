//! Shared fixtures for simulation tests

use super::level::LevelMap;
use super::state::{GameEvent, GameState, SoundSet};
use crate::config::GameConfig;

/// A started game with no balls, no bricks and no random drops
pub fn bare_state() -> GameState {
    let config = GameConfig {
        split_chance: 0.0,
        glue_chance: 0.0,
        shooter_chance: 0.0,
        ..GameConfig::default()
    };
    let mut state = GameState::new(config, vec![LevelMap::default()], 42);
    state.balls.clear();
    state.paddle.caught_ball = None;
    state.events.clear();
    state
}

/// Sound sets requested, in order
pub fn sounds(events: &[GameEvent]) -> Vec<SoundSet> {
    events
        .iter()
        .filter_map(|event| match event {
            GameEvent::Sound(set) => Some(*set),
            _ => None,
        })
        .collect()
}
