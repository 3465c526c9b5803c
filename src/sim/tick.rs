//! Variable timestep simulation tick
//!
//! Advances the game by one rendered frame. All motion scales with `dt`, so
//! reflection geometry depends on the frame time; feed a fixed `dt` when
//! results must be reproducible.

use super::collision::{update_balls, update_bullets};
use super::level::{advance_level, new_game, new_level};
use super::powerup::{handle_shoot, update_effect_timer, update_powerups, update_shoot_cooldown};
use super::state::{GameEvent, GameMode, GameState, InputState};
use crate::consts::*;

/// Advance the game state by `dt` seconds
///
/// Input is read from `state.input`. A paused game simply isn't ticked.
/// Events pile up in `state.events` until the caller drains them with
/// [`GameState::drain_events`].
pub fn tick(state: &mut GameState, dt: f32) {
    match state.mode {
        GameMode::Started => play(state, dt),
        GameMode::Starting | GameMode::Over | GameMode::Win => wait(state, dt),
    }
}

/// Horizontal paddle displacement for this tick; right wins over left
pub fn paddle_move(input: &InputState, speed: f32, dt: f32) -> f32 {
    let mut distance = 0.0;
    if input.left {
        distance = -speed * dt;
    }
    if input.right {
        distance = speed * dt;
    }
    distance
}

fn play(state: &mut GameState, dt: f32) {
    if state.balls.is_empty() {
        if state.lives > 0 {
            state.lives -= 1;
            state.spawn_ball_caught();
            log::debug!("Ball lost, {} lives left", state.lives);
            state.emit(GameEvent::LifeLost {
                lives_left: state.lives,
            });
        } else {
            let score = state.score;
            state.mode = GameMode::Over;
            state.wait_time = GAME_WAIT_TIME;
            new_game(state);
            log::info!("Game over with score {score}");
            state.emit(GameEvent::GameOver { score });
            return;
        }
    } else if state.bricks.is_empty() {
        state.mode = GameMode::Win;
        state.wait_time = GAME_WAIT_TIME;
        state.score += 1;
        log::info!("Level {} cleared, score {}", state.level_index + 1, state.score);
        state.emit(GameEvent::LevelWon { score: state.score });
        return;
    }

    update_effect_timer(state, dt);
    handle_shoot(state);

    let distance = paddle_move(&state.input, state.paddle.speed, dt);
    state.paddle.slide(distance);

    update_bullets(state, dt);
    update_balls(state, distance, dt);
    update_shoot_cooldown(state, dt);
    update_powerups(state, dt);

    state.paddle.update_blink(&mut state.rng, dt);
}

/// Between levels: only the paddle animates until the wait runs out
fn wait(state: &mut GameState, dt: f32) {
    state.wait_time -= dt;

    match state.mode {
        GameMode::Win => {
            state.paddle.pos.y += dt * WIN_PADDLE_RISE_SPEED;
            state.paddle.update_blink(&mut state.rng, dt);
        }
        GameMode::Over => state.paddle.update_blink(&mut state.rng, dt),
        GameMode::Starting | GameMode::Started => {}
    }

    if state.wait_time <= 0.0 {
        state.balls_speed += BALLS_SPEED_INCREASE;
        if state.mode == GameMode::Win {
            advance_level(state);
        }
        new_level(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::level::{LevelMap, parse_map};
    use crate::sim::state::{Ball, Brick, Key, SoundSet};
    use crate::sim::testing::{bare_state, sounds};
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn quiet_config() -> GameConfig {
        GameConfig {
            split_chance: 0.0,
            glue_chance: 0.0,
            shooter_chance: 0.0,
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_clearing_bricks_wins_level() {
        let mut state = bare_state();
        state.balls.push(Ball::default());

        tick(&mut state, DT);

        assert_eq!(state.mode, GameMode::Win);
        assert_eq!(state.score, 1);
        assert_eq!(state.wait_time, GAME_WAIT_TIME);
        assert!(state.events.contains(&GameEvent::LevelWon { score: 1 }));
    }

    #[test]
    fn test_losing_last_ball_without_lives_ends_game() {
        let mut state = bare_state();
        state.bricks.push(Brick::new(Vec2::ZERO, 3.0));
        state.lives = 0;
        state.score = 4;
        state.balls_speed = 2.1;

        tick(&mut state, DT);

        assert_eq!(state.mode, GameMode::Over);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, state.config.lives_count);
        assert_eq!(state.balls_speed, BALLS_SPEED_INIT);
        assert_eq!(state.wait_time, GAME_WAIT_TIME);
        assert!(state.events.contains(&GameEvent::GameOver { score: 4 }));
    }

    #[test]
    fn test_losing_ball_with_lives_respawns_on_paddle() {
        let mut state = bare_state();
        state.bricks.push(Brick::new(Vec2::ZERO, 3.0));
        state.lives = 2;

        tick(&mut state, DT);

        assert_eq!(state.mode, GameMode::Started);
        assert_eq!(state.lives, 1);
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.paddle.caught_ball, Some(0));
    }

    #[test]
    fn test_win_screen_leads_to_next_level() {
        let levels = vec![parse_map("1\n"), parse_map("22\n")];
        let mut state = GameState::new(quiet_config(), levels, 3);
        state.bricks.clear();

        tick(&mut state, DT);
        assert_eq!(state.mode, GameMode::Win);
        let paddle_y = state.paddle.pos.y;

        tick(&mut state, DT);
        assert_eq!(state.mode, GameMode::Win);
        assert!(state.paddle.pos.y > paddle_y);

        let mut guard = 0;
        while state.mode == GameMode::Win && guard < 1000 {
            tick(&mut state, DT);
            guard += 1;
        }

        assert_eq!(state.mode, GameMode::Started);
        assert_eq!(state.level_index, 1);
        assert_eq!(state.bricks.len(), 2);
        assert!((state.balls_speed - (BALLS_SPEED_INIT + BALLS_SPEED_INCREASE)).abs() < 1e-6);
        assert_eq!(state.score, 1);
        assert_eq!(state.paddle.pos.y, PADDLE_Y);
        assert_eq!(state.paddle.caught_ball, Some(0));
    }

    #[test]
    fn test_game_over_restarts_first_level() {
        let levels = vec![parse_map("1\n"), parse_map("22\n")];
        let mut state = GameState::new(quiet_config(), levels, 3);
        state.level_index = 1;
        state.balls.clear();
        state.lives = 0;

        tick(&mut state, DT);
        assert_eq!(state.mode, GameMode::Over);

        for _ in 0..200 {
            tick(&mut state, DT);
        }

        assert_eq!(state.mode, GameMode::Started);
        assert_eq!(state.level_index, 0);
        assert_eq!(state.bricks.len(), 1);
    }

    #[test]
    fn test_launched_ball_breaks_brick_above() {
        let map = LevelMap {
            bricks: vec![
                Brick::new(Vec2::new(0.0, 0.5), 1.0),
                Brick::new(Vec2::new(0.8, 0.9), 5.0),
            ],
        };
        let mut state = GameState::new(quiet_config(), vec![map], 9);
        state.drain_events();
        state.input.press(Key::Shoot);

        let mut ticks = 0;
        while state.bricks.len() == 2 && ticks < 300 {
            tick(&mut state, DT);
            ticks += 1;
        }

        assert_eq!(state.bricks.len(), 1);
        assert_eq!(state.bricks[0].health, 5.0);
        assert_eq!(state.score, 0);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::BallLaunched));
        assert_eq!(sounds(&events), vec![SoundSet::BallHit]);
        let ball = state.balls[0];
        assert_eq!(ball.dir.x, 0.0);
        assert!(ball.dir.y < 0.0);
    }

    #[test]
    fn test_paddle_moves_and_right_overrides_left() {
        let mut state = bare_state();
        state.bricks.push(Brick::new(Vec2::new(0.0, 0.9), 3.0));
        state.balls.push(Ball::new(Vec2::new(0.0, 0.0), Vec2::new(0.0, 0.0)));
        state.input.press(Key::Left);
        state.input.press(Key::Right);

        tick(&mut state, DT);

        assert!((state.paddle.pos.x - PADDLE_SPEED * DT).abs() < 1e-6);

        state.input.release(Key::Right);
        tick(&mut state, DT);
        assert!(state.paddle.pos.x.abs() < 1e-6);
    }

    #[test]
    fn test_same_seed_same_game() {
        let map = parse_map("1212\n 3 3\n4545\n");
        let mut a = GameState::new(GameConfig::default(), vec![map.clone()], 77);
        let mut b = GameState::new(GameConfig::default(), vec![map], 77);

        for frame in 0..900 {
            for state in [&mut a, &mut b] {
                state.input.shoot = frame % 30 == 0;
                state.input.left = (frame / 45) % 2 == 0;
                state.input.right = (frame / 70) % 2 == 0;
                tick(state, DT);
            }
        }

        let a = serde_json::to_string(&a).unwrap();
        let b = serde_json::to_string(&b).unwrap();
        assert_eq!(a, b);
    }
}
