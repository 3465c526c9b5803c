//! Power-up lifecycle and effects
//!
//! Only one effect is active at a time: collecting a power-up replaces
//! whatever was running, and a leftover split is collapsed back to a single
//! ball first.

use glam::Vec2;

use super::geometry::circle_overlaps_rect;
use super::state::{Ball, Bullet, GameEvent, GameState, PowerupKind, SoundSet};
use crate::consts::*;

/// Count down the active effect; ending a split drops the extra balls
pub fn update_effect_timer(state: &mut GameState, dt: f32) {
    if state.powerup_time <= 0.0 {
        return;
    }

    state.powerup_time -= dt;
    if state.powerup_time > 0.0 {
        return;
    }

    if let Some(kind) = state.active_powerup {
        if kind == PowerupKind::Split {
            state.truncate_balls(1);
        }
        log::debug!("{kind:?} effect expired");
        state.emit(GameEvent::EffectExpired(kind));
    }
}

/// Launch a caught ball, or fire the shooter if it is ready
pub fn handle_shoot(state: &mut GameState) {
    if !state.input.shoot {
        return;
    }

    if let Some(caught) = state.paddle.caught_ball.take() {
        // Launching needs a fresh press
        state.input.shoot = false;
        if let Some(ball) = state.balls.get_mut(caught) {
            ball.dir = Vec2::new(0.0, state.balls_speed);
        }
        state.emit(GameEvent::BallLaunched);
    } else if state.shoot_timeout <= 0.0
        && state.effect_active(PowerupKind::Shooter)
        && state.bullets.len() < BULLETS_MAX - 1
    {
        state.emit(GameEvent::Sound(SoundSet::Shoot));
        state.shoot_timeout += SHOOT_RATE;

        let half_width = state.paddle.dim.x / 2.0;
        let pos = state.paddle.pos;
        state.bullets.push(Bullet::new(pos - Vec2::new(half_width, 0.0)));
        state.bullets.push(Bullet::new(pos + Vec2::new(half_width, 0.0)));
    }
}

/// Tick the shooter cooldown while the shooter is active
pub fn update_shoot_cooldown(state: &mut GameState, dt: f32) {
    if !state.effect_active(PowerupKind::Shooter) {
        return;
    }

    // Overshoot is dropped before firing adds SHOOT_RATE again
    if state.shoot_timeout < 0.0 {
        state.shoot_timeout = 0.0;
    } else if state.shoot_timeout > 0.0 {
        state.shoot_timeout -= dt;
    }
}

/// Collect power-ups touching the paddle and let the rest fall
pub fn update_powerups(state: &mut GameState, dt: f32) {
    let mut i = 0;
    while i < state.powerups.len() {
        let powerup = state.powerups[i];

        if circle_overlaps_rect(
            powerup.pos,
            powerup.dim.x / 2.0,
            state.paddle.pos,
            state.paddle.dim,
        ) {
            state.powerups.swap_remove(i);
            collect(state, powerup.kind);
            continue;
        }

        let powerup = &mut state.powerups[i];
        powerup.pos += powerup.vel * dt;
        powerup.animation_time += dt * 100.0;
        i += 1;
    }
}

/// Apply a collected power-up
pub fn collect(state: &mut GameState, kind: PowerupKind) {
    state.emit(GameEvent::Sound(SoundSet::Powerup));
    state.emit(GameEvent::PowerupCollected(kind));
    log::debug!("Collected {kind:?}");

    state.active_powerup = Some(kind);

    if state.balls.len() > 1 {
        state.truncate_balls(1);
    }

    state.powerup_time = state.config.duration(kind);

    match kind {
        PowerupKind::Split => {
            if let Some(origin) = state.balls.first().map(|ball| ball.pos) {
                while !state.balls.is_full() {
                    let dir = Vec2::new((state.roll() + 1.0) / 2.0, state.roll() + 0.1);
                    let dir = dir.normalize() * state.balls_speed;
                    state.balls.push(Ball::new(origin, dir));
                }
            }
        }
        PowerupKind::Glue => {}
        PowerupKind::Shooter => {
            state.shoot_timeout = 0.0;
        }
    }
}
