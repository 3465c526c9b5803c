//! Collision detection and response
//!
//! Bullets and balls are advanced here and resolved against the walls, the
//! paddle and the bricks. Entities are swap-removed in place; every loop
//! revisits an index after a removal so the entity moved into it is not
//! skipped.

use glam::Vec2;

use super::geometry::{circle_overlaps_rect, rect_overlaps, segment_intersect_axis_aligned_line};
use super::state::{Ball, GameEvent, GameState, Powerup, PowerupKind, SoundSet};
use crate::consts::*;

/// Advance bullets and resolve bullet/brick hits
pub fn update_bullets(state: &mut GameState, dt: f32) {
    let mut i = 0;
    while i < state.bullets.len() {
        let bullet = {
            let bullet = &mut state.bullets[i];
            bullet.pos.y += bullet.speed * dt;
            *bullet
        };

        if bullet.pos.y - bullet.size > 1.0 {
            state.bullets.swap_remove(i);
            continue;
        }

        let hit = state
            .bricks
            .iter()
            .position(|brick| rect_overlaps(bullet.pos, bullet.dim(), brick.pos, brick.dim));

        if let Some(brick_index) = hit {
            hit_brick(state, brick_index, 1.0, SoundSet::ShootHit);
            state.bullets.swap_remove(i);
            continue;
        }

        i += 1;
    }
}

/// Advance balls and resolve ball/wall, ball/paddle and ball/brick contacts
///
/// `paddle_move` is how far the paddle moved this tick; balls overlapping
/// the paddle get dragged along with it.
pub fn update_balls(state: &mut GameState, paddle_move: f32, dt: f32) {
    let mut i = 0;
    while i < state.balls.len() {
        let mut ball = state.balls[i];

        if ball.pos.y + ball.radius < -1.0 {
            state.remove_ball(i);
            continue;
        }

        if state.is_caught(i) {
            ball.pos = Vec2::new(state.paddle.pos.x, state.paddle.top() + ball.radius);
        } else {
            if circle_overlaps_rect(ball.pos, ball.radius, state.paddle.pos, state.paddle.dim) {
                ball.pos.x += paddle_move;
                ball.dir.x += paddle_move * PADDLE_PUSH_FORCE;
                ball.dir = ball.dir.normalize() * state.balls_speed;
            } else {
                ball.pos += ball.dir * dt;
            }

            bounce_off_walls(&mut ball);
            bounce_off_paddle_top(state, i, &mut ball, dt);
            bounce_off_bricks(state, &mut ball, dt);
        }

        state.balls[i] = ball;
        i += 1;
    }
}

/// Reflect off the top, right and left walls; the bottom is open
fn bounce_off_walls(ball: &mut Ball) {
    if ball.pos.y + ball.radius > 1.0 {
        ball.pos.y = 1.0 - ball.radius;
        ball.dir.y = -ball.dir.y;
    }

    if ball.pos.x + ball.radius > 1.0 {
        ball.pos.x = 1.0 - ball.radius;
        ball.dir.x = -ball.dir.x;
    } else if ball.pos.x - ball.radius < -1.0 {
        ball.pos.x = -1.0 + ball.radius;
        ball.dir.x = -ball.dir.x;
    }
}

/// Catch, side-bounce or curve-bounce a ball that sank below the paddle top
fn bounce_off_paddle_top(state: &mut GameState, index: usize, ball: &mut Ball, dt: f32) {
    let paddle_x = state.paddle.pos.x;
    let top = state.paddle.top();
    let left = state.paddle.left();
    let right = state.paddle.right();

    let touching = ball.pos.y - ball.radius < top
        && ball.pos.x + ball.radius > left
        && ball.pos.x - ball.radius < right;
    if !touching {
        return;
    }

    if state.effect_active(PowerupKind::Glue) && state.paddle.caught_ball.is_none() {
        ball.dir = Vec2::ZERO;
        state.paddle.caught_ball = Some(index);
    } else if ball.dir.x == 0.0 {
        curve_bounce(ball, paddle_x, top, state.balls_speed);
    } else {
        let crossing = segment_intersect_axis_aligned_line(
            ball.pos,
            ball.pos + ball.dir,
            Vec2::new(left, top),
            Vec2::new(right, top),
        );

        if ball.dir.x > 0.0 && crossing.x < left {
            ball.dir.x = -ball.dir.x;
            ball.pos.x = left - ball.radius;
        } else if ball.dir.x < 0.0 && crossing.x > right {
            ball.dir.x = -ball.dir.x;
            ball.pos.x = right + ball.radius;
        } else {
            curve_bounce(ball, paddle_x, top, state.balls_speed);
        }
    }

    // Second step this tick, so the ball leaves the paddle before the next test
    ball.pos += ball.dir * dt;
}

/// Send the ball back up, angled by how far from the paddle center it landed
fn curve_bounce(ball: &mut Ball, paddle_x: f32, paddle_top: f32, speed: f32) {
    ball.dir.x += (ball.pos.x - paddle_x) * PADDLE_CURVE_FACTOR;
    ball.dir.y = -ball.dir.y;
    ball.dir = ball.dir.normalize() * speed;
    ball.pos.y = paddle_top + ball.radius;
}

/// Reflect off every brick the ball overlaps and damage each of them
fn bounce_off_bricks(state: &mut GameState, ball: &mut Ball, dt: f32) {
    let mut j = 0;
    while j < state.bricks.len() {
        let brick = state.bricks[j];

        if !circle_overlaps_rect(ball.pos, ball.radius, brick.pos, brick.dim) {
            j += 1;
            continue;
        }

        if ball.dir.x == 0.0 {
            ball.dir.y = -ball.dir.y;
        } else if ball.dir.y == 0.0 {
            ball.dir.x = -ball.dir.x;
        } else {
            // The face the ball can reach given its horizontal direction
            let face_x = if ball.dir.x > 0.0 { brick.left() } else { brick.right() };
            let bottom = Vec2::new(face_x, brick.bottom());
            let top = Vec2::new(face_x, brick.top());

            let crossing =
                segment_intersect_axis_aligned_line(ball.pos, ball.pos + ball.dir, bottom, top);

            if (ball.dir.y > 0.0 && crossing.y > bottom.y)
                || (ball.dir.y < 0.0 && crossing.y < top.y)
            {
                ball.dir.x = -ball.dir.x;
            } else {
                ball.dir.y = -ball.dir.y;
            }
        }

        ball.pos += ball.dir * dt;

        if !hit_brick(state, j, 2.0, SoundSet::BallHit) {
            j += 1;
        }
    }
}

/// Damage a brick; destroy it and roll for power-up drops once its health
/// runs out
///
/// Returns true if the brick was removed (and another brick now occupies
/// `index`).
pub fn hit_brick(state: &mut GameState, index: usize, damage: f32, sounds: SoundSet) -> bool {
    state.emit(GameEvent::Sound(sounds));

    let brick = &mut state.bricks[index];
    brick.health -= damage;
    if brick.health > 0.0 {
        return false;
    }

    let brick_pos = brick.pos;
    let mut spawn_pos = brick_pos;

    for kind in PowerupKind::SPAWN_ORDER {
        if state.powerups.is_full() {
            break;
        }
        if state.roll() < state.config.chance(kind) {
            state.powerups.push(Powerup::new(kind, spawn_pos));
            state.emit(GameEvent::PowerupSpawned(kind));
            spawn_pos.y -= POWERUP_SIZE;
        }
    }

    state.bricks.swap_remove(index);
    log::trace!("Brick at {brick_pos} destroyed, {} left", state.bricks.len());
    state.emit(GameEvent::BrickDestroyed { pos: brick_pos });

    true
}
