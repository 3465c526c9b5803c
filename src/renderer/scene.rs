//! Scene drawing
//!
//! Read-only: everything animated (blink, sprite time) is advanced by the
//! simulation, so drawing the same state twice issues the same calls.

use std::f32::consts::PI;

use glam::Vec2;

use super::{Image, Renderer, colors};
use crate::consts::BRICK_MAX_HEALTH;
use crate::sim::{GameMode, GameState, Paddle, Powerup, PowerupKind};

/// Power-up sprite sheet: one row per kind, 16px frames
pub const POWERUPS_IMAGE: Image = Image {
    id: 0,
    dim: Vec2::new(64.0, 48.0),
};

const SPRITE_FRAME: f32 = 16.0;

const PIP_DIM: Vec2 = Vec2::new(0.05, 0.03);
const CANNON_DIM: Vec2 = Vec2::new(0.03, 0.12);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Emotion {
    Happy,
    Sad,
}

/// Draw one frame of the game
pub fn draw_game(state: &GameState, renderer: &mut impl Renderer) {
    match state.mode {
        GameMode::Starting => renderer.clear(colors::BACKGROUND),
        GameMode::Win => {
            renderer.clear(colors::BACKGROUND_WIN);
            draw_paddle(renderer, &state.paddle, Vec2::Y, Emotion::Happy);
            draw_lives(renderer, state.lives);
        }
        GameMode::Over => {
            renderer.clear(colors::BACKGROUND);
            draw_paddle(renderer, &state.paddle, Vec2::Y, Emotion::Sad);
        }
        GameMode::Started => draw_playfield(renderer, state),
    }
}

fn draw_playfield(renderer: &mut impl Renderer, state: &GameState) {
    renderer.clear(colors::BACKGROUND);

    for bullet in &state.bullets {
        renderer.rect(bullet.pos, bullet.dim(), colors::BULLET);
    }

    for ball in &state.balls {
        renderer.circle(ball.pos, ball.radius, colors::BALL);
    }

    for brick in &state.bricks {
        renderer.rect(brick.pos, brick.dim, brick_color(brick.health));
    }

    if state.powerup_time > 0.0 {
        draw_effect(renderer, state);
    }

    for powerup in &state.powerups {
        draw_powerup(renderer, powerup);
    }

    let eyes_target = state.balls.first().map_or(Vec2::Y, |ball| ball.pos);
    draw_paddle(renderer, &state.paddle, eyes_target, Emotion::Happy);
    draw_lives(renderer, state.lives);
    draw_score(renderer, state.score);
}

/// Fresh bricks are deep red, worn ones fade toward white
pub fn brick_color(health: f32) -> super::Color {
    let max = f32::from(BRICK_MAX_HEALTH);
    let shade = 1.0 - health / max + 1.0 / max;
    glam::Vec3::new(1.0, shade + 0.1, shade + 0.2)
}

fn draw_effect(renderer: &mut impl Renderer, state: &GameState) {
    let paddle = &state.paddle;
    match state.active_powerup {
        Some(PowerupKind::Glue) => {
            let pos = paddle.pos + Vec2::new(0.0, paddle.dim.y / 2.0);
            let dim = Vec2::new(paddle.dim.x, paddle.dim.y / 3.0);
            renderer.rect(pos, dim, colors::GLUE);
        }
        Some(PowerupKind::Shooter) => {
            let mut pos = paddle.pos + Vec2::new(-paddle.dim.x / 2.0, 0.03);
            for _ in 0..2 {
                renderer.rect(pos, CANNON_DIM, colors::CANNON);
                pos.x += paddle.dim.x;
            }
        }
        Some(PowerupKind::Split) | None => {}
    }
}

/// Pixel offset of the current animation frame in the sprite sheet
pub fn sprite_offset(powerup: &Powerup) -> Vec2 {
    let frame = (powerup.animation_time / SPRITE_FRAME).floor() * SPRITE_FRAME;
    let x = frame.rem_euclid(POWERUPS_IMAGE.dim.x);
    let y = powerup.kind.sprite_row() as f32 * SPRITE_FRAME;
    Vec2::new(x, y)
}

fn draw_powerup(renderer: &mut impl Renderer, powerup: &Powerup) {
    renderer.image(
        &POWERUPS_IMAGE,
        powerup.pos,
        powerup.dim,
        sprite_offset(powerup),
        Vec2::splat(SPRITE_FRAME),
        colors::SPRITE_TINT,
    );
}

fn draw_paddle(
    renderer: &mut impl Renderer,
    paddle: &Paddle,
    eyes_target: Vec2,
    emotion: Emotion,
) {
    renderer.rect(paddle.pos, paddle.dim, colors::PADDLE);

    match emotion {
        Emotion::Happy => renderer.semi_circle(paddle.pos, 0.03, PI, PI * 2.0, colors::FACE),
        Emotion::Sad => {
            let mouth = paddle.pos - Vec2::new(0.0, paddle.dim.y * 0.4);
            renderer.semi_circle(mouth, 0.03, 0.0, PI, colors::FACE);
        }
    }

    if !paddle.eyes_open() {
        return;
    }

    let mut eye = paddle.pos - Vec2::new(0.1, 0.0);
    for _ in 0..2 {
        renderer.circle(eye, 0.05, colors::FACE);
        renderer.circle(eye, 0.04, colors::EYE_WHITE);

        let look = eyes_target - eye;
        let angle = look.y.atan2(look.x);
        let pupil = eye + Vec2::from_angle(angle) * 0.01;
        renderer.circle(pupil, 0.025, colors::FACE);

        eye.x += 0.2;
    }
}

fn draw_lives(renderer: &mut impl Renderer, lives: u32) {
    let mut pos = Vec2::new(-1.0 + PIP_DIM.x * 1.5, -0.95);
    for _ in 0..lives {
        renderer.rect(pos, PIP_DIM, colors::LIVES);
        pos.x += PIP_DIM.x * 2.0;
    }
}

fn draw_score(renderer: &mut impl Renderer, score: u32) {
    let mut pos = Vec2::new(1.0 - PIP_DIM.x * 1.5, -0.95);
    for _ in 0..score {
        renderer.rect(pos, PIP_DIM, colors::SCORE);
        pos.y += PIP_DIM.y * 2.0;
    }
}
