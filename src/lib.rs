//! Bricks - a paddle-and-bricks arcade game
//!
//! Core modules:
//! - `sim`: Simulation (collisions, powerups, game modes)
//! - `renderer`: Draw-call interface and scene layout
//! - `audio`: Sound interface and volume control
//! - `config`: Gameplay tuning loaded from a config file

pub mod audio;
pub mod config;
pub mod error;
pub mod renderer;
pub mod sim;

pub use config::GameConfig;
pub use error::LoadError;

/// Game configuration constants
///
/// The world is the square [-1, 1] x [-1, 1]; every size and speed below is
/// expressed in those units (speeds per second).
pub mod consts {
    /// Common ball speed at the start of a game
    pub const BALLS_SPEED_INIT: f32 = 1.2;
    /// Added to the common ball speed on every level transition
    pub const BALLS_SPEED_INCREASE: f32 = 0.3;

    /// Pool capacities
    pub const BALLS_MAX: usize = 3;
    pub const BULLETS_MAX: usize = 64;
    pub const POWERUPS_MAX: usize = 3;
    /// Initial capacity of the (growable) brick pool
    pub const BRICKS_INITIAL_CAPACITY: usize = 64;

    /// Seconds between two shooter volleys
    pub const SHOOT_RATE: f32 = 0.2;

    pub const BRICK_MAX_HEALTH: u8 = 5;
    pub const BRICK_WIDTH: f32 = 0.2;
    pub const BRICK_HEIGHT: f32 = 0.1;
    pub const BRICK_SPACING: f32 = 0.02;

    /// Paddle defaults
    pub const PADDLE_CURVE_FACTOR: f32 = 7.5;
    pub const PADDLE_PUSH_FORCE: f32 = 4.0;
    pub const PADDLE_WIDTH: f32 = 0.3;
    pub const PADDLE_HEIGHT: f32 = 0.075;
    pub const PADDLE_SPEED: f32 = 2.0;
    pub const PADDLE_Y: f32 = -0.85;

    pub const BALL_RADIUS: f32 = 0.05;
    pub const BULLET_SIZE: f32 = 0.02;
    pub const BULLET_SPEED: f32 = 1.5;
    pub const POWERUP_SIZE: f32 = 0.1;
    pub const POWERUP_SPEED: f32 = 0.75;

    /// Seconds spent on the win / game over screen
    pub const GAME_WAIT_TIME: f32 = 2.0;
    /// Paddle rise speed while celebrating a cleared level
    pub const WIN_PADDLE_RISE_SPEED: f32 = 1.1;

    /// Paddle eye blink: chance per second to start, decay per second
    pub const BLINK_CHANCE_PER_SEC: f32 = 0.12;
    pub const BLINK_DECAY: f32 = 5.0;

    pub const DEFAULT_SFX_VOLUME: f32 = 0.05;
    pub const DEFAULT_MUSIC_VOLUME: f32 = 0.3;
}
