//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameState`], which is passed
//! by exclusive reference through every system.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::level::{self, LevelMap};
use super::pool::Pool;
use crate::config::GameConfig;
use crate::consts::*;

/// Current mode of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Waiting to start; behaves like the between-level screens
    Starting,
    /// Active gameplay
    Started,
    /// All lives lost, waiting before the next game
    Over,
    /// Level cleared, waiting before the next level
    Win,
}

/// Power-up types, in sprite sheet row order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerupKind {
    /// Paddle fires bullet pairs while shoot is held
    Shooter,
    /// Paddle catches the next ball that lands on it
    Glue,
    /// Ball splits up to the ball cap
    Split,
}

impl PowerupKind {
    /// Order in which a destroyed brick rolls for drops
    pub const SPAWN_ORDER: [PowerupKind; 3] =
        [PowerupKind::Split, PowerupKind::Glue, PowerupKind::Shooter];

    /// Row of this power-up in the sprite sheet
    pub fn sprite_row(self) -> u32 {
        match self {
            PowerupKind::Shooter => 0,
            PowerupKind::Glue => 1,
            PowerupKind::Split => 2,
        }
    }
}

/// Groups of interchangeable one-shot sounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundSet {
    /// Ball hits a brick
    BallHit,
    /// Bullet hits a brick
    ShootHit,
    /// Shooter fires
    Shoot,
    /// Power-up collected
    Powerup,
}

/// Something the driver may want to react to (audio, logging, UI)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Play a random sound from the set
    Sound(SoundSet),
    BallLaunched,
    BrickDestroyed { pos: Vec2 },
    PowerupSpawned(PowerupKind),
    PowerupCollected(PowerupKind),
    EffectExpired(PowerupKind),
    LifeLost { lives_left: u32 },
    LevelWon { score: u32 },
    GameOver { score: u32 },
    LevelStarted { level: usize },
}

/// Held-key flags, updated by the driver from input events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub shoot: bool,
    pub left: bool,
    pub right: bool,
}

/// Keys the simulation cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Shoot,
    Left,
    Right,
}

impl InputState {
    pub fn press(&mut self, key: Key) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: Key) {
        self.set(key, false);
    }

    fn set(&mut self, key: Key, held: bool) {
        match key {
            Key::Shoot => self.shoot = held,
            Key::Left => self.left = held,
            Key::Right => self.right = held,
        }
    }
}

/// A ball entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Velocity, kept at the common ball speed after paddle contact
    pub dir: Vec2,
    pub radius: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self::new(Vec2::ZERO, Vec2::Y)
    }
}

impl Ball {
    pub fn new(pos: Vec2, dir: Vec2) -> Self {
        Self {
            pos,
            dir,
            radius: BALL_RADIUS,
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: Vec2,
    pub dim: Vec2,
    pub speed: f32,
    /// Remaining eye blink (eyes closed while > 0)
    pub blink: f32,
    /// Index of the ball held on the paddle, if any
    pub caught_ball: Option<usize>,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            pos: Vec2::new(0.0, PADDLE_Y),
            dim: Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
            speed: PADDLE_SPEED,
            blink: 0.0,
            caught_ball: None,
        }
    }
}

impl Paddle {
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y + self.dim.y / 2.0
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.dim.x / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.dim.x / 2.0
    }

    /// Put the paddle back at its starting spot, keeping the blink state
    pub fn reset(&mut self) {
        self.pos = Vec2::new(0.0, PADDLE_Y);
        self.dim = Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT);
        self.speed = PADDLE_SPEED;
    }

    /// Move horizontally by `distance`, staying inside the walls
    pub fn slide(&mut self, distance: f32) {
        self.pos.x += distance;

        if self.left() < -1.0 {
            self.pos.x = -1.0 + self.dim.x / 2.0;
        } else if self.right() > 1.0 {
            self.pos.x = 1.0 - self.dim.x / 2.0;
        }
    }

    /// Randomly start a blink, or let the current one run out
    pub fn update_blink(&mut self, rng: &mut impl Rng, dt: f32) {
        if rng.random::<f32>() < BLINK_CHANCE_PER_SEC * dt {
            self.blink = 1.0;
        }
        if self.blink > 0.0 {
            self.blink -= BLINK_DECAY * dt;
        }
    }

    pub fn eyes_open(&self) -> bool {
        self.blink <= 0.0
    }
}

/// A shooter bullet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub speed: f32,
    pub size: f32,
}

impl Bullet {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            speed: BULLET_SPEED,
            size: BULLET_SIZE,
        }
    }

    pub fn dim(&self) -> Vec2 {
        Vec2::splat(self.size)
    }
}

/// A brick entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub pos: Vec2,
    pub dim: Vec2,
    pub health: f32,
}

impl Brick {
    pub fn new(pos: Vec2, health: f32) -> Self {
        Self {
            pos,
            dim: Vec2::new(BRICK_WIDTH, BRICK_HEIGHT),
            health,
        }
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y + self.dim.y / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y - self.dim.y / 2.0
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.dim.x / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.dim.x / 2.0
    }
}

/// A falling power-up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Powerup {
    pub kind: PowerupKind,
    pub pos: Vec2,
    pub dim: Vec2,
    pub vel: Vec2,
    /// Sprite animation clock (sprite pixels scrolled)
    pub animation_time: f32,
}

impl Powerup {
    pub fn new(kind: PowerupKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            dim: Vec2::splat(POWERUP_SIZE),
            vel: Vec2::new(0.0, -POWERUP_SPEED),
            animation_time: 0.0,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Gameplay tuning (effect durations, drop chances, lives)
    pub config: GameConfig,
    /// Maps cycled through as levels are cleared
    #[serde(skip)]
    pub levels: Vec<LevelMap>,
    /// Index into `levels` of the level being played
    pub level_index: usize,
    pub mode: GameMode,
    /// Countdown on the win / game over screens
    pub wait_time: f32,
    /// Most recently collected power-up
    pub active_powerup: Option<PowerupKind>,
    /// Remaining time of the active effect (inactive when <= 0)
    pub powerup_time: f32,
    /// Time until the shooter may fire again
    pub shoot_timeout: f32,
    /// Speed shared by every free ball
    pub balls_speed: f32,
    pub lives: u32,
    /// Levels cleared in this game
    pub score: u32,
    pub input: InputState,

    pub paddle: Paddle,
    pub balls: Pool<Ball>,
    pub bullets: Pool<Bullet>,
    pub powerups: Pool<Powerup>,
    pub bricks: Pool<Brick>,

    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip)]
    pub rng: Pcg32,
    /// Events produced since the driver last drained them. Nothing clears
    /// this but [`GameState::drain_events`]; `new` already queues
    /// `LevelStarted`, so a driver that never drains grows it without bound.
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh game on the first level
    pub fn new(config: GameConfig, levels: Vec<LevelMap>, seed: u64) -> Self {
        let mut state = Self {
            config,
            levels,
            level_index: 0,
            mode: GameMode::Starting,
            wait_time: 0.0,
            active_powerup: None,
            powerup_time: 0.0,
            shoot_timeout: 0.0,
            balls_speed: BALLS_SPEED_INIT,
            lives: 0,
            score: 0,
            input: InputState::default(),
            paddle: Paddle::default(),
            balls: Pool::fixed(BALLS_MAX),
            bullets: Pool::fixed(BULLETS_MAX),
            powerups: Pool::fixed(POWERUPS_MAX),
            bricks: Pool::growable(BRICKS_INITIAL_CAPACITY),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        };

        level::new_game(&mut state);
        level::new_level(&mut state);

        state
    }

    /// Uniform random number in [0, 1)
    pub fn roll(&mut self) -> f32 {
        self.rng.random()
    }

    /// Whether `kind` is the active effect and has time left
    pub fn effect_active(&self, kind: PowerupKind) -> bool {
        self.powerup_time > 0.0 && self.active_powerup == Some(kind)
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Add a ball held on top of the paddle
    pub fn spawn_ball_caught(&mut self) {
        if self.balls.push(Ball::default()) {
            self.paddle.caught_ball = Some(self.balls.len() - 1);
        }
    }

    /// Swap-remove a ball, keeping the paddle's caught index pointing at
    /// the same ball
    pub fn remove_ball(&mut self, index: usize) -> Ball {
        let last = self.balls.len() - 1;
        let ball = self.balls.swap_remove(index);

        self.paddle.caught_ball = match self.paddle.caught_ball {
            Some(caught) if caught == index => None,
            Some(caught) if caught == last => Some(index),
            other => other,
        };

        ball
    }

    /// Drop every ball past the first `len`
    pub fn truncate_balls(&mut self, len: usize) {
        self.balls.truncate(len);
        if self.paddle.caught_ball.is_some_and(|caught| caught >= len) {
            self.paddle.caught_ball = None;
        }
    }

    /// Whether the ball at `index` is held by the paddle
    pub fn is_caught(&self, index: usize) -> bool {
        self.paddle.caught_ball == Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_balls(n: usize) -> GameState {
        let mut state = GameState::new(GameConfig::default(), vec![LevelMap::default()], 7);
        state.balls.clear();
        state.paddle.caught_ball = None;
        for i in 0..n {
            state.balls.push(Ball::new(Vec2::new(i as f32 * 0.1, 0.0), Vec2::Y));
        }
        state
    }

    #[test]
    fn test_events_accumulate_until_drained() {
        let mut state = GameState::new(GameConfig::default(), vec![LevelMap::default()], 1);
        assert_eq!(state.events, vec![GameEvent::LevelStarted { level: 0 }]);

        state.emit(GameEvent::BallLaunched);
        assert_eq!(state.events.len(), 2);

        let drained = state.drain_events();
        assert_eq!(drained.len(), 2);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_remove_ball_remaps_caught_index() {
        let mut state = state_with_balls(3);
        state.paddle.caught_ball = Some(2);

        state.remove_ball(0);

        assert_eq!(state.balls.len(), 2);
        assert_eq!(state.paddle.caught_ball, Some(0));
        assert!((state.balls[0].pos.x - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_remove_caught_ball_clears_link() {
        let mut state = state_with_balls(2);
        state.paddle.caught_ball = Some(1);
        state.remove_ball(1);
        assert_eq!(state.paddle.caught_ball, None);
    }

    #[test]
    fn test_truncate_drops_stale_caught_index() {
        let mut state = state_with_balls(3);
        state.paddle.caught_ball = Some(2);
        state.truncate_balls(1);
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.paddle.caught_ball, None);
    }

    #[test]
    fn test_paddle_slide_clamps_to_walls() {
        let mut paddle = Paddle::default();
        paddle.slide(5.0);
        assert!((paddle.right() - 1.0).abs() < 1e-6);
        paddle.slide(-5.0);
        assert!((paddle.left() + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_input_press_release() {
        let mut input = InputState::default();
        input.press(Key::Left);
        input.press(Key::Shoot);
        input.release(Key::Left);
        assert!(!input.left);
        assert!(input.shoot);
    }
}
