//! Bricks headless runner
//!
//! Plays the game with a scripted paddle, feeding sounds to the logging
//! audio backend and frames to a recording renderer, then prints a JSON
//! summary of the run.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;

use bricks::GameConfig;
use bricks::audio::{Audio, LogAudio, MusicCommand};
use bricks::renderer::CommandRecorder;
use bricks::renderer::scene::draw_game;
use bricks::sim::{GameEvent, GameMode, GameState, InputState, LevelMap, PowerupKind, tick};

#[derive(Parser, Debug)]
#[command(name = "bricks")]
#[command(about = "Run the bricks simulation headless with an autopilot paddle")]
struct Args {
    /// Map files, played in order
    #[arg(default_value = "res/map1.txt")]
    maps: Vec<PathBuf>,
    /// Gameplay config (`key value` text, or JSON when it ends in .json)
    #[arg(long, default_value = "config.txt")]
    config: PathBuf,
    /// Ignore the config file and use built-in defaults
    #[arg(long, conflicts_with = "config")]
    no_config: bool,
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Simulated wall-clock time
    #[arg(long, default_value_t = 60.0)]
    seconds: f32,
    /// Frame time fed to every tick
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,
    /// Also write the summary to this file
    #[arg(long)]
    summary_json: Option<PathBuf>,
    /// Pause the game at this time
    #[arg(long)]
    pause_at: Option<f32>,
    #[arg(long, default_value_t = 1.0)]
    pause_for: f32,
    /// Press the mute key this many times before starting
    #[arg(long, default_value_t = 0)]
    mute: u32,
}

/// Tallies gathered from game events over the run
#[derive(Debug, Default, Serialize)]
struct RunStats {
    bricks_destroyed: u32,
    launches: u32,
    lives_lost: u32,
    levels_won: u32,
    games_over: u32,
    powerups_spawned: u32,
    powerups_collected: u32,
    best_score: u32,
}

impl RunStats {
    fn record(&mut self, events: &[GameEvent]) {
        for event in events {
            match *event {
                GameEvent::BrickDestroyed { .. } => self.bricks_destroyed += 1,
                GameEvent::BallLaunched => self.launches += 1,
                GameEvent::LifeLost { .. } => self.lives_lost += 1,
                GameEvent::LevelWon { score } => {
                    self.levels_won += 1;
                    self.best_score = self.best_score.max(score);
                }
                GameEvent::GameOver { .. } => self.games_over += 1,
                GameEvent::PowerupSpawned(_) => self.powerups_spawned += 1,
                GameEvent::PowerupCollected(_) => self.powerups_collected += 1,
                GameEvent::Sound(_)
                | GameEvent::EffectExpired(_)
                | GameEvent::LevelStarted { .. } => {}
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    frames: u64,
    paused_frames: u64,
    rendered_frames: u64,
    draw_calls: u64,
    sounds_played: usize,
    mode: GameMode,
    level: usize,
    score: u32,
    lives: u32,
    bricks_left: usize,
    stats: RunStats,
}

/// Steers toward whatever needs catching next
#[derive(Debug, Default)]
struct Autopilot;

impl Autopilot {
    /// Dead zone around the target, in world units
    const SLACK: f32 = 0.04;

    fn steer(&self, state: &GameState) -> InputState {
        let paddle = &state.paddle;
        let target = Self::target_x(state).unwrap_or(paddle.pos.x);

        InputState {
            shoot: paddle.caught_ball.is_some() || state.effect_active(PowerupKind::Shooter),
            left: target < paddle.pos.x - Self::SLACK,
            right: target > paddle.pos.x + Self::SLACK,
        }
    }

    /// Lowest falling ball, or else the lowest power-up, or else any ball
    fn target_x(state: &GameState) -> Option<f32> {
        let lowest_falling = state
            .balls
            .iter()
            .filter(|ball| ball.dir.y < 0.0)
            .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

        if let Some(ball) = lowest_falling {
            return Some(ball.pos.x);
        }

        let lowest_powerup = state
            .powerups
            .iter()
            .filter(|powerup| powerup.pos.y > state.paddle.pos.y)
            .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

        lowest_powerup
            .map(|powerup| powerup.pos.x)
            .or_else(|| state.balls.first().map(|ball| ball.pos.x))
    }
}

fn load_levels(paths: &[PathBuf]) -> Result<Vec<LevelMap>> {
    paths
        .iter()
        .map(|path| {
            LevelMap::load(path).with_context(|| format!("loading map {}", path.display()))
        })
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.dt.is_nan() || args.dt <= 0.0 {
        bail!("--dt must be positive, got {}", args.dt);
    }
    if args.seconds.is_nan() || args.seconds < 0.0 {
        bail!("--seconds must not be negative, got {}", args.seconds);
    }

    let config = if args.no_config {
        log::info!("Using default config");
        GameConfig::default()
    } else {
        GameConfig::load(&args.config)
            .with_context(|| format!("loading config {}", args.config.display()))?
    };
    let levels = load_levels(&args.maps)?;

    log::info!(
        "Bricks starting: {} map(s), seed {}, {:.1}s at dt {:.4}",
        levels.len(),
        args.seed,
        args.seconds,
        args.dt
    );

    let mut state = GameState::new(config, levels, args.seed);
    let mut audio = LogAudio::new(args.seed);
    let mut renderer = CommandRecorder::new();
    let autopilot = Autopilot;
    let mut stats = RunStats::default();

    audio.music(MusicCommand::Play);
    for _ in 0..args.mute {
        audio.toggle_mute();
    }

    let pause = args
        .pause_at
        .map(|start| start..start + args.pause_for.max(0.0));

    let total_frames = (args.seconds / args.dt).ceil() as u64;
    let mut paused_frames = 0;
    let mut draw_calls = 0;

    // GameState::new already queued the first level start
    stats.record(&state.drain_events());

    for frame in 0..total_frames {
        let now = frame as f32 * args.dt;
        if pause.as_ref().is_some_and(|window| window.contains(&now)) {
            paused_frames += 1;
            continue;
        }

        state.input = autopilot.steer(&state);
        tick(&mut state, args.dt);

        let events = state.drain_events();
        audio.play_events(&events);
        stats.record(&events);

        renderer.take();
        draw_game(&state, &mut renderer);
        draw_calls += renderer.commands().len() as u64;
    }

    let summary = RunSummary {
        seed: args.seed,
        frames: total_frames,
        paused_frames,
        rendered_frames: renderer.frames(),
        draw_calls,
        sounds_played: audio.played().len(),
        mode: state.mode,
        level: state.level_index + 1,
        score: state.score,
        lives: state.lives,
        bricks_left: state.bricks.len(),
        stats,
    };

    let json = serde_json::to_string_pretty(&summary).context("serializing run summary")?;
    println!("{json}");

    if let Some(path) = &args.summary_json {
        std::fs::write(path, &json)
            .with_context(|| format!("writing summary to {}", path.display()))?;
        log::info!("Summary written to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bricks::sim::{Ball, Powerup, parse_map};
    use glam::Vec2;

    fn game() -> GameState {
        GameState::new(GameConfig::default(), vec![parse_map("111\n")], 4)
    }

    #[test]
    fn test_autopilot_launches_caught_ball() {
        let state = game();
        let input = Autopilot.steer(&state);
        assert!(input.shoot);
        assert!(!input.left && !input.right);
    }

    #[test]
    fn test_autopilot_chases_falling_ball() {
        let mut state = game();
        state.paddle.caught_ball = None;
        state.balls.clear();
        state.balls.push(Ball::new(Vec2::new(0.6, 0.0), Vec2::new(0.0, -1.0)));
        state.balls.push(Ball::new(Vec2::new(-0.6, 0.5), Vec2::new(0.0, 1.0)));

        let input = Autopilot.steer(&state);

        assert!(input.right);
        assert!(!input.left);
        assert!(!input.shoot);
    }

    #[test]
    fn test_autopilot_goes_for_powerup_when_balls_rise() {
        let mut state = game();
        state.paddle.caught_ball = None;
        state.balls.clear();
        state.balls.push(Ball::new(Vec2::new(0.6, 0.0), Vec2::new(0.0, 1.0)));
        state
            .powerups
            .push(Powerup::new(PowerupKind::Glue, Vec2::new(-0.7, -0.2)));

        let input = Autopilot.steer(&state);

        assert!(input.left);
    }

    #[test]
    fn test_stats_tally_events() {
        let mut stats = RunStats::default();
        stats.record(&[
            GameEvent::BallLaunched,
            GameEvent::BrickDestroyed { pos: Vec2::ZERO },
            GameEvent::BrickDestroyed { pos: Vec2::ONE },
            GameEvent::LevelWon { score: 3 },
            GameEvent::LevelWon { score: 1 },
        ]);

        assert_eq!(stats.launches, 1);
        assert_eq!(stats.bricks_destroyed, 2);
        assert_eq!(stats.levels_won, 2);
        assert_eq!(stats.best_score, 3);
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["bricks"]);
        assert_eq!(args.maps, vec![PathBuf::from("res/map1.txt")]);
        assert_eq!(args.config, PathBuf::from("config.txt"));
        assert!(!args.no_config);
        assert!(args.pause_at.is_none());
    }
}
