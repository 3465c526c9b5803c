//! Rendering interface
//!
//! Drawing happens in normalized device space: x and y both span [-1, 1]
//! with y pointing up. Backends implement [`Renderer`]; [`scene::draw_game`]
//! turns a `GameState` into draw calls.

pub mod scene;

use glam::{Vec2, Vec3};
use serde::Serialize;

/// RGB color, each channel in [0, 1]
pub type Color = Vec3;

/// Colors for game elements
pub mod colors {
    use glam::Vec3;

    pub const BACKGROUND: Vec3 = Vec3::new(0.0, 0.1, 0.2);
    pub const BACKGROUND_WIN: Vec3 = Vec3::new(0.0, 0.3, 0.4);
    pub const PADDLE: Vec3 = Vec3::new(0.8, 0.6, 1.0);
    pub const FACE: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const EYE_WHITE: Vec3 = Vec3::new(1.0, 1.0, 1.0);
    pub const BALL: Vec3 = Vec3::new(0.9, 0.2, 0.5);
    pub const BULLET: Vec3 = Vec3::new(1.0, 1.0, 1.0);
    pub const GLUE: Vec3 = Vec3::new(0.6, 1.0, 0.6);
    pub const CANNON: Vec3 = Vec3::new(0.3, 0.3, 0.6);
    pub const LIVES: Vec3 = Vec3::new(0.8, 0.6, 1.0);
    pub const SCORE: Vec3 = Vec3::new(1.0, 0.8, 0.8);
    pub const SPRITE_TINT: Vec3 = Vec3::new(1.0, 1.0, 1.0);
}

/// A texture the backend knows how to bind
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Image {
    pub id: u32,
    /// Size in pixels
    pub dim: Vec2,
}

impl Image {
    /// Texture coordinates (min, max) of a pixel sub-rectangle
    pub fn uv_rect(&self, offset: Vec2, portion: Vec2) -> (Vec2, Vec2) {
        let min = offset / self.dim;
        (min, min + portion / self.dim)
    }
}

/// Immediate-mode 2D drawing. Positions are shape centers.
pub trait Renderer {
    fn clear(&mut self, color: Color);

    fn rect(&mut self, pos: Vec2, dim: Vec2, color: Color);

    fn circle(&mut self, pos: Vec2, radius: f32, color: Color);

    /// Pie slice from `begin` to `end` radians, counter-clockwise.
    /// An `end` below `begin` wraps through a full turn.
    fn semi_circle(&mut self, pos: Vec2, radius: f32, begin: f32, end: f32, color: Color);

    /// Draw the `portion`-sized pixel region at `offset` of `image`,
    /// stretched over `dim`
    fn image(
        &mut self,
        image: &Image,
        pos: Vec2,
        dim: Vec2,
        offset: Vec2,
        portion: Vec2,
        tint: Color,
    );
}

/// One recorded draw call
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum DrawCommand {
    Clear {
        color: Color,
    },
    Rect {
        pos: Vec2,
        dim: Vec2,
        color: Color,
    },
    Circle {
        pos: Vec2,
        radius: f32,
        color: Color,
    },
    SemiCircle {
        pos: Vec2,
        radius: f32,
        begin: f32,
        end: f32,
        color: Color,
    },
    Image {
        image_id: u32,
        pos: Vec2,
        dim: Vec2,
        uv_min: Vec2,
        uv_max: Vec2,
        tint: Color,
    },
}

/// Headless renderer that keeps every call for inspection
#[derive(Debug, Default)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
    frames: u64,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of frames started (one per `clear`)
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Forget the recorded calls, keeping the frame count
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }
}

impl Renderer for CommandRecorder {
    fn clear(&mut self, color: Color) {
        self.frames += 1;
        self.commands.push(DrawCommand::Clear { color });
    }

    fn rect(&mut self, pos: Vec2, dim: Vec2, color: Color) {
        self.commands.push(DrawCommand::Rect { pos, dim, color });
    }

    fn circle(&mut self, pos: Vec2, radius: f32, color: Color) {
        self.commands
            .push(DrawCommand::Circle { pos, radius, color });
    }

    fn semi_circle(&mut self, pos: Vec2, radius: f32, begin: f32, mut end: f32, color: Color) {
        if end < begin {
            end += std::f32::consts::TAU;
        }
        self.commands.push(DrawCommand::SemiCircle {
            pos,
            radius,
            begin,
            end,
            color,
        });
    }

    fn image(
        &mut self,
        image: &Image,
        pos: Vec2,
        dim: Vec2,
        offset: Vec2,
        portion: Vec2,
        tint: Color,
    ) {
        let (uv_min, uv_max) = image.uv_rect(offset, portion);
        self.commands.push(DrawCommand::Image {
            image_id: image.id,
            pos,
            dim,
            uv_min,
            uv_max,
            tint,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uv_rect() {
        let image = Image {
            id: 1,
            dim: Vec2::new(64.0, 48.0),
        };
        let (min, max) = image.uv_rect(Vec2::new(32.0, 16.0), Vec2::new(16.0, 16.0));
        assert_eq!(min, Vec2::new(0.5, 1.0 / 3.0));
        assert_eq!(max, Vec2::new(0.75, 2.0 / 3.0));
    }

    #[test]
    fn test_recorder_counts_frames() {
        let mut recorder = CommandRecorder::new();
        recorder.clear(colors::BACKGROUND);
        recorder.rect(Vec2::ZERO, Vec2::ONE, colors::PADDLE);
        recorder.clear(colors::BACKGROUND);

        assert_eq!(recorder.frames(), 2);
        assert_eq!(recorder.count(|c| matches!(c, DrawCommand::Rect { .. })), 1);
        assert_eq!(recorder.take().len(), 3);
        assert!(recorder.commands().is_empty());
        assert_eq!(recorder.frames(), 2);
    }

    #[test]
    fn test_semi_circle_wraps_end_angle() {
        let mut recorder = CommandRecorder::new();
        recorder.semi_circle(Vec2::ZERO, 0.1, 3.0, 1.0, colors::FACE);

        let DrawCommand::SemiCircle { begin, end, .. } = recorder.commands()[0] else {
            panic!("expected a semi circle");
        };
        assert_eq!(begin, 3.0);
        assert!((end - (1.0 + std::f32::consts::TAU)).abs() < 1e-6);
    }
}
