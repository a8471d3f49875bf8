use serde::Serialize;

use crate::game::Vector2;

/// RGBA color with components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const CYAN: Self = Self::rgb(0.0, 1.0, 1.0);
    pub const YELLOW: Self = Self::rgb(1.0, 1.0, 0.0);
    pub const PURPLE: Self = Self::rgb(0.5, 0.0, 1.0);
    pub const ORANGE: Self = Self::rgb(1.0, 0.55, 0.0);
    pub const GRAY: Self = Self::rgb(0.5, 0.5, 0.5);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Pack as `0xAABBGGRR`, the vertex color layout of most immediate-mode UIs
    pub fn to_abgr_u32(self) -> u32 {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        channel(self.a) << 24 | channel(self.b) << 16 | channel(self.g) << 8 | channel(self.r)
    }
}

/// Screen-space drawing backend the overlay renders into
pub trait OverlaySurface {
    fn draw_polyline(&mut self, points: &[Vector2], color: Color, closed: bool, thickness: f32);

    /// `points` describe a convex polygon
    fn draw_filled_polygon(&mut self, points: &[Vector2], color: Color);
}

/// One call made against a [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    Polyline {
        points: Vec<Vector2>,
        color: Color,
        closed: bool,
        thickness: f32,
    },
    FilledPolygon {
        points: Vec<Vector2>,
        color: Color,
    },
}

impl DrawCommand {
    pub fn color(&self) -> Color {
        match self {
            Self::Polyline { color, .. } | Self::FilledPolygon { color, .. } => *color,
        }
    }

    pub fn points(&self) -> &[Vector2] {
        match self {
            Self::Polyline { points, .. } | Self::FilledPolygon { points, .. } => points,
        }
    }
}

/// Surface that keeps every draw call, for headless runs and tests
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Take the recorded commands, leaving the surface empty for the next frame
    pub fn drain(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl OverlaySurface for RecordingSurface {
    fn draw_polyline(&mut self, points: &[Vector2], color: Color, closed: bool, thickness: f32) {
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            color,
            closed,
            thickness,
        });
    }

    fn draw_filled_polygon(&mut self, points: &[Vector2], color: Color) {
        self.commands.push(DrawCommand::FilledPolygon {
            points: points.to_vec(),
            color,
        });
    }
}
