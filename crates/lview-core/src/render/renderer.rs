use std::f32::consts::TAU;

use crate::game::{Matrix4, MemSnapshot, Vector2, Vector3};
use crate::render::{Color, OverlaySurface};

/// Circles with this many segments or more are rejected
pub const MAX_CIRCLE_SEGMENTS: usize = 200;

/// Line thickness used for outlined shapes
pub const OUTLINE_THICKNESS: f32 = 3.0;

/// Projects world positions onto the game window
#[derive(Debug, Clone, PartialEq)]
pub struct Renderer {
    view_proj: Matrix4,
    width: f32,
    height: f32,
}

impl Renderer {
    pub fn new(view_proj: Matrix4, width: i32, height: i32) -> Self {
        Self {
            view_proj,
            width: width as f32,
            height: height as f32,
        }
    }

    pub fn from_snapshot(snapshot: &MemSnapshot) -> Self {
        Self::new(snapshot.view_proj, snapshot.screen_width, snapshot.screen_height)
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Project a world position to screen pixels.
    ///
    /// Points behind the camera have their `w` clamped to 1 so they land
    /// off-screen instead of mirrored.
    pub fn world_to_screen(&self, position: Vector3) -> Vector2 {
        let m = &self.view_proj;
        let clip = |col: usize| {
            position.x * m[col] + position.y * m[4 + col] + position.z * m[8 + col] + m[12 + col]
        };

        let w = clip(3).max(1.0);
        let ndc_x = clip(0) / w;
        let ndc_y = clip(1) / w;

        Vector2::new(
            (ndc_x + 1.0) * self.width / 2.0,
            (1.0 - ndc_y) * self.height / 2.0,
        )
    }

    pub fn is_on_screen(&self, point: Vector2) -> bool {
        self.is_on_screen_with_margin(point, 0.0, 0.0)
    }

    /// Like [`is_on_screen`](Self::is_on_screen) with the window grown by a margin
    pub fn is_on_screen_with_margin(&self, point: Vector2, margin_x: f32, margin_y: f32) -> bool {
        point.x > -margin_x
            && point.x < self.width + margin_x
            && point.y > -margin_y
            && point.y < self.height + margin_y
    }

    /// Outline of a ground circle around `position`, in screen space
    pub fn circle_points(&self, position: Vector3, radius: f32, segments: usize) -> Vec<Vector2> {
        let step = TAU / segments as f32;
        (0..segments)
            .map(|i| {
                let theta = step * i as f32;
                self.world_to_screen(Vector3::new(
                    position.x + radius * theta.cos(),
                    position.y,
                    position.z - radius * theta.sin(),
                ))
            })
            .collect()
    }

    /// Draw a circle lying on the ground plane.
    ///
    /// Returns whether anything was drawn: nothing is emitted when the
    /// segment count is out of range or no point of the circle is on screen.
    pub fn draw_circle_at<S: OverlaySurface + ?Sized>(
        &self,
        surface: &mut S,
        position: Vector3,
        radius: f32,
        filled: bool,
        segments: usize,
        color: Color,
    ) -> bool {
        if segments < 3 || segments >= MAX_CIRCLE_SEGMENTS {
            return false;
        }

        let points = self.circle_points(position, radius, segments);
        if !points.iter().any(|p| self.is_on_screen(*p)) {
            return false;
        }

        if filled {
            surface.draw_filled_polygon(&points, color);
        } else {
            surface.draw_polyline(&points, color, true, OUTLINE_THICKNESS);
        }
        true
    }
}
