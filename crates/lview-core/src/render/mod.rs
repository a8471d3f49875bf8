//! World-space overlay drawing.
//!
//! The drawing backend is external: anything implementing
//! [`OverlaySurface`] can receive the overlay's polylines and polygons.
//! [`Renderer`] projects world positions with the frame's view-projection
//! matrix before handing screen-space points to the surface.

mod renderer;
mod surface;

pub use renderer::{MAX_CIRCLE_SEGMENTS, OUTLINE_THICKNESS, Renderer};
pub use surface::{Color, DrawCommand, OverlaySurface, RecordingSurface};
