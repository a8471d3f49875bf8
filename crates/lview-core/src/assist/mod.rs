//! Overlay views computed from each frame's snapshot.

mod last_hit;

pub use last_hit::*;

use crate::config::ConfigStore;
use crate::game::MemSnapshot;
use crate::render::{OverlaySurface, Renderer};

/// A toggleable overlay feature with its own settings table
pub trait OverlayView {
    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Name of the view's table in the config file
    fn settings_section(&self) -> &'static str;

    fn on_load_settings(&mut self, store: &dyn ConfigStore);

    fn on_save_settings(&self, store: &mut dyn ConfigStore);

    /// Draw this frame's markers; returns how many shapes were emitted
    fn draw_world_space_overlay(
        &self,
        snapshot: &MemSnapshot,
        renderer: &Renderer,
        surface: &mut dyn OverlaySurface,
    ) -> usize;
}
