use serde::Serialize;
use tracing::trace;

use crate::assist::OverlayView;
use crate::config::ConfigStore;
use crate::game::{GameObject, MemSnapshot, SummonerSpellType, Vector3, effective_hp};
use crate::render::{Color, OverlaySurface, Renderer};

pub const LAST_HIT_SECTION: &str = "last_hit_assist";
pub const SHOW_SMITE_KEY: &str = "showSmiteLastHit";
pub const SHOW_MINION_KEY: &str = "showMinionLastHit";

pub const MARKER_RADIUS: f32 = 50.0;
pub const MARKER_SEGMENTS: usize = 15;

/// Monsters at or below this health are plants or already dead
const MIN_MONSTER_HEALTH: f32 = 1.0;

/// Whether one more basic attack kills a unit with `effective_hp` left
pub fn is_minion_lethal(effective_hp: f32, attack_damage: f32) -> bool {
    effective_hp - attack_damage <= 0.0
}

/// Whether smite kills a monster with `health` left (smite ignores armor)
pub fn is_smite_lethal(health: f32, smite_damage: f32) -> bool {
    health - smite_damage <= 0.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MarkerKind {
    Minion,
    Smite,
}

impl MarkerKind {
    pub fn color(self) -> Color {
        match self {
            Self::Minion => Color::CYAN,
            Self::Smite => Color::YELLOW,
        }
    }
}

/// A unit that dies to the local player's next hit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub kind: MarkerKind,
    pub position: Vector3,
    pub name: String,
    pub health: f32,
}

impl Marker {
    fn new(kind: MarkerKind, target: &GameObject) -> Self {
        Self {
            kind,
            position: target.position,
            name: target.name.clone(),
            health: target.health,
        }
    }
}

/// Circles lane minions that the next basic attack kills, and jungle
/// monsters that smite kills
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastHitAssist {
    pub show_smite_last_hit: bool,
    pub show_minion_last_hit: bool,
}

impl Default for LastHitAssist {
    fn default() -> Self {
        Self {
            show_smite_last_hit: false,
            show_minion_last_hit: true,
        }
    }
}

impl LastHitAssist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Markers for this frame; empty when there is no local champion
    pub fn markers(&self, snapshot: &MemSnapshot) -> Vec<Marker> {
        let Some(local) = snapshot.local_champion() else {
            return Vec::new();
        };

        let mut markers = Vec::new();
        if self.show_minion_last_hit {
            markers.extend(minion_markers(snapshot, local));
        }
        if self.show_smite_last_hit {
            markers.extend(smite_markers(snapshot, local));
        }
        markers
    }
}

fn minion_markers<'s>(
    snapshot: &'s MemSnapshot,
    local: &'s GameObject,
) -> impl Iterator<Item = Marker> + 's {
    let damage = local.basic_attack_damage();

    snapshot
        .minions
        .iter()
        .filter(move |minion| minion.team != local.team && minion.is_visible && minion.is_alive())
        .filter(move |minion| is_minion_lethal(effective_hp(minion.health, minion.armor), damage))
        .map(|minion| Marker::new(MarkerKind::Minion, minion))
}

fn smite_markers(snapshot: &MemSnapshot, local: &GameObject) -> Vec<Marker> {
    let Some(smite) = local.get_summoner_spell(SummonerSpellType::Smite) else {
        return Vec::new();
    };
    if !smite.is_ready(snapshot.game_time) {
        trace!(
            "Smite on cooldown for {:.1}s",
            smite.remaining_cooldown(snapshot.game_time)
        );
        return Vec::new();
    }

    snapshot
        .jungle
        .iter()
        .filter(|mob| mob.health > MIN_MONSTER_HEALTH && mob.is_visible)
        .filter(|mob| is_smite_lethal(mob.health, smite.damage))
        .map(|mob| Marker::new(MarkerKind::Smite, mob))
        .collect()
}

impl OverlayView for LastHitAssist {
    fn name(&self) -> &'static str {
        "Last Hit Assist"
    }

    fn settings_section(&self) -> &'static str {
        LAST_HIT_SECTION
    }

    fn on_load_settings(&mut self, store: &dyn ConfigStore) {
        self.show_smite_last_hit = store.get_bool(SHOW_SMITE_KEY, false);
        self.show_minion_last_hit = store.get_bool(SHOW_MINION_KEY, true);
    }

    fn on_save_settings(&self, store: &mut dyn ConfigStore) {
        store.set_bool(SHOW_SMITE_KEY, self.show_smite_last_hit);
        store.set_bool(SHOW_MINION_KEY, self.show_minion_last_hit);
    }

    fn draw_world_space_overlay(
        &self,
        snapshot: &MemSnapshot,
        renderer: &Renderer,
        surface: &mut dyn OverlaySurface,
    ) -> usize {
        let mut drawn = 0;
        for marker in self.markers(snapshot) {
            if renderer.draw_circle_at(
                surface,
                marker.position,
                MARKER_RADIUS,
                false,
                MARKER_SEGMENTS,
                marker.kind.color(),
            ) {
                drawn += 1;
            }
        }
        drawn
    }
}
