use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Spell behavior flags
    ///
    /// The low bits mirror `affectsTypesFlags` from the spell data. `TARGETED`
    /// comes from the `targeted` field and `FIXED_DESTINATION` is only ever set
    /// by the exception table.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct SpellFlags: u32 {
        const AFFECT_ALLY_CHAMPION = 1;
        const AFFECT_ENEMY_CHAMPION = 1 << 1;
        const AFFECT_ALLY_LANE_MINION = 1 << 2;
        const AFFECT_ENEMY_LANE_MINION = 1 << 3;
        const AFFECT_ALLY_WARD = 1 << 4;
        const AFFECT_ENEMY_WARD = 1 << 5;
        const AFFECT_ALLY_TURRET = 1 << 6;
        const AFFECT_ENEMY_TURRET = 1 << 7;
        const AFFECT_ALLY_INHIBS = 1 << 8;
        const AFFECT_ENEMY_INHIBS = 1 << 9;
        const AFFECT_ALLY_NON_LANE_MINION = 1 << 10;
        const AFFECT_JUNGLE_MONSTER = 1 << 11;
        const AFFECT_ENEMY_NON_LANE_MINION = 1 << 12;
        const AFFECT_ALWAYS_SELF = 1 << 13;
        const AFFECT_NEVER_SELF = 1 << 14;

        const TARGETED = 1 << 30;
        const FIXED_DESTINATION = 1 << 31;

        // Keep bits the data sets that are not named above.
        const _ = !0;
    }
}

/// Static stats of a spell or missile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpellInfo {
    pub name: String,
    pub icon: String,
    pub flags: SpellFlags,
    pub delay: f32,
    pub height: f32,
    pub radius: f32,
    pub range: f32,
    pub speed: f32,
}

impl SpellInfo {
    /// Returned by lookups for names missing from the spell data
    pub const UNKNOWN: Self = Self {
        name: String::new(),
        icon: String::new(),
        flags: SpellFlags::empty(),
        delay: 0.0,
        height: 0.0,
        radius: 0.0,
        range: 0.0,
        speed: 0.0,
    };

    /// The shared sentinel instance lookups hand out
    pub fn unknown() -> &'static Self {
        &UNKNOWN_SPELL
    }

    pub fn has_flags(&self, flags: SpellFlags) -> bool {
        self.flags.contains(flags)
    }

    pub fn add_flags(&mut self, flags: SpellFlags) -> &mut Self {
        self.flags |= flags;
        self
    }

    pub fn set_impact_radius(&mut self, radius: f32) -> &mut Self {
        self.radius = radius;
        self
    }

    pub fn is_unknown(&self) -> bool {
        self.name.is_empty()
    }
}

pub(crate) static UNKNOWN_SPELL: SpellInfo = SpellInfo::UNKNOWN;
