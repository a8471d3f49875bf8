use serde::{Deserialize, Serialize};

/// Offsets relative to the main module base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GlobalOffsets {
    pub game_time: u64,
    pub object_manager: u64,
    pub local_player: u64,
    pub under_mouse_object: u64,
    pub view_proj_matrices: u64,
    pub renderer: u64,
    pub minimap_object: u64,
}

/// Fields of a game object (champions, minions, monsters, turrets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ObjectOffsets {
    pub index: u64,
    pub team: u64,
    pub network_id: u64,
    pub position: u64,
    pub visibility: u64,
    pub spawn_count: u64,
    pub src_index: u64,
    pub mana: u64,
    pub health: u64,
    pub max_health: u64,
    pub armor: u64,
    pub magic_res: u64,
    pub base_attack: u64,
    pub bonus_attack: u64,
    pub move_speed: u64,
    pub spell_book: u64,
    pub name: u64,
    pub level: u64,
    pub expiry: u64,
    pub crit: u64,
    pub crit_multi: u64,
    pub ability_power: u64,
    pub attack_speed_multi: u64,
    pub item_list: u64,
}

/// Item list entry, reached through `ObjectOffsets::item_list`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemOffsets {
    pub list_item: u64,
    pub info: u64,
    pub info_id: u64,
}

/// Spell slot, reached through `ObjectOffsets::spell_book`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpellSlotOffsets {
    pub level: u64,
    pub time: u64,
    pub damage: u64,
    pub spell_info: u64,
}

/// Spell info and spell data blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpellInfoOffsets {
    pub spell_data: u64,
    pub spell_name: u64,
    pub missile_name: u64,
}

/// Object manager container (a red-black tree keyed by network id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ObjectManagerOffsets {
    pub map_count: u64,
    pub map_root: u64,
    pub node_net_id: u64,
    pub node_object: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MissileOffsets {
    pub spell_info: u64,
    pub src_index: u64,
    pub dest_index: u64,
    pub start_pos: u64,
    pub end_pos: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MinimapOffsets {
    pub object_hud: u64,
    pub hud_pos: u64,
    pub hud_size: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RendererOffsets {
    pub width: u64,
    pub height: u64,
}

/// Memory layout of one target build.
///
/// A table is only meaningful for the build named by `version`. It is always
/// replaced as a whole; every group is required when deserializing, so a
/// document written for another layout is rejected instead of half-applied.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OffsetTable {
    pub version: String,
    pub globals: GlobalOffsets,
    pub object: ObjectOffsets,
    pub item: ItemOffsets,
    pub spell_slot: SpellSlotOffsets,
    pub spell_info: SpellInfoOffsets,
    pub object_manager: ObjectManagerOffsets,
    pub missile: MissileOffsets,
    pub minimap: MinimapOffsets,
    pub renderer: RendererOffsets,
}

impl OffsetTable {
    /// The compiled-in table for [`BUILTIN_VERSION`](super::BUILTIN_VERSION)
    pub fn builtin() -> Self {
        super::builtin_offsets()
    }

    pub fn is_valid(&self) -> bool {
        !self.version.is_empty()
            && self.globals.game_time != 0
            && self.globals.object_manager != 0
            && self.globals.local_player != 0
            && self.object_manager.map_root != 0
    }

    /// Check that this table was written for `version`
    pub fn matches_version(&self, version: &str) -> bool {
        self.version.eq_ignore_ascii_case(version.trim())
    }
}
