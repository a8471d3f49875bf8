//! Compiled-in offset tables.
//!
//! Values are only valid for the client build named by each table's version.
//! When the client updates, add a new table here (or ship an offsets JSON
//! file) instead of editing an existing one.

use super::table::*;

/// Client build the default table was dumped from
pub const BUILTIN_VERSION: &str = "11.2";

/// Default table for [`BUILTIN_VERSION`]
pub fn builtin_offsets() -> OffsetTable {
    OffsetTable {
        version: BUILTIN_VERSION.to_string(),
        globals: GlobalOffsets {
            game_time: 0x2FD63C8,
            object_manager: 0x1741890,
            local_player: 0x2FDE470,
            under_mouse_object: 0x2FD2A48,
            view_proj_matrices: 0x3001530,
            renderer: 0x300438C,
            minimap_object: 0x2FDE444,
        },
        object: ObjectOffsets {
            index: 0x20,
            team: 0x4C,
            network_id: 0xCC,
            position: 0x1D8,
            visibility: 0x270,
            spawn_count: 0x284,
            src_index: 0x290,
            mana: 0x298,
            health: 0xD98,
            max_health: 0xDA8,
            armor: 0x12C4,
            magic_res: 0x12CC,
            base_attack: 0x129C,
            bonus_attack: 0x1218,
            move_speed: 0x12DC,
            spell_book: 0x2BA0,
            name: 0x2F8C,
            level: 0x36DC,
            expiry: 0x298,
            crit: 0x12C0,
            crit_multi: 0x12B0,
            ability_power: 0x1228,
            attack_speed_multi: 0x1270,
            item_list: 0x3714,
        },
        item: ItemOffsets {
            list_item: 0xC,
            info: 0x20,
            info_id: 0x68,
        },
        spell_slot: SpellSlotOffsets {
            level: 0x20,
            time: 0x28,
            damage: 0x94,
            spell_info: 0x13C,
        },
        spell_info: SpellInfoOffsets {
            spell_data: 0x44,
            spell_name: 0x64,
            missile_name: 0x64,
        },
        object_manager: ObjectManagerOffsets {
            map_count: 0x2C,
            map_root: 0x28,
            node_net_id: 0x10,
            node_object: 0x14,
        },
        missile: MissileOffsets {
            spell_info: 0x258,
            src_index: 0x2B8,
            dest_index: 0x310,
            start_pos: 0x2D0,
            end_pos: 0x2DC,
        },
        minimap: MinimapOffsets {
            object_hud: 0x88,
            hud_pos: 0x60,
            hud_size: 0x68,
        },
        renderer: RendererOffsets {
            width: 0x0C,
            height: 0x10,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_offsets_are_valid() {
        let table = builtin_offsets();
        assert!(table.is_valid());
        assert!(table.matches_version(BUILTIN_VERSION));
        assert!(!table.matches_version("11.3"));
    }

    #[test]
    fn test_builtin_object_fields_do_not_overlap_health() {
        let object = builtin_offsets().object;
        // health and max health are 4-byte floats 16 bytes apart
        assert_eq!(object.max_health - object.health, 0x10);
        assert!(object.armor > object.health);
    }
}
