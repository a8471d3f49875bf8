use serde::Serialize;

use crate::data::{UnitInfo, UnitTag};
use crate::game::math::Vector3;
use crate::game::spell::{Spell, SummonerSpellType};
use crate::memory::ByteBuffer;
use crate::offset::ObjectOffsets;

/// Team ids used by the client
pub mod team {
    pub const ORDER: i16 = 100;
    pub const CHAOS: i16 = 200;
    pub const NEUTRAL: i16 = 300;
}

/// Which snapshot list an object belongs to, decided by its unit tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ObjectKind {
    Champion,
    Minion,
    Jungle,
    Turret,
    Other,
}

impl ObjectKind {
    pub fn classify(info: &UnitInfo) -> Self {
        if info.has_tag(UnitTag::Champion) {
            Self::Champion
        } else if info.has_tag(UnitTag::MinionLane) {
            Self::Minion
        } else if info.has_tag(UnitTag::Monster) {
            Self::Jungle
        } else if info.has_tag(UnitTag::StructureTurret) {
            Self::Turret
        } else {
            Self::Other
        }
    }
}

/// A unit read from the object manager
#[derive(Debug, Clone, Serialize)]
pub struct GameObject<'a> {
    pub address: u64,
    pub index: i16,
    pub team: i16,
    pub network_id: u32,
    pub name: String,
    pub position: Vector3,
    pub is_visible: bool,
    pub spawn_count: i32,
    pub health: f32,
    pub max_health: f32,
    pub mana: f32,
    pub armor: f32,
    pub magic_res: f32,
    pub base_attack: f32,
    pub bonus_attack: f32,
    pub ability_power: f32,
    pub crit: f32,
    pub crit_multi: f32,
    pub attack_speed_multi: f32,
    pub move_speed: f32,
    pub level: i32,
    pub expiry: f32,
    /// Item ids of occupied inventory slots
    pub items: Vec<u32>,
    /// Spell book; only filled for champions
    pub spells: Vec<Spell<'a>>,
    #[serde(skip)]
    pub unit_info: &'a UnitInfo,
}

impl<'a> GameObject<'a> {
    /// Decode the fixed fields of an object block.
    ///
    /// The name lives behind a pointer and is resolved by the caller along
    /// with its `UnitInfo`.
    pub fn from_buffer(
        address: u64,
        buffer: &ByteBuffer,
        offsets: &ObjectOffsets,
        name: String,
        unit_info: &'a UnitInfo,
    ) -> Self {
        Self {
            address,
            index: buffer.i16_at(offsets.index),
            team: buffer.i16_at(offsets.team),
            network_id: buffer.u32_at(offsets.network_id),
            name,
            position: Vector3::from_buffer(buffer, offsets.position),
            is_visible: buffer.u8_at(offsets.visibility) != 0,
            spawn_count: buffer.i32_at(offsets.spawn_count),
            health: buffer.f32_at(offsets.health),
            max_health: buffer.f32_at(offsets.max_health),
            mana: buffer.f32_at(offsets.mana),
            armor: buffer.f32_at(offsets.armor),
            magic_res: buffer.f32_at(offsets.magic_res),
            base_attack: buffer.f32_at(offsets.base_attack),
            bonus_attack: buffer.f32_at(offsets.bonus_attack),
            ability_power: buffer.f32_at(offsets.ability_power),
            crit: buffer.f32_at(offsets.crit),
            crit_multi: buffer.f32_at(offsets.crit_multi),
            attack_speed_multi: buffer.f32_at(offsets.attack_speed_multi),
            move_speed: buffer.f32_at(offsets.move_speed),
            level: buffer.i32_at(offsets.level),
            expiry: buffer.f32_at(offsets.expiry),
            items: Vec::new(),
            spells: Vec::new(),
            unit_info,
        }
    }

    pub fn kind(&self) -> ObjectKind {
        ObjectKind::classify(self.unit_info)
    }

    /// Damage of the next basic attack, before mitigation
    pub fn basic_attack_damage(&self) -> f32 {
        self.base_attack + self.bonus_attack
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub fn is_enemy_of(&self, other: &GameObject) -> bool {
        self.team != other.team
    }

    pub fn has_tag(&self, tag: UnitTag) -> bool {
        self.unit_info.has_tag(tag)
    }

    /// Attack range including the unit's own radius
    pub fn attack_range(&self) -> f32 {
        self.unit_info.base_attack_range + self.unit_info.gameplay_radius
    }

    pub fn get_spell(&self, slot: usize) -> Option<&Spell<'a>> {
        self.spells.iter().find(|spell| spell.slot == slot)
    }

    /// The summoner spell of the given kind, if the object has one equipped
    pub fn get_summoner_spell(&self, kind: SummonerSpellType) -> Option<&Spell<'a>> {
        self.spells
            .iter()
            .find(|spell| spell.summoner_type == Some(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SpellInfo;
    use crate::offset::builtin_offsets;

    fn object_bytes(offsets: &ObjectOffsets) -> Vec<u8> {
        let mut bytes = vec![0u8; crate::memory::layout::object::READ_SIZE];
        let mut put = |offset: u64, value: &[u8]| {
            let start = offset as usize;
            bytes[start..start + value.len()].copy_from_slice(value);
        };
        put(offsets.index, &7i16.to_le_bytes());
        put(offsets.team, &team::CHAOS.to_le_bytes());
        put(offsets.network_id, &0x4000_0042u32.to_le_bytes());
        put(offsets.position, &100.0f32.to_le_bytes());
        put(offsets.position + 8, &200.0f32.to_le_bytes());
        put(offsets.visibility, &[1]);
        put(offsets.health, &320.0f32.to_le_bytes());
        put(offsets.armor, &12.0f32.to_le_bytes());
        put(offsets.base_attack, &60.0f32.to_le_bytes());
        put(offsets.bonus_attack, &15.0f32.to_le_bytes());
        put(offsets.level, &3i32.to_le_bytes());
        bytes
    }

    #[test]
    fn test_decode_object_fields() {
        let offsets = builtin_offsets().object;
        let bytes = object_bytes(&offsets);
        let buffer = ByteBuffer::new(&bytes);

        let object = GameObject::from_buffer(
            0x2000_0000,
            &buffer,
            &offsets,
            "ashe".to_string(),
            UnitInfo::unknown(),
        );

        assert_eq!(object.index, 7);
        assert_eq!(object.team, team::CHAOS);
        assert_eq!(object.network_id, 0x4000_0042);
        assert_eq!(object.position, Vector3::new(100.0, 0.0, 200.0));
        assert!(object.is_visible);
        assert!(object.is_alive());
        assert_eq!(object.armor, 12.0);
        assert_eq!(object.level, 3);
        assert_eq!(object.basic_attack_damage(), 75.0);
    }

    #[test]
    fn test_summoner_lookup() {
        let offsets = builtin_offsets();
        let bytes = object_bytes(&offsets.object);
        let buffer = ByteBuffer::new(&bytes);
        let mut object = GameObject::from_buffer(
            0x2000_0000,
            &buffer,
            &offsets.object,
            "ashe".to_string(),
            UnitInfo::unknown(),
        );

        let slot_bytes = [0u8; 0x150];
        let slot_buffer = ByteBuffer::new(&slot_bytes);
        object.spells.push(Spell::from_buffer(
            0x3000_0000,
            4,
            &slot_buffer,
            &offsets.spell_slot,
            "SummonerFlash".to_string(),
            SpellInfo::unknown(),
        ));

        assert!(object.get_summoner_spell(SummonerSpellType::Flash).is_some());
        assert!(object.get_summoner_spell(SummonerSpellType::Smite).is_none());
        assert_eq!(object.get_spell(4).map(|s| s.name.as_str()), Some("SummonerFlash"));
        assert!(object.get_spell(0).is_none());
    }

    #[test]
    fn test_classify_by_tags() {
        let mut info = UnitInfo::UNKNOWN.clone();
        info.name = "sru_orderminionmelee".to_string();
        assert_eq!(ObjectKind::classify(&info), ObjectKind::Other);

        info.tags = [UnitTag::Minion, UnitTag::MinionLane].into_iter().collect();
        assert_eq!(ObjectKind::classify(&info), ObjectKind::Minion);

        info.tags = [UnitTag::Monster, UnitTag::MonsterLarge].into_iter().collect();
        assert_eq!(ObjectKind::classify(&info), ObjectKind::Jungle);

        info.tags = [UnitTag::Structure, UnitTag::StructureTurret]
            .into_iter()
            .collect();
        assert_eq!(ObjectKind::classify(&info), ObjectKind::Turret);
    }
}
