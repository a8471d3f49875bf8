use serde::Serialize;
use strum::{Display, IntoStaticStr};

use crate::data::SpellInfo;
use crate::memory::ByteBuffer;
use crate::offset::SpellSlotOffsets;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, IntoStaticStr, Display)]
pub enum SummonerSpellType {
    #[strum(serialize = "Ghost")]
    Ghost,
    #[strum(serialize = "Heal")]
    Heal,
    #[strum(serialize = "Barrier")]
    Barrier,
    #[strum(serialize = "Exhaust")]
    Exhaust,
    #[strum(serialize = "Clarity")]
    Clarity,
    #[strum(serialize = "Mark")]
    Snowball,
    #[strum(serialize = "Flash")]
    Flash,
    #[strum(serialize = "Teleport")]
    Teleport,
    #[strum(serialize = "Cleanse")]
    Cleanse,
    #[strum(serialize = "Ignite")]
    Ignite,
    #[strum(serialize = "Smite")]
    Smite,
}

impl SummonerSpellType {
    /// Classify a summoner spell by its internal name.
    ///
    /// Matching is on a name fragment since variants such as
    /// `S5_SummonerSmiteDuel` share the base spell's fragment.
    pub fn from_spell_name(name: &str) -> Option<Self> {
        const FRAGMENTS: &[(&str, SummonerSpellType)] = &[
            ("summonerhaste", SummonerSpellType::Ghost),
            ("summonerheal", SummonerSpellType::Heal),
            ("summonerbarrier", SummonerSpellType::Barrier),
            ("summonerexhaust", SummonerSpellType::Exhaust),
            ("summonermana", SummonerSpellType::Clarity),
            ("summonersnowball", SummonerSpellType::Snowball),
            ("summonerflash", SummonerSpellType::Flash),
            ("summonerteleport", SummonerSpellType::Teleport),
            ("summonerboost", SummonerSpellType::Cleanse),
            ("summonerdot", SummonerSpellType::Ignite),
            ("summonersmite", SummonerSpellType::Smite),
        ];

        let name = name.to_lowercase();
        FRAGMENTS
            .iter()
            .find(|(fragment, _)| name.contains(fragment))
            .map(|(_, kind)| *kind)
    }
}

/// One ability slot of a champion's spell book
#[derive(Debug, Clone, Serialize)]
pub struct Spell<'a> {
    pub address: u64,
    pub slot: usize,
    pub name: String,
    pub summoner_type: Option<SummonerSpellType>,
    pub level: i32,
    /// Game time at which the spell comes off cooldown
    pub ready_at: f32,
    /// Slot value; for smite this is its damage against monsters
    pub damage: f32,
    #[serde(skip)]
    pub info: &'a SpellInfo,
}

impl<'a> Spell<'a> {
    /// Build a spell from its slot block. `name` and `info` are resolved by the caller.
    pub fn from_buffer(
        address: u64,
        slot: usize,
        buffer: &ByteBuffer,
        offsets: &SpellSlotOffsets,
        name: String,
        info: &'a SpellInfo,
    ) -> Self {
        Self {
            address,
            slot,
            summoner_type: SummonerSpellType::from_spell_name(&name),
            name,
            level: buffer.i32_at(offsets.level),
            ready_at: buffer.f32_at(offsets.time),
            damage: buffer.f32_at(offsets.damage),
            info,
        }
    }

    pub fn remaining_cooldown(&self, game_time: f32) -> f32 {
        (self.ready_at - game_time).max(0.0)
    }

    pub fn is_ready(&self, game_time: f32) -> bool {
        self.ready_at <= game_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summoner_from_name() {
        assert_eq!(
            SummonerSpellType::from_spell_name("SummonerSmite"),
            Some(SummonerSpellType::Smite)
        );
        assert_eq!(
            SummonerSpellType::from_spell_name("S5_SummonerSmitePlayerGanker"),
            Some(SummonerSpellType::Smite)
        );
        assert_eq!(
            SummonerSpellType::from_spell_name("SummonerDot"),
            Some(SummonerSpellType::Ignite)
        );
        assert_eq!(SummonerSpellType::from_spell_name("AsheQ"), None);
    }

    #[test]
    fn test_cooldown() {
        let offsets = SpellSlotOffsets {
            level: 0,
            time: 4,
            damage: 8,
            spell_info: 12,
        };
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&1i32.to_le_bytes());
        bytes.extend_from_slice(&120.0f32.to_le_bytes());
        bytes.extend_from_slice(&600.0f32.to_le_bytes());
        let buffer = ByteBuffer::new(&bytes);

        let spell = Spell::from_buffer(
            0x1000,
            4,
            &buffer,
            &offsets,
            "SummonerSmite".to_string(),
            SpellInfo::unknown(),
        );

        assert_eq!(spell.summoner_type, Some(SummonerSpellType::Smite));
        assert_eq!(spell.damage, 600.0);
        assert!(!spell.is_ready(100.0));
        assert_eq!(spell.remaining_cooldown(100.0), 20.0);
        assert!(spell.is_ready(120.0));
        assert_eq!(spell.remaining_cooldown(130.0), 0.0);
    }
}
