use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, FromRepr, IntoStaticStr};

/// Unit classification tags as they appear in the `tags` array of the unit data
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    FromRepr,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[repr(u8)]
pub enum UnitTag {
    #[strum(serialize = "Unit_")]
    Unit = 0,
    #[strum(serialize = "Unit_Champion")]
    Champion,
    #[strum(serialize = "Unit_Champion_Clone")]
    ChampionClone,
    #[strum(serialize = "Unit_IsolationNonImpacting")]
    IsolationNonImpacting,
    #[strum(serialize = "Unit_KingPoro")]
    KingPoro,
    #[strum(serialize = "Unit_Minion")]
    Minion,
    #[strum(serialize = "Unit_Minion_Lane")]
    MinionLane,
    #[strum(serialize = "Unit_Minion_Lane_Melee")]
    MinionLaneMelee,
    #[strum(serialize = "Unit_Minion_Lane_Ranged")]
    MinionLaneRanged,
    #[strum(serialize = "Unit_Minion_Lane_Siege")]
    MinionLaneSiege,
    #[strum(serialize = "Unit_Minion_Lane_Super")]
    MinionLaneSuper,
    #[strum(serialize = "Unit_Minion_Summon")]
    MinionSummon,
    #[strum(serialize = "Unit_Minion_Summon_Large")]
    MinionSummonLarge,
    #[strum(serialize = "Unit_Monster")]
    Monster,
    #[strum(serialize = "Unit_Monster_Blue")]
    MonsterBlue,
    #[strum(serialize = "Unit_Monster_Buff")]
    MonsterBuff,
    #[strum(serialize = "Unit_Monster_Camp")]
    MonsterCamp,
    #[strum(serialize = "Unit_Monster_Crab")]
    MonsterCrab,
    #[strum(serialize = "Unit_Monster_Dragon")]
    MonsterDragon,
    #[strum(serialize = "Unit_Monster_Epic")]
    MonsterEpic,
    #[strum(serialize = "Unit_Monster_Gromp")]
    MonsterGromp,
    #[strum(serialize = "Unit_Monster_Krug")]
    MonsterKrug,
    #[strum(serialize = "Unit_Monster_Large")]
    MonsterLarge,
    #[strum(serialize = "Unit_Monster_Medium")]
    MonsterMedium,
    #[strum(serialize = "Unit_Monster_Raptor")]
    MonsterRaptor,
    #[strum(serialize = "Unit_Monster_Red")]
    MonsterRed,
    #[strum(serialize = "Unit_Monster_Wolf")]
    MonsterWolf,
    #[strum(serialize = "Unit_Plant")]
    Plant,
    #[strum(serialize = "Unit_Special")]
    Special,
    #[strum(serialize = "Unit_Special_AzirR")]
    SpecialAzirR,
    #[strum(serialize = "Unit_Special_AzirW")]
    SpecialAzirW,
    #[strum(serialize = "Unit_Special_CorkiBomb")]
    SpecialCorkiBomb,
    #[strum(serialize = "Unit_Special_EpicMonsterIgnores")]
    SpecialEpicMonsterIgnores,
    #[strum(serialize = "Unit_Special_KPMinion")]
    SpecialKpMinion,
    #[strum(serialize = "Unit_Special_MonsterIgnores")]
    SpecialMonsterIgnores,
    #[strum(serialize = "Unit_Special_Peaceful")]
    SpecialPeaceful,
    #[strum(serialize = "Unit_Special_SyndraSphere")]
    SpecialSyndraSphere,
    #[strum(serialize = "Unit_Special_TeleportTarget")]
    SpecialTeleportTarget,
    #[strum(serialize = "Unit_Special_Trap")]
    SpecialTrap,
    #[strum(serialize = "Unit_Special_Tunnel")]
    SpecialTunnel,
    #[strum(serialize = "Unit_Special_TurretIgnores")]
    SpecialTurretIgnores,
    #[strum(serialize = "Unit_Special_UntargetableBySpells")]
    SpecialUntargetableBySpells,
    #[strum(serialize = "Unit_Special_Void")]
    SpecialVoid,
    #[strum(serialize = "Unit_Special_YorickW")]
    SpecialYorickW,
    #[strum(serialize = "Unit_Structure")]
    Structure,
    #[strum(serialize = "Unit_Structure_Inhibitor")]
    StructureInhibitor,
    #[strum(serialize = "Unit_Structure_Nexus")]
    StructureNexus,
    #[strum(serialize = "Unit_Structure_Turret")]
    StructureTurret,
    #[strum(serialize = "Unit_Structure_Turret_Inhib")]
    StructureTurretInhib,
    #[strum(serialize = "Unit_Structure_Turret_Inner")]
    StructureTurretInner,
    #[strum(serialize = "Unit_Structure_Turret_Nexus")]
    StructureTurretNexus,
    #[strum(serialize = "Unit_Structure_Turret_Outer")]
    StructureTurretOuter,
    #[strum(serialize = "Unit_Structure_Turret_Shrine")]
    StructureTurretShrine,
    #[strum(serialize = "Unit_Ward")]
    Ward,
}

bitflags! {
    /// Compact set of [`UnitTag`]s, one bit per tag discriminant
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct UnitTags: u64 {
        const _ = !0;
    }
}

impl From<UnitTag> for UnitTags {
    fn from(tag: UnitTag) -> Self {
        Self::from_bits_retain(1 << (tag as u8))
    }
}

impl UnitTags {
    pub fn has(&self, tag: UnitTag) -> bool {
        self.contains(tag.into())
    }

    pub fn len(&self) -> usize {
        self.bits().count_ones() as usize
    }

    /// Tags in discriminant order
    pub fn tags(&self) -> impl Iterator<Item = UnitTag> + '_ {
        (0..u64::BITS as u8)
            .filter(|bit| self.bits() & (1 << bit) != 0)
            .filter_map(UnitTag::from_repr)
    }
}

impl FromIterator<UnitTag> for UnitTags {
    fn from_iter<I: IntoIterator<Item = UnitTag>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |tags, tag| tags | Self::from(tag))
    }
}

/// Static stats of a unit type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitInfo {
    pub name: String,
    pub acquisition_range: f32,
    pub attack_speed_ratio: f32,
    pub base_attack_range: f32,
    pub base_attack_speed: f32,
    pub base_movement_speed: f32,
    pub basic_attack_missile_speed: f32,
    pub basic_attack_windup: f32,
    pub gameplay_radius: f32,
    pub health_bar_height: f32,
    pub path_radius: f32,
    pub selection_radius: f32,
    pub tags: UnitTags,
}

impl UnitInfo {
    /// Returned by lookups for names missing from the unit data
    pub const UNKNOWN: Self = Self {
        name: String::new(),
        acquisition_range: 0.0,
        attack_speed_ratio: 0.0,
        base_attack_range: 0.0,
        base_attack_speed: 0.0,
        base_movement_speed: 0.0,
        basic_attack_missile_speed: 0.0,
        basic_attack_windup: 0.0,
        gameplay_radius: 0.0,
        health_bar_height: 0.0,
        path_radius: 0.0,
        selection_radius: 0.0,
        tags: UnitTags::empty(),
    };

    /// The shared sentinel instance lookups hand out
    pub fn unknown() -> &'static Self {
        &UNKNOWN_UNIT
    }

    pub fn has_tag(&self, tag: UnitTag) -> bool {
        self.tags.has(tag)
    }

    pub fn is_unknown(&self) -> bool {
        self.name.is_empty()
    }
}

pub(crate) static UNKNOWN_UNIT: UnitInfo = UnitInfo::UNKNOWN;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_unit_tag_from_str() {
        assert_eq!(
            UnitTag::from_str("Unit_Minion_Lane").unwrap(),
            UnitTag::MinionLane
        );
        assert_eq!(
            UnitTag::from_str("Unit_Structure_Turret_Shrine").unwrap(),
            UnitTag::StructureTurretShrine
        );
        assert!(UnitTag::from_str("Unit_Imaginary").is_err());
    }

    #[test]
    fn test_all_tags_fit_in_set() {
        assert!((UnitTag::Ward as u32) < u64::BITS);
    }

    #[test]
    fn test_unit_tags_set() {
        let tags: UnitTags = [UnitTag::Monster, UnitTag::MonsterLarge].into_iter().collect();
        assert!(tags.has(UnitTag::Monster));
        assert!(tags.has(UnitTag::MonsterLarge));
        assert!(!tags.has(UnitTag::Champion));
        assert_eq!(tags.len(), 2);
        assert_eq!(
            tags.tags().collect::<Vec<_>>(),
            vec![UnitTag::Monster, UnitTag::MonsterLarge]
        );
    }

    #[test]
    fn test_unknown_unit_is_zeroed() {
        let unknown = &UNKNOWN_UNIT;
        assert!(unknown.is_unknown());
        assert_eq!(unknown.base_attack_speed, 0.0);
        assert_eq!(unknown.gameplay_radius, 0.0);
        assert!(unknown.tags.is_empty());
    }
}
